// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;

use xlf_auto_translate::app_config::{Config, LogLevel};
use xlf_auto_translate::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for xlf-auto-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input XLIFF file
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (default: <input stem>.<to>.<ext> next to the input)
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Source language code (e.g. 'en', or 'auto')
    #[arg(short = 'f', long = "from")]
    from: Option<String>,

    /// Target language code (e.g. 'fr', 'zh-CN')
    #[arg(short = 't', long = "to")]
    to: Option<String>,

    /// Minimum delay between two requests, in milliseconds
    #[arg(short = 'r', long = "rate")]
    rate: Option<u64>,

    /// Maximum number of concurrent requests
    #[arg(short = 'c', long = "concurrent")]
    concurrent: Option<usize>,

    /// Proxy URL for translation requests
    #[arg(short = 'p', long = "proxy")]
    proxy: Option<String>,

    /// Route requests through the local proxy on 127.0.0.1:9000
    #[arg(long = "auto-proxy")]
    auto_proxy: bool,

    /// Write a placeholder text instead of translating
    #[arg(short = 's', long = "skip")]
    skip: bool,

    /// Update the state attribute of processed units
    #[arg(long = "clear-state")]
    clear_state: bool,

    /// Mark XLIFF 1.x units with a final target as approved
    #[arg(long = "add-approved")]
    add_approved: bool,

    /// Configuration file path (JSON)
    #[arg(long = "config", value_name = "FILE")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short = 'l', long = "log-level", value_enum)]
    log_level: Option<CliLogLevel>,
}

impl TranslateArgs {
    /// Apply command line overrides on top of a configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(from) = &self.from {
            config.source_language = from.clone();
        }
        if let Some(to) = &self.to {
            config.target_language = to.clone();
        }
        if let Some(rate) = self.rate {
            config.translation.rate_limit_delay_ms = rate;
        }
        if let Some(concurrent) = self.concurrent {
            config.translation.concurrent_requests = concurrent;
        }
        if let Some(proxy) = &self.proxy {
            config.translation.proxy = Some(proxy.clone());
        }
        config.translation.auto_proxy |= self.auto_proxy;
        config.processing.skip |= self.skip;
        config.processing.clear_state |= self.clear_state;
        config.processing.add_approved_to_state_final |= self.add_approved;
        if let Some(log_level) = self.log_level {
            config.log_level = log_level.into();
        }
    }
}

/// xlf-auto-translate - fill in missing XLIFF translations
///
/// Translates every new or missing target of an XLIFF 1.x / 2.0 document
/// through Google Translate, leaving approved entries untouched.
#[derive(Parser, Debug)]
#[command(name = "xlf-auto-translate")]
#[command(version)]
#[command(about = "Automatic translation of XLIFF files")]
#[command(long_about = "xlf-auto-translate fills in missing or new translations of XLIFF 1.x and 2.0 documents.

EXAMPLES:
    xlf-auto-translate -i messages.xlf -f en -t fr                 # Writes messages.fr.xlf
    xlf-auto-translate -i messages.xlf -o messages.de.xlf -t de    # Explicit output path
    xlf-auto-translate -i messages.xlf -t es -r 1000 -c 2          # Slower, gentler requests
    xlf-auto-translate -i messages.xlf -t it --skip --clear-state  # No network, boilerplate only
    xlf-auto-translate -i messages.xlf -t ja --auto-proxy          # Through 127.0.0.1:9000
    xlf-auto-translate completions bash > xlf-auto-translate.bash  # Generate bash completions

CONFIGURATION:
    Settings can be read from a JSON file with --config. Command line flags
    override values from the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "xlf-auto-translate", &mut std::io::stdout());
        return Ok(());
    }

    let input_label = cli
        .translate
        .input
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<no input>".to_string());

    if let Err(e) = run_translate(cli.translate).await {
        error!("X Something went wrong while translating {}!", input_label);
        error!("{:?}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // A command line log level applies before the config file is read
    if let Some(level) = options.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let input = options
        .input
        .clone()
        .ok_or_else(|| anyhow!("An input file is required (-i/--in)"))?;

    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    options.apply_to(&mut config);

    // Without a config file the target language must come from the command line
    if options.config_path.is_none() && options.to.is_none() {
        return Err(anyhow!("A target language is required (-t/--to)"));
    }

    config.validate().map_err(|e| e.context("Configuration validation failed"))?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller.run(input, options.output.clone()).await?;

    Ok(())
}
