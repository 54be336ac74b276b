use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::providers::Translator;
use crate::translation::{TranslationService, TranslationSummary};

// @module: Application controller for XLIFF translation

/// Result of one controller run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub summary: TranslationSummary,
    pub elapsed: Duration,
}

/// Main application controller for XLIFF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Service shared by every run
    service: TranslationService,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller backed by Google Translate
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::from_config(&config)?;
        Ok(Self { config, service })
    }

    // @method: Create a new controller with a custom translator
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Result<Self> {
        let service = TranslationService::with_translator(&config, translator)?;
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Translate `input_file` and write the result
    ///
    /// Without `output_file` the result is written next to the input as
    /// `<stem>.<target>.<ext>`. Nothing is written when translation fails.
    pub async fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>) -> Result<RunReport> {
        let start_time = Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if FileManager::detect_file_type(&input_file)? == FileType::Unknown {
            warn!("{} does not look like an XLIFF file, trying anyway", input_file.display());
        }

        let output_path = output_file.unwrap_or_else(|| {
            FileManager::generate_output_path(&input_file, &self.config.target_language)
        });
        if output_path == input_file {
            warn!("Output path equals input path, the source document will be overwritten");
        }

        let target_name = language_utils::get_language_name(&self.config.target_language)
            .unwrap_or_else(|_| self.config.target_language.clone());
        info!(
            "Translating {} to {} with {}",
            input_file.display(),
            target_name,
            self.service.translator_name()
        );

        let content = FileManager::read_to_string(&input_file)?;

        let progress_bar = Self::progress_bar();
        let pb = progress_bar.clone();
        let result = self
            .service
            .translate_xml_with_progress(&content, move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        let translated = result.with_context(|| format!("Failed to translate {}", input_file.display()))?;
        debug!("Translation summary: {:?}", translated.summary);

        FileManager::write_to_file(&output_path, &translated.xml)?;

        let elapsed = start_time.elapsed();
        if translated.summary.failed > 0 {
            warn!(
                "{} messages of {} could not be translated and were marked for review",
                translated.summary.failed,
                input_file.display()
            );
        }
        info!(
            "✓ Finished translating {} messages for {} in {}ms",
            translated.summary.messages(),
            input_file.display(),
            elapsed.as_millis()
        );
        info!("Success: {}", output_path.display());

        Ok(RunReport {
            output_path,
            summary: translated.summary,
            elapsed,
        })
    }

    fn progress_bar() -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages ({percent}%) {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }
}
