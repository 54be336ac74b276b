use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::AppError;
use crate::providers::google::DEFAULT_ENDPOINT;
use crate::translation::placeholders::PlaceholderFilter;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (ISO), or `auto`
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation request settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Document processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation request configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Minimum delay in milliseconds between two request starts
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Maximum number of concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Proxy URL used for every request
    #[serde(default)]
    pub proxy: Option<String>,

    /// Route requests through the local proxy when no explicit proxy is set
    #[serde(default)]
    pub auto_proxy: bool,

    /// Translation endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            concurrent_requests: default_concurrent_requests(),
            proxy: None,
            auto_proxy: false,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Document processing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProcessingConfig {
    /// Write a boilerplate text instead of calling the translator
    #[serde(default)]
    pub skip: bool,

    /// Update the state of processed units
    #[serde(default)]
    pub clear_state: bool,

    /// Add `approved="yes"` to XLIFF 1.x units whose target is `final`
    #[serde(default)]
    pub add_approved_to_state_final: bool,

    /// Extra regular expressions matching text that must not be translated
    #[serde(default)]
    pub extra_placeholder_patterns: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_rate_limit_delay_ms() -> u64 {
    500 // 500ms default delay between request starts
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !crate::language_utils::is_auto_detect(&self.source_language) {
            crate::language_utils::validate_language_code(&self.source_language)
                .map_err(|e| AppError::Config(format!("Invalid source language: {}", e)))?;
        }
        crate::language_utils::validate_language_code(&self.target_language)
            .map_err(|e| AppError::Config(format!("Invalid target language: {}", e)))?;

        if self.translation.concurrent_requests == 0 {
            return Err(anyhow!(AppError::Config(
                "concurrent_requests must be greater than 0".to_string()
            )));
        }

        if let Some(proxy) = self.translation.proxy.as_deref() {
            Url::parse(proxy)
                .map_err(|e| AppError::Config(format!("Invalid proxy URL '{}': {}", proxy, e)))?;
        }

        Url::parse(&self.translation.endpoint).map_err(|e| {
            AppError::Config(format!("Invalid endpoint '{}': {}", self.translation.endpoint, e))
        })?;

        PlaceholderFilter::with_patterns(&self.processing.extra_placeholder_patterns)
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            translation: TranslationConfig::default(),
            processing: ProcessingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
