/*!
 * Core translation service implementation.
 *
 * The service assembles a translated document in two phases:
 *
 * 1. a synchronous walk that creates missing targets, updates states and
 *    collects one job per text leaf that needs translating;
 * 2. a rate-limited dispatch of those jobs through the translator, each job
 *    writing its result straight into the tree.
 *
 * The tree is serialized only after every job has settled.
 */

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::dispatcher::{DispatchSettings, Dispatcher};
use super::invocation::{JobOutcome, invoke};
use super::placeholders::PlaceholderFilter;
use super::selector::{SelectionOptions, SelectionReport, UnitSelector};
use super::walker::{FileStamp, Walk, walk};
use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::google::GoogleTranslator;
use crate::providers::{LanguagePair, ProxyRoute, Translator};
use crate::xliff::{XliffDocument, XliffVersion};

/// Translation options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOptions {
    /// Languages as sent to the provider
    pub pair: LanguagePair,

    /// Target language written on file elements, as configured
    pub target_language: String,

    /// Concurrency and spacing of requests
    pub dispatch: DispatchSettings,

    /// Network route of every request
    pub route: ProxyRoute,

    /// Unit selection switches
    pub selection: SelectionOptions,
}

impl TranslationOptions {
    /// Build run options from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let from = language_utils::to_provider_code(&config.source_language)
            .context("Invalid source language")?;
        let to = language_utils::to_provider_code(&config.target_language)
            .context("Invalid target language")?;
        let route = ProxyRoute::resolve(config.translation.proxy.as_deref(), config.translation.auto_proxy)?;

        Ok(Self {
            pair: LanguagePair::new(from, to),
            target_language: config.target_language.clone(),
            dispatch: DispatchSettings::new(
                config.translation.concurrent_requests,
                Duration::from_millis(config.translation.rate_limit_delay_ms),
            ),
            route,
            selection: SelectionOptions {
                skip: config.processing.skip,
                clear_state: config.processing.clear_state,
                add_approved_to_state_final: config.processing.add_approved_to_state_final,
            },
        })
    }
}

/// Outcome of translating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSummary {
    pub version: XliffVersion,
    pub units_visited: usize,
    /// Leaves translated successfully
    pub translated: usize,
    /// Leaves replaced by the failure marker
    pub failed: usize,
    pub selection: SelectionReport,
}

impl TranslationSummary {
    /// Number of text leaves filled in: translations and boilerplate.
    /// Leaves replaced by the failure marker are counted in `failed` only.
    pub fn messages(&self) -> usize {
        self.translated + self.selection.boilerplate_leaves
    }
}

/// Serialized document plus its summary
#[derive(Debug, Clone)]
pub struct TranslatedXliff {
    pub xml: String,
    pub summary: TranslationSummary,
}

/// Main translation service for XLIFF documents
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider implementation
    translator: Arc<dyn Translator>,

    /// Translation options
    pub options: TranslationOptions,

    /// Text that must never reach the translator
    filter: PlaceholderFilter,
}

impl TranslationService {
    /// Create a new translation service around an existing translator
    pub fn new(translator: Arc<dyn Translator>, options: TranslationOptions, filter: PlaceholderFilter) -> Self {
        Self {
            translator,
            options,
            filter,
        }
    }

    /// Create a service backed by Google Translate from a configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let translator = GoogleTranslator::new(
            config.translation.endpoint.clone(),
            Duration::from_secs(config.translation.timeout_secs),
        );
        Self::with_translator(config, Arc::new(translator))
    }

    /// Create a service from a configuration with a given translator
    pub fn with_translator(config: &Config, translator: Arc<dyn Translator>) -> Result<Self> {
        let options = TranslationOptions::from_config(config)?;
        let filter = PlaceholderFilter::with_patterns(&config.processing.extra_placeholder_patterns)?;
        Ok(Self::new(translator, options, filter))
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Translate a document in place, dated now
    pub async fn translate_document<P>(&self, document: &mut XliffDocument, progress: P) -> TranslationSummary
    where
        P: FnMut(usize, usize),
    {
        let stamp = FileStamp::now(self.options.target_language.clone());
        self.translate_document_with_stamp(document, &stamp, progress).await
    }

    /// Translate a document in place with an explicit file stamp
    pub async fn translate_document_with_stamp<P>(
        &self,
        document: &mut XliffDocument,
        stamp: &FileStamp,
        progress: P,
    ) -> TranslationSummary
    where
        P: FnMut(usize, usize),
    {
        let selector = UnitSelector::new(self.filter.clone(), self.options.selection);
        let Walk { jobs, report } = walk(document.root_mut(), &selector, stamp);

        let outcomes = if jobs.is_empty() {
            Vec::new()
        } else {
            info!(
                "Translating {} messages ({}) with {} via {}",
                jobs.len(),
                self.options.pair,
                self.translator.name(),
                self.options.route
            );
            let translator = self.translator.as_ref();
            let pair = &self.options.pair;
            let route = &self.options.route;
            Dispatcher::new(self.options.dispatch)
                .run_all(jobs, |job| invoke(job, translator, pair, route), progress)
                .await
        };

        let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
        let translated = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, JobOutcome::Translated))
            .count();
        if failed > 0 {
            warn!("{} of {} messages could not be translated", failed, outcomes.len());
        }

        TranslationSummary {
            version: report.version,
            units_visited: report.units_visited,
            translated,
            failed,
            selection: report.selection,
        }
    }

    /// Parse, translate and serialize an XLIFF document
    pub async fn translate_xml(&self, xml: &str) -> Result<TranslatedXliff, TranslationError> {
        self.translate_xml_with_progress(xml, |_, _| {}).await
    }

    /// Same as `translate_xml`, reporting `(completed, total)` after each request
    pub async fn translate_xml_with_progress<P>(&self, xml: &str, progress: P) -> Result<TranslatedXliff, TranslationError>
    where
        P: FnMut(usize, usize),
    {
        let mut document = XliffDocument::parse(xml)?;
        let summary = self.translate_document(&mut document, progress).await;
        let xml = document.to_xml()?;
        Ok(TranslatedXliff { xml, summary })
    }
}
