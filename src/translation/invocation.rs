/*!
 * A single translator call for one text leaf.
 *
 * `invoke` never fails: a provider error replaces the leaf with a visible
 * marker so the document can still be written, and the error is reported in
 * the returned outcome.
 */

use log::{debug, error};

use super::selector::Job;
use crate::errors::ProviderError;
use crate::providers::{LanguagePair, ProxyRoute, Translator};

/// Text written into a leaf whose translation failed
pub const FAILURE_MARKER: &str = "[WARN] Failed to translate";

/// Result of one invocation
#[derive(Debug)]
pub enum JobOutcome {
    Translated,
    Failed { source: String, error: ProviderError },
}

impl JobOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Translate one leaf and write the result back into the document
pub async fn invoke(
    job: Job<'_>,
    translator: &dyn Translator,
    pair: &LanguagePair,
    route: &ProxyRoute,
) -> JobOutcome {
    let source = job.source_text().to_string();

    match translator.translate(&source, pair, route).await {
        Ok(translated) => {
            let translated = repair_whitespace(&source, translated);
            debug!("Translated {:?} -> {:?}", source, translated);
            job.complete(translated);
            JobOutcome::Translated
        }
        Err(e) => {
            error!("Failed to translate {:?} ({}) via {}: {:?}", source, pair, route, e);
            job.complete(FAILURE_MARKER);
            JobOutcome::Failed { source, error: e }
        }
    }
}

/// Put back a single leading or trailing space the translator dropped
pub fn repair_whitespace(source: &str, translated: String) -> String {
    let mut repaired = translated;
    if source.starts_with(' ') && !repaired.starts_with(' ') {
        repaired.insert(0, ' ');
    }
    if source.ends_with(' ') && !repaired.ends_with(' ') {
        repaired.push(' ');
    }
    repaired
}
