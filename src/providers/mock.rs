/*!
 * Mock translator for testing.
 *
 * The mock never touches the network. It can:
 * - `MockTranslator::echo()` - prefix the target language: `[fr] Hello`
 * - `MockTranslator::dictionary(..)` - look up exact (trimmed) phrases
 * - `MockTranslator::failing()` - always fail with an API error
 *
 * Every call is recorded with its start time so tests can check the
 * dispatcher's spacing and concurrency limits.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::{LanguagePair, ProxyRoute, Translator};
use crate::errors::ProviderError;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return `[<to>] <text>` for any input
    Echo,
    /// Return the dictionary entry; unknown text fails
    Dictionary(HashMap<String, String>),
    /// Always fail
    Failing,
}

/// One recorded call
#[derive(Debug, Clone)]
pub struct MockCall {
    pub text: String,
    pub pair: LanguagePair,
    pub route: ProxyRoute,
    pub started_at: Instant,
}

/// In-memory translator with call recording
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn dictionary<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(MockBehavior::Dictionary(entries))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Make every call take at least `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Recorded calls in start order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Highest number of calls that were running at the same time
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn respond(&self, text: &str, pair: &LanguagePair) -> Result<String, ProviderError> {
        match &self.behavior {
            MockBehavior::Echo => Ok(format!("[{}] {}", pair.to, text.trim())),
            MockBehavior::Dictionary(entries) => entries.get(text.trim()).cloned().ok_or_else(|| {
                ProviderError::ApiError {
                    status_code: 404,
                    message: format!("No mock translation for {:?}", text),
                }
            }),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
        route: &ProxyRoute,
    ) -> Result<String, ProviderError> {
        self.calls.lock().push(MockCall {
            text: text.to_string(),
            pair: pair.clone(),
            route: route.clone(),
            started_at: Instant::now(),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = self.respond(text, pair);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn name(&self) -> &str {
        "mock"
    }
}
