/*!
 * Provider implementations for machine translation services.
 *
 * This module contains the translator abstraction and its implementations:
 * - `google`: Google Translate web endpoint over HTTP
 * - `mock`: Deterministic in-memory translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::{self, Debug};
use url::Url;

use crate::errors::ProviderError;

/// Local proxy used when automatic proxying is enabled
pub const AUTO_PROXY_ENDPOINT: &str = "http://127.0.0.1:9000";

/// Source and target language of a translation run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    /// Source language code, or `auto` to let the provider detect it
    pub from: String,
    /// Target language code
    pub to: String,
}

impl LanguagePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// How outgoing translation requests reach the network
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProxyRoute {
    /// No proxy
    Direct,
    /// User-supplied proxy URL
    Explicit(Url),
    /// The local proxy at `AUTO_PROXY_ENDPOINT`
    AutoLocal,
}

impl ProxyRoute {
    /// Pick the route for a run; an explicit proxy wins over auto-proxy
    pub fn resolve(proxy: Option<&str>, auto_proxy: bool) -> Result<Self, ProviderError> {
        match proxy.map(str::trim).filter(|p| !p.is_empty()) {
            Some(proxy) => Url::parse(proxy)
                .map(Self::Explicit)
                .map_err(|e| ProviderError::ProxyError(format!("{}: {}", proxy, e))),
            None if auto_proxy => Ok(Self::AutoLocal),
            None => Ok(Self::Direct),
        }
    }

    /// Proxy URL to hand to the HTTP client, if any
    pub fn proxy_url(&self) -> Option<String> {
        match self {
            Self::Direct => None,
            Self::Explicit(url) => Some(url.to_string()),
            Self::AutoLocal => Some(AUTO_PROXY_ENDPOINT.to_string()),
        }
    }
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Explicit(url) => write!(f, "proxy {}", url),
            Self::AutoLocal => write!(f, "auto proxy {}", AUTO_PROXY_ENDPOINT),
        }
    }
}

/// Common trait for all translation providers
///
/// Implementations must be shareable across the concurrent requests of a
/// dispatch run.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single piece of text
    ///
    /// # Arguments
    /// * `text` - The text to translate, including any surrounding whitespace
    /// * `pair` - Source and target language
    /// * `route` - Network route for the request
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
        route: &ProxyRoute,
    ) -> Result<String, ProviderError>;

    /// Short provider name used in log lines
    fn name(&self) -> &str;
}

pub mod google;
pub mod mock;
