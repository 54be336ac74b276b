/*!
 * Error types for the xlf-auto-translate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when calling a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error building the HTTP client for a proxy route
    #[error("Invalid proxy configuration: {0}")]
    ProxyError(String),
}

/// Errors raised while reading or writing an XLIFF document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The XML reader rejected the input
    #[error("Malformed XML at byte {position}: {message}")]
    Malformed {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader error message
        message: String,
    },

    /// An element was opened but never closed
    #[error("Unclosed element <{0}>")]
    UnclosedElement(String),

    /// A closing tag without a matching opening tag
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedClosingTag(String),

    /// The document has no root element at all
    #[error("Document has no root element")]
    MissingRoot,

    /// Writing the tree back to text failed
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with the document being translated
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
