/*!
 * Tests for error types and conversions
 */

use xlf_auto_translate::errors::{AppError, DocumentError, ProviderError, TranslationError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_rateLimitExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::RateLimitExceeded("429 Too Many Requests".to_string());
    assert!(format!("{}", error).contains("Rate limit exceeded"));
}

#[test]
fn test_documentError_malformed_shouldIncludePosition() {
    let error = DocumentError::Malformed {
        position: 42,
        message: "expected `</file>`".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("42"));
    assert!(display.contains("</file>"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrap() {
    let error: TranslationError = ProviderError::ConnectionError("refused".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(_)));
    assert!(format!("{}", error).contains("refused"));
}

#[test]
fn test_translationError_fromDocumentError_shouldWrap() {
    let error: TranslationError = DocumentError::MissingRoot.into();
    assert!(matches!(error, TranslationError::Document(DocumentError::MissingRoot)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "messages.xlf");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "boom"));
}

#[test]
fn test_appError_config_shouldDisplayCorrectly() {
    let error = AppError::Config("concurrent_requests must be greater than 0".to_string());
    assert!(format!("{}", error).starts_with("Configuration error"));
}
