//! Error type definitions.
//!
//! This module defines the error and info types used throughout the crate.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure reported by a [`NetworkProbe`](crate::NetworkProbe).
///
/// Every variant is terminal for the URL being resolved; the resolver never
/// retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The probe did not complete within the configured timeout.
    #[error("probe timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The connection could not be established (DNS, refused, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request was sent but failed before a response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The URL could not be turned into a request.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The response body could not be read.
    #[error("body read failed: {0}")]
    Body(String),
}

impl ProbeError {
    /// Returns the statistics category of this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ProbeError::Timeout(_) => ErrorType::ProbeTimeoutError,
            ProbeError::Connect(_) => ErrorType::ProbeConnectError,
            ProbeError::Request(_) => ErrorType::ProbeRequestError,
            ProbeError::InvalidUrl(_) => ErrorType::InvalidUrlError,
            ProbeError::Body(_) => ErrorType::ProbeBodyError,
        }
    }
}

/// Types of errors that can occur while resolving a URL.
///
/// Recorded on a [`RedirectOutcome`](crate::RedirectOutcome) and counted by
/// [`ProcessingStats`](crate::ProcessingStats).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::enum_variant_names)]
pub enum ErrorType {
    /// Probe exceeded its timeout
    ProbeTimeoutError,
    /// Connection could not be established
    ProbeConnectError,
    /// Request failed after connecting
    ProbeRequestError,
    /// Body could not be read
    ProbeBodyError,
    /// URL could not be used for a request
    InvalidUrlError,
}

/// Types of informational metrics recorded while resolving URLs.
///
/// Info metrics are notable events that are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// At least one redirect was followed
    Redirected,
    /// Resolution stopped at the hop limit
    MaxRedirectsReached,
    /// Terminal page looked like a consent interstitial
    CookieWallSuspected,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ProbeTimeoutError => "Probe timeout error",
            ErrorType::ProbeConnectError => "Probe connect error",
            ErrorType::ProbeRequestError => "Probe request error",
            ErrorType::ProbeBodyError => "Probe body error",
            ErrorType::InvalidUrlError => "Invalid URL error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Redirected => "Redirected",
            InfoType::MaxRedirectsReached => "Maximum redirects reached",
            InfoType::CookieWallSuspected => "Cookie wall suspected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str() {
        assert_eq!(ErrorType::ProbeTimeoutError.as_str(), "Probe timeout error");
        assert_eq!(ErrorType::InvalidUrlError.as_str(), "Invalid URL error");
    }

    #[test]
    fn test_all_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty(), "{:?}", error_type);
        }
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty(), "{:?}", info_type);
        }
    }

    #[test]
    fn test_probe_error_maps_to_error_type() {
        assert_eq!(
            ProbeError::Timeout(Duration::from_secs(1)).error_type(),
            ErrorType::ProbeTimeoutError
        );
        assert_eq!(
            ProbeError::Connect("refused".into()).error_type(),
            ErrorType::ProbeConnectError
        );
        assert_eq!(
            ProbeError::InvalidUrl("x".into()).error_type(),
            ErrorType::InvalidUrlError
        );
    }

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "probe timed out after 1500ms");
        let err = ProbeError::Connect("connection refused".into());
        assert_eq!(err.to_string(), "connection failed: connection refused");
    }

    #[test]
    fn test_error_type_serializes_as_camel_case() {
        let json = serde_json::to_string(&ErrorType::ProbeConnectError).unwrap();
        assert_eq!(json, "\"probeConnectError\"");
    }
}
