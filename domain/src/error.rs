//! Error types for the `domain` layer.
use crate::gateway::gemini::UPSTREAM_FAILURE_MESSAGE;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur while relaying a request.
/// The `source` field holds the original error that caused the domain error, if any.
/// The `web` layer uses the `error_kind` to pick the HTTP status code and the message
/// that is returned to the client; `source` is only ever logged.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Errors detected locally, before any outbound call is made.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// Caller input is missing or malformed.
    Validation(String),
    /// A deployment secret is missing. The message names the secret.
    Config(String),
    Other(String),
}

/// Errors reported by, or while talking to, a third-party service.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The generation API failed or returned an error payload.
    Upstream(String),
    /// The mail relay did not accept the message.
    Delivery(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::internal(InternalErrorKind::Validation(message.into()))
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::internal(InternalErrorKind::Config(message.into()))
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::external(ExternalErrorKind::Upstream(message.into()))
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::external(ExternalErrorKind::Delivery(message.into()))
    }

    /// Attaches the underlying cause, kept for logging only.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The client-safe description of this error.
    pub fn message(&self) -> &str {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Validation(msg))
            | DomainErrorKind::Internal(InternalErrorKind::Config(msg))
            | DomainErrorKind::Internal(InternalErrorKind::Other(msg))
            | DomainErrorKind::External(ExternalErrorKind::Upstream(msg))
            | DomainErrorKind::External(ExternalErrorKind::Delivery(msg)) => msg,
        }
    }

    fn internal(kind: InternalErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(kind),
        }
    }

    fn external(kind: ExternalErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {:?}: {}", self.error_kind, self.message())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry the API key as a query parameter.
        let err = err.without_url();
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error::internal(InternalErrorKind::Other(
                "Failed to build reqwest client".to_string(),
            ))
            .with_source(err)
        // Errors that result from issues with the network call itself. The transport
        // text stays in `source`; clients only see the generic message.
        } else {
            Error::upstream(UPSTREAM_FAILURE_MESSAGE).with_source(err)
        }
    }
}
