//! Provider errors and the diagnostics surfaced to the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sdk::ClientError;
use crate::value::ValueError;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single message returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute the message refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    /// Attach the attribute path.
    pub fn at(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Errors raised while moving values between the typed surface and the
/// service payload. These indicate a bug rather than bad input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("field \"{field}\": expected {expected}, got {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("attribute \"{0}\" has no mapping in the {1} catalogue")]
    UnmappedAttribute(String, &'static str),

    #[error("service response is missing {0}")]
    MissingField(&'static str),

    #[error("attribute \"{0}\": {1} does not fit in a 32-bit integer")]
    OutOfRange(String, i64),
}

/// Errors returned by resource and data source operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Client Error: unable to {operation} {kind}, got error: {source}")]
    Client {
        kind: String,
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    #[error(
        "Unexpected Resource Configure Type: expected SonarrClient, got: {0}. Please report this issue to the provider developers."
    )]
    UnexpectedConfigureType(String),

    #[error("Unexpected Import Identifier: expected a numeric id, got: \"{0}\"")]
    UnexpectedImportIdentifier(String),

    #[error("Unconfigured Client: {0} requires a configured provider with url and api_key")]
    Unconfigured(String),

    #[error("Invalid Configuration: {}", summarize(.0))]
    InvalidConfiguration(Vec<Diagnostic>),

    #[error("Translation Error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unsupported Operation: {0}")]
    Unsupported(String),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| match &d.attribute {
            Some(attr) => format!("{}: {}", attr, d.detail),
            None => d.detail.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValueError> for ProviderError {
    fn from(err: ValueError) -> Self {
        ProviderError::Translation(TranslationError::Value(err))
    }
}

impl ProviderError {
    pub fn client(kind: impl Into<String>, operation: &'static str, source: ClientError) -> Self {
        ProviderError::Client {
            kind: kind.into(),
            operation,
            source,
        }
    }

    /// User-visible summary line.
    pub fn summary(&self) -> &'static str {
        match self {
            ProviderError::Client { .. } => "Client Error",
            ProviderError::UnexpectedConfigureType(_) => "Unexpected Resource Configure Type",
            ProviderError::UnexpectedImportIdentifier(_) => "Unexpected Import Identifier",
            ProviderError::Unconfigured(_) => "Unconfigured Client",
            ProviderError::InvalidConfiguration(_) => "Invalid Configuration",
            ProviderError::Translation(_) => "Translation Error",
            ProviderError::NotFound(_) => "Not Found",
            ProviderError::Unsupported(_) => "Unsupported Operation",
        }
    }

    /// Expand into host diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ProviderError::InvalidConfiguration(diagnostics) => diagnostics.clone(),
            ProviderError::Client {
                kind,
                operation,
                source,
            } => vec![Diagnostic::error(
                self.summary(),
                format!("Unable to {} {}, got error: {}", operation, kind, source),
            )],
            other => {
                let message = other.to_string();
                let detail = message
                    .strip_prefix(other.summary())
                    .map(|rest| rest.trim_start_matches(':').trim().to_string())
                    .unwrap_or(message);
                vec![Diagnostic::error(other.summary(), detail)]
            }
        }
    }

    /// Whether the underlying service answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::Client { source, .. } => source.is_not_found(),
            ProviderError::NotFound(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries_match_user_visible_taxonomy() {
        let err = ProviderError::client(
            "sonarr_tag",
            "create",
            ClientError::Status {
                status: 401,
                message: "Unauthorized".to_string(),
            },
        );
        assert_eq!(err.summary(), "Client Error");
        assert!(err.to_string().starts_with("Client Error"));

        let err = ProviderError::UnexpectedImportIdentifier("abc".to_string());
        assert_eq!(err.summary(), "Unexpected Import Identifier");

        let err = ProviderError::UnexpectedConfigureType("String".to_string());
        assert_eq!(err.summary(), "Unexpected Resource Configure Type");
    }

    #[test]
    fn test_client_diagnostic_carries_status() {
        let err = ProviderError::client(
            "sonarr_tag",
            "read",
            ClientError::Status {
                status: 401,
                message: "Unauthorized".to_string(),
            },
        );
        let diagnostics = err.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Client Error");
        assert!(diagnostics[0].detail.contains("401"));
    }

    #[test]
    fn test_import_diagnostic_strips_summary() {
        let err = ProviderError::UnexpectedImportIdentifier("not-a-number".to_string());
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.summary, "Unexpected Import Identifier");
        assert!(diagnostic.detail.starts_with("expected a numeric id"));
    }

    #[test]
    fn test_invalid_configuration_keeps_attribute_diagnostics() {
        let err = ProviderError::InvalidConfiguration(vec![
            Diagnostic::error("Invalid Attribute Value", "must be one of 1, 2").at("method"),
        ]);
        assert_eq!(err.diagnostics()[0].attribute.as_deref(), Some("method"));
        assert!(err.to_string().contains("method: must be one of 1, 2"));
    }

    #[test]
    fn test_not_found_detection() {
        let err = ProviderError::client(
            "sonarr_tag",
            "read",
            ClientError::Status {
                status: 404,
                message: "NotFound".to_string(),
            },
        );
        assert!(err.is_not_found());
    }
}
