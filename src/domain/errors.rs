//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. `AnalysisFailure`
//! never escapes the pipeline: it is folded into an `AnalysisOutcome`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Provider request failed: {0}")]
    Provider(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Store error: {0}")]
    Store(String),

    /// Message is shown to the user verbatim.
    #[error("{0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

/// Why an analysis produced an error outcome. `Display` is the user-facing text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisFailure {
    #[error("API Error: {status} {status_text}")]
    Transport { status: u16, status_text: String },

    #[error("No content in API response")]
    EmptyContent,

    /// Raw model text is kept so the caller can still show something.
    #[error("Could not parse the analysis result")]
    Decode { raw_content: String },

    #[error("{0}")]
    Request(String),
}

impl From<DomainError> for AnalysisFailure {
    fn from(err: DomainError) -> Self {
        AnalysisFailure::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message() {
        let f = AnalysisFailure::Transport {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(f.to_string(), "API Error: 500 Internal Server Error");
    }

    #[test]
    fn test_domain_error_into_request_failure() {
        let f: AnalysisFailure = DomainError::Provider("connection refused".into()).into();
        assert_eq!(
            f.to_string(),
            "Provider request failed: connection refused"
        );
    }
}
