use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::questionnaire::QuestionnaireKind;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("patient information has not been collected")]
    MissingPatient,

    #[error("missing {0} result")]
    MissingResult(QuestionnaireKind),
}

/// A step's raw input was incomplete or outside its declared range.
///
/// Recoverable: the session stays on the same step and the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    Missing { field: String },

    #[error("{field}: {value} is outside range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Failure of the single outbound submission call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("record could not be built: {0}")]
    Record(String),
}

impl From<CoreError> for SubmissionError {
    fn from(err: CoreError) -> Self {
        Self::Record(err.to_string())
    }
}
