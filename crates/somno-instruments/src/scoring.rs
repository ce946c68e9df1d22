use serde::{Deserialize, Serialize};
use somno_core::error::ValidationError;
use ts_rs::TS;

/// How an item's answer is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseType {
    /// Checkbox; counts 1 when ticked.
    YesNo,
    /// Pick one of a small set of labelled ordinal codes.
    Choice,
    /// Free numeric entry within a range.
    Numeric,
}

/// Defines the valid range for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64, step: Option<f64>) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    /// Validate `value` for the named field.
    pub fn check(&self, field: &str, value: f64) -> Result<(), ValidationError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A labelled answer choice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseOption {
    pub value: u8,
    pub label: String,
}

/// A single question within an instrument.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Key under which the answer is recorded in the result's responses.
    pub id: String,
    pub prompt: String,
    pub response_type: ResponseType,
    pub range: ScoreRange,
    /// Choices in display order; empty for yes/no and numeric items.
    pub options: Vec<ResponseOption>,
    pub unit: Option<String>,
}

impl Item {
    pub(crate) fn yes_no(id: &str, prompt: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            response_type: ResponseType::YesNo,
            range: ScoreRange::new(0.0, 1.0, Some(1.0)),
            options: Vec::new(),
            unit: None,
        }
    }

    pub(crate) fn choice(id: &str, prompt: &str, options: &[(u8, &str)]) -> Self {
        let max = options.iter().map(|(v, _)| *v).max().unwrap_or(0);
        let min = options.iter().map(|(v, _)| *v).min().unwrap_or(0);
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            response_type: ResponseType::Choice,
            range: ScoreRange::new(f64::from(min), f64::from(max), Some(1.0)),
            options: options
                .iter()
                .map(|(value, label)| ResponseOption {
                    value: *value,
                    label: label.to_string(),
                })
                .collect(),
            unit: None,
        }
    }

    pub(crate) fn numeric(id: &str, prompt: &str, range: ScoreRange, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            response_type: ResponseType::Numeric,
            range,
            options: Vec::new(),
            unit: Some(unit.to_string()),
        }
    }

    pub fn option_label(&self, value: u8) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// "Yes"/"No" as recorded for checkbox answers.
pub fn yes_no(answer: bool) -> serde_json::Value {
    serde_json::Value::String(if answer { "Yes" } else { "No" }.to_string())
}
