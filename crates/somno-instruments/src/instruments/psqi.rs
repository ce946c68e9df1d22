use serde::{Deserialize, Serialize};
use somno_core::error::ValidationError;
use somno_core::models::questionnaire::{QuestionnaireKind, QuestionnaireResult, Responses};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Item, ScoreRange};

/// Pittsburgh Sleep Quality Index, simplified three-input variant.
/// Global score 0–9 = subjective quality + latency component + duration
/// component. No textual classification.
pub struct Psqi;

const QUALITY_OPTIONS: [(u8, &str); 4] = [
    (0, "Very good"),
    (1, "Fairly good"),
    (2, "Fairly bad"),
    (3, "Very bad"),
];

pub const QUALITY_RANGE: ScoreRange = ScoreRange::new(0.0, 3.0, Some(1.0));
pub const LATENCY_RANGE: ScoreRange = ScoreRange::new(0.0, 180.0, Some(1.0));
pub const DURATION_RANGE: ScoreRange = ScoreRange::new(0.0, 12.0, Some(0.5));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PsqiAnswers {
    pub sleep_quality: u8,
    pub sleep_latency_minutes: u32,
    pub sleep_duration_hours: f64,
}

impl Default for PsqiAnswers {
    fn default() -> Self {
        Self {
            sleep_quality: 0,
            sleep_latency_minutes: 15,
            sleep_duration_hours: 7.0,
        }
    }
}

impl PsqiAnswers {
    pub fn validate(&self) -> Result<(), ValidationError> {
        QUALITY_RANGE.check("Sleep Quality", f64::from(self.sleep_quality))?;
        LATENCY_RANGE.check("Sleep Latency", f64::from(self.sleep_latency_minutes))?;
        DURATION_RANGE.check("Sleep Duration", self.sleep_duration_hours)?;
        Ok(())
    }
}

/// 0 if ≤15 min, 1 if ≤30, 2 if ≤60, else 3.
pub fn latency_component(minutes: u32) -> u32 {
    match minutes {
        0..=15 => 0,
        16..=30 => 1,
        31..=60 => 2,
        _ => 3,
    }
}

/// 0 if >7 h, 1 if >6, 2 if >5, else 3.
pub fn duration_component(hours: f64) -> u32 {
    if hours > 7.0 {
        0
    } else if hours > 6.0 {
        1
    } else if hours > 5.0 {
        2
    } else {
        3
    }
}

/// Score validated answers.
pub fn score(answers: &PsqiAnswers) -> QuestionnaireResult {
    let global = u32::from(answers.sleep_quality)
        + latency_component(answers.sleep_latency_minutes)
        + duration_component(answers.sleep_duration_hours);

    let mut responses = Responses::new();
    responses.insert(
        "Sleep Quality".to_string(),
        serde_json::Value::from(answers.sleep_quality),
    );
    responses.insert(
        "Sleep Latency".to_string(),
        serde_json::Value::from(answers.sleep_latency_minutes),
    );
    responses.insert(
        "Sleep Duration".to_string(),
        serde_json::Value::from(answers.sleep_duration_hours),
    );

    QuestionnaireResult {
        kind: QuestionnaireKind::Psqi,
        score: global,
        classification: None,
        responses,
    }
}

impl Instrument for Psqi {
    fn id(&self) -> &str {
        "psqi"
    }

    fn name(&self) -> &str {
        "Pittsburgh Sleep Quality Index (PSQI)"
    }

    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::Psqi
    }

    fn instructions(&self) -> &str {
        "Please answer these questions about your sleep quality:"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            vec![
                Item::choice(
                    "Sleep Quality",
                    "During the past month, how would you rate your sleep quality overall?",
                    &QUALITY_OPTIONS,
                ),
                Item::numeric(
                    "Sleep Latency",
                    "How long (in minutes) does it usually take you to fall asleep?",
                    LATENCY_RANGE,
                    "minutes",
                ),
                Item::numeric(
                    "Sleep Duration",
                    "How many hours of actual sleep do you get at night?",
                    DURATION_RANGE,
                    "hours",
                ),
            ]
        });
        &ITEMS
    }
}
