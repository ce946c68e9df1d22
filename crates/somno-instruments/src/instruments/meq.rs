use std::fmt;

use serde::{Deserialize, Serialize};
use somno_core::error::ValidationError;
use somno_core::models::questionnaire::{QuestionnaireKind, QuestionnaireResult, Responses};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Item, ScoreRange};

/// Morningness-Eveningness Questionnaire, two-item variant.
/// Each item is an ordinal code 0–5 (higher = earlier); score is the sum
/// times ten (0–100).
pub struct Meq;

pub const WAKE_TIME_OPTIONS: [(u8, &str); 6] = [
    (5, "5:00 – 6:30 AM"),
    (4, "6:30 – 7:45 AM"),
    (3, "7:45 – 9:45 AM"),
    (2, "9:45 – 11:00 AM"),
    (1, "11:00 AM – 12 NOON"),
    (0, "After 12 NOON"),
];

pub const BED_TIME_OPTIONS: [(u8, &str); 6] = [
    (5, "8:00 – 9:00 PM"),
    (4, "9:00 – 10:15 PM"),
    (3, "10:15 PM – 12:30 AM"),
    (2, "12:30 – 1:45 AM"),
    (1, "1:45 – 3:00 AM"),
    (0, "After 3:00 AM"),
];

const CODE_RANGE: ScoreRange = ScoreRange::new(0.0, 5.0, Some(1.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MeqAnswers {
    pub preferred_wake_time: u8,
    pub preferred_bed_time: u8,
}

impl Default for MeqAnswers {
    fn default() -> Self {
        Self {
            preferred_wake_time: 4,
            preferred_bed_time: 4,
        }
    }
}

impl MeqAnswers {
    pub fn validate(&self) -> Result<(), ValidationError> {
        CODE_RANGE.check("Preferred Wake Time", f64::from(self.preferred_wake_time))?;
        CODE_RANGE.check("Preferred Bedtime", f64::from(self.preferred_bed_time))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Chronotype {
    DefinitelyMorning,
    ModeratelyMorning,
    NeitherType,
    ModeratelyEvening,
    DefinitelyEvening,
}

impl Chronotype {
    /// Descending thresholds, first match wins.
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            Chronotype::DefinitelyMorning
        } else if score >= 59 {
            Chronotype::ModeratelyMorning
        } else if score >= 42 {
            Chronotype::NeitherType
        } else if score >= 31 {
            Chronotype::ModeratelyEvening
        } else {
            Chronotype::DefinitelyEvening
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Chronotype::DefinitelyMorning => "Definitely Morning",
            Chronotype::ModeratelyMorning => "Moderately Morning",
            Chronotype::NeitherType => "Neither Type",
            Chronotype::ModeratelyEvening => "Moderately Evening",
            Chronotype::DefinitelyEvening => "Definitely Evening",
        }
    }
}

impl fmt::Display for Chronotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score validated answers.
pub fn score(answers: &MeqAnswers) -> QuestionnaireResult {
    let total = (u32::from(answers.preferred_wake_time) + u32::from(answers.preferred_bed_time)) * 10;

    let mut responses = Responses::new();
    responses.insert(
        "Preferred Wake Time".to_string(),
        serde_json::Value::from(answers.preferred_wake_time),
    );
    responses.insert(
        "Preferred Bedtime".to_string(),
        serde_json::Value::from(answers.preferred_bed_time),
    );

    QuestionnaireResult {
        kind: QuestionnaireKind::Meq,
        score: total,
        classification: Some(Chronotype::from_score(total).label().to_string()),
        responses,
    }
}

impl Instrument for Meq {
    fn id(&self) -> &str {
        "meq"
    }

    fn name(&self) -> &str {
        "Morningness-Eveningness Questionnaire"
    }

    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::Meq
    }

    fn instructions(&self) -> &str {
        "Please answer these questions about your daily preferences:"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            vec![
                Item::choice(
                    "Preferred Wake Time",
                    "What time would you get up if you were entirely free to plan your day?",
                    &WAKE_TIME_OPTIONS,
                ),
                Item::choice(
                    "Preferred Bedtime",
                    "What time would you go to bed if you were entirely free to plan your evening?",
                    &BED_TIME_OPTIONS,
                ),
            ]
        });
        &ITEMS
    }
}
