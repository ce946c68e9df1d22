use std::fmt;

use serde::{Deserialize, Serialize};
use somno_core::error::ValidationError;
use somno_core::models::questionnaire::{QuestionnaireKind, QuestionnaireResult, Responses};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Item, ScoreRange};

/// Epworth Sleepiness Scale.
/// 8 situations, each rated 0–3 for chance of dozing. Total 0–24.
pub struct Epworth;

pub const SITUATIONS: [&str; 8] = [
    "Sitting and reading",
    "Watching TV",
    "Sitting inactive in a public place",
    "As a passenger in a car for 1 hour without break",
    "Lying down to rest in the afternoon",
    "Sitting and talking to someone",
    "Sitting quietly after lunch without alcohol",
    "In a car, while stopped for a few minutes in traffic",
];

const RATING_OPTIONS: [(u8, &str); 4] = [
    (0, "Would never doze"),
    (1, "Slight chance"),
    (2, "Moderate chance"),
    (3, "High chance"),
];

const RATING_RANGE: ScoreRange = ScoreRange::new(0.0, 3.0, Some(1.0));

/// One dozing-chance rating per situation, in [`SITUATIONS`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EpworthAnswers {
    pub ratings: [u8; 8],
}

impl EpworthAnswers {
    pub fn new(ratings: [u8; 8]) -> Self {
        Self { ratings }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (situation, rating) in SITUATIONS.iter().zip(self.ratings) {
            RATING_RANGE.check(situation, f64::from(rating))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SleepinessLevel {
    Normal,
    Borderline,
    Mild,
    Moderate,
    Severe,
}

impl SleepinessLevel {
    /// Inclusive upper bounds, checked in ascending order.
    pub fn from_score(total: u32) -> Self {
        match total {
            0..=10 => SleepinessLevel::Normal,
            11..=12 => SleepinessLevel::Borderline,
            13..=15 => SleepinessLevel::Mild,
            16..=17 => SleepinessLevel::Moderate,
            _ => SleepinessLevel::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepinessLevel::Normal => "Normal",
            SleepinessLevel::Borderline => "Borderline",
            SleepinessLevel::Mild => "Mild",
            SleepinessLevel::Moderate => "Moderate",
            SleepinessLevel::Severe => "Severe",
        }
    }
}

impl fmt::Display for SleepinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score validated answers.
pub fn score(answers: &EpworthAnswers) -> QuestionnaireResult {
    let total: u32 = answers.ratings.iter().map(|r| u32::from(*r)).sum();
    let responses: Responses = SITUATIONS
        .iter()
        .zip(answers.ratings)
        .map(|(situation, rating)| (situation.to_string(), serde_json::Value::from(rating)))
        .collect();

    QuestionnaireResult {
        kind: QuestionnaireKind::Epworth,
        score: total,
        classification: Some(SleepinessLevel::from_score(total).label().to_string()),
        responses,
    }
}

impl Instrument for Epworth {
    fn id(&self) -> &str {
        "epworth"
    }

    fn name(&self) -> &str {
        "Epworth Sleepiness Scale"
    }

    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::Epworth
    }

    fn instructions(&self) -> &str {
        "How likely are you to doze off or fall asleep in the following situations?"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            SITUATIONS
                .iter()
                .map(|situation| Item::choice(situation, situation, &RATING_OPTIONS))
                .collect()
        });
        &ITEMS
    }
}
