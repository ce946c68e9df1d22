use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use somno_core::models::questionnaire::{QuestionnaireKind, QuestionnaireResult};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Item, yes_no};

/// STOP-BANG: obstructive sleep apnea screening.
/// 8 yes/no items; score is the number of "yes" answers (0–8).
pub struct StopBang;

/// Answers to the eight STOP-BANG items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct StopBangAnswers {
    pub snoring: bool,
    pub tired: bool,
    pub observed_apnea: bool,
    pub high_blood_pressure: bool,
    pub bmi_over_35: bool,
    pub age_over_50: bool,
    pub neck_over_40cm: bool,
    pub male: bool,
}

impl StopBangAnswers {
    /// Answers paired with their response keys, in item order.
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("Snoring", self.snoring),
            ("Tired", self.tired),
            ("Observed", self.observed_apnea),
            ("Pressure", self.high_blood_pressure),
            ("BMI", self.bmi_over_35),
            ("Age", self.age_over_50),
            ("Neck", self.neck_over_40cm),
            ("Gender", self.male),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StopBangRisk {
    Low,
    Medium,
    High,
}

impl StopBangRisk {
    pub fn from_score(score: u32) -> Self {
        if score >= 5 {
            StopBangRisk::High
        } else if score >= 3 {
            StopBangRisk::Medium
        } else {
            StopBangRisk::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StopBangRisk::Low => "Low Risk",
            StopBangRisk::Medium => "Medium Risk",
            StopBangRisk::High => "High Risk",
        }
    }
}

impl fmt::Display for StopBangRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn score(answers: &StopBangAnswers) -> QuestionnaireResult {
    let entries = answers.entries();
    let total = entries.iter().filter(|(_, yes)| *yes).count() as u32;
    let responses: BTreeMap<_, _> = entries
        .iter()
        .map(|(key, answer)| (key.to_string(), yes_no(*answer)))
        .collect();

    QuestionnaireResult {
        kind: QuestionnaireKind::StopBang,
        score: total,
        classification: Some(StopBangRisk::from_score(total).label().to_string()),
        responses,
    }
}

impl Instrument for StopBang {
    fn id(&self) -> &str {
        "stop_bang"
    }

    fn name(&self) -> &str {
        "STOP-BANG Questionnaire"
    }

    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::StopBang
    }

    fn instructions(&self) -> &str {
        "Please answer all questions:"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            vec![
                Item::yes_no(
                    "Snoring",
                    "Do you Snore loudly (louder than talking or heard through closed doors)?",
                ),
                Item::yes_no(
                    "Tired",
                    "Do you often feel Tired, fatigued, or sleepy during the day?",
                ),
                Item::yes_no(
                    "Observed",
                    "Has anyone Observed you stop breathing during sleep?",
                ),
                Item::yes_no(
                    "Pressure",
                    "Do you have or are being treated for high blood Pressure?",
                ),
                Item::yes_no("BMI", "BMI more than 35 kg/m²?"),
                Item::yes_no("Age", "Age over 50 years old?"),
                Item::yes_no("Neck", "Neck circumference > 16 inches (40cm)?"),
                Item::yes_no("Gender", "Gender = Male?"),
            ]
        });
        &ITEMS
    }
}
