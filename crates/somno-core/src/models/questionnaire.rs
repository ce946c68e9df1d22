use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The four questionnaires, ordered as they are administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuestionnaireKind {
    #[serde(rename = "STOP-BANG")]
    StopBang,
    Epworth,
    #[serde(rename = "PSQI")]
    Psqi,
    #[serde(rename = "MEQ")]
    Meq,
}

impl QuestionnaireKind {
    pub const ALL: [QuestionnaireKind; 4] = [
        QuestionnaireKind::StopBang,
        QuestionnaireKind::Epworth,
        QuestionnaireKind::Psqi,
        QuestionnaireKind::Meq,
    ];

    /// Key under which the result is stored and reported.
    pub fn key(&self) -> &'static str {
        match self {
            QuestionnaireKind::StopBang => "STOP-BANG",
            QuestionnaireKind::Epworth => "Epworth",
            QuestionnaireKind::Psqi => "PSQI",
            QuestionnaireKind::Meq => "MEQ",
        }
    }
}

impl fmt::Display for QuestionnaireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalized answers keyed by question identifier.
pub type Responses = BTreeMap<String, serde_json::Value>;

/// Scored outcome of one questionnaire. Built once by its calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireResult {
    pub kind: QuestionnaireKind,
    pub score: u32,
    /// Absent for questionnaires that report a score only (PSQI).
    pub classification: Option<String>,
    pub responses: Responses,
}

impl QuestionnaireResult {
    /// Responses serialized as a JSON object string.
    pub fn responses_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.responses)
    }
}

/// Results collected so far, iterated in administration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SurveyResults {
    results: BTreeMap<QuestionnaireKind, QuestionnaireResult>,
}

impl SurveyResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result under its own kind, replacing any earlier one.
    pub fn insert(&mut self, result: QuestionnaireResult) -> &QuestionnaireResult {
        match self.results.entry(result.kind) {
            Entry::Occupied(mut slot) => {
                slot.insert(result);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(result),
        }
    }

    pub fn get(&self, kind: QuestionnaireKind) -> Option<&QuestionnaireResult> {
        self.results.get(&kind)
    }

    pub fn contains(&self, kind: QuestionnaireKind) -> bool {
        self.results.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionnaireResult> {
        self.results.values()
    }

    pub fn kinds(&self) -> Vec<QuestionnaireKind> {
        self.results.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        QuestionnaireKind::ALL.iter().all(|k| self.contains(*k))
    }
}
