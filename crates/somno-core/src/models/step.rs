use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::questionnaire::QuestionnaireKind;

/// Position in the survey. Strictly linear; `Results` is terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Step {
    #[default]
    PatientInfo,
    StopBang,
    Epworth,
    Psqi,
    Meq,
    Results,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::PatientInfo,
        Step::StopBang,
        Step::Epworth,
        Step::Psqi,
        Step::Meq,
        Step::Results,
    ];

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::PatientInfo => Some(Step::StopBang),
            Step::StopBang => Some(Step::Epworth),
            Step::Epworth => Some(Step::Psqi),
            Step::Psqi => Some(Step::Meq),
            Step::Meq => Some(Step::Results),
            Step::Results => None,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fraction of the survey completed on reaching this step, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        self.index() as f64 / (Step::ALL.len() - 1) as f64
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::PatientInfo => "Patient Info",
            Step::StopBang => "STOP-BANG",
            Step::Epworth => "Epworth",
            Step::Psqi => "PSQI",
            Step::Meq => "MEQ",
            Step::Results => "Results",
        }
    }

    /// The questionnaire administered at this step, if any.
    pub fn questionnaire(&self) -> Option<QuestionnaireKind> {
        match self {
            Step::StopBang => Some(QuestionnaireKind::StopBang),
            Step::Epworth => Some(QuestionnaireKind::Epworth),
            Step::Psqi => Some(QuestionnaireKind::Psqi),
            Step::Meq => Some(QuestionnaireKind::Meq),
            Step::PatientInfo | Step::Results => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
