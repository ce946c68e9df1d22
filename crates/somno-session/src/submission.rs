use serde::Serialize;
use somno_core::error::SubmissionError;
use somno_core::models::patient::PatientProfile;
use somno_core::models::questionnaire::SurveyResults;
use ts_rs::TS;
use uuid::Uuid;

/// Where a completed session stands with the external record system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionStatus {
    #[default]
    NotAttempted,
    InFlight,
    Submitted { item_id: String },
    Failed { error: SubmissionError },
}

impl SubmissionStatus {
    /// True once a submission has been attempted, whatever its outcome.
    pub fn is_attempted(&self) -> bool {
        !matches!(self, SubmissionStatus::NotAttempted)
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Submitted { item_id } => Some(item_id),
            _ => None,
        }
    }
}

/// A claimed submission: the snapshot to send, tied to the session and the
/// attempt that issued it. Hand it back with the outcome via
/// [`SurveySession::complete_submission`](crate::session::SurveySession::complete_submission).
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub(crate) session_id: Uuid,
    pub(crate) attempt: u32,
    profile: PatientProfile,
    results: SurveyResults,
}

impl SubmissionTicket {
    pub(crate) fn new(
        session_id: Uuid,
        attempt: u32,
        profile: PatientProfile,
        results: SurveyResults,
    ) -> Self {
        Self {
            session_id,
            attempt,
            profile,
            results,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// 1 for the first claim, incremented by each manual retry.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn profile(&self) -> &PatientProfile {
        &self.profile
    }

    pub fn results(&self) -> &SurveyResults {
        &self.results
    }
}
