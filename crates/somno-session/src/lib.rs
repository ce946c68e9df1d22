//! somno-session
//!
//! The survey state machine. A [`SurveySession`](session::SurveySession)
//! walks PatientInfo → STOP-BANG → Epworth → PSQI → MEQ → Results, scoring
//! each questionnaire as it is submitted, and hands the completed survey to
//! a [`ResultsSubmitter`](somno_core::submit::ResultsSubmitter) at most once.

pub mod error;
pub mod session;
pub mod submission;
