use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::patient::{Bmi, Gender, PatientProfile};
use super::questionnaire::{QuestionnaireKind, QuestionnaireResult, SurveyResults};
use crate::error::CoreError;

/// Flat record handed to the external record-keeping system, one per
/// completed session. The `*_details` fields hold each questionnaire's
/// responses as a JSON object string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionRecord {
    pub name: String,
    pub date: jiff::civil::Date,
    pub age: u32,
    pub gender: Gender,
    #[ts(type = "number | string")]
    pub bmi: Bmi,

    pub stopbang_score: u32,
    pub stopbang_risk: String,
    pub stopbang_details: String,

    pub ess_score: u32,
    pub ess_level: String,
    pub ess_details: String,

    pub psqi_score: u32,
    pub psqi_details: String,

    pub meq_score: u32,
    pub meq_type: String,
    pub meq_details: String,
}

impl SubmissionRecord {
    /// Aggregate a profile and a complete set of results. Fails if any
    /// questionnaire is missing.
    pub fn build(
        profile: &PatientProfile,
        results: &SurveyResults,
        date: jiff::civil::Date,
    ) -> Result<Self, CoreError> {
        let stop_bang = require(results, QuestionnaireKind::StopBang)?;
        let epworth = require(results, QuestionnaireKind::Epworth)?;
        let psqi = require(results, QuestionnaireKind::Psqi)?;
        let meq = require(results, QuestionnaireKind::Meq)?;

        Ok(Self {
            name: profile.name().to_string(),
            date,
            age: profile.age(),
            gender: profile.gender(),
            bmi: profile.bmi(),

            stopbang_score: stop_bang.score,
            stopbang_risk: classification(stop_bang),
            stopbang_details: stop_bang.responses_json()?,

            ess_score: epworth.score,
            ess_level: classification(epworth),
            ess_details: epworth.responses_json()?,

            psqi_score: psqi.score,
            psqi_details: psqi.responses_json()?,

            meq_score: meq.score,
            meq_type: classification(meq),
            meq_details: meq.responses_json()?,
        })
    }

    /// Display title of the created item.
    pub fn item_name(&self) -> String {
        format!("Sleep Survey - {}", self.name)
    }
}

fn require(
    results: &SurveyResults,
    kind: QuestionnaireKind,
) -> Result<&QuestionnaireResult, CoreError> {
    results.get(kind).ok_or(CoreError::MissingResult(kind))
}

fn classification(result: &QuestionnaireResult) -> String {
    result.classification.clone().unwrap_or_default()
}
