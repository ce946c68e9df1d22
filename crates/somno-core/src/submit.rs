use crate::error::SubmissionError;
use crate::models::patient::PatientProfile;
use crate::models::questionnaire::SurveyResults;

/// Persists a completed survey to the external record-keeping system.
///
/// Implementations make exactly one outbound call per invocation and never
/// retry on their own. On success they return the created item's id.
pub trait ResultsSubmitter {
    fn submit(
        &self,
        profile: &PatientProfile,
        results: &SurveyResults,
    ) -> Result<String, SubmissionError>;
}

impl<T: ResultsSubmitter + ?Sized> ResultsSubmitter for &T {
    fn submit(
        &self,
        profile: &PatientProfile,
        results: &SurveyResults,
    ) -> Result<String, SubmissionError> {
        (**self).submit(profile, results)
    }
}
