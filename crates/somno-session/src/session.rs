use somno_core::error::SubmissionError;
use somno_core::models::patient::{PatientIntake, PatientProfile};
use somno_core::models::questionnaire::{QuestionnaireResult, SurveyResults};
use somno_core::models::step::Step;
use somno_core::submit::ResultsSubmitter;
use somno_instruments::instruments::epworth::{self, EpworthAnswers};
use somno_instruments::instruments::meq::{self, MeqAnswers};
use somno_instruments::instruments::psqi::{self, PsqiAnswers};
use somno_instruments::instruments::stop_bang::{self, StopBangAnswers};
use uuid::Uuid;

use crate::error::SessionError;
use crate::submission::{SubmissionStatus, SubmissionTicket};

/// One patient's pass through the survey.
///
/// Every `submit_*` call checks that the session is on the matching step,
/// validates the typed answers, scores them and advances by exactly one
/// step. On error the session is left untouched.
#[derive(Debug, Clone)]
pub struct SurveySession {
    id: Uuid,
    step: Step,
    patient: Option<PatientProfile>,
    results: SurveyResults,
    submission: SubmissionStatus,
    attempt: u32,
}

impl Default for SurveySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveySession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::PatientInfo,
            patient: None,
            results: SurveyResults::new(),
            submission: SubmissionStatus::NotAttempted,
            attempt: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn patient(&self) -> Option<&PatientProfile> {
        self.patient.as_ref()
    }

    pub fn results(&self) -> &SurveyResults {
        &self.results
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// True once the results have been handed to a submitter.
    pub fn submitted(&self) -> bool {
        self.submission.is_attempted()
    }

    pub fn is_complete(&self) -> bool {
        self.step == Step::Results
    }

    pub fn submit_patient_info(
        &mut self,
        intake: PatientIntake,
    ) -> Result<&PatientProfile, SessionError> {
        self.expect_step(Step::PatientInfo)?;
        let profile = intake.validate()?;
        tracing::info!(session_id = %self.id, bmi = %profile.bmi(), "patient info recorded");
        self.advance();
        Ok(&*self.patient.insert(profile))
    }

    pub fn submit_stop_bang(
        &mut self,
        answers: &StopBangAnswers,
    ) -> Result<&QuestionnaireResult, SessionError> {
        self.expect_step(Step::StopBang)?;
        Ok(self.record(stop_bang::score(answers)))
    }

    pub fn submit_epworth(
        &mut self,
        answers: &EpworthAnswers,
    ) -> Result<&QuestionnaireResult, SessionError> {
        self.expect_step(Step::Epworth)?;
        answers.validate()?;
        Ok(self.record(epworth::score(answers)))
    }

    pub fn submit_psqi(
        &mut self,
        answers: &PsqiAnswers,
    ) -> Result<&QuestionnaireResult, SessionError> {
        self.expect_step(Step::Psqi)?;
        answers.validate()?;
        Ok(self.record(psqi::score(answers)))
    }

    pub fn submit_meq(&mut self, answers: &MeqAnswers) -> Result<&QuestionnaireResult, SessionError> {
        self.expect_step(Step::Meq)?;
        answers.validate()?;
        Ok(self.record(meq::score(answers)))
    }

    /// Discard everything and start over with a fresh session id.
    ///
    /// An in-flight submission is abandoned: its outcome will carry the old
    /// id and be ignored by [`complete_submission`](Self::complete_submission).
    pub fn reset(&mut self) {
        let previous = self.id;
        *self = Self::new();
        tracing::info!(previous = %previous, session_id = %self.id, "session reset");
    }

    /// Claim the one submission this session is allowed.
    ///
    /// Returns `Ok(None)` if a submission was already attempted.
    pub fn begin_submission(&mut self) -> Result<Option<SubmissionTicket>, SessionError> {
        self.expect_step(Step::Results)?;
        if self.submission.is_attempted() {
            return Ok(None);
        }
        let profile = self.patient.clone().ok_or(SessionError::InvalidState {
            current: Step::PatientInfo,
            attempted: Step::Results,
        })?;

        self.submission = SubmissionStatus::InFlight;
        self.attempt += 1;
        tracing::info!(session_id = %self.id, attempt = self.attempt, "submission started");
        Ok(Some(SubmissionTicket::new(
            self.id,
            self.attempt,
            profile,
            self.results.clone(),
        )))
    }

    /// Record the outcome of a claimed submission.
    ///
    /// Returns false, leaving the session unchanged, if the ticket belongs to
    /// a session that has since been reset or to an attempt superseded by
    /// [`retry_submission`](Self::retry_submission).
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<String, SubmissionError>,
    ) -> bool {
        if ticket.session_id != self.id
            || ticket.attempt != self.attempt
            || self.submission != SubmissionStatus::InFlight
        {
            tracing::warn!(
                ticket = %ticket.session_id,
                ticket_attempt = ticket.attempt,
                session_id = %self.id,
                "discarding submission outcome for a stale session"
            );
            return false;
        }

        self.submission = match outcome {
            Ok(item_id) => {
                tracing::info!(session_id = %self.id, item_id = %item_id, "results submitted");
                SubmissionStatus::Submitted { item_id }
            }
            Err(error) => {
                tracing::warn!(session_id = %self.id, error = %error, "results submission failed");
                SubmissionStatus::Failed { error }
            }
        };
        true
    }

    /// Submit the completed survey unless that has already been attempted.
    ///
    /// Safe to call any number of times once on the Results step; only the
    /// first call reaches `submitter`. A failed submission is recorded in
    /// the returned status, never returned as an error.
    pub fn ensure_submitted<S>(&mut self, submitter: &S) -> Result<&SubmissionStatus, SessionError>
    where
        S: ResultsSubmitter + ?Sized,
    {
        if let Some(ticket) = self.begin_submission()? {
            let outcome = submitter.submit(ticket.profile(), ticket.results());
            self.complete_submission(ticket, outcome);
        }
        Ok(&self.submission)
    }

    /// Manually retry after a failed submission, or after a claim whose
    /// ticket was never completed. A late outcome for the superseded ticket
    /// is discarded. A successful submission is returned unchanged without
    /// calling `submitter`.
    pub fn retry_submission<S>(&mut self, submitter: &S) -> Result<&SubmissionStatus, SessionError>
    where
        S: ResultsSubmitter + ?Sized,
    {
        self.expect_step(Step::Results)?;
        if matches!(
            self.submission,
            SubmissionStatus::Failed { .. } | SubmissionStatus::InFlight
        ) {
            tracing::info!(session_id = %self.id, attempt = self.attempt, "retrying submission");
            self.submission = SubmissionStatus::NotAttempted;
        }
        self.ensure_submitted(submitter)
    }

    fn expect_step(&self, attempted: Step) -> Result<(), SessionError> {
        if self.step == attempted {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                current: self.step,
                attempted,
            })
        }
    }

    fn record(&mut self, result: QuestionnaireResult) -> &QuestionnaireResult {
        tracing::info!(
            session_id = %self.id,
            questionnaire = %result.kind,
            score = result.score,
            classification = result.classification.as_deref().unwrap_or("-"),
            "questionnaire scored"
        );
        self.advance();
        self.results.insert(result)
    }

    fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            tracing::debug!(session_id = %self.id, from = %self.step, to = %next, "step advanced");
            self.step = next;
        }
    }
}
