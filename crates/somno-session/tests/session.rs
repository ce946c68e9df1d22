use std::cell::{Cell, RefCell};

use somno_core::error::{SubmissionError, ValidationError};
use somno_core::models::patient::{Gender, PatientIntake, PatientProfile};
use somno_core::models::questionnaire::{QuestionnaireKind, SurveyResults};
use somno_core::models::record::SubmissionRecord;
use somno_core::models::step::Step;
use somno_core::submit::ResultsSubmitter;
use somno_instruments::instruments::epworth::EpworthAnswers;
use somno_instruments::instruments::meq::MeqAnswers;
use somno_instruments::instruments::psqi::PsqiAnswers;
use somno_instruments::instruments::stop_bang::StopBangAnswers;
use somno_session::error::SessionError;
use somno_session::session::SurveySession;
use somno_session::submission::SubmissionStatus;

/// Counts calls and replays scripted outcomes (last one repeats).
struct RecordingSubmitter {
    calls: Cell<usize>,
    outcomes: RefCell<Vec<Result<String, SubmissionError>>>,
    last_record: RefCell<Option<SubmissionRecord>>,
}

impl RecordingSubmitter {
    fn succeeding() -> Self {
        Self::scripted(vec![Ok("item-1".to_string())])
    }

    fn scripted(outcomes: Vec<Result<String, SubmissionError>>) -> Self {
        Self {
            calls: Cell::new(0),
            outcomes: RefCell::new(outcomes),
            last_record: RefCell::new(None),
        }
    }
}

impl ResultsSubmitter for RecordingSubmitter {
    fn submit(
        &self,
        profile: &PatientProfile,
        results: &SurveyResults,
    ) -> Result<String, SubmissionError> {
        self.calls.set(self.calls.get() + 1);
        let record = SubmissionRecord::build(profile, results, jiff::civil::date(2026, 10, 19))?;
        *self.last_record.borrow_mut() = Some(record);

        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes[0].clone()
        }
    }
}

fn intake() -> PatientIntake {
    PatientIntake {
        name: "Alex Rivera".to_string(),
        age: Some(52),
        gender: Some(Gender::Male),
        height_cm: Some(170.0),
        weight_kg: Some(70.0),
    }
}

fn stop_bang() -> StopBangAnswers {
    StopBangAnswers {
        snoring: true,
        tired: true,
        age_over_50: true,
        male: true,
        ..Default::default()
    }
}

fn completed_session() -> SurveySession {
    let mut session = SurveySession::new();
    session.submit_patient_info(intake()).unwrap();
    session.submit_stop_bang(&stop_bang()).unwrap();
    session
        .submit_epworth(&EpworthAnswers::new([2, 1, 1, 0, 3, 0, 2, 1]))
        .unwrap();
    session
        .submit_psqi(&PsqiAnswers {
            sleep_quality: 1,
            sleep_latency_minutes: 20,
            sleep_duration_hours: 6.5,
        })
        .unwrap();
    session
        .submit_meq(&MeqAnswers {
            preferred_wake_time: 3,
            preferred_bed_time: 3,
        })
        .unwrap();
    session
}

#[test]
fn full_walk_reaches_results_with_all_questionnaires() {
    let session = completed_session();
    assert_eq!(session.step(), Step::Results);
    assert!(session.is_complete());
    assert!(session.results().is_complete());
    assert_eq!(session.results().kinds(), QuestionnaireKind::ALL.to_vec());

    let results = session.results();
    let sb = results.get(QuestionnaireKind::StopBang).unwrap();
    assert_eq!((sb.score, sb.classification.as_deref()), (4, Some("Medium Risk")));
    let ess = results.get(QuestionnaireKind::Epworth).unwrap();
    assert_eq!((ess.score, ess.classification.as_deref()), (10, Some("Normal")));
    let psqi = results.get(QuestionnaireKind::Psqi).unwrap();
    assert_eq!((psqi.score, psqi.classification.as_deref()), (1 + 1 + 1, None));
    let meq = results.get(QuestionnaireKind::Meq).unwrap();
    assert_eq!((meq.score, meq.classification.as_deref()), (60, Some("Moderately Morning")));
}

#[test]
fn results_fill_incrementally() {
    let mut session = SurveySession::new();
    assert!(session.patient().is_none());
    assert!(session.results().is_empty());

    session.submit_patient_info(intake()).unwrap();
    assert_eq!(session.step(), Step::StopBang);
    assert!(session.results().is_empty());

    session.submit_stop_bang(&stop_bang()).unwrap();
    assert_eq!(session.step(), Step::Epworth);
    assert_eq!(session.results().kinds(), vec![QuestionnaireKind::StopBang]);
}

#[test]
fn out_of_order_submission_is_invalid_state() {
    let mut session = SurveySession::new();
    let err = session
        .submit_epworth(&EpworthAnswers::default())
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidState {
            current: Step::PatientInfo,
            attempted: Step::Epworth,
        }
    );
    assert_eq!(session.step(), Step::PatientInfo);
}

#[test]
fn completed_step_cannot_be_resubmitted() {
    let mut session = SurveySession::new();
    session.submit_patient_info(intake()).unwrap();
    session.submit_stop_bang(&stop_bang()).unwrap();

    let err = session.submit_stop_bang(&StopBangAnswers::default()).unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { attempted: Step::StopBang, .. }));
    let sb = session.results().get(QuestionnaireKind::StopBang).unwrap();
    assert_eq!(sb.score, 4);
}

#[test]
fn validation_failure_keeps_current_step() {
    let mut session = SurveySession::new();
    let mut raw = intake();
    raw.name = String::new();
    let err = session.submit_patient_info(raw).unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::missing("name")));
    assert_eq!(session.step(), Step::PatientInfo);
    assert!(session.patient().is_none());

    session.submit_patient_info(intake()).unwrap();
    session.submit_stop_bang(&stop_bang()).unwrap();
    let err = session
        .submit_epworth(&EpworthAnswers::new([0, 0, 0, 0, 0, 0, 0, 9]))
        .unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(session.step(), Step::Epworth);
    assert!(!session.results().contains(QuestionnaireKind::Epworth));
}

fn walk_to(stop_at: Step) -> SurveySession {
    let mut session = SurveySession::new();
    while session.step() != stop_at {
        match session.step() {
            Step::PatientInfo => {
                session.submit_patient_info(intake()).unwrap();
            }
            Step::StopBang => {
                session.submit_stop_bang(&stop_bang()).unwrap();
            }
            Step::Epworth => {
                session.submit_epworth(&EpworthAnswers::default()).unwrap();
            }
            Step::Psqi => {
                session.submit_psqi(&PsqiAnswers::default()).unwrap();
            }
            Step::Meq => {
                session.submit_meq(&MeqAnswers::default()).unwrap();
            }
            Step::Results => unreachable!("walk stops before Results"),
        }
    }
    session
}

#[test]
fn reset_from_any_step_returns_to_a_fresh_session() {
    for stop_at in Step::ALL {
        let mut session = walk_to(stop_at);
        let old_id = session.id();

        session.reset();
        assert_eq!(session.step(), Step::PatientInfo, "reset from {stop_at}");
        assert!(session.results().is_empty());
        assert!(session.patient().is_none());
        assert!(!session.submitted());
        assert_ne!(session.id(), old_id);
    }
}

#[test]
fn reset_after_submission_clears_the_flag() {
    let mut session = completed_session();
    session.ensure_submitted(&RecordingSubmitter::succeeding()).unwrap();
    assert!(session.submitted());

    session.reset();
    assert!(!session.submitted());
    assert_eq!(session.submission(), &SubmissionStatus::NotAttempted);
}

#[test]
fn ensure_submitted_calls_out_exactly_once() {
    let mut session = completed_session();
    let submitter = RecordingSubmitter::succeeding();

    let first = session.ensure_submitted(&submitter).unwrap().clone();
    let second = session.ensure_submitted(&submitter).unwrap().clone();

    assert_eq!(submitter.calls.get(), 1);
    assert_eq!(first, SubmissionStatus::Submitted { item_id: "item-1".to_string() });
    assert_eq!(first, second);
    assert!(session.submitted());
    assert_eq!(session.submission().item_id(), Some("item-1"));
}

#[test]
fn submitted_record_has_every_questionnaire_field() {
    let mut session = completed_session();
    let submitter = RecordingSubmitter::succeeding();
    session.ensure_submitted(&submitter).unwrap();

    let record = submitter.last_record.borrow().clone().unwrap();
    assert_eq!(record.name, "Alex Rivera");
    assert_eq!(record.stopbang_risk, "Medium Risk");
    assert_eq!(record.ess_level, "Normal");
    assert_eq!(record.psqi_score, 3);
    assert_eq!(record.meq_type, "Moderately Morning");
    assert!(record.meq_details.contains("Preferred Wake Time"));
}

#[test]
fn ensure_submitted_before_results_is_invalid_state() {
    let mut session = SurveySession::new();
    session.submit_patient_info(intake()).unwrap();
    let submitter = RecordingSubmitter::succeeding();

    let err = session.ensure_submitted(&submitter).unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidState {
            current: Step::StopBang,
            attempted: Step::Results,
        }
    );
    assert_eq!(submitter.calls.get(), 0);
}

#[test]
fn failed_submission_keeps_results_and_does_not_retry_by_itself() {
    let mut session = completed_session();
    let submitter = RecordingSubmitter::scripted(vec![
        Err(SubmissionError::Status { status: 500 }),
        Ok("item-2".to_string()),
    ]);

    let status = session.ensure_submitted(&submitter).unwrap().clone();
    assert_eq!(
        status,
        SubmissionStatus::Failed {
            error: SubmissionError::Status { status: 500 }
        }
    );
    session.ensure_submitted(&submitter).unwrap();
    assert_eq!(submitter.calls.get(), 1);
    assert!(session.submitted());
    assert!(session.results().is_complete());

    let status = session.retry_submission(&submitter).unwrap().clone();
    assert_eq!(status.item_id(), Some("item-2"));
    assert_eq!(submitter.calls.get(), 2);

    session.retry_submission(&submitter).unwrap();
    assert_eq!(submitter.calls.get(), 2);
}

#[test]
fn outcome_for_a_reset_session_is_ignored() {
    let mut session = completed_session();
    let ticket = session.begin_submission().unwrap().unwrap();
    assert_eq!(session.submission(), &SubmissionStatus::InFlight);
    assert!(session.begin_submission().unwrap().is_none());

    session.reset();
    let applied = session.complete_submission(ticket, Ok("late".to_string()));
    assert!(!applied);
    assert_eq!(session.submission(), &SubmissionStatus::NotAttempted);
    assert_eq!(session.step(), Step::PatientInfo);
}

#[test]
fn split_submission_applies_matching_ticket() {
    let mut session = completed_session();
    let ticket = session.begin_submission().unwrap().unwrap();
    assert_eq!(ticket.session_id(), session.id());
    assert_eq!(ticket.profile().name(), "Alex Rivera");
    assert!(ticket.results().is_complete());

    assert!(session.complete_submission(ticket, Ok("item-9".to_string())));
    assert_eq!(session.submission().item_id(), Some("item-9"));
}

#[test]
fn retry_recovers_an_abandoned_claim() {
    let mut session = completed_session();
    let abandoned = session.begin_submission().unwrap().unwrap();
    assert_eq!(abandoned.attempt(), 1);
    assert_eq!(session.submission(), &SubmissionStatus::InFlight);

    let submitter = RecordingSubmitter::succeeding();
    session.ensure_submitted(&submitter).unwrap();
    assert_eq!(submitter.calls.get(), 0);

    let status = session.retry_submission(&submitter).unwrap().clone();
    assert_eq!(status.item_id(), Some("item-1"));
    assert_eq!(submitter.calls.get(), 1);

    let applied = session.complete_submission(abandoned, Err(SubmissionError::Timeout));
    assert!(!applied);
    assert_eq!(session.submission().item_id(), Some("item-1"));
}
