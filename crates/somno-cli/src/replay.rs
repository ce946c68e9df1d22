use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use somno_core::models::patient::PatientIntake;
use somno_core::models::record::SubmissionRecord;
use somno_instruments::instruments::epworth::EpworthAnswers;
use somno_instruments::instruments::meq::MeqAnswers;
use somno_instruments::instruments::psqi::PsqiAnswers;
use somno_instruments::instruments::stop_bang::StopBangAnswers;
use somno_monday::client::MondayClient;
use somno_session::error::SessionError;
use somno_session::session::SurveySession;
use somno_session::submission::SubmissionStatus;

use crate::config;

/// A recorded set of answers for every step of one survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub patient: PatientIntake,
    #[serde(default)]
    pub stop_bang: StopBangAnswers,
    pub epworth: EpworthAnswers,
    #[serde(default)]
    pub psqi: PsqiAnswers,
    #[serde(default)]
    pub meq: MeqAnswers,
}

pub fn read_sheet(path: &Path) -> eyre::Result<AnswerSheet> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
    let sheet = serde_json::from_str(&contents)?;
    Ok(sheet)
}

/// Drive a fresh session through every step. The returned session is on
/// the Results step.
pub fn replay(sheet: &AnswerSheet) -> Result<SurveySession, SessionError> {
    let mut session = SurveySession::new();
    session.submit_patient_info(sheet.patient.clone())?;
    session.submit_stop_bang(&sheet.stop_bang)?;
    session.submit_epworth(&sheet.epworth)?;
    session.submit_psqi(&sheet.psqi)?;
    session.submit_meq(&sheet.meq)?;
    Ok(session)
}

/// Score an answer sheet, write the summary to `out`, then submit the
/// results (or with `dry_run`, write the record that would be sent).
///
/// The summary is written before the config is loaded, so the scores are
/// shown even when submission cannot be set up.
pub fn run<W: Write>(
    answers: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
    out: &mut W,
) -> eyre::Result<()> {
    let sheet = read_sheet(answers)?;
    let mut session = replay(&sheet)?;
    write!(out, "{}", summary(&session))?;

    if dry_run {
        let patient = session
            .patient()
            .ok_or_else(|| eyre::eyre!("session finished without patient info"))?;
        let today = jiff::Zoned::now().date();
        let record = SubmissionRecord::build(patient, session.results(), today)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        return Ok(());
    }

    let config = config::load_config(config_path)?;
    let client = MondayClient::new(config.monday);
    let status = session.ensure_submitted(&client)?.clone();
    writeln!(out, "{}", status_line(&status))?;

    match status {
        SubmissionStatus::Failed { error } => Err(eyre::eyre!("results were not saved: {error}")),
        _ => Ok(()),
    }
}

/// Human-readable patient and score summary.
pub fn summary(session: &SurveySession) -> String {
    let mut output = String::new();

    if let Some(patient) = session.patient() {
        output.push_str("Patient Information\n");
        output.push_str(&format!("  Name:   {}\n", patient.name()));
        output.push_str(&format!("  Age:    {}\n", patient.age()));
        output.push_str(&format!("  Gender: {}\n", patient.gender()));
        output.push_str(&format!("  BMI:    {}\n", patient.bmi()));
    }

    for result in session.results().iter() {
        output.push_str(&format!("\n{}\n", result.kind));
        output.push_str(&format!("  Score: {}\n", result.score));
        if let Some(classification) = &result.classification {
            output.push_str(&format!("  Result: {classification}\n"));
        }
    }
    output
}

pub fn status_line(status: &SubmissionStatus) -> String {
    let status = match status {
        SubmissionStatus::NotAttempted => "not submitted".to_string(),
        SubmissionStatus::InFlight => "submission in progress".to_string(),
        SubmissionStatus::Submitted { item_id } => format!("saved (item {item_id})"),
        SubmissionStatus::Failed { error } => format!("not saved: {error}"),
    };
    format!("\nRecord: {status}")
}
