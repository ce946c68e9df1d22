use somno_cli::config::{SomnoConfig, save_config};
use somno_cli::replay::{AnswerSheet, read_sheet, replay, run, status_line, summary};
use somno_core::error::SubmissionError;
use somno_core::models::step::Step;
use somno_monday::client::MondayConfig;
use somno_session::error::SessionError;
use somno_session::submission::SubmissionStatus;

const SHEET: &str = r#"{
    "patient": {"name": "Casey", "age": 61, "gender": "Male", "height_cm": 180, "weight_kg": 120},
    "stop_bang": {"snoring": true, "tired": true, "observed_apnea": true,
                  "high_blood_pressure": true, "bmi_over_35": false, "age_over_50": true,
                  "neck_over_40cm": true, "male": true},
    "epworth": {"ratings": [3, 3, 2, 2, 3, 1, 3, 2]},
    "psqi": {"sleep_quality": 2, "sleep_latency_minutes": 45, "sleep_duration_hours": 5.5},
    "meq": {"preferred_wake_time": 2, "preferred_bed_time": 2}
}"#;

#[test]
fn sheet_replays_to_results() {
    let sheet: AnswerSheet = serde_json::from_str(SHEET).unwrap();
    let session = replay(&sheet).unwrap();
    assert_eq!(session.step(), Step::Results);
    assert!(!session.submitted());

    let text = summary(&session);
    assert!(text.contains("Name:   Casey"));
    assert!(text.contains("BMI:    37.0"));
    assert!(text.contains("Result: High Risk"));
    assert!(text.contains("Result: Severe"));
    assert!(text.contains("Result: Moderately Evening"));
    assert_eq!(status_line(session.submission()), "\nRecord: not submitted");
}

#[test]
fn status_line_reports_outcome() {
    let saved = SubmissionStatus::Submitted {
        item_id: "5550".to_string(),
    };
    assert_eq!(status_line(&saved), "\nRecord: saved (item 5550)");
    let failed = SubmissionStatus::Failed {
        error: SubmissionError::Timeout,
    };
    assert!(status_line(&failed).starts_with("\nRecord: not saved: "));
}

#[test]
fn omitted_sections_use_defaults() {
    let sheet: AnswerSheet = serde_json::from_str(
        r#"{"patient": {"name": "Dee", "age": 30, "gender": "Other", "height_cm": 160, "weight_kg": 55},
            "epworth": {"ratings": [0, 0, 0, 0, 0, 0, 0, 0]}}"#,
    )
    .unwrap();
    let session = replay(&sheet).unwrap();
    assert_eq!(session.step(), Step::Results);
    assert!(summary(&session).contains("Result: Definitely Morning"));
}

#[test]
fn invalid_sheet_stops_at_the_failing_step() {
    let mut sheet: AnswerSheet = serde_json::from_str(SHEET).unwrap();
    sheet.psqi.sleep_latency_minutes = 500;
    let err = replay(&sheet).unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
}

#[test]
fn sheet_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answers.json");
    std::fs::write(&path, SHEET).unwrap();
    let sheet = read_sheet(&path).unwrap();
    assert_eq!(sheet.patient.name, "Casey");
}

fn write_sheet(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("answers.json");
    std::fs::write(&path, SHEET).unwrap();
    path
}

#[test]
fn run_shows_scores_even_without_a_config() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write_sheet(dir.path());
    let missing = dir.path().join("absent.json");

    let mut out = Vec::new();
    let err = run(&answers, Some(missing.as_path()), false, &mut out).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Name:   Casey"));
    assert!(text.contains("Result: High Risk"));
    assert!(!text.contains("Record:"));
}

#[test]
fn dry_run_prints_record_without_config() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write_sheet(dir.path());
    let missing = dir.path().join("absent.json");

    let mut out = Vec::new();
    run(&answers, Some(missing.as_path()), true, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Result: Severe"));
    assert!(text.contains("\"name\": \"Casey\""));
}

#[test]
fn failed_submission_is_reported_after_the_scores() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write_sheet(dir.path());

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut monday = MondayConfig::new("a-long-api-token", "314");
    monday.api_url = format!("http://{}/v2", listener.local_addr().unwrap());
    monday.timeout_secs = 5;
    drop(listener);
    let config_path = dir.path().join("config.json");
    save_config(
        &SomnoConfig {
            config_version: 1,
            monday,
        },
        &config_path,
    )
    .unwrap();

    let mut out = Vec::new();
    let err = run(&answers, Some(config_path.as_path()), false, &mut out).unwrap_err();
    assert!(err.to_string().contains("results were not saved"));

    let text = String::from_utf8(out).unwrap();
    let scores = text.find("Result: High Risk").unwrap();
    let record = text.find("Record: not saved").unwrap();
    assert!(scores < record);
}
