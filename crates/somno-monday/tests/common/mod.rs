#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use somno_core::models::patient::{Gender, PatientProfile};
use somno_core::models::questionnaire::{QuestionnaireKind, QuestionnaireResult, SurveyResults};
use somno_core::models::record::SubmissionRecord;

pub fn profile() -> PatientProfile {
    PatientProfile::new("Robin Park", 58, Gender::Female, 165.0, 80.0)
}

pub fn results() -> SurveyResults {
    let entries = [
        (QuestionnaireKind::StopBang, 2, Some("Low Risk")),
        (QuestionnaireKind::Epworth, 16, Some("Moderate")),
        (QuestionnaireKind::Psqi, 5, None),
        (QuestionnaireKind::Meq, 40, Some("Moderately Evening")),
    ];
    let mut results = SurveyResults::new();
    for (kind, score, classification) in entries {
        let mut responses = BTreeMap::new();
        responses.insert(format!("{kind} item"), serde_json::json!(score));
        results.insert(QuestionnaireResult {
            kind,
            score,
            classification: classification.map(str::to_string),
            responses,
        });
    }
    results
}

pub fn record() -> SubmissionRecord {
    SubmissionRecord::build(&profile(), &results(), jiff::civil::date(2026, 10, 19)).unwrap()
}

/// A captured HTTP request: header lines and body.
pub struct Captured {
    pub head: Vec<String>,
    pub body: String,
}

/// Serve one canned response on a loopback port. Returns the base URL and a
/// receiver for the request it saw.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/v2", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push(line);
        }
        let mut buf = vec![0u8; content_length];
        reader.read_exact(&mut buf).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        let _ = tx.send(Captured {
            head,
            body: String::from_utf8(buf).unwrap(),
        });
    });

    (url, rx)
}
