use serde_json::Value;
use somno_core::error::SubmissionError;

/// Extract the created item id from a `create_item` response.
///
/// Anything other than a 200 carrying `data.create_item.id` is a failure,
/// including a 200 whose body has an `errors` array.
pub fn parse_create_item(status: u16, body: &str) -> Result<String, SubmissionError> {
    if status != 200 {
        return Err(SubmissionError::Status { status });
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| SubmissionError::UnexpectedResponse(format!("invalid JSON: {e}")))?;

    if let Some(errors) = json.get("errors") {
        return Err(SubmissionError::Api(error_summary(errors)));
    }
    // Some API failures come back as a top-level message instead of `errors`.
    if let Some(message) = json.get("error_message").and_then(Value::as_str) {
        return Err(SubmissionError::Api(message.to_string()));
    }

    let id = json
        .get("data")
        .and_then(|d| d.get("create_item"))
        .and_then(|item| item.get("id"))
        .ok_or_else(|| {
            SubmissionError::UnexpectedResponse("missing data.create_item.id".to_string())
        })?;

    match id {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SubmissionError::UnexpectedResponse(format!(
            "unexpected item id: {other}"
        ))),
    }
}

fn error_summary(errors: &Value) -> String {
    let messages: Vec<&str> = errors
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join("; ")
    }
}
