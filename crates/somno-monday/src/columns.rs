use serde_json::{Map, Value};
use somno_core::models::record::SubmissionRecord;

/// Board column ids, keyed by record field.
pub const COLUMN_IDS: [(&str, &str); 16] = [
    ("name", "name"),
    ("date", "date__1"),
    ("age", "age__1"),
    ("gender", "gender__1"),
    ("bmi", "bmi__1"),
    ("stopbang_score", "stopbang_score__1"),
    ("stopbang_risk", "stopbang_risk__1"),
    ("stopbang_details", "stopbang_details9__1"),
    ("ess_score", "ess_score__1"),
    ("ess_level", "ess_level__1"),
    ("ess_details", "ess_details4__1"),
    ("psqi_score", "psqi_score__1"),
    ("psqi_details", "psqi_details8__1"),
    ("meq_score", "meq_score__1"),
    ("meq_type", "meq_type__1"),
    ("meq_details", "meq_details1__1"),
];

pub fn column_id(field: &str) -> Option<&'static str> {
    COLUMN_IDS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, column)| *column)
}

/// Map a record onto the board's column ids.
///
/// The record is serialized first so the column values carry exactly the
/// record's wire representation (date as `YYYY-MM-DD`, numbers as numbers).
pub fn column_values(record: &SubmissionRecord) -> Result<Map<String, Value>, serde_json::Error> {
    let Value::Object(fields) = serde_json::to_value(record)? else {
        return Err(serde::ser::Error::custom("record did not serialize to an object"));
    };

    let mut columns = Map::new();
    for (field, value) in fields {
        match column_id(&field) {
            Some(column) => {
                columns.insert(column.to_string(), value);
            }
            None => tracing::debug!(field = %field, "record field has no board column"),
        }
    }
    Ok(columns)
}
