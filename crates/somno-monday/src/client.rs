use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use somno_core::error::SubmissionError;
use somno_core::models::patient::PatientProfile;
use somno_core::models::questionnaire::SurveyResults;
use somno_core::models::record::SubmissionRecord;
use somno_core::submit::ResultsSubmitter;

use crate::columns::column_values;
use crate::response::parse_create_item;

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CREATE_ITEM_MUTATION: &str = "\
mutation ($boardId: ID!, $itemName: String!, $columnValues: JSON!) {
    create_item (
        board_id: $boardId,
        item_name: $itemName,
        column_values: $columnValues
    ) {
        id
    }
}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MondayConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub api_token: String,
    pub board_id: String,
    /// Upper bound on the whole request, connect through body. Zero means
    /// the default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl MondayConfig {
    pub fn new(api_token: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            api_url: default_api_url(),
            api_token: api_token.into(),
            board_id: board_id.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

pub struct MondayClient {
    agent: ureq::Agent,
    config: MondayConfig,
}

impl MondayClient {
    pub fn new(config: MondayConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &MondayConfig {
        &self.config
    }

    /// GraphQL request body for creating `record` as a board item.
    pub fn build_request(&self, record: &SubmissionRecord) -> Result<Value, SubmissionError> {
        let columns = column_values(record).map_err(|e| SubmissionError::Record(e.to_string()))?;
        let columns = serde_json::to_string(&columns)
            .map_err(|e| SubmissionError::Record(e.to_string()))?;

        Ok(json!({
            "query": CREATE_ITEM_MUTATION,
            "variables": {
                "boardId": self.config.board_id,
                "itemName": record.item_name(),
                "columnValues": columns,
            }
        }))
    }

    /// Create one board item. Exactly one HTTP request, no retries.
    pub fn create_item(&self, record: &SubmissionRecord) -> Result<String, SubmissionError> {
        let payload = self.build_request(record)?.to_string();

        tracing::debug!(
            url = %self.config.api_url,
            board_id = %self.config.board_id,
            "sending create_item mutation"
        );

        let mut response = self
            .agent
            .post(self.config.api_url.as_str())
            .header("Authorization", self.config.api_token.as_str())
            .header("Content-Type", "application/json")
            .send(payload.as_bytes())
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;

        let item_id = parse_create_item(status, &body)?;
        tracing::info!(item_id = %item_id, board_id = %self.config.board_id, "board item created");
        Ok(item_id)
    }
}

impl ResultsSubmitter for MondayClient {
    fn submit(
        &self,
        profile: &PatientProfile,
        results: &SurveyResults,
    ) -> Result<String, SubmissionError> {
        let today = jiff::Zoned::now().date();
        let record = SubmissionRecord::build(profile, results, today)?;
        self.create_item(&record)
    }
}

fn transport_error(err: ureq::Error) -> SubmissionError {
    match err {
        ureq::Error::Timeout(_) => SubmissionError::Timeout,
        other => SubmissionError::Transport(other.to_string()),
    }
}
