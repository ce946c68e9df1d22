use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use somno_monday::client::MondayConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides the configured API token when set.
pub const TOKEN_ENV_VAR: &str = "SOMNO_MONDAY_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomnoConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub monday: MondayConfig,
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub config_version: u32,
    pub api_url: String,
    pub board_id: String,
    pub timeout_secs: u64,
    pub token_hint: String,
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.somno.survey").join("config.json"))
}

/// Load from `path`, or from the default location when `None`, then apply
/// the environment token override.
pub fn load_config(path: Option<&Path>) -> eyre::Result<SomnoConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    let mut config = parse_config(&contents)?;
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
        && !token.is_empty()
    {
        tracing::debug!("using API token from {TOKEN_ENV_VAR}");
        config.monday.api_token = token;
    }

    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Parse and migrate config file contents.
pub fn parse_config(contents: &str) -> eyre::Result<SomnoConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SomnoConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update somno."
        ));
    }

    // v0 → v1: flat {api_token, board_id, api_url?} moves under "monday"
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if !obj.contains_key("monday") {
            let mut monday = serde_json::Map::new();
            for key in ["api_url", "api_token", "board_id", "timeout_secs"] {
                if let Some(value) = obj.remove(key) {
                    monday.insert(key.to_string(), value);
                }
            }
            obj.insert("monday".to_string(), serde_json::Value::Object(monday));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested monday settings)");
    }

    Ok(json)
}

pub fn save_config(config: &SomnoConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file holds an API token
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &SomnoConfig) -> ConfigInfo {
    ConfigInfo {
        config_version: config.config_version,
        api_url: config.monday.api_url.clone(),
        board_id: config.monday.board_id.clone(),
        timeout_secs: config.monday.timeout_secs,
        token_hint: redact_token(&config.monday.api_token),
    }
}

fn redact_token(token: &str) -> String {
    if token.len() <= 8 || !token.is_ascii() {
        return "****".to_string();
    }
    let prefix = &token[..4];
    let suffix = &token[token.len() - 4..];
    format!("{prefix}...{suffix}")
}
