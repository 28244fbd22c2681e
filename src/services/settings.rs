//! Settings loading and resolution
//!
//! Resolves the options for one export from, in priority order, the
//! command line, the environment, an optional TOML settings file and
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::formatter::DEFAULT_ISSUE_PREFIX;
use crate::gitlab::client::DEFAULT_REQUEST_TIMEOUT;
use crate::types::{ClosedDateRange, ExportOptions, IssueQuery, ResourceId, Settings};

/// Environment variable holding the project or group id
pub const RESOURCE_ID_ENV: &str = "GITLAB_RESOURCE_ID";

/// Environment variable holding the access token
pub const TOKEN_ENV: &str = "REPO_TOKEN";

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "GITLAB_ISSUE_CHECKLIST_CONFIG";

/// Output file used when none is configured
pub const DEFAULT_OUTPUT_FILE: &str = "file.md";

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Settings errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required value was supplied by no layer
    Missing(String),
    /// A supplied value could not be interpreted
    InvalidValue(String),
    /// IO error reading the settings file
    IoError(String),
    /// Settings file is not valid TOML for the schema
    ParseError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(what) => write!(f, "Missing required setting: {}", what),
            Self::InvalidValue(msg) => write!(f, "Invalid setting: {}", msg),
            Self::IoError(msg) => write!(f, "Settings IO error: {}", msg),
            Self::ParseError(msg) => write!(f, "Settings parse error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Default settings file location, e.g. `~/.config/gitlab-issue-checklist/settings.toml`
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        SettingsError::IoError("Unable to determine config directory".to_string())
    })?;
    Ok(config_dir
        .join("gitlab-issue-checklist")
        .join(SETTINGS_FILE_NAME))
}

/// Load a settings file
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::IoError(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Load the settings file layer.
///
/// An explicitly named file must exist. The default location is optional
/// and an empty layer is returned when nothing is there.
pub fn load_settings_layer(explicit_path: Option<&Path>) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit_path {
        tracing::debug!("Loading settings from {}", path.display());
        return load_settings(path);
    }

    let default_path = match default_settings_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("Skipping default settings file: {}", e);
            return Ok(Settings::default());
        }
    };

    if !default_path.exists() {
        return Ok(Settings::default());
    }

    tracing::debug!("Loading settings from {}", default_path.display());
    load_settings(&default_path)
}

/// Read the environment layer
pub fn settings_from_env() -> Result<Settings, SettingsError> {
    settings_from_vars(|key| std::env::var(key).ok())
}

/// Build the environment layer from an arbitrary variable lookup.
/// Empty values count as unset.
pub fn settings_from_vars<F>(lookup: F) -> Result<Settings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let id = get(RESOURCE_ID_ENV)
        .map(|v| {
            v.parse::<ResourceId>()
                .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", RESOURCE_ID_ENV, e)))
        })
        .transpose()?;

    Ok(Settings {
        id,
        token: get(TOKEN_ENV),
        ..Default::default()
    })
}

/// Path of an explicitly requested settings file from the environment
pub fn settings_path_from_env() -> Option<PathBuf> {
    std::env::var_os(SETTINGS_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Apply defaults to merged settings and validate them.
pub fn resolve_export_options(settings: Settings) -> Result<ExportOptions, SettingsError> {
    let base_url = settings
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| SettingsError::Missing("repository URL".to_string()))?
        .trim()
        .trim_end_matches('/')
        .to_string();

    let resource_id = settings.id.ok_or_else(|| {
        SettingsError::Missing(format!("resource id (--id or {})", RESOURCE_ID_ENV))
    })?;

    let closed_range =
        ClosedDateRange::parse(settings.after.as_deref(), settings.before.as_deref())
            .map_err(SettingsError::InvalidValue)?;

    let request_timeout = match settings.request_timeout {
        Some(0) => {
            return Err(SettingsError::InvalidValue(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_REQUEST_TIMEOUT,
    };

    let query = IssueQuery::new(
        settings.resource.unwrap_or_default(),
        resource_id,
        settings.label,
        settings.state.unwrap_or_default(),
    );

    Ok(ExportOptions {
        base_url,
        query,
        token: settings.token.filter(|t| !t.is_empty()),
        closed_range,
        output_path: settings
            .file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        prefix: settings
            .prefix
            .unwrap_or_else(|| DEFAULT_ISSUE_PREFIX.to_string()),
        format: settings.format.unwrap_or_default(),
        request_timeout,
    })
}
