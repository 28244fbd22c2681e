//! Settings layers and resolved export options
//!
//! A run's settings come from several layers (command line, environment,
//! settings file). Each layer is a `Settings` with every field optional;
//! layers are merged highest-priority first and then resolved into an
//! `ExportOptions` with defaults applied.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ClosedDateRange, IssueQuery, IssueState, OutputFormat, ResourceId, ResourceKind};

/// One layer of user-supplied settings. Mirrors the settings file schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// GitLab instance URL including protocol
    pub url: Option<String>,
    pub resource: Option<ResourceKind>,
    pub id: Option<ResourceId>,
    pub token: Option<String>,
    pub label: Option<String>,
    pub state: Option<IssueState>,
    /// Output file path
    pub file: Option<PathBuf>,
    /// Identifier prefix rendered before each issue number
    pub prefix: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: Option<u64>,
    pub format: Option<OutputFormat>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl Settings {
    /// Fill every unset field of `self` from `lower`
    pub fn merge(self, lower: Settings) -> Settings {
        Settings {
            url: self.url.or(lower.url),
            resource: self.resource.or(lower.resource),
            id: self.id.or(lower.id),
            token: self.token.or(lower.token),
            label: self.label.or(lower.label),
            state: self.state.or(lower.state),
            file: self.file.or(lower.file),
            prefix: self.prefix.or(lower.prefix),
            request_timeout: self.request_timeout.or(lower.request_timeout),
            format: self.format.or(lower.format),
            after: self.after.or(lower.after),
            before: self.before.or(lower.before),
        }
    }
}

/// Fully resolved options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Instance URL without a trailing slash
    pub base_url: String,
    pub query: IssueQuery,
    pub token: Option<String>,
    pub closed_range: ClosedDateRange,
    pub output_path: PathBuf,
    pub prefix: String,
    pub format: OutputFormat,
    pub request_timeout: Duration,
}
