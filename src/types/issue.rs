//! Issue domain types
//!
//! Only the fields the checklist export consumes are modelled. The rest of
//! the GitLab payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::timestamp::parse_timestamp;

/// Wrapper type for project-scoped issue numbers (GitLab `iid`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl IssueNumber {
    /// Create a new issue number
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issue lifecycle filter sent as the `state` query parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueState {
    /// Both open and closed issues
    #[default]
    All,
    Opened,
    Closed,
}

/// An issue as returned by the GitLab issues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub iid: IssueNumber,
    pub web_url: String,
    pub title: String,
    /// Kept as sent; only read when a closed-date bound is active
    #[serde(default)]
    pub closed_at: Option<String>,
}

impl Issue {
    pub fn new(
        iid: IssueNumber,
        web_url: impl Into<String>,
        title: impl Into<String>,
        closed_at: Option<String>,
    ) -> Self {
        Self {
            iid,
            web_url: web_url.into(),
            title: title.into(),
            closed_at,
        }
    }

    /// Parse `closed_at` with the same rules as the date bounds.
    ///
    /// `None` for open issues, `Some(Err(..))` when the value is malformed.
    pub fn closed_at_utc(&self) -> Option<Result<DateTime<Utc>, String>> {
        self.closed_at.as_deref().map(parse_timestamp)
    }
}
