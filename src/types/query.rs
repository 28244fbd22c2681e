//! Issue query and pagination types
//!
//! An `IssueQuery` is fixed for the duration of a run. The same query
//! parameters are sent with the page-count request and every page request.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::IssueState;

/// Page size requested from the issues endpoint (GitLab maximum)
pub const ISSUES_PER_PAGE: u32 = 100;

/// Visibility scope; always `all`, i.e. every issue the token can see
pub const ISSUE_SCOPE: &str = "all";

/// The kind of GitLab resource the issues belong to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Projects,
    Groups,
}

/// Numeric id of a GitLab project or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl ResourceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid resource id '{}': {}", s, e))
    }
}

/// Filter criteria for one issue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub resource: ResourceKind,
    pub resource_id: ResourceId,
    /// `None` means no label constraint; an empty label is normalised to `None`
    pub label: Option<String>,
    pub state: IssueState,
}

impl IssueQuery {
    pub fn new(
        resource: ResourceKind,
        resource_id: ResourceId,
        label: Option<String>,
        state: IssueState,
    ) -> Self {
        Self {
            resource,
            resource_id,
            label: label.filter(|l| !l.is_empty()),
            state,
        }
    }

    /// Path of the issues endpoint relative to the instance base URL
    pub fn issues_path(&self) -> String {
        format!("api/v4/{}/{}/issues", self.resource, self.resource_id)
    }

    /// Query parameters for the given page, in the order they are sent
    pub fn query_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(label) = &self.label {
            params.push(("labels", label.clone()));
        }
        params.push(("scope", ISSUE_SCOPE.to_string()));
        params.push(("state", self.state.to_string()));
        params.push(("per_page", ISSUES_PER_PAGE.to_string()));
        params.push(("page", page.to_string()));
        params
    }
}

/// 1-based page cursor bounded by the total reported by the page-count request.
///
/// Iterating yields every page number from 1 through `total_pages`
/// inclusive and nothing when the total is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    total_pages: u32,
}

impl PageCursor {
    pub fn new(total_pages: u32) -> Self {
        Self {
            page: 1,
            total_pages,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }
}

impl Iterator for PageCursor {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.page > self.total_pages {
            return None;
        }
        let current = self.page;
        self.page += 1;
        Some(current)
    }
}
