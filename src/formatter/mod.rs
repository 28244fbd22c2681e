pub mod checklist;

use serde::{Deserialize, Serialize};

use crate::types::Issue;

pub use checklist::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownContent(pub String);

/// Render issues as a pretty-printed JSON array with a trailing newline
pub fn issues_json(issues: &[Issue]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(issues)?;
    json.push('\n');
    Ok(json)
}
