use crate::types::Issue;

use super::MarkdownContent;

/// Identifier prefix used when none is configured
pub const DEFAULT_ISSUE_PREFIX: &str = "IBFE";

/// Render one issue as a markdown checklist bullet, without the trailing newline.
///
/// `- [IBFE-840](https://path/to/issue/840) - Issue Title`
pub fn issue_checklist_line(issue: &Issue, prefix: &str) -> String {
    format!(
        "- [{}-{}]({}) - {}",
        prefix, issue.iid, issue.web_url, issue.title
    )
}

/// Render all issues, one newline-terminated line each, in input order
pub fn issues_checklist_markdown(issues: &[Issue], prefix: &str) -> MarkdownContent {
    let mut content = String::new();
    for issue in issues {
        content.push_str(&issue_checklist_line(issue, prefix));
        content.push('\n');
    }
    MarkdownContent(content)
}
