use tracing::{debug, warn};

use crate::types::{ClosedDateRange, Issue};

/// Restrict issues to those closed strictly inside `range`.
///
/// With no bound set the input is returned unchanged, open issues
/// included. With any bound set, issues without a `closed_at` are dropped
/// before the bounds are applied, and an unparseable `closed_at` is
/// logged and dropped as well. Input order is preserved.
pub fn filter_by_closed_date(issues: Vec<Issue>, range: &ClosedDateRange) -> Vec<Issue> {
    if range.is_unbounded() {
        return issues;
    }
    if range.is_empty() {
        warn!(
            "Closed-date range is empty (after {:?} is not before {:?})",
            range.after, range.before
        );
    }

    let total = issues.len();
    let filtered: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| match issue.closed_at_utc() {
            Some(Ok(closed_at)) => range.contains(&closed_at),
            Some(Err(e)) => {
                warn!("Skipping issue {}: unreadable closed_at: {}", issue.iid, e);
                false
            }
            None => false,
        })
        .collect();

    debug!(
        "Closed-date filter kept {} of {} issue(s)",
        filtered.len(),
        total
    );
    filtered
}
