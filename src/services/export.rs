use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::gitlab::GitLabClient;
use crate::services::filter::filter_by_closed_date;
use crate::services::writer::{write_checklist, write_json};
use crate::types::{ExportOptions, OutputFormat};

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Issues returned by GitLab across all pages
    pub fetched: usize,
    /// Issues written after the closed-date filter
    pub written: usize,
    pub output_path: PathBuf,
}

/// Runs the fetch, filter and write stages for one set of options
pub struct ChecklistExporter {
    gitlab_client: GitLabClient,
    options: ExportOptions,
}

impl ChecklistExporter {
    pub fn new(options: ExportOptions) -> Result<Self> {
        let gitlab_client = GitLabClient::new(
            &options.base_url,
            options.token.clone(),
            Some(options.request_timeout),
        )?;
        Ok(Self {
            gitlab_client,
            options,
        })
    }

    /// Fetch, filter and write.
    ///
    /// The output file is only opened once every page has been fetched, so
    /// a failed request leaves no output behind.
    pub async fn run(&self) -> Result<ExportSummary> {
        let options = &self.options;

        let issues = self
            .gitlab_client
            .fetch_all_issues(&options.query)
            .await
            .context("Failed to fetch issues")?;
        let fetched = issues.len();

        let issues = filter_by_closed_date(issues, &options.closed_range);
        info!(
            "{} of {} fetched issue(s) selected for export",
            issues.len(),
            fetched
        );

        let write_result = match options.format {
            OutputFormat::Markdown => {
                write_checklist(&issues, &options.output_path, &options.prefix).await
            }
            OutputFormat::Json => write_json(&issues, &options.output_path).await,
        };

        let written = write_result
            .inspect_err(|e| error!("Error writing output file: {}", e))
            .context("Failed to write output file")?;

        Ok(ExportSummary {
            fetched,
            written,
            output_path: options.output_path.clone(),
        })
    }
}
