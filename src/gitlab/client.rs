use crate::gitlab::error::GitLabApiError;
use crate::types::{Issue, IssueQuery, PageCursor};

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, Response};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Response header carrying the number of result pages
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// Request header used for personal/project access tokens
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Default timeout applied to every GitLab API request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct GitLabClient {
    pub(crate) client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitLabClient {
    /// Create a client for the GitLab instance at `base_url`.
    ///
    /// `base_url` must be an absolute `http` or `https` URL. Instances
    /// served under a sub-path (e.g. `https://example.com/gitlab`) are
    /// supported; a trailing slash is ignored.
    pub fn new(base_url: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let timeout_duration = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let connection_timeout = std::cmp::min(timeout_duration, Duration::from_secs(10));

        let client = reqwest::Client::builder()
            .timeout(std::cmp::max(timeout_duration, Duration::from_secs(1)))
            .connect_timeout(std::cmp::max(connection_timeout, Duration::from_secs(1)))
            .build()
            .context("Failed to build GitLab client")?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Full URL of the issues endpoint for `query`
    pub fn issues_url(&self, query: &IssueQuery) -> String {
        format!("{}/{}", self.base_url, query.issues_path())
    }

    /// Fetches every issue matching `query`.
    ///
    /// A `HEAD` request for page 1 discovers the page total from the
    /// `x-total-pages` header, then each page is requested in order with
    /// `GET`. Records are returned page-ascending with the server's
    /// intra-page order preserved and no deduplication.
    ///
    /// # Errors
    ///
    /// Any failed or non-success request aborts the whole fetch; no retry
    /// is attempted. A missing or non-positive page total is not an error
    /// and yields an empty result without further requests.
    pub async fn fetch_all_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        let total_pages = self.fetch_total_pages(query).await?;
        if total_pages == 0 {
            info!("No result pages reported for {}", self.issues_url(query));
            return Ok(Vec::new());
        }

        info!(
            "Fetching {} page(s) of issues from {}",
            total_pages,
            self.issues_url(query)
        );

        let mut all_issues = Vec::new();
        for page in PageCursor::new(total_pages) {
            let issues = self
                .fetch_issue_page(query, page)
                .await
                .with_context(|| format!("Failed to fetch issue page {} of {}", page, total_pages))?;
            debug!("Page {}/{} returned {} issue(s)", page, total_pages, issues.len());
            all_issues.extend(issues);
        }

        info!("Fetched {} issue(s)", all_issues.len());
        Ok(all_issues)
    }

    /// Send the metadata-only `HEAD` request and return the reported page total
    pub async fn fetch_total_pages(&self, query: &IssueQuery) -> Result<u32> {
        let response = self
            .send(Method::HEAD, query, 1)
            .await
            .context("Failed to read issue page count")?;
        Ok(total_pages_from_headers(response.headers()))
    }

    /// Fetch a single page of issues
    pub async fn fetch_issue_page(&self, query: &IssueQuery, page: u32) -> Result<Vec<Issue>> {
        let response = self.send(Method::GET, query, page).await?;
        let issues = response
            .json::<Vec<Issue>>()
            .await
            .map_err(GitLabApiError::from_reqwest_error)?;
        Ok(issues)
    }

    async fn send(&self, method: Method, query: &IssueQuery, page: u32) -> Result<Response> {
        let url = self.issues_url(query);
        debug!("{} {} page={}", method, url, page);

        let mut request = self
            .client
            .request(method, &url)
            .query(&query.query_params(page));
        if let Some(token) = &self.token {
            request = request.header(PRIVATE_TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(GitLabApiError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(GitLabApiError::from_status(status.as_u16(), body).into());
        }

        Ok(response)
    }
}

/// Read the page total from response headers.
///
/// Absent, unparseable and non-positive values all mean zero pages.
/// GitLab omits the header for very large result sets, so that case is
/// logged.
pub fn total_pages_from_headers(headers: &HeaderMap) -> u32 {
    let Some(value) = headers.get(TOTAL_PAGES_HEADER) else {
        warn!("Response carried no {} header", TOTAL_PAGES_HEADER);
        return 0;
    };

    match value.to_str().ok().and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(total) if total > 0 => u32::try_from(total).unwrap_or(u32::MAX),
        Some(_) => 0,
        None => {
            warn!("Unparseable {} header: {:?}", TOTAL_PAGES_HEADER, value);
            0
        }
    }
}

fn normalize_base_url(input: &str) -> Result<String> {
    let trimmed = input.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("Invalid repository URL: {}", input))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!(
            "Repository URL must use http or https, got '{}': {}",
            url.scheme(),
            input
        );
    }
    if url.host_str().is_none() {
        anyhow::bail!("Repository URL has no host: {}", input);
    }
    Ok(trimmed.to_string())
}
