use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gitlab_issue_checklist::services::settings::{
    load_settings_layer, settings_from_env, settings_path_from_env,
};
use gitlab_issue_checklist::services::{ChecklistExporter, resolve_export_options};
use gitlab_issue_checklist::types::{
    IssueState, OutputFormat, ResourceId, ResourceKind, Settings,
};

#[derive(Parser)]
#[command(name = "gitlab-issue-checklist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Export GitLab project or group issues as a markdown checklist, filtered by label, state and closed date"
)]
#[command(
    long_about = "Fetches every page of issues matching a label and state from a GitLab project or group, optionally keeps only issues closed strictly between --after and --before (UTC), and writes one `- [PREFIX-iid](web_url) - title` line per issue. Settings may also come from GITLAB_RESOURCE_ID, REPO_TOKEN and a TOML settings file."
)]
struct Cli {
    /// URL of the GitLab instance including protocol (e.g. https://gitlab.example.com)
    url: Option<String>,
    /// Label to filter issues by - omit for no label constraint
    #[arg(short, long)]
    label: Option<String>,
    /// Kind of resource the id refers to (default: projects)
    #[arg(short, long, value_enum)]
    resource: Option<ResourceCli>,
    /// Issue state to request (default: all)
    #[arg(short, long, value_enum)]
    state: Option<StateCli>,
    /// Output file name (default: file.md)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Keep only issues closed strictly after this date (YYYY-MM-DD or RFC 3339, UTC)
    #[arg(short, long)]
    after: Option<String>,
    /// Keep only issues closed strictly before this date (YYYY-MM-DD or RFC 3339, UTC)
    #[arg(short, long)]
    before: Option<String>,
    /// Id of the project or group to search (can also be set via GITLAB_RESOURCE_ID)
    #[arg(short, long)]
    id: Option<u64>,
    /// Access token sent as PRIVATE-TOKEN (can also be set via REPO_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
    /// Identifier prefix rendered before each issue number (default: IBFE)
    #[arg(short, long)]
    prefix: Option<String>,
    /// Output format - markdown writes a checklist, json writes the selected issues
    #[arg(long, value_enum)]
    format: Option<FormatCli>,
    /// Request timeout in seconds for GitLab API calls (default: 30 seconds)
    #[arg(long)]
    request_timeout: Option<u64>,
    /// Settings file to read (can also be set via GITLAB_ISSUE_CHECKLIST_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, ValueEnum)]
enum ResourceCli {
    Projects,
    Groups,
}

impl From<ResourceCli> for ResourceKind {
    fn from(cli_resource: ResourceCli) -> Self {
        match cli_resource {
            ResourceCli::Projects => ResourceKind::Projects,
            ResourceCli::Groups => ResourceKind::Groups,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum StateCli {
    All,
    Opened,
    Closed,
}

impl From<StateCli> for IssueState {
    fn from(cli_state: StateCli) -> Self {
        match cli_state {
            StateCli::All => IssueState::All,
            StateCli::Opened => IssueState::Opened,
            StateCli::Closed => IssueState::Closed,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum FormatCli {
    Markdown,
    Json,
}

impl From<FormatCli> for OutputFormat {
    fn from(cli_format: FormatCli) -> Self {
        match cli_format {
            FormatCli::Markdown => OutputFormat::Markdown,
            FormatCli::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Split into the command-line settings layer and the settings file path
    fn into_settings(self) -> (Settings, Option<PathBuf>) {
        let settings = Settings {
            url: self.url,
            resource: self.resource.map(Into::into),
            id: self.id.map(ResourceId::new),
            token: self.token,
            label: self.label,
            state: self.state.map(Into::into),
            file: self.file,
            prefix: self.prefix,
            request_timeout: self.request_timeout,
            format: self.format.map(Into::into),
            after: self.after,
            before: self.before,
        };
        (settings, self.config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.debug {
        "gitlab_issue_checklist=debug"
    } else {
        "gitlab_issue_checklist=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let (cli_settings, config_path) = cli.into_settings();
    let config_path = config_path.or_else(settings_path_from_env);

    let env_settings = settings_from_env()
        .map_err(|e| anyhow::anyhow!("Failed to read environment: {}", e))?;
    let file_settings = load_settings_layer(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load settings file: {}", e))?;

    let options = resolve_export_options(cli_settings.merge(env_settings).merge(file_settings))
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let exporter = ChecklistExporter::new(options)
        .map_err(|e| anyhow::anyhow!("Failed to create GitLab client: {}", e))?;

    let summary = exporter.run().await?;
    println!(
        "Wrote {} issues to {}",
        summary.written,
        summary.output_path.display()
    );

    Ok(())
}
