//! Output file writer
//!
//! The output file is a single scoped resource: it is created once,
//! written through a buffer, flushed, and released before the result is
//! returned. Lines already written are left in place when a later write
//! fails.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::formatter::{issue_checklist_line, issues_json};
use crate::types::Issue;

/// Errors raised while writing the export file
#[derive(Debug)]
pub enum ChecklistWriteError {
    /// The file could not be created or truncated
    Create { path: PathBuf, source: std::io::Error },
    /// A line could not be written
    Write { path: PathBuf, source: std::io::Error },
    /// Buffered content could not be flushed to disk
    Flush { path: PathBuf, source: std::io::Error },
    /// Issues could not be serialized
    Serialization(String),
}

impl std::fmt::Display for ChecklistWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create { path, source } => {
                write!(f, "Failed to create '{}': {}", path.display(), source)
            }
            Self::Write { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Self::Flush { path, source } => {
                write!(f, "Failed to flush '{}': {}", path.display(), source)
            }
            Self::Serialization(msg) => write!(f, "Failed to serialize issues: {}", msg),
        }
    }
}

impl std::error::Error for ChecklistWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Create { source, .. } | Self::Write { source, .. } | Self::Flush { source, .. } => {
                Some(source)
            }
            Self::Serialization(_) => None,
        }
    }
}

/// Write one checklist line per issue to `path`, returning the line count.
///
/// The file is created (or truncated) even when `issues` is empty.
pub async fn write_checklist(
    issues: &[Issue],
    path: &Path,
    prefix: &str,
) -> Result<usize, ChecklistWriteError> {
    let mut writer = create(path).await?;

    for issue in issues {
        let mut line = issue_checklist_line(issue, prefix);
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|source| ChecklistWriteError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    finish(writer, path).await?;
    info!("Wrote {} checklist line(s) to {}", issues.len(), path.display());
    Ok(issues.len())
}

/// Write the issues as a pretty-printed JSON array to `path`
pub async fn write_json(issues: &[Issue], path: &Path) -> Result<usize, ChecklistWriteError> {
    let json =
        issues_json(issues).map_err(|e| ChecklistWriteError::Serialization(e.to_string()))?;

    let mut writer = create(path).await?;
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|source| ChecklistWriteError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    finish(writer, path).await?;
    info!("Wrote {} issue(s) as JSON to {}", issues.len(), path.display());
    Ok(issues.len())
}

async fn create(path: &Path) -> Result<BufWriter<File>, ChecklistWriteError> {
    let file = File::create(path)
        .await
        .map_err(|source| ChecklistWriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(BufWriter::new(file))
}

async fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<(), ChecklistWriteError> {
    writer
        .flush()
        .await
        .map_err(|source| ChecklistWriteError::Flush {
            path: path.to_path_buf(),
            source,
        })?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(|source| ChecklistWriteError::Flush {
            path: path.to_path_buf(),
            source,
        })
}
