//! Core type definitions
//!
//! Strongly-typed domain models for the issue export: the narrow issue
//! record, the query sent to GitLab, the page cursor, closed-date bounds
//! and the settings that drive a run.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod date_range;
pub mod issue;
pub mod query;
pub mod settings;
pub mod timestamp;

pub use date_range::*;
pub use issue::*;
pub use query::*;
pub use settings::*;
pub use timestamp::parse_timestamp;

/// Format of the exported file
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One checklist bullet per issue
    #[default]
    Markdown,
    /// Pretty-printed JSON array of the exported issues
    Json,
}
