pub mod export;
pub mod filter;
pub mod settings;
pub mod writer;

pub use export::{ChecklistExporter, ExportSummary};
pub use filter::filter_by_closed_date;
pub use settings::{SettingsError, resolve_export_options};
pub use writer::{ChecklistWriteError, write_checklist, write_json};
