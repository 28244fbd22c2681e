/// Markdown checklist and JSON rendering of issues
pub mod formatter;

/// GitLab REST client for paginated issue listing
pub mod gitlab;

/// Filtering, settings resolution, output writing and the export pipeline
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
