pub mod client;
pub mod error;

pub use client::GitLabClient;
pub use error::GitLabApiError;
