//! Client for the VS Code extension marketplace gallery API.

mod client;
mod query;
mod types;

pub use client::{Gallery, SearchExtensions};
#[cfg(test)]
pub use client::MockSearchExtensions;
pub use query::{GALLERY_URL, QUERY_FLAGS, VSCODE_PRODUCT, extension_query};
pub use types::{ExtensionSummary, ExtensionVersion, Publisher, Statistic};
