//! Background execution of the two marketplace operations.
//!
//! Each operation runs as its own tokio task, executes one blocking network
//! exchange to completion, and resolves exactly once with success or failure.
//! The caller owns the returned handle; a search task and a download task
//! share no state. Single-flight enforcement (not re-issuing an operation
//! while one is running) is the caller's responsibility.

use anyhow::Result;
use std::path::PathBuf;
use tokio::task::JoinHandle;

use crate::download::download_extension;
use crate::gallery::{ExtensionSummary, SearchExtensions};
use crate::http::HttpClient;
use crate::runtime::Runtime;

/// Runs a gallery search off the caller's task.
pub fn spawn_search<G>(gallery: G, query: String) -> JoinHandle<Result<Vec<ExtensionSummary>>>
where
    G: SearchExtensions + 'static,
{
    tokio::spawn(async move { gallery.search(&query).await })
}

/// Runs a package download off the caller's task.
pub fn spawn_download<R>(
    runtime: R,
    http: HttpClient,
    ext: ExtensionSummary,
    gallery_url: String,
    out_dir: PathBuf,
) -> JoinHandle<Result<PathBuf>>
where
    R: Runtime + 'static,
{
    tokio::spawn(
        async move { download_extension(&runtime, &http, &ext, &gallery_url, &out_dir).await },
    )
}
