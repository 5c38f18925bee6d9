use anyhow::{Context, Result, anyhow, bail};
use reqwest::Client;
use std::path::PathBuf;

use crate::gallery::{ExtensionSummary, GALLERY_URL, Gallery};
use crate::http::HttpClient;
use crate::runtime::RealRuntime;
use crate::task;

/// Search the gallery, pick one result, and download its latest package.
#[tracing::instrument(skip(gallery_url, output_dir))]
pub async fn download(
    query: &str,
    pick: usize,
    gallery_url: Option<String>,
    output_dir: PathBuf,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Search query cannot be empty.");
    }
    if pick == 0 {
        bail!("--pick is 1-based; 0 is not a valid result number.");
    }

    let gallery_url = gallery_url.unwrap_or_else(|| GALLERY_URL.to_string());
    let http = HttpClient::new(Client::new());
    let gallery = Gallery::from_http_client(http.clone(), &gallery_url);

    println!("Searching for \"{}\"...", query);
    let results = task::spawn_search(gallery, query.to_string())
        .await
        .context("Search task did not complete")??;

    if results.is_empty() {
        bail!("No extensions found for \"{}\".", query);
    }

    let ext = select(&results, pick)?;
    let name = if ext.display_name.is_empty() {
        &ext.extension_name
    } else {
        &ext.display_name
    };
    println!("Downloading {}...", name);

    let path = task::spawn_download(RealRuntime, http, ext.clone(), gallery_url, output_dir)
        .await
        .context("Download task did not complete")??;

    println!("Saved to {}", path.display());
    Ok(())
}

/// Picks the Nth (1-based) search result.
fn select(results: &[ExtensionSummary], pick: usize) -> Result<&ExtensionSummary> {
    results.get(pick - 1).ok_or_else(|| {
        anyhow!(
            "Result {} is out of range; the search returned {} result(s).",
            pick,
            results.len()
        )
    })
}
