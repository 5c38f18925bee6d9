use anyhow::{Context, Result, bail};
use reqwest::Client;

use crate::gallery::{ExtensionSummary, Gallery};
use crate::task;

/// Search the gallery and print one block per matching extension.
#[tracing::instrument(skip(gallery_url))]
pub async fn search(query: &str, gallery_url: Option<String>) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Search query cannot be empty.");
    }

    println!("Searching for \"{}\"...", query);

    let gallery = Gallery::new(Client::new(), gallery_url);
    let results = task::spawn_search(gallery, query.to_string())
        .await
        .context("Search task did not complete")??;

    if results.is_empty() {
        println!("No extensions found.");
        return Ok(());
    }

    for (index, ext) in results.iter().enumerate() {
        print_summary(index + 1, ext);
    }
    println!("Found {} extension(s).", results.len());

    Ok(())
}

fn print_summary(number: usize, ext: &ExtensionSummary) {
    let name = non_empty_or(&ext.display_name, "Unknown");
    let publisher = non_empty_or(&ext.publisher.display_name, "Unknown");
    let installs = match ext.install_count() {
        Some(count) => format_count(count),
        None => "unknown".to_string(),
    };

    println!("{:>3}. {} ({})", number, name, publisher);
    println!("     installs: {}", installs);
    if !ext.short_description.is_empty() {
        println!("     {}", elide(&ext.short_description, 100));
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Formats a count with thousands separators: 1234567 -> "1,234,567".
pub(crate) fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn elide(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
