use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::ClientError;
use crate::http::HttpClient;

use super::query::{GALLERY_URL, extension_query};
use super::types::ExtensionSummary;

/// Gallery query response shape (internal).
mod api {
    use serde::Deserialize;

    use crate::gallery::types::ExtensionSummary;

    #[derive(Deserialize, Debug)]
    pub struct QueryResponse {
        #[serde(default)]
        pub results: Vec<ResultGroup>,
    }

    #[derive(Deserialize, Debug)]
    pub struct ResultGroup {
        #[serde(default)]
        pub extensions: Vec<ExtensionSummary>,
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchExtensions: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ExtensionSummary>>;
    fn gallery_url(&self) -> &str;
}

pub struct Gallery {
    http: HttpClient,
    gallery_url: String,
}

impl Gallery {
    #[tracing::instrument(skip(client, gallery_url))]
    pub fn new(client: Client, gallery_url: Option<String>) -> Self {
        let gallery_url = gallery_url.unwrap_or_else(|| GALLERY_URL.to_string());
        Self {
            http: HttpClient::new(client),
            gallery_url,
        }
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http: HttpClient, gallery_url: &str) -> Self {
        Self {
            http,
            gallery_url: gallery_url.to_string(),
        }
    }

    /// Queries the gallery and returns the first result group's extensions,
    /// in server order, unmodified.
    #[tracing::instrument(skip(http, gallery_url))]
    pub async fn fetch_extensions(
        http: &HttpClient,
        gallery_url: &str,
        query: &str,
    ) -> Result<Vec<ExtensionSummary>> {
        let url = format!("{}/extensionquery", gallery_url);
        let payload = extension_query(query);

        debug!("Querying extensions at {}...", url);

        let response: api::QueryResponse = http.post_json(&url, &payload).await?;

        let group = response.results.into_iter().next().ok_or_else(|| {
            ClientError::Parsing("response contains no result groups".to_string())
        })?;

        Ok(group.extensions)
    }
}

#[async_trait]
impl SearchExtensions for Gallery {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<ExtensionSummary>> {
        Gallery::fetch_extensions(&self.http, &self.gallery_url, query).await
    }

    fn gallery_url(&self) -> &str {
        &self.gallery_url
    }
}
