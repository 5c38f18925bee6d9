//! Thin wrapper over reqwest for the two marketplace call shapes.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// HTTP client for marketplace operations.
///
/// Each operation is a single attempt: a transport failure or a non-success
/// status is terminal, there is no retry layer.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a POST with a JSON body and deserializes the JSON response.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST JSON to {}...", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(send_error)?;

        let response = response.error_for_status().map_err(status_error)?;

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parsing(format!("failed to decode JSON body: {}", e)))?;

        Ok(parsed)
    }

    /// Performs a GET with the given Accept header and returns the full
    /// response body. The body is received completely before returning; there
    /// are no partial or streaming reads.
    #[tracing::instrument(skip(self))]
    pub async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>> {
        debug!("GET {} (Accept: {})...", url, accept);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(send_error)?;

        let response = response.error_for_status().map_err(status_error)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response body: {}", e)))?;

        debug!("Received {:.2} MB", body.len() as f64 / (1024.0 * 1024.0));

        Ok(body.to_vec())
    }
}

fn send_error(error: reqwest::Error) -> ClientError {
    ClientError::Network(format!("failed to send request: {}", error))
}

/// Converts an `error_for_status()` failure into the network category,
/// keeping the HTTP status visible in the message.
fn status_error(error: reqwest::Error) -> ClientError {
    match error.status() {
        Some(status) => ClientError::Network(format!("server returned HTTP {}", status.as_u16())),
        None => ClientError::Network(error.to_string()),
    }
}
