//! Resolve a download target from an extension record and persist the package.

use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ClientError;
use crate::gallery::ExtensionSummary;
use crate::http::HttpClient;
use crate::runtime::Runtime;

/// Directory packages are saved into, relative to the working directory.
pub const DOWNLOAD_DIR: &str = "downloads";

const OCTET_STREAM: &str = "application/octet-stream";

/// Coordinates for one package download, derived from an extension record:
/// the internal publisher and extension identifiers plus a version string.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    pub publisher: String,
    pub extension: String,
    pub version: String,
}

impl DownloadTarget {
    /// Derives the target from a record's internal identifiers.
    ///
    /// The first entry of `versions` is taken as the latest. The gallery is
    /// assumed to list versions newest-first; that ordering is not documented
    /// as a guarantee, so the assumption lives only here.
    pub fn from_summary(ext: &ExtensionSummary) -> Result<Self> {
        if ext.publisher.publisher_name.is_empty() {
            return Err(
                ClientError::Precondition("record has no publisher identifier".to_string()).into(),
            );
        }
        if ext.extension_name.is_empty() {
            return Err(
                ClientError::Precondition("record has no extension identifier".to_string()).into(),
            );
        }
        let latest = ext.versions.first().ok_or_else(|| {
            ClientError::Precondition("record lists no versions".to_string())
        })?;
        if latest.version.is_empty() {
            return Err(
                ClientError::Precondition("version entry has no version string".to_string()).into(),
            );
        }

        Ok(Self {
            publisher: ext.publisher.publisher_name.clone(),
            extension: ext.extension_name.clone(),
            version: latest.version.clone(),
        })
    }

    /// URL of the package on the gallery's vspackage endpoint.
    pub fn package_url(&self, gallery_url: &str) -> String {
        format!(
            "{}/publishers/{}/vsextensions/{}/{}/vspackage",
            gallery_url, self.publisher, self.extension, self.version
        )
    }

    /// Conventional package file name: `{publisher}.{extension}-{version}.vsix`.
    pub fn file_name(&self) -> String {
        format!("{}.{}-{}.vsix", self.publisher, self.extension, self.version)
    }
}

/// Downloads the latest version of `ext` into `out_dir` and returns the
/// written path.
///
/// The body is received completely before the directory or file is touched,
/// so a failed download leaves no partial file behind. An existing file of
/// the same name is overwritten.
#[tracing::instrument(skip(runtime, http, ext, gallery_url, out_dir))]
pub async fn download_extension<R: Runtime>(
    runtime: &R,
    http: &HttpClient,
    ext: &ExtensionSummary,
    gallery_url: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let target = DownloadTarget::from_summary(ext)?;
    let url = target.package_url(gallery_url);

    info!("Downloading {} from {}...", target.file_name(), url);

    let body = http.get_bytes(&url, OCTET_STREAM).await?;

    runtime
        .create_dir_all(out_dir)
        .with_context(|| format!("Failed to create download directory at {:?}", out_dir))?;

    let path = out_dir.join(target.file_name());
    let mut writer = runtime
        .create_file(&path)
        .with_context(|| format!("Failed to create package file at {:?}", path))?;
    writer
        .write_all(&body)
        .context("Failed to write package file")?;

    info!("Download complete: {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{ExtensionVersion, Publisher};
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use reqwest::Client;

    fn python_summary() -> ExtensionSummary {
        ExtensionSummary {
            extension_name: "python".to_string(),
            display_name: "Python".to_string(),
            publisher: Publisher {
                publisher_name: "ms-python".to_string(),
                display_name: "Microsoft".to_string(),
                ..Default::default()
            },
            versions: vec![
                ExtensionVersion {
                    version: "2024.1.0".to_string(),
                    ..Default::default()
                },
                ExtensionVersion {
                    version: "2023.22.0".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_target_takes_first_version_as_latest() {
        let target = DownloadTarget::from_summary(&python_summary()).unwrap();
        assert_eq!(
            target,
            DownloadTarget {
                publisher: "ms-python".to_string(),
                extension: "python".to_string(),
                version: "2024.1.0".to_string(),
            }
        );
    }

    #[test]
    fn test_target_url_and_file_name() {
        let target = DownloadTarget::from_summary(&python_summary()).unwrap();
        assert_eq!(
            target.package_url("https://marketplace.visualstudio.com/_apis/public/gallery"),
            "https://marketplace.visualstudio.com/_apis/public/gallery/publishers/ms-python/vsextensions/python/2024.1.0/vspackage"
        );
        assert_eq!(target.file_name(), "ms-python.python-2024.1.0.vsix");
    }

    #[test]
    fn test_target_requires_publisher_identifier() {
        let mut ext = python_summary();
        ext.publisher.publisher_name.clear();

        let err = DownloadTarget::from_summary(&ext).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Precondition(_))
        ));
    }

    #[test]
    fn test_target_requires_extension_identifier() {
        let mut ext = python_summary();
        ext.extension_name.clear();

        let err = DownloadTarget::from_summary(&ext).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Precondition(_))
        ));
    }

    #[test]
    fn test_target_requires_a_version() {
        let mut ext = python_summary();
        ext.versions.clear();

        let err = DownloadTarget::from_summary(&ext).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Precondition(_))
        ));
    }

    #[tokio::test]
    async fn test_download_requests_the_substituted_url() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock(
                "GET",
                "/publishers/ms-python/vsextensions/python/2024.1.0/vspackage",
            )
            .match_header("accept", "application/octet-stream")
            .with_status(200)
            .with_body("package bytes")
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_create_dir_all()
            .with(eq(PathBuf::from("downloads")))
            .returning(|_| Ok(()));
        runtime
            .expect_create_file()
            .with(eq(PathBuf::from("downloads/ms-python.python-2024.1.0.vsix")))
            .returning(|_| Ok(Box::new(std::io::sink())));

        let http = HttpClient::new(Client::new());
        let path = download_extension(
            &runtime,
            &http,
            &python_summary(),
            &url,
            Path::new(DOWNLOAD_DIR),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(path, PathBuf::from("downloads/ms-python.python-2024.1.0.vsix"));
    }

    #[tokio::test]
    async fn test_download_writes_full_body_to_disk() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock(
                "GET",
                "/publishers/ms-python/vsextensions/python/2024.1.0/vspackage",
            )
            .with_status(200)
            .with_body("vsix archive content")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("downloads");

        let http = HttpClient::new(Client::new());
        let path = download_extension(&RealRuntime, &http, &python_summary(), &url, &out_dir)
            .await
            .unwrap();

        assert_eq!(path, out_dir.join("ms-python.python-2024.1.0.vsix"));
        assert_eq!(std::fs::read(&path).unwrap(), b"vsix archive content");
    }

    #[tokio::test]
    async fn test_download_twice_overwrites_same_path() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("downloads");
        let http = HttpClient::new(Client::new());

        let first = server
            .mock(
                "GET",
                "/publishers/ms-python/vsextensions/python/2024.1.0/vspackage",
            )
            .with_status(200)
            .with_body("first body")
            .create_async()
            .await;

        let path_a = download_extension(&RealRuntime, &http, &python_summary(), &url, &out_dir)
            .await
            .unwrap();
        first.assert_async().await;

        let _second = server
            .mock(
                "GET",
                "/publishers/ms-python/vsextensions/python/2024.1.0/vspackage",
            )
            .with_status(200)
            .with_body("second body")
            .create_async()
            .await;

        let path_b = download_extension(&RealRuntime, &http, &python_summary(), &url, &out_dir)
            .await
            .unwrap();

        assert_eq!(path_a, path_b);
        assert_eq!(std::fs::read(&path_b).unwrap(), b"second body");
    }

    #[tokio::test]
    async fn test_download_server_error_touches_nothing() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock(
                "GET",
                "/publishers/ms-python/vsextensions/python/2024.1.0/vspackage",
            )
            .with_status(500)
            .create_async()
            .await;

        // No expectations: any filesystem call panics the mock.
        let runtime = MockRuntime::new();

        let http = HttpClient::new(Client::new());
        let result = download_extension(
            &runtime,
            &http,
            &python_summary(),
            &url,
            Path::new(DOWNLOAD_DIR),
        )
        .await;

        mock.assert_async().await;
        assert!(matches!(
            result.unwrap_err().downcast_ref::<ClientError>(),
            Some(ClientError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_download_precondition_failure_makes_no_request() {
        let mut ext = python_summary();
        ext.versions.clear();

        // Strict mocks: no HTTP server, no filesystem expectations.
        let runtime = MockRuntime::new();
        let http = HttpClient::new(Client::new());

        let result = download_extension(
            &runtime,
            &http,
            &ext,
            "http://127.0.0.1:1",
            Path::new(DOWNLOAD_DIR),
        )
        .await;

        assert!(matches!(
            result.unwrap_err().downcast_ref::<ClientError>(),
            Some(ClientError::Precondition(_))
        ));
    }
}
