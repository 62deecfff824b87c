//! Image upload over multipart form data.
//!
//! The upload endpoint takes a single `image` part and replies with exactly
//! `{ "data": { "url": ... } }`. Older backend builds answered in several
//! shapes (top-level `url` or `imageUrl`, or a bare string); those are
//! treated as contract violations and rejected outright rather than sniffed.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::error::ClientError;
use crate::client::ApiClient;

pub const UPLOAD_CONTRACT: &str = r#"{ "data": { "url": <string> } }"#;

/// A file that made it to the server.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub path: PathBuf,
    pub url: String,
}

/// A file that did not.
#[derive(Debug, Clone)]
pub struct UploadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a multi-file upload. Partial success is a valid outcome and
/// must be reported distinctly from total failure.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedImage>,
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_total_failure(&self) -> bool {
        self.uploaded.is_empty() && !self.failed.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.uploaded.is_empty() && !self.failed.is_empty()
    }
}

/// Upload one image and return its public URL.
pub async fn upload_image(client: &ApiClient, path: &Path) -> Result<String, ClientError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ClientError::Payload(format!(
            "{} is not an image file",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::Payload(format!("failed to read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime_str = mime.essence_str().to_string();

    let value = client
        .post_multipart("/upload/single", || {
            let part = Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(&mime_str)
                .map_err(|e| ClientError::Payload(e.to_string()))?;
            Ok(Form::new().part("image", part))
        })
        .await?;

    let url = parse_upload_url(&value)?;
    info!(path = %path.display(), url, "Image uploaded");
    Ok(url)
}

/// Upload several images, collecting per-file outcomes instead of aborting
/// on the first failure.
pub async fn upload_images(client: &ApiClient, paths: &[PathBuf]) -> UploadReport {
    let mut report = UploadReport::default();
    for path in paths {
        match upload_image(client, path).await {
            Ok(url) => report.uploaded.push(UploadedImage {
                path: path.clone(),
                url,
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Upload failed");
                report.failed.push(UploadFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    report
}

/// Enforce the documented response contract; any deviation is a hard error.
fn parse_upload_url(value: &Value) -> Result<String, ClientError> {
    value
        .get("data")
        .and_then(|data| data.get("url"))
        .and_then(|url| url.as_str())
        .map(|url| url.to_string())
        .ok_or_else(|| {
            ClientError::Payload(format!(
                "upload response did not match the contract {UPLOAD_CONTRACT}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contract_shape_is_accepted() {
        let url = parse_upload_url(&json!({"data": {"url": "https://cdn/x.png"}})).unwrap();
        assert_eq!(url, "https://cdn/x.png");
    }

    #[test]
    fn test_legacy_shapes_are_rejected() {
        // Shapes the old dashboard used to sniff, now contract violations.
        let legacy = [
            json!({"url": "https://cdn/x.png"}),
            json!({"imageUrl": "https://cdn/x.png"}),
            json!({"data": {"imageUrl": "https://cdn/x.png"}}),
            json!("https://cdn/x.png"),
        ];
        for shape in legacy {
            assert!(parse_upload_url(&shape).is_err(), "accepted {shape}");
        }
    }
}
