//! Object storage client for admin asset uploads (logos, bracket images).
//!
//! Talks to a Supabase-style storage REST API:
//! `POST {base}/storage/v1/object/{bucket}/{path}` to upload and
//! `{base}/storage/v1/object/public/{bucket}/{path}` to serve.

use std::sync::LazyLock;

use axum::body::Bytes;
use regex::Regex;
use reqwest::Client;

use crate::config::Config;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$").expect("filename regex"));

/// Check an uploaded filename and return it lowercased.
pub fn validate_filename(filename: &str) -> Result<String, String> {
    if !FILENAME_RE.is_match(filename) {
        return Err("Filename may only contain letters, digits, '.', '_' and '-'".to_string());
    }
    let lower = filename.to_lowercase();
    let extension = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    if !ALLOWED_EXTENSIONS.contains(&extension) {
        return Err(format!("Unsupported file type: .{extension}"));
    }
    Ok(lower)
}

#[derive(Clone)]
pub struct AssetStorage {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl AssetStorage {
    /// Create a new client from config.
    /// Returns None if storage is not configured.
    pub fn new(config: &Config) -> Option<Self> {
        let base_url = config.storage_url.as_ref()?;
        let service_key = config.storage_service_key.as_ref()?;

        let client = Client::builder()
            .user_agent("TournamentTracker/1.0")
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .ok()?;

        Some(Self {
            client,
            base_url: base_url.clone(),
            bucket: config.storage_bucket.clone(),
            service_key: service_key.clone(),
        })
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    /// Upload an asset and return its public URL.
    /// Stored under a timestamp prefix so re-uploads never overwrite.
    pub async fn upload_asset(
        &self,
        filename: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, String> {
        let filename = validate_filename(filename)?;
        if bytes.is_empty() {
            return Err("Empty upload".to_string());
        }

        let path = format!("{}-{}", chrono::Utc::now().timestamp_millis(), filename);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, path
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Upload failed with HTTP {status}: {body}"));
        }

        tracing::info!("Uploaded asset {}", path);
        Ok(self.public_url(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert_eq!(validate_filename("Logo.PNG"), Ok("logo.png".to_string()));
        assert!(validate_filename("bracket_final-v2.webp").is_ok());
        assert!(validate_filename("../etc/passwd.png").is_err());
        assert!(validate_filename("script.exe").is_err());
        assert!(validate_filename("noextension").is_err());
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn test_public_url() {
        let storage = AssetStorage {
            client: Client::new(),
            base_url: "https://store.example.org".into(),
            bucket: "assets".into(),
            service_key: "key".into(),
        };
        assert_eq!(
            storage.public_url("1700000000000-logo.png"),
            "https://store.example.org/storage/v1/object/public/assets/1700000000000-logo.png"
        );
    }
}
