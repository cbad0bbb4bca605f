//! HTTP client for the Cloudinary upload and admin APIs.
//!
//! The client is an explicit value owned by the adapter, not a process-wide
//! handle: everything it needs — credentials, base URLs, the underlying
//! `reqwest::Client` — travels with it, so tests can point an instance at a
//! local mock server.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::ExposeSecret;

use crate::config::CloudinaryAuth;
use crate::error::StorageError;
use crate::signing::sign_params;
use crate::types::{ApiResult, UploadConfig, UrlOptions};

const DEFAULT_UPLOAD_BASE_URL: &str = "https://api.cloudinary.com";
const DEFAULT_DELIVERY_HOST: &str = "res.cloudinary.com";

/// Cloudinary API client.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    auth: CloudinaryAuth,
    upload_base_url: String,
    delivery_host: String,
    http_client: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(auth: CloudinaryAuth) -> Self {
        Self::with_http_client(auth, reqwest::Client::new())
    }

    pub fn with_http_client(auth: CloudinaryAuth, http_client: reqwest::Client) -> Self {
        Self {
            auth,
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            delivery_host: DEFAULT_DELIVERY_HOST.to_string(),
            http_client,
        }
    }

    /// Point the client at a different API endpoint, e.g. a mock server.
    pub fn with_upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = url.into();
        self
    }

    /// Override the delivery hostname used by [`CloudinaryClient::url`].
    pub fn with_delivery_host(mut self, host: impl Into<String>) -> Self {
        self.delivery_host = host.into();
        self
    }

    /// Upload a local image.
    ///
    /// Sends a signed multipart request to the image upload endpoint. The
    /// flags carried by `config` are serialized one text part each; omitted
    /// fields (`None` folder/tags) produce no part at all.
    pub async fn upload(
        &self,
        path: &Path,
        config: &UploadConfig,
    ) -> Result<ApiResult, StorageError> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let params = Self::upload_params(config, Self::timestamp());
        let signature = sign_params(&params, self.auth.api_secret.expose_secret());

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime.as_ref())
            .map_err(|e| StorageError::InvalidInput(e.to_string()))?;
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in params {
            form = form.text(key, value);
        }
        form = form
            .text("api_key", self.auth.api_key.expose_secret().to_string())
            .text("signature", signature)
            .part("file", file_part);

        let url = format!(
            "{}/v1_1/{}/image/upload",
            self.upload_base_url, self.auth.cloud_name
        );
        tracing::debug!(url = %url, public_id = %config.public_id, "uploading image");

        let resp = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        if !resp.status().is_success() {
            let code = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(StorageError::ApiError { code, message });
        }
        let text = resp
            .text()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| StorageError::ParseError(e.to_string()))
    }

    /// Derive a delivery URL for an asset. Pure string construction, no
    /// request is issued.
    pub fn url(&self, public_id: &str, options: &UrlOptions) -> String {
        let scheme = if options.secure { "https" } else { "http" };
        format!(
            "{scheme}://{}/{}/image/upload/q_{}/{}",
            self.delivery_host, self.auth.cloud_name, options.quality, public_id
        )
    }

    /// Delete an uploaded asset.
    pub async fn destroy(&self, public_id: &str) -> Result<(), StorageError> {
        let mut params = vec![
            ("invalidate".to_string(), "true".to_string()),
            ("public_id".to_string(), public_id.to_string()),
            ("timestamp".to_string(), Self::timestamp().to_string()),
        ];
        let signature = sign_params(&params, self.auth.api_secret.expose_secret());
        params.push((
            "api_key".to_string(),
            self.auth.api_key.expose_secret().to_string(),
        ));
        params.push(("signature".to_string(), signature));

        let url = format!(
            "{}/v1_1/{}/image/destroy",
            self.upload_base_url, self.auth.cloud_name
        );
        tracing::debug!(url = %url, public_id = %public_id, "destroying image");

        let resp = self
            .http_client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        let code = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StorageError::ApiError { code, message });
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| StorageError::ParseError(e.to_string()))?;
        match body.get("result").and_then(|r| r.as_str()) {
            Some("ok") => Ok(()),
            other => Err(StorageError::ApiError {
                code,
                message: format!("destroy failed: {}", other.unwrap_or("unknown")),
            }),
        }
    }

    /// Check whether an asset exists, via the admin resources endpoint.
    pub async fn resource_exists(&self, public_id: &str) -> Result<bool, StorageError> {
        let url = format!(
            "{}/v1_1/{}/resources/image/upload/{}",
            self.upload_base_url, self.auth.cloud_name, public_id
        );
        let resp = self
            .http_client
            .get(&url)
            .basic_auth(
                self.auth.api_key.expose_secret(),
                Some(self.auth.api_secret.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            s => Err(StorageError::ApiError {
                code: s.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetch the raw bytes behind a delivery URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let resp = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(StorageError::ApiError {
                code: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| StorageError::HttpError(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Flatten an [`UploadConfig`] into the signed request parameters.
    /// Booleans serialize as `true`/`false`, tags join with commas.
    fn upload_params(config: &UploadConfig, timestamp: u64) -> Vec<(String, String)> {
        let mut params = vec![
            ("use_filename".to_string(), config.use_filename.to_string()),
            (
                "unique_filename".to_string(),
                config.unique_filename.to_string(),
            ),
            ("phash".to_string(), config.phash.to_string()),
            ("overwrite".to_string(), config.overwrite.to_string()),
            ("invalidate".to_string(), config.invalidate.to_string()),
        ];
        if let Some(folder) = &config.folder {
            params.push(("folder".to_string(), folder.clone()));
        }
        if let Some(tags) = &config.tags {
            params.push(("tags".to_string(), tags.join(",")));
        }
        params.push(("public_id".to_string(), config.public_id.clone()));
        if let Some(transformation) = &config.transformation {
            params.push(("transformation".to_string(), transformation.clone()));
        }
        params.push(("timestamp".to_string(), timestamp.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CloudinaryConfig;

    fn client() -> CloudinaryClient {
        CloudinaryClient::new(CloudinaryAuth::new("blog-mornati-net", "key", "secret"))
    }

    #[test]
    fn url_uses_plain_http_and_quality() {
        let options = UrlOptions {
            quality: "auto".to_string(),
            secure: false,
        };
        assert_eq!(
            client().url("favicon.png", &options),
            "http://res.cloudinary.com/blog-mornati-net/image/upload/q_auto/favicon.png"
        );
    }

    #[test]
    fn url_secure_uses_https_and_alternate_quality() {
        let options = UrlOptions {
            quality: "auto:good".to_string(),
            secure: true,
        };
        assert_eq!(
            client().url("favicon.png", &options),
            "https://res.cloudinary.com/blog-mornati-net/image/upload/q_auto:good/favicon.png"
        );
    }

    #[test]
    fn url_keeps_folder_segments() {
        let options = UrlOptions {
            quality: "auto".to_string(),
            secure: false,
        };
        assert_eq!(
            client().url("blog.eexit.net/v3/favicon.png", &options),
            "http://res.cloudinary.com/blog-mornati-net/image/upload/q_auto/blog.eexit.net/v3/favicon.png"
        );
    }

    #[test]
    fn upload_params_include_empty_folder_and_tags_in_default_mode() {
        let config = CloudinaryConfig::new("c", "k", "s").upload_config("favicon");
        let params = CloudinaryClient::upload_params(&config, 42);
        let find = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(find("use_filename"), Some("true"));
        assert_eq!(find("unique_filename"), Some("false"));
        assert_eq!(find("folder"), Some(""));
        assert_eq!(find("tags"), Some(""));
        assert_eq!(find("public_id"), Some("favicon"));
        assert_eq!(find("timestamp"), Some("42"));
    }

    #[test]
    fn upload_params_omit_folder_and_tags_in_legacy_mode() {
        let config = CloudinaryConfig::new("c", "k", "s")
            .with_legacy(true)
            .upload_config("favicon");
        let params = CloudinaryClient::upload_params(&config, 42);
        assert!(params.iter().all(|(k, _)| k != "folder" && k != "tags"));
        assert!(params.iter().any(|(k, v)| k == "unique_filename" && v == "true"));
    }

    #[test]
    fn upload_params_join_tags_with_commas() {
        let config = CloudinaryConfig::new("c", "k", "s")
            .with_tags(vec!["foo".to_string(), "bar".to_string()])
            .upload_config("favicon");
        let params = CloudinaryClient::upload_params(&config, 42);
        assert!(params.iter().any(|(k, v)| k == "tags" && v == "foo,bar"));
    }
}
