//! The Cloudinary storage adapter.
//!
//! `save` is a stateless single pass: normalize the filename into a
//! `public_id`, upload, optionally upload the retina variant, derive the
//! delivery URL. Configuration is captured once at construction and never
//! mutated.

use async_trait::async_trait;

use crate::client::CloudinaryClient;
use crate::config::CloudinaryConfig;
use crate::error::StorageError;
use crate::storage::ImageStorage;
use crate::types::{ImageFile, UrlOptions};

pub struct CloudinaryAdapter {
    config: CloudinaryConfig,
    client: CloudinaryClient,
}

impl CloudinaryAdapter {
    pub fn new(config: CloudinaryConfig) -> Self {
        let client = CloudinaryClient::new(config.auth.clone());
        Self { config, client }
    }

    /// Build the adapter around an existing client, e.g. one pointed at a
    /// mock server.
    pub fn with_client(config: CloudinaryConfig, client: CloudinaryClient) -> Self {
        Self { config, client }
    }

    fn url_options(&self) -> UrlOptions {
        UrlOptions {
            quality: self.config.quality().to_string(),
            secure: self.config.secure(),
        }
    }

    /// Prefix the configured folder onto an identifier, matching where the
    /// provider stored the asset.
    fn scoped_public_id(&self, public_id: &str) -> String {
        if self.config.upload.folder.is_empty() {
            public_id.to_string()
        } else {
            format!("{}/{}", self.config.upload.folder, public_id)
        }
    }
}

#[async_trait]
impl ImageStorage for CloudinaryAdapter {
    async fn save(&self, file: &ImageFile) -> Result<String, StorageError> {
        debug_assert!(!file.name.is_empty(), "image file must carry a name");

        let public_id = normalize_public_id(&file.name);
        let upload_config = self.config.upload_config(&public_id);

        let result = self
            .client
            .upload(&file.path, &upload_config)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, path = %file.path.display(), "image upload failed");
                StorageError::Upload {
                    path: file.path.display().to_string(),
                }
            })?;

        // A missing retina variant only degrades high-density rendering; it
        // must not fail the primary save.
        if let Some(retina_config) = self.config.retina_config(&public_id) {
            if let Err(e) = self.client.upload(&file.path, &retina_config).await {
                tracing::warn!(
                    error = %e,
                    public_id = %retina_config.public_id,
                    "retina upload failed"
                );
            }
        }

        let delivery_id = format!("{}{}", result.public_id, extension(&file.name));
        Ok(self.client.url(&delivery_id, &self.url_options()))
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let public_id = self.scoped_public_id(&normalize_public_id(filename));
        self.client.resource_exists(&public_id).await
    }

    async fn delete(&self, filename: &str) -> Result<(), StorageError> {
        let public_id = self.scoped_public_id(&normalize_public_id(filename));
        self.client.destroy(&public_id).await
    }

    async fn read(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        self.client.download(url).await
    }
}

/// Derive a provider `public_id` from an image filename: drop the extension
/// and replace anything outside `[A-Za-z0-9_-]` with a hyphen, collapsing
/// runs. The same name always maps to the same identifier.
fn normalize_public_id(name: &str) -> String {
    let base = match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    };
    let mut out = String::with_capacity(base.len());
    let mut last_was_separator = true;
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            out.push('-');
            last_was_separator = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Extension of the original filename, dot included; empty when absent.
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_extension() {
        assert_eq!(normalize_public_id("favicon.png"), "favicon");
        assert_eq!(normalize_public_id("favicon"), "favicon");
    }

    #[test]
    fn normalization_replaces_unsafe_characters() {
        assert_eq!(
            normalize_public_id("favicon with spaces.png"),
            "favicon-with-spaces"
        );
        assert_eq!(normalize_public_id("my photo (1).jpg"), "my-photo-1");
        assert_eq!(normalize_public_id("café terrace.png"), "caf-terrace");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_public_id("favicon with spaces.png");
        let second = normalize_public_id("favicon with spaces.png");
        assert_eq!(first, second);
        assert_eq!(normalize_public_id(&first), first);
    }

    #[test]
    fn normalization_trims_leading_and_trailing_separators() {
        assert_eq!(normalize_public_id(" padded .png"), "padded");
        assert_eq!(normalize_public_id(".hidden"), "hidden");
    }

    #[test]
    fn extension_keeps_the_dot() {
        assert_eq!(extension("favicon.png"), ".png");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("no-extension"), "");
        assert_eq!(extension(".hidden"), "");
    }
}
