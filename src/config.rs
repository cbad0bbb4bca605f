//! Adapter configuration.
//!
//! One immutable value object captures the whole configuration surface:
//! credentials, upload options, URL-build options, the legacy compatibility
//! flag and the optional retina sub-configuration. The per-call
//! [`UploadConfig`] is computed from it by a pure function, so the
//! default/legacy/retina variability never leaks into the call site.

use secrecy::SecretString;
use serde::Deserialize;

use crate::types::UploadConfig;

/// Service account credentials for the Cloudinary API.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryAuth {
    pub cloud_name: String,
    pub api_key: SecretString,
    pub api_secret: SecretString,
}

impl CloudinaryAuth {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: SecretString::from(api_key.into()),
            api_secret: SecretString::from(api_secret.into()),
        }
    }
}

/// Destination options applied to every upload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadOptions {
    /// Destination folder; empty means the account root.
    pub folder: String,
    /// Tags attached to every uploaded asset.
    pub tags: Vec<String>,
}

/// Options applied when deriving delivery URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Quality transformation parameter.
    pub quality: String,
    /// Use `https` for delivery URLs.
    pub secure: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            quality: "auto".to_string(),
            secure: false,
        }
    }
}

/// Enables the secondary high-density upload for RetinaJS-style themes.
#[derive(Debug, Clone, Deserialize)]
pub struct RetinaConfig {
    /// Width of the base image in CSS pixels; the variant is scaled to
    /// twice this width.
    #[serde(rename = "baseWidth")]
    pub base_width: u32,
}

/// Complete adapter configuration, read-only after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryConfig {
    pub auth: CloudinaryAuth,
    #[serde(default)]
    pub upload: UploadOptions,
    #[serde(default)]
    pub fetch: FetchOptions,
    /// Compatibility with the legacy configuration shape: uploads keep the
    /// provider-side unique filename behavior, empty folder/tags are omitted
    /// from requests, and delivery URLs use `q_auto:good` over https.
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub rjs: Option<RetinaConfig>,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            auth: CloudinaryAuth::new(cloud_name, api_key, api_secret),
            upload: UploadOptions::default(),
            fetch: FetchOptions::default(),
            legacy: false,
            rjs: None,
        }
    }

    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.upload.folder = folder.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.upload.tags = tags;
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.fetch.quality = quality.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.fetch.secure = secure;
        self
    }

    pub fn with_retina(mut self, base_width: u32) -> Self {
        self.rjs = Some(RetinaConfig { base_width });
        self
    }

    /// Upload parameters for one `save` call.
    pub fn upload_config(&self, public_id: &str) -> UploadConfig {
        let (folder, tags) = if self.legacy {
            (
                (!self.upload.folder.is_empty()).then(|| self.upload.folder.clone()),
                (!self.upload.tags.is_empty()).then(|| self.upload.tags.clone()),
            )
        } else {
            (
                Some(self.upload.folder.clone()),
                Some(self.upload.tags.clone()),
            )
        };
        UploadConfig {
            use_filename: true,
            unique_filename: self.legacy,
            phash: true,
            overwrite: false,
            invalidate: true,
            folder,
            tags,
            public_id: public_id.to_string(),
            transformation: None,
        }
    }

    /// Upload parameters for the secondary high-density variant: the same
    /// base identifier marked `@2x`, scaled server-side to twice the
    /// configured base width.
    pub fn retina_config(&self, public_id: &str) -> Option<UploadConfig> {
        self.rjs.as_ref().map(|rjs| {
            let mut config = self.upload_config(&format!("{public_id}@2x"));
            config.transformation = Some(format!("w_{},c_limit", rjs.base_width * 2));
            config
        })
    }

    /// Quality transformation used when deriving delivery URLs.
    pub fn quality(&self) -> &str {
        if self.legacy {
            "auto:good"
        } else {
            &self.fetch.quality
        }
    }

    /// Delivery URL scheme selection. Legacy configurations always used
    /// https.
    pub fn secure(&self) -> bool {
        self.legacy || self.fetch.secure
    }
}
