//! Data types exchanged with the Cloudinary API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A local image handed to the adapter by the host application.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Location of the image on the local filesystem.
    pub path: PathBuf,
    /// Original filename, possibly containing spaces or other characters
    /// that are unsafe in a provider identifier.
    pub name: String,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Per-call parameters for the Cloudinary upload endpoint.
///
/// Derived fresh for every `save` from the adapter configuration and the
/// normalized filename. `folder` and `tags` are `None` under legacy
/// configurations, which leaves them out of the request entirely; the
/// provider distinguishes "unset" from "empty".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadConfig {
    pub use_filename: bool,
    pub unique_filename: bool,
    /// Perceptual hash, used by the provider for deduplication.
    pub phash: bool,
    pub overwrite: bool,
    /// Forces a CDN cache bust when an asset is replaced.
    pub invalidate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Normalized base name of the input file, extension stripped.
    pub public_id: String,
    /// Incoming transformation, only set for the retina variant upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
}

/// Response of a successful upload.
///
/// Provider fields this adapter does not consume are kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResult {
    /// Identifier the asset was stored under, including any folder prefix.
    pub public_id: String,
    #[serde(default)]
    pub version: Option<u64>,
    pub url: String,
    pub secure_url: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Options for deriving a delivery URL.
#[derive(Debug, Clone)]
pub struct UrlOptions {
    /// Quality transformation, e.g. `auto` or `auto:good`.
    pub quality: String,
    /// Selects `https` over `http` for the delivery scheme.
    pub secure: bool,
}
