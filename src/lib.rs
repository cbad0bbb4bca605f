//! # Cloudinary Store - Image Storage Adapter for Cloudinary
//!
//! Uploads local images to Cloudinary and derives public delivery URLs with
//! automatic-quality transformation, optionally uploading a secondary
//! high-density ("retina") variant of each image.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Single-pass save**: filename normalization, signed multipart upload,
//!   delivery URL derivation — one independent request/response cycle per call.
//! - **Legacy compatibility**: the legacy configuration shape keeps
//!   provider-side unique filenames and omits empty folder/tags fields.
//! - **Retina variants**: an optional second upload stores a `@2x` copy at a
//!   predictable derived path, without affecting the returned URL.
//! - **Explicit client**: no process-wide SDK handle; the adapter owns a
//!   client value that tests can point at a mock server.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloudinary_store::{CloudinaryAdapter, CloudinaryConfig, ImageFile, ImageStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CloudinaryConfig::new("my-cloud", "api-key", "api-secret")
//!         .with_folder("blog/images")
//!         .with_tags(vec!["blog".to_string()]);
//!     let adapter = CloudinaryAdapter::new(config);
//!
//!     let file = ImageFile::new("/tmp/favicon.png", "favicon.png");
//!     let url = adapter.save(&file).await?;
//!     println!("uploaded to {url}");
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
mod signing;
pub mod storage;
pub mod types;

pub use adapter::CloudinaryAdapter;
pub use client::CloudinaryClient;
pub use config::{CloudinaryAuth, CloudinaryConfig, FetchOptions, RetinaConfig, UploadOptions};
pub use error::StorageError;
pub use storage::ImageStorage;
pub use types::{ApiResult, ImageFile, UploadConfig, UrlOptions};
