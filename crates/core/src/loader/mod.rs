//! Surface loading: reads JSON/YAML snapshot documents and validates them into
//! immutable [`Surface`] values.
//!
//! The loader never hands back a partially-valid surface. Any invariant
//! violation surfaces as [`LoadError::Malformed`].

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::model::{MalformedSurfaceError, Surface};

mod descriptor;

pub use descriptor::{
    ClassDescriptor, FieldDescriptor, MethodDescriptor, OwnedFieldDescriptor,
    OwnedMethodDescriptor, SurfaceDescriptor,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read surface snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Surface snapshot {path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Invalid JSON surface snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML surface snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is not one of json/yaml/yml.
    #[error("Unsupported snapshot format for {0} (expected .json, .yaml, or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Malformed(#[from] MalformedSurfaceError),
}

/// On-disk encodings a snapshot may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref()
        {
            Some("json") => Some(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }
}

/// A validated surface together with the digest of the bytes it came from.
#[derive(Debug, Clone)]
pub struct LoadedSurface {
    pub surface: Surface,
    pub digest: String,
    pub path: PathBuf,
}

/// Decode a snapshot document without validating it.
pub fn parse_descriptor(
    body: &str,
    format: SnapshotFormat,
) -> Result<SurfaceDescriptor, LoadError> {
    let descriptor = match format {
        SnapshotFormat::Json => serde_json::from_str(body)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(body)?,
    };
    Ok(descriptor)
}

/// Decode and validate a snapshot document.
pub fn parse_surface(body: &str, format: SnapshotFormat) -> Result<Surface, LoadError> {
    let descriptor = parse_descriptor(body, format)?;
    Ok(descriptor.build()?)
}

/// Load, validate, and fingerprint the snapshot at `path`.
pub fn load_surface(path: &Path) -> Result<LoadedSurface, LoadError> {
    let format =
        SnapshotFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.into()))?;
    let bytes =
        fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let digest = surface_digest(&bytes);
    let body = String::from_utf8(bytes)
        .map_err(|source| LoadError::Encoding { path: path.to_path_buf(), source })?;

    let surface = parse_surface(&body, format)?;
    debug!(
        path = %path.display(),
        classes = surface.len(),
        members = surface.member_count(),
        "loaded surface snapshot"
    );

    Ok(LoadedSurface { surface, digest, path: path.to_path_buf() })
}

/// SHA-256 of a raw snapshot, hex encoded.
pub fn surface_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
