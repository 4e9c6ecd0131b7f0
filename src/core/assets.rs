//! Inline asset embedding
//!
//! Cover images and galley files are embedded as base64. A missing or
//! unreadable file never aborts a run: the caller gets a resolution it can
//! branch on and records the skip.

use crate::domain::EmbeddedAsset;
use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of looking up one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetResolution {
    /// The record names no file
    NotRequested,
    /// File read and encoded
    Found(EmbeddedAsset),
    /// No regular file at the resolved path
    Missing(PathBuf),
    /// The file exists but could not be read
    Unreadable { path: PathBuf, reason: String },
}

/// Resolves file names against one base directory
#[derive(Debug, Clone)]
pub struct AssetEmbedder {
    base_dir: PathBuf,
}

impl AssetEmbedder {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Looks up and encodes `file_name` under the base directory
    pub fn embed(&self, file_name: &str) -> AssetResolution {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return AssetResolution::NotRequested;
        }

        let path = self.base_dir.join(file_name);
        if !path.is_file() {
            return AssetResolution::Missing(path);
        }

        match fs::read(&path) {
            Ok(bytes) => AssetResolution::Found(EmbeddedAsset {
                file_name: file_name.to_string(),
                payload: general_purpose::STANDARD.encode(&bytes),
                byte_len: bytes.len() as u64,
                extension: file_extension(file_name),
            }),
            Err(e) => AssetResolution::Unreadable {
                path,
                reason: e.to_string(),
            },
        }
    }
}

/// Lower-cased extension without the dot, empty when there is none
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}
