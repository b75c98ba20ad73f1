//! The `directus_files` system collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Collection, Extra};
use crate::types::FileId;

/// Metadata of an uploaded asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectusFile {
    pub id: FileId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename_download: Option<String>,
    /// MIME type.
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
    /// Size in bytes. Directus sends it as a string for files over 2^53.
    #[serde(default)]
    pub filesize: Option<serde_json::Value>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub uploaded_on: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DirectusFile {
    /// Path of the asset download relative to the API root.
    #[must_use]
    pub fn asset_path(&self) -> String {
        format!("assets/{}", self.id)
    }

    /// Whether the asset is an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
    }
}

impl Collection for DirectusFile {
    const NAME: &'static str = "directus_files";
    const ENDPOINT: &'static str = "files";
}
