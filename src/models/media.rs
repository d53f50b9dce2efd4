//! Inline image blobs and the metadata echoed in place of their bytes.

use serde::{Deserialize, Serialize};

/// An image stored inside its owning record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub data: Vec<u8>,
    pub content_type: String,
    pub original_name: Option<String>,
}

impl StoredImage {
    pub fn meta(&self) -> ImageMeta {
        ImageMeta {
            content_type: self.content_type.clone(),
            original_name: self.original_name.clone(),
        }
    }
}

/// Blob metadata returned in JSON responses; the bytes are served by a dedicated route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub content_type: String,
    #[serde(rename = "nomeOriginal", skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}
