//! Admin model matching the front-end staff card shape.

use serde::{Deserialize, Serialize};

use super::{ImageMeta, SocialLinks, SocialPatch, StoredImage};

/// A site administrator, shown on the staff page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "foto", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageMeta>,
    #[serde(flatten)]
    pub socials: SocialLinks,
    pub created_at: String,
    /// `None` when no photo was uploaded.
    pub foto_url: Option<String>,
}

impl Admin {
    pub fn photo_path(id: &str) -> String {
        format!("/admins/{}/foto", id)
    }
}

/// Validated input for creating an admin. The photo is optional.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub title: String,
    pub description: String,
    pub photo: Option<StoredImage>,
    pub socials: SocialLinks,
}

/// Validated changes for an existing admin.
#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub socials: SocialPatch,
    pub photo: Option<StoredImage>,
}
