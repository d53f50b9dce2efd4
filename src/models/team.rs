//! Team model matching the front-end team shape.

use serde::{Deserialize, Serialize};

use super::{ImageMeta, StoredImage};

/// A team, identified by its numeric id. Blob bytes are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "rota")]
    pub route: String,
    #[serde(rename = "foto", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageMeta>,
    #[serde(rename = "jogo", default, skip_serializing_if = "Option::is_none")]
    pub game_logo: Option<ImageMeta>,
    pub created_at: String,
    pub foto_url: String,
    pub logo_url: String,
}

impl Team {
    pub fn photo_path(id: i64) -> String {
        format!("/times/{}/foto", id)
    }

    pub fn logo_path(id: i64) -> String {
        format!("/times/{}/logo", id)
    }
}

/// Validated input for creating a team. Both images are mandatory.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub id: i64,
    pub name: String,
    pub route: String,
    pub photo: StoredImage,
    pub game_logo: StoredImage,
}

/// Validated changes for an existing team.
#[derive(Debug, Clone, Default)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub route: Option<String>,
    pub photo: Option<StoredImage>,
    pub game_logo: Option<StoredImage>,
}

/// Response body for a created team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTeam {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "rota")]
    pub route: String,
}
