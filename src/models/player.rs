//! Player model matching the front-end roster shape.

use serde::{Deserialize, Serialize};

use super::{ImageMeta, SocialLinks, SocialPatch, StoredImage, Team};

/// Fields shared by every player representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
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
    pub foto_url: String,
}

impl PlayerProfile {
    pub fn photo_path(id: &str) -> String {
        format!("/jogadores/{}/imagem", id)
    }
}

/// A player with the numeric id of its team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    #[serde(rename = "time")]
    pub team_id: i64,
}

/// A player with its team resolved, or `None` when the id matches no team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerWithTeam {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    #[serde(rename = "time")]
    pub team: Option<Team>,
}

/// Validated input for creating a player.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub description: String,
    pub photo: StoredImage,
    pub socials: SocialLinks,
    pub team_id: i64,
}

/// Validated changes for an existing player.
#[derive(Debug, Clone)]
pub struct PlayerChanges {
    pub name: String,
    pub title: String,
    pub description: String,
    pub socials: SocialPatch,
    pub photo: Option<StoredImage>,
    pub team_id: Option<i64>,
}

/// Response body for a created player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPlayer {
    #[serde(rename = "_id")]
    pub id: String,
}
