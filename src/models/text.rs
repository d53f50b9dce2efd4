//! Free-form text blocks edited from the CMS pages.

use serde::{Deserialize, Serialize};

/// A text block. Every content field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBlock {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: Option<String>,
    #[serde(rename = "conteudo", default)]
    pub content: Option<String>,
}

/// Request body for creating a text block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTextBlock {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: Option<String>,
    #[serde(rename = "conteudo", default)]
    pub content: Option<String>,
}

/// Request body for updating a text block; the id travels in the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTextBlockRequest {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "subtitulo", default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "conteudo", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
