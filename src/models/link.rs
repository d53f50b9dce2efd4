//! Image, profile, and partner link lists used by the front-end carousels.

use serde::{Deserialize, Serialize};

/// Which link list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Image,
    Profile,
    Partner,
}

impl LinkKind {
    pub fn table(&self) -> &'static str {
        match self {
            LinkKind::Image => "image_links",
            LinkKind::Profile => "profile_links",
            LinkKind::Partner => "partner_links",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Image => "Image",
            LinkKind::Profile => "Profile",
            LinkKind::Partner => "Partner",
        }
    }
}

/// A single link entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub src: String,
}

/// Request body for adding a link entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLinkEntry {
    #[serde(default)]
    pub src: String,
}
