//! Social network links shared by players and admins.

use serde::{Deserialize, Serialize};

use super::Patch;

/// Optional social profile links. Not unique across records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLinks {
    #[serde(rename = "insta", default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch: Option<String>,
}

impl SocialLinks {
    /// Build links from raw values, treating blank values as absent.
    pub fn from_fields(
        instagram: Option<&str>,
        twitter: Option<&str>,
        twitch: Option<&str>,
    ) -> Self {
        Self {
            instagram: Patch::from_field(instagram).apply(None),
            twitter: Patch::from_field(twitter).apply(None),
            twitch: Patch::from_field(twitch).apply(None),
        }
    }
}

/// Requested changes to a record's social links.
#[derive(Debug, Clone, Default)]
pub struct SocialPatch {
    pub instagram: Patch<String>,
    pub twitter: Patch<String>,
    pub twitch: Patch<String>,
}

impl SocialPatch {
    pub fn from_fields(
        instagram: Option<&str>,
        twitter: Option<&str>,
        twitch: Option<&str>,
    ) -> Self {
        Self {
            instagram: Patch::from_field(instagram),
            twitter: Patch::from_field(twitter),
            twitch: Patch::from_field(twitch),
        }
    }

    pub fn apply(self, current: SocialLinks) -> SocialLinks {
        SocialLinks {
            instagram: self.instagram.apply(current.instagram),
            twitter: self.twitter.apply(current.twitter),
            twitch: self.twitch.apply(current.twitch),
        }
    }
}
