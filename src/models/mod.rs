//! Data models for the e-sports site.
//!
//! Field names follow the front-end contract, so the Portuguese keys the site
//! uses (`nome`, `titulo`, `rota`, ...) appear as serde renames.

mod admin;
mod link;
mod media;
mod patch;
mod player;
mod social;
mod team;
mod text;
mod user;

pub use admin::*;
pub use link::*;
pub use media::*;
pub use patch::*;
pub use player::*;
pub use social::*;
pub use team::*;
pub use text::*;
pub use user::*;
