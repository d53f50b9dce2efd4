//! Player API endpoints.

use axum::extract::{Path, State};

use super::{created, parse_record_id, parse_team_field, success, ApiResult};
use crate::errors::AppError;
use crate::media::{BlobResponse, UploadForm};
use crate::models::{
    CreatedPlayer, NewPlayer, Player, PlayerChanges, PlayerWithTeam, SocialLinks, SocialPatch,
};
use crate::AppState;

const REQUIRED_ON_CREATE: [&str; 4] = ["nome", "titulo", "descricao", "time"];
const REQUIRED_ON_UPDATE: [&str; 3] = ["nome", "titulo", "descricao"];

/// POST /jogadores - Create a player. The `foto` file is mandatory.
pub async fn create_player(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> ApiResult<CreatedPlayer> {
    let mut missing = form.missing(&REQUIRED_ON_CREATE);
    if !form.has_file("foto") {
        missing.push("foto".to_string());
    }
    let Some(photo) = form.take_file("foto").filter(|_| missing.is_empty()) else {
        return Err(AppError::MissingFields(missing));
    };

    let player = NewPlayer {
        name: form.non_empty("nome").unwrap_or_default(),
        title: form.non_empty("titulo").unwrap_or_default(),
        description: form.non_empty("descricao").unwrap_or_default(),
        team_id: parse_team_field("time", form.text("time").unwrap_or_default())?,
        socials: SocialLinks::from_fields(
            form.text("insta"),
            form.text("twitter"),
            form.text("twitch"),
        ),
        photo,
    };

    let player = state.repo.create_player(&player).await?;
    created(CreatedPlayer {
        id: player.profile.id,
    })
}

/// GET /jogadores - List all players with their team resolved.
pub async fn list_players(State(state): State<AppState>) -> ApiResult<Vec<PlayerWithTeam>> {
    success(state.repo.list_players_with_teams().await?)
}

/// GET /jogadores/:id - Get a single player with its team resolved.
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PlayerWithTeam> {
    let id = parse_record_id(&id)?;

    match state.repo.get_player_with_team(&id).await? {
        Some(player) => success(player),
        None => Err(AppError::NotFound(format!("Player {} not found", id))),
    }
}

/// GET /jogadores/:id/imagem - Serve a player's photo.
pub async fn get_player_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BlobResponse, AppError> {
    let id = parse_record_id(&id)?;

    state
        .repo
        .player_photo(&id)
        .await?
        .map(BlobResponse::from)
        .ok_or_else(|| AppError::NotFound(format!("Image for player {} not found", id)))
}

/// PUT /jogadores/:id - Update a player.
///
/// Name, title, and description must be sent. Social links follow the merge
/// policy, and the photo is replaced only when a new file is uploaded.
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: UploadForm,
) -> ApiResult<Player> {
    let id = parse_record_id(&id)?;
    let missing = form.missing(&REQUIRED_ON_UPDATE);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let team_id = match form.text("time").map(str::trim) {
        None => None,
        Some("") => return Err(AppError::MissingFields(vec!["time".to_string()])),
        Some(raw) => Some(parse_team_field("time", raw)?),
    };

    let changes = PlayerChanges {
        name: form.non_empty("nome").unwrap_or_default(),
        title: form.non_empty("titulo").unwrap_or_default(),
        description: form.non_empty("descricao").unwrap_or_default(),
        socials: SocialPatch::from_fields(
            form.text("insta"),
            form.text("twitter"),
            form.text("twitch"),
        ),
        photo: form.take_file("foto"),
        team_id,
    };

    success(state.repo.update_player(&id, changes).await?)
}

/// DELETE /jogadores/:id - Delete a player.
pub async fn delete_player(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_record_id(&id)?;
    state.repo.delete_player(&id).await?;
    tracing::info!("Deleted player {}", id);
    success(())
}
