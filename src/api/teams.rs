//! Team API endpoints.

use axum::extract::{Path, State};

use super::{created, parse_team_field, parse_team_id, success, ApiResult};
use crate::errors::AppError;
use crate::media::{BlobResponse, UploadForm};
use crate::models::{CreatedTeam, NewTeam, Player, StoredImage, Team, TeamChanges};
use crate::AppState;

/// POST /times - Create a team with its photo and game logo.
pub async fn create_team(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> ApiResult<CreatedTeam> {
    let mut missing = form.missing(&["id", "nome", "rota"]);
    missing.extend(
        ["foto", "jogo"]
            .into_iter()
            .filter(|name| !form.has_file(name))
            .map(str::to_string),
    );
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let (Some(photo), Some(game_logo)) = (form.take_file("foto"), form.take_file("jogo")) else {
        return Err(AppError::MissingFields(vec![
            "foto".to_string(),
            "jogo".to_string(),
        ]));
    };

    let team = NewTeam {
        id: parse_team_field("id", form.text("id").unwrap_or_default())?,
        name: form.non_empty("nome").unwrap_or_default(),
        route: form.non_empty("rota").unwrap_or_default(),
        photo,
        game_logo,
    };

    let team = state.repo.create_team(&team).await?;

    created(CreatedTeam {
        id: team.id,
        name: team.name,
        route: team.route,
    })
}

/// GET /times - List all teams.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    success(state.repo.list_teams().await?)
}

/// GET /times/:id - Get a single team.
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    let id = parse_team_id(&id)?;

    match state.repo.get_team(id).await? {
        Some(team) => success(team),
        None => Err(AppError::NotFound(format!("Team {} not found", id))),
    }
}

/// PUT /times/:id - Update a team. Absent fields and images are kept.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: UploadForm,
) -> ApiResult<Team> {
    let id = parse_team_id(&id)?;
    // Name and route may be omitted, but never blanked.
    let blank: Vec<String> = ["nome", "rota"]
        .into_iter()
        .filter(|name| form.text(name).is_some() && form.non_empty(name).is_none())
        .map(str::to_string)
        .collect();
    if !blank.is_empty() {
        return Err(AppError::MissingFields(blank));
    }

    let changes = TeamChanges {
        name: form.non_empty("nome"),
        route: form.non_empty("rota"),
        photo: form.take_file("foto"),
        game_logo: form.take_file("jogo"),
    };

    success(state.repo.update_team(id, &changes).await?)
}

/// DELETE /times/:id - Delete a team no player belongs to.
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_team_id(&id)?;
    state.repo.delete_team(id).await?;
    success(())
}

/// GET /times/:id/foto - Serve a team's photo.
pub async fn get_team_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BlobResponse, AppError> {
    let id = parse_team_id(&id)?;
    blob_or_not_found(state.repo.team_photo(id).await?, "Photo", id)
}

/// GET /times/:id/logo - Serve a team's game logo. Also mounted at `/times/:id/jogo`.
pub async fn get_team_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BlobResponse, AppError> {
    let id = parse_team_id(&id)?;
    blob_or_not_found(state.repo.team_logo(id).await?, "Logo", id)
}

/// GET /times/:id/jogadores - List the players of one team.
pub async fn get_team_players(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Player>> {
    let id = parse_team_id(&id)?;

    if state.repo.get_team(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", id)));
    }

    success(state.repo.list_players_by_team(id).await?)
}

fn blob_or_not_found(
    image: Option<StoredImage>,
    what: &str,
    id: i64,
) -> Result<BlobResponse, AppError> {
    image
        .map(BlobResponse::from)
        .ok_or_else(|| AppError::NotFound(format!("{} for team {} not found", what, id)))
}
