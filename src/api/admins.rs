//! Admin API endpoints.

use axum::extract::{Path, State};

use super::{created, parse_record_id, success, ApiResult};
use crate::errors::AppError;
use crate::media::{BlobResponse, UploadForm};
use crate::models::{Admin, AdminChanges, NewAdmin, SocialLinks, SocialPatch};
use crate::AppState;

/// GET /admins - List admins, newest first.
pub async fn list_admins(State(state): State<AppState>) -> ApiResult<Vec<Admin>> {
    success(state.repo.list_admins().await?)
}

/// POST /admins - Create an admin. The photo is optional.
pub async fn create_admin(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> ApiResult<Admin> {
    let missing = form.missing(&["nome", "titulo", "descricao"]);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let admin = NewAdmin {
        name: form.non_empty("nome").unwrap_or_default(),
        title: form.non_empty("titulo").unwrap_or_default(),
        description: form.non_empty("descricao").unwrap_or_default(),
        socials: SocialLinks::from_fields(
            form.text("insta"),
            form.text("twitter"),
            form.text("twitch"),
        ),
        photo: form.take_file("foto"),
    };

    let admin = state.repo.create_admin(&admin).await?;
    created(admin)
}

/// GET /admins/:id - Get a single admin.
pub async fn get_admin(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Admin> {
    let id = parse_record_id(&id)?;

    match state.repo.get_admin(&id).await? {
        Some(admin) => success(admin),
        None => Err(AppError::NotFound(format!("Admin {} not found", id))),
    }
}

/// PUT /admins/:id - Update an admin.
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: UploadForm,
) -> ApiResult<Admin> {
    let id = parse_record_id(&id)?;
    let blank: Vec<String> = ["nome", "titulo", "descricao"]
        .into_iter()
        .filter(|name| form.text(name).is_some() && form.non_empty(name).is_none())
        .map(str::to_string)
        .collect();
    if !blank.is_empty() {
        return Err(AppError::MissingFields(blank));
    }

    let changes = AdminChanges {
        name: form.non_empty("nome"),
        title: form.non_empty("titulo"),
        description: form.non_empty("descricao"),
        socials: SocialPatch::from_fields(
            form.text("insta"),
            form.text("twitter"),
            form.text("twitch"),
        ),
        photo: form.take_file("foto"),
    };

    success(state.repo.update_admin(&id, changes).await?)
}

/// DELETE /admins/:id - Delete an admin.
pub async fn delete_admin(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_record_id(&id)?;
    state.repo.delete_admin(&id).await?;
    tracing::info!("Deleted admin {}", id);
    success(())
}

/// GET /admins/:id/foto - Serve an admin's photo, or the default avatar.
pub async fn get_admin_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BlobResponse, AppError> {
    let id = parse_record_id(&id)?;

    match state.repo.admin_photo(&id).await? {
        Some(Some(photo)) => Ok(photo.into()),
        Some(None) => Ok(BlobResponse::default_avatar()),
        None => Err(AppError::NotFound(format!("Admin {} not found", id))),
    }
}
