//! Text block and link list endpoints backing the CMS pages.

use axum::extract::{Path, State};

use super::{created, parse_record_id, success, ApiResult, JsonBody};
use crate::errors::AppError;
use crate::models::{
    LinkEntry, LinkKind, NewLinkEntry, NewTextBlock, TextBlock, UpdateTextBlockRequest,
};
use crate::AppState;

// ==================== TEXT BLOCKS ====================

/// POST /new-text - Create a text block.
pub async fn create_text(
    State(state): State<AppState>,
    JsonBody(block): JsonBody<NewTextBlock>,
) -> ApiResult<TextBlock> {
    created(state.repo.create_text_block(&block).await?)
}

/// GET /textos-puxar - List all text blocks.
pub async fn list_texts(State(state): State<AppState>) -> ApiResult<Vec<TextBlock>> {
    success(state.repo.list_text_blocks().await?)
}

/// PUT /textos-atualizar - Update a text block identified by `id` in the body.
pub async fn update_text(
    State(state): State<AppState>,
    JsonBody(mut request): JsonBody<UpdateTextBlockRequest>,
) -> ApiResult<TextBlock> {
    if request.id.trim().is_empty() {
        return Err(AppError::MissingFields(vec!["id".to_string()]));
    }
    request.id = parse_record_id(&request.id)?;

    success(state.repo.update_text_block(&request).await?)
}

// ==================== LINK LISTS ====================

async fn add_link(state: &AppState, kind: LinkKind, entry: NewLinkEntry) -> ApiResult<LinkEntry> {
    let src = entry.src.trim();
    if src.is_empty() {
        return Err(AppError::MissingFields(vec!["src".to_string()]));
    }

    let link = state.repo.create_link(kind, src).await?;
    tracing::debug!("Added {} link {}", kind.label(), link.id);
    created(link)
}

async fn remove_link(state: &AppState, kind: LinkKind, id: &str) -> ApiResult<LinkEntry> {
    let id = parse_record_id(id)?;
    success(state.repo.delete_link(kind, &id).await?)
}

/// POST /imagens-adicionar - Add an image link.
pub async fn add_image(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<NewLinkEntry>,
) -> ApiResult<LinkEntry> {
    add_link(&state, LinkKind::Image, entry).await
}

/// GET /imagens-puxar - List image links.
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Vec<LinkEntry>> {
    success(state.repo.list_links(LinkKind::Image).await?)
}

/// DELETE /imagens-remover/:id - Remove an image link.
pub async fn remove_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LinkEntry> {
    remove_link(&state, LinkKind::Image, &id).await
}

/// POST /perfil-adicionar - Add a profile link.
pub async fn add_profile(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<NewLinkEntry>,
) -> ApiResult<LinkEntry> {
    add_link(&state, LinkKind::Profile, entry).await
}

/// GET /perfil-puxar - List profile links.
pub async fn list_profiles(State(state): State<AppState>) -> ApiResult<Vec<LinkEntry>> {
    success(state.repo.list_links(LinkKind::Profile).await?)
}

/// DELETE /perfil-remover/:id - Remove a profile link.
pub async fn remove_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LinkEntry> {
    remove_link(&state, LinkKind::Profile, &id).await
}

/// POST /parceiros-adicionar - Add a partner link.
pub async fn add_partner(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<NewLinkEntry>,
) -> ApiResult<LinkEntry> {
    add_link(&state, LinkKind::Partner, entry).await
}

/// GET /parceiros-puxar - List partner links.
pub async fn list_partners(State(state): State<AppState>) -> ApiResult<Vec<LinkEntry>> {
    success(state.repo.list_links(LinkKind::Partner).await?)
}

/// DELETE /parceiros-remover/:id - Remove a partner link.
pub async fn remove_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LinkEntry> {
    remove_link(&state, LinkKind::Partner, &id).await
}
