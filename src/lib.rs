//! E-sports site backend.
//!
//! A REST backend with SQLite persistence for teams, players, admins, and the
//! CMS content of the public site, plus a typed client for the front-end.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod media;
pub mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::TokenIssuer;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Repository, config: Config) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);
        Self {
            repo: Arc::new(repo),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Writes are only guarded when the deployment asks for it
    let guard = state
        .config
        .require_auth
        .then(|| state.tokens.clone());

    let content_routes = Router::new()
        // Players
        .route("/jogadores", get(api::list_players))
        .route("/jogadores", post(api::create_player))
        .route("/jogadores/{id}", get(api::get_player))
        .route("/jogadores/{id}", put(api::update_player))
        .route("/jogadores/{id}", delete(api::delete_player))
        .route("/jogadores/{id}/imagem", get(api::get_player_image))
        // Teams
        .route("/times", get(api::list_teams))
        .route("/times", post(api::create_team))
        .route("/times/{id}", get(api::get_team))
        .route("/times/{id}", put(api::update_team))
        .route("/times/{id}", delete(api::delete_team))
        .route("/times/{id}/foto", get(api::get_team_photo))
        .route("/times/{id}/logo", get(api::get_team_logo))
        .route("/times/{id}/jogo", get(api::get_team_logo))
        .route("/times/{id}/jogadores", get(api::get_team_players))
        // Admins
        .route("/admins", get(api::list_admins))
        .route("/admins", post(api::create_admin))
        .route("/admins/{id}", get(api::get_admin))
        .route("/admins/{id}", put(api::update_admin))
        .route("/admins/{id}", delete(api::delete_admin))
        .route("/admins/{id}/foto", get(api::get_admin_photo))
        // Text blocks
        .route("/new-text", post(api::create_text))
        .route("/textos-puxar", get(api::list_texts))
        .route("/textos-atualizar", put(api::update_text))
        // Link lists
        .route("/imagens-adicionar", post(api::add_image))
        .route("/imagens-puxar", get(api::list_images))
        .route("/imagens-remover/{id}", delete(api::remove_image))
        .route("/perfil-adicionar", post(api::add_profile))
        .route("/perfil-puxar", get(api::list_profiles))
        .route("/perfil-remover/{id}", delete(api::remove_profile))
        .route("/parceiros-adicionar", post(api::add_partner))
        .route("/parceiros-puxar", get(api::list_partners))
        .route("/parceiros-remover/{id}", delete(api::remove_partner))
        .layer(middleware::from_fn(move |req, next| {
            auth::token_auth_layer(guard.clone(), req, next)
        }));

    // Health and credential routes are never guarded
    let open_routes = Router::new()
        .route("/health", get(health_check))
        .route("/signup", post(api::signup))
        .route("/login", post(api::login));

    Router::new()
        .merge(content_routes)
        .merge(open_routes)
        .layer(DefaultBodyLimit::max(state.config.body_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
