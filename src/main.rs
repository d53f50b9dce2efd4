//! E-sports site backend server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use esports_backend::config::Config;
use esports_backend::db::{self, Repository};
use esports_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting e-sports backend");
    tracing::info!("Database: {}", config.database_url);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Upload limit: {} bytes per file", config.max_upload_bytes);

    if config.jwt_secret_generated {
        tracing::warn!(
            "No ESPORTS_JWT_SECRET configured. Using a random secret; tokens will not survive a restart!"
        );
    }
    if !config.require_auth {
        tracing::warn!("ESPORTS_REQUIRE_AUTH is off. Write routes are open to anyone!");
    }

    // Initialize database
    let pool = db::init_database(&config.database_url).await?;
    let bind_addr = config.bind_addr;
    let state = AppState::new(Repository::new(pool), config);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
