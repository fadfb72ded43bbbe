//! Amaramba API Server
//!
//! Main entry point for the Amaramba backend service.

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amaramba_api::{AppState, create_router};
use amaramba_core::upload::UploadService;
use amaramba_db::connect;
use amaramba_shared::{AppConfig, JwtConfig, JwtService, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amaramba=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    #[allow(clippy::cast_possible_wrap)]
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    });

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        uploads: upload_service(&config.storage),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Builds the upload service, or `None` when storage is left unconfigured.
///
/// Upload routes answer 503 while this is `None`; the rest of the API still
/// serves.
fn upload_service(settings: &StorageSettings) -> Option<Arc<UploadService>> {
    if !settings.is_configured() {
        warn!(
            provider = %settings.provider,
            "Object storage is not configured, upload routes are disabled"
        );
        return None;
    }

    match UploadService::from_settings(settings) {
        Ok(service) => Some(Arc::new(service)),
        Err(e) => {
            warn!(error = %e, provider = %settings.provider, "Failed to initialize object storage");
            None
        }
    }
}
