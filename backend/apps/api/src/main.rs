//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.
//!
//! The signing secret is settled before the listener is bound.

mod config;

use anyhow::Context;
use auth::infra::load_banned_terms;
use auth::{
    BannedTerms, FileSecretStore, InMemoryUserRecordRepository, PgUserRecordRepository,
    UsernamePolicy, auth_router,
};
use axum::{
    Router,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kernel::error::app_error::AppError;

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Signing secret: the service must not start without one
    let secret_store = FileSecretStore::new(&config.auth.secret_file);
    let secret = secret_store
        .load_or_ensure(config.auth.rotate_secret_on_boot)
        .await
        .context("cannot establish signing secret")?;

    // Username policy
    let banned_terms = match &config.auth.banned_terms_file {
        Some(path) => load_banned_terms(path).await?,
        None => BannedTerms::empty(),
    };
    let policy = UsernamePolicy::new(config.auth.reserved_sequences.iter().cloned(), banned_terms);

    // User records
    let auth_routes = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            auth_router(PgUserRecordRepository::new(pool), &secret, policy)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, user records are kept in memory");
            auth_router(InMemoryUserRecordRepository::new(), &secret, policy)
        }
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_routes)
        .fallback(|| async { AppError::not_found("No such route") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
