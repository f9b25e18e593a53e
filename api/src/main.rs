//! Loan Application API Server
//!
//! Accepts loan applications, lets reviewers page through pending loans
//! enriched with applicant data, and publishes status changes to a queue.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    CircuitBreaker, CircuitBreakerConfig, PostgresLoanRepository, PostgresLoanStatusRepository,
    PostgresLoanTypeRepository, RestUserClient, SqsLoanPublisher,
};
use app::LoanService;
use auth::JwtProvider;
use config::Config;

/// Loan service wired to the production adapters
pub type AppLoanService = LoanService<
    PostgresLoanRepository,
    PostgresLoanTypeRepository,
    PostgresLoanStatusRepository,
    RestUserClient,
    SqsLoanPublisher,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<AppLoanService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,loan_application_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Loan Application API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let loan_repo = Arc::new(PostgresLoanRepository::new(db.clone()));
    let loan_type_repo = Arc::new(PostgresLoanTypeRepository::new(db.clone()));
    let loan_status_repo = Arc::new(PostgresLoanStatusRepository::new(db.clone()));

    let user_breaker = CircuitBreaker::new(CircuitBreakerConfig::new(
        "user-service",
        config.user_breaker_failure_threshold,
        config.user_breaker_open_duration,
    ));
    let user_client = Arc::new(
        RestUserClient::new(
            config.user_service_url.clone(),
            config.user_validate_path.clone(),
            config.user_batch_path.clone(),
            config.user_service_timeout,
            user_breaker,
        )
        .context("Failed to build user service client")?,
    );

    let publisher = Arc::new(
        SqsLoanPublisher::from_config(
            &config.sqs_region,
            config.sqs_endpoint.as_deref(),
            config.sqs_status_queue_url.clone(),
        )
        .await,
    );

    // Create application services
    let loan_service = Arc::new(LoanService::new(
        loan_repo,
        loan_type_repo,
        loan_status_repo,
        user_client,
        publisher,
    ));

    let jwt = Arc::new(JwtProvider::new(
        &config.jwt_secret,
        config.jwt_expiration_ms,
    ));

    // Create app state
    let state = AppState {
        loan_service,
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Loan submission is rate limited per client IP
    let submit_routes = Router::new()
        .route(&config.loans_path, post(handlers::create_loan))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let review_routes = Router::new()
        .route(&config.loans_path, get(handlers::list_pending_loans))
        .route(
            &format!("{}/:id/status", config.loans_path),
            put(handlers::update_loan_status),
        );

    // Every loan route requires a bearer token
    let loan_routes = submit_routes
        .merge(review_routes)
        .layer(middleware::from_fn_with_state(
            jwt,
            auth::jwt_auth_middleware,
        ));

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(loan_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
