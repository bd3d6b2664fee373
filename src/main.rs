//src/main.rs

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, patch, post, put};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use shakwa_backend::config::{self, AppState};
use shakwa_backend::docs::ApiDoc;
use shakwa_backend::handlers;
use shakwa_backend::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app_state = AppState::new()
        .await
        .expect("Failed to initialise application state.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run database migrations.");

    tracing::info!("✅ Database migrations applied");

    config::bootstrap_admin(&app_state)
        .await
        .expect("Failed to bootstrap the admin account.");

    // Citizen-facing routes, no token required.
    let public_routes = Router::new()
        .route("/api/complaints", post(handlers::complaints::submit_complaint))
        .route("/api/complaints/search", get(handlers::complaints::search_complaints))
        .route("/api/catalog", get(handlers::catalog::get_catalog))
        .route("/api/auth/login", post(handlers::auth::login));

    // Review routes for the three account tiers.
    let review_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::get_me))
        .route("/api/complaints", get(handlers::complaints::list_complaints))
        .route("/api/complaints/{id}", get(handlers::complaints::get_complaint))
        .route(
            "/api/complaints/{id}/status",
            patch(handlers::complaints::update_complaint_status),
        )
        .route("/api/dashboard/stats", get(handlers::dashboard::get_dashboard_stats))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Registry administration.
    let account_routes = Router::new()
        .route(
            "/api/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route(
            "/api/accounts/{id}",
            put(handlers::accounts::update_account).delete(handlers::accounts::delete_account),
        )
        .route("/api/accounts/{id}/ban", post(handlers::accounts::toggle_account_ban))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(public_routes)
        .merge(review_routes)
        .merge(account_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind the TCP listener.");

    tracing::info!("🚀 Listening on {}", listener.local_addr().unwrap());
    tracing::info!("📚 Swagger UI at /docs");

    axum::serve(listener, app).await.expect("Axum server error");
}
