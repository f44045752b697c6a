//! Holy Cross Convent School Brooklyn - Content Backend
//!
//! A production-grade REST backend with SQLite persistence, file uploads and
//! Tantivy gallery search, serving the school website frontend.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod policies;
mod search;
mod uploads;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use search::SearchIndex;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub search: Arc<SearchIndex>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HCCS Content Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Index path: {:?}", config.index_path);
    tracing::info!("Upload dir: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if no admin token is configured
    if config.admin_token.is_none() {
        tracing::warn!("No admin token configured (HCCS_ADMIN_TOKEN). The admin API is open!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Ensure the upload directory exists before serving it
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Initialize search index
    let search = Arc::new(SearchIndex::open(&config.index_path)?);

    // Build initial search index from database
    tracing::info!("Building search index...");
    let images = repo.list_images(None, true).await?;
    search.rebuild(&images).await?;

    // Create application state
    let state = AppState {
        repo,
        search,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone token for the auth layer
    let token = state.config.admin_token.clone();

    // Admin routes: full CRUD, drafts visible, bearer token required
    let admin_routes = Router::new()
        // Documents
        .route("/documents", get(api::admin_list_documents))
        .route("/documents", post(api::upload_document))
        .route("/documents/{id}", put(api::update_document))
        .route("/documents/{id}", delete(api::delete_document))
        // Gallery
        .route("/gallery", get(api::admin_list_images))
        .route("/gallery", post(api::upload_image))
        .route("/gallery/{id}", put(api::update_image))
        .route("/gallery/{id}", delete(api::delete_image))
        .route("/gallery/{id}/publish", patch(api::set_image_published))
        // Board
        .route("/board", post(api::create_board_member))
        .route("/board/{id}", put(api::update_board_member))
        .route("/board/{id}", delete(api::delete_board_member))
        // Vacancies
        .route("/vacancies", get(api::admin_list_vacancies))
        .route("/vacancies", post(api::create_vacancy))
        .route("/vacancies/{id}", put(api::update_vacancy))
        .route("/vacancies/{id}", delete(api::delete_vacancy))
        // Staff
        .route("/staff", post(api::create_staff_member))
        .route("/staff/roles", put(api::bulk_update_staff_roles))
        .route("/staff/{id}", put(api::update_staff_member))
        .route("/staff/{id}", delete(api::delete_staff_member))
        // Apply bearer auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(token.clone(), req, next)
        }))
        // Multipart uploads need more than the default 2MB body limit
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 1024 * 1024));

    // Public routes: published content only, no auth
    let api_routes = Router::new()
        // Documents
        .route("/documents", get(api::list_documents))
        .route("/documents/policies", get(api::list_policies))
        .route("/documents/{id}", get(api::get_document))
        .route("/documents/{id}/download", get(api::download_document))
        // Gallery
        .route("/gallery", get(api::list_images))
        .route("/gallery/category/{category}", get(api::images_by_category))
        .route("/gallery/search", get(api::search_images))
        .route("/gallery/stats", get(api::gallery_stats))
        .route("/gallery/{id}", get(api::get_image))
        // Board
        .route("/board", get(api::list_board_members))
        // Vacancies
        .route("/vacancies", get(api::list_vacancies))
        .route("/vacancies/{id}", get(api::get_vacancy))
        // Staff
        .route("/staff", get(api::list_staff))
        .nest("/admin", admin_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
