pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod pincode;
pub mod postal;
pub mod villages;

pub use error::AppError;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use database::Database;
use postal::PostalClient;

/// Shared handler state: configuration, database handle, and the
/// external postal directory client.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Database,
    pub postal: PostalClient,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        let postal = PostalClient::new(config.postal_api_url.clone());
        Self { config, db, postal }
    }
}

/// Build the full application router. Bodies are capped at 10 MB to
/// leave room for inline base64 image uploads.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/pincodes/debug/all-villages", get(pincode::debug_all_villages))
        .route("/api/pincodes/debug/clear", delete(pincode::debug_clear))
        .route("/api/pincodes/:code", get(pincode::get_pincode))
        .route("/api/stories", post(content::stories::create_story).get(content::stories::list_stories))
        .route("/api/stories/village/:village_id", get(content::stories::list_stories_for_village))
        .route("/api/photos", post(content::photos::upload_photo).get(content::photos::list_photos))
        .route("/api/foods", post(content::foods::upload_food).get(content::foods::list_foods))
        .route("/api/specialties", post(content::specialties::add_specialty).get(content::specialties::list_specialties))
        .route("/api/village-details/:village_id", get(villages::village_details))
        .route("/api/villages/:id", get(villages::village_full))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
                .into_inner(),
        )
        .with_state(state)
}

async fn health_check() -> axum::response::Json<serde_json::Value> {
    axum::response::Json(serde_json::json!({
        "status": "healthy",
        "service": "villagers-api",
        "timestamp": chrono::Utc::now()
    }))
}
