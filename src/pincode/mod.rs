pub mod resolver;

use axum::extract::{Path, State};
use axum::response::Json;
use tracing::info;

use crate::database::models::{PostalAreaWithVillages, VillageSummary};
use crate::error::AppError;
use crate::AppState;

/// GET /api/pincodes/:code
pub async fn get_pincode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PostalAreaWithVillages>, AppError> {
    let area = resolver::resolve(&state.db, &state.postal, &code).await?;
    Ok(Json(area))
}

/// GET /api/pincodes/debug/all-villages
pub async fn debug_all_villages(
    State(state): State<AppState>,
) -> Result<Json<Vec<VillageSummary>>, AppError> {
    let villages = state.db.all_villages().await?;
    Ok(Json(villages))
}

/// DELETE /api/pincodes/debug/clear
pub async fn debug_clear(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.clear_all().await?;
    info!("Debug clear: all tables wiped");
    Ok(Json(serde_json::json!({ "status": "cleared" })))
}
