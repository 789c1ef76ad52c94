use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::resolve_village;
use crate::database::models::SpecialtyDetail;
use crate::database::Database;
use crate::error::{is_unique_violation, AppError};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecialtyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pincode: Option<String>,
    pub village_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub village: String,
    pub pincode: String,
}

impl From<SpecialtyDetail> for SpecialtyResponse {
    fn from(d: SpecialtyDetail) -> Self {
        SpecialtyResponse {
            id: d.id,
            title: d.title,
            description: d.description,
            category: d.category,
            image_url: d.image_url,
            village: d.village_name,
            pincode: d.pincode_code,
        }
    }
}

/// Validate and persist one specialty. A duplicate (title, village)
/// pair surfaces as 409.
pub async fn create_specialty(
    db: &Database,
    req: CreateSpecialtyRequest,
) -> Result<SpecialtyResponse, AppError> {
    let (Some(title), Some(category), Some(pincode), Some(village_name)) = (
        req.title.as_deref(),
        req.category.as_deref(),
        req.pincode.as_deref(),
        req.village_name.as_deref(),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let village = resolve_village(db, village_name, pincode).await?;

    let specialty = db
        .insert_specialty(title, req.description.as_deref(), category, &village.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(
                    "This specialty already exists for the selected village".to_string(),
                )
            } else {
                e.into()
            }
        })?;

    info!("Specialty {} added for village {}", specialty.id, village.id);

    Ok(SpecialtyResponse {
        id: specialty.id,
        title: specialty.title,
        description: specialty.description,
        category: specialty.category,
        image_url: specialty.image_url,
        village: village.name,
        pincode: pincode.to_string(),
    })
}

/// POST /api/specialties
pub async fn add_specialty(
    State(state): State<AppState>,
    Json(req): Json<CreateSpecialtyRequest>,
) -> Result<(StatusCode, Json<SpecialtyResponse>), AppError> {
    let specialty = create_specialty(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(specialty)))
}

/// GET /api/specialties: approved specialties, newest first.
pub async fn list_specialties(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpecialtyResponse>>, AppError> {
    let specialties = state.db.list_specialty_details().await?;
    Ok(Json(
        specialties.into_iter().map(SpecialtyResponse::from).collect(),
    ))
}
