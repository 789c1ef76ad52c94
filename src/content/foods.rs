use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::info;

use crate::content::{resolve_village, UploadedImage};
use crate::database::models::FoodDetail;
use crate::database::Database;
use crate::error::{is_unique_violation, AppError};
use crate::AppState;

#[derive(Debug, Default)]
pub struct FoodUpload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub pincode: Option<String>,
    pub village_name: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub image_url: Option<String>,
    pub village: String,
    pub pincode: String,
}

impl From<FoodDetail> for FoodResponse {
    fn from(d: FoodDetail) -> Self {
        FoodResponse {
            id: d.id,
            name: d.name,
            description: d.description,
            ingredients: d.ingredients,
            image_url: d.image_url,
            village: d.village_name,
            pincode: d.pincode_code,
        }
    }
}

async fn parse_multipart(mut multipart: Multipart) -> Result<FoodUpload, AppError> {
    let mut upload = FoodUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {}", e)))?;
                upload.image = Some(UploadedImage {
                    mime,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field: {}", e)))?;
                match other {
                    "name" => upload.name = Some(value),
                    "description" => upload.description = Some(value),
                    "ingredients" => upload.ingredients = Some(value),
                    "pincode" => upload.pincode = Some(value),
                    "villageName" => upload.village_name = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(upload)
}

/// Validate and persist one food submission. The image is optional here,
/// unlike photos. A duplicate (name, village) pair surfaces as 409.
pub async fn create_food(db: &Database, upload: FoodUpload) -> Result<FoodResponse, AppError> {
    let (Some(name), Some(pincode), Some(village_name)) = (
        upload.name.as_deref(),
        upload.pincode.as_deref(),
        upload.village_name.as_deref(),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let village = resolve_village(db, village_name, pincode).await?;

    let image_url = upload.image.as_ref().map(UploadedImage::to_data_url);

    let food = db
        .insert_food(
            name,
            upload.description.as_deref(),
            upload.ingredients.as_deref(),
            image_url.as_deref(),
            &village.id,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(
                    "This dish already exists for the selected village".to_string(),
                )
            } else {
                e.into()
            }
        })?;

    info!("Food {} added for village {}", food.id, village.id);

    Ok(FoodResponse {
        id: food.id,
        name: food.name,
        description: food.description,
        ingredients: food.ingredients,
        image_url: food.image_url,
        village: village.name,
        pincode: pincode.to_string(),
    })
}

/// POST /api/foods (multipart)
pub async fn upload_food(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FoodResponse>), AppError> {
    let upload = parse_multipart(multipart).await?;
    let food = create_food(&state.db, upload).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

/// GET /api/foods: approved foods, newest first.
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodResponse>>, AppError> {
    let foods = state.db.list_food_details().await?;
    Ok(Json(foods.into_iter().map(FoodResponse::from).collect()))
}
