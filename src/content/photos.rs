use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::info;

use crate::content::{resolve_village, UploadedImage};
use crate::database::models::PhotoDetail;
use crate::database::Database;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Default)]
pub struct PhotoUpload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub pincode: Option<String>,
    pub village_name: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub village: String,
    pub pincode: String,
}

impl From<PhotoDetail> for PhotoResponse {
    fn from(d: PhotoDetail) -> Self {
        PhotoResponse {
            id: d.id,
            title: d.title,
            description: d.description,
            image_url: d.image_url,
            village: d.village_name,
            pincode: d.pincode_code,
        }
    }
}

async fn parse_multipart(mut multipart: Multipart) -> Result<PhotoUpload, AppError> {
    let mut upload = PhotoUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
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
                    "title" => upload.title = Some(value),
                    "description" => upload.description = Some(value),
                    "pincode" => upload.pincode = Some(value),
                    "villageName" => upload.village_name = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(upload)
}

/// Validate and persist one photo submission.
pub async fn create_photo(db: &Database, upload: PhotoUpload) -> Result<PhotoResponse, AppError> {
    let (Some(title), Some(pincode), Some(village_name), Some(image)) = (
        upload.title.as_deref(),
        upload.pincode.as_deref(),
        upload.village_name.as_deref(),
        upload.image.as_ref(),
    ) else {
        return Err(AppError::Validation("Missing fields".to_string()));
    };

    let village = resolve_village(db, village_name, pincode).await?;

    let image_url = image.to_data_url();
    let photo = db
        .insert_photo(title, upload.description.as_deref(), &image_url, &village.id)
        .await?;

    info!("Photo {} uploaded for village {}", photo.id, village.id);

    Ok(PhotoResponse {
        id: photo.id,
        title: photo.title,
        description: photo.description,
        image_url: photo.image_url,
        village: village.name,
        pincode: pincode.to_string(),
    })
}

/// POST /api/photos (multipart)
pub async fn upload_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoResponse>), AppError> {
    let upload = parse_multipart(multipart).await?;
    let photo = create_photo(&state.db, upload).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /api/photos: approved photos, newest first.
pub async fn list_photos(
    State(state): State<AppState>,
) -> Result<Json<Vec<PhotoResponse>>, AppError> {
    let photos = state.db.list_photo_details().await?;
    Ok(Json(photos.into_iter().map(PhotoResponse::from).collect()))
}
