//! The two aggregate read models over a village. They project the same
//! underlying rows into different shapes, and the frontend depends on
//! both namings, so they stay separate.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{Food, Photo, Specialty, StoryWithAuthor, VillageBundle};
use crate::error::AppError;
use crate::AppState;

// ---- GET /api/village-details/:villageId ----

#[derive(Debug, Serialize)]
pub struct VillageDetailsResponse {
    pub village: VillageHeader,
    pub stories: Vec<DetailsStory>,
    // The frontend expects the singular `food` key here.
    pub food: Vec<Food>,
    pub specialties: Vec<Specialty>,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Serialize)]
pub struct VillageHeader {
    pub id: String,
    pub name: String,
    pub pincode: String,
}

/// Plain story row for the details view, author by id only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsStory {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub village_id: String,
    pub author_id: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StoryWithAuthor> for DetailsStory {
    fn from(s: StoryWithAuthor) -> Self {
        DetailsStory {
            id: s.id,
            title: s.title,
            original_text: s.original_text,
            original_lang: s.original_lang,
            village_id: s.village_id,
            author_id: s.author_id,
            approved: s.approved,
            created_at: s.created_at,
        }
    }
}

pub async fn village_details(
    State(state): State<AppState>,
    Path(village_id): Path<String>,
) -> Result<Json<VillageDetailsResponse>, AppError> {
    let bundle = state
        .db
        .get_village_bundle(&village_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Village not found".to_string()))?;

    Ok(Json(VillageDetailsResponse {
        village: VillageHeader {
            id: bundle.village.id,
            name: bundle.village.name,
            pincode: bundle.area.code,
        },
        stories: bundle.stories.into_iter().map(DetailsStory::from).collect(),
        food: bundle.foods,
        specialties: bundle.specialties,
        photos: bundle.photos,
    }))
}

// ---- GET /api/villages/:id ----

#[derive(Debug, Serialize)]
pub struct VillageFullResponse {
    pub id: String,
    pub name: String,
    pub pincode: String,
    pub district: String,
    pub state: String,
    pub stories: Vec<FullStory>,
    pub photos: Vec<FullPhoto>,
    pub foods: Vec<FullFood>,
    pub specialties: Vec<FullSpecialty>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullStory {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct FullPhoto {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullFood {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSpecialty {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<VillageBundle> for VillageFullResponse {
    fn from(bundle: VillageBundle) -> Self {
        VillageFullResponse {
            id: bundle.village.id,
            name: bundle.village.name,
            pincode: bundle.area.code,
            district: bundle.area.district,
            state: bundle.area.state,
            stories: bundle
                .stories
                .into_iter()
                .map(|s| FullStory {
                    id: s.id,
                    title: s.title,
                    text: s.original_text,
                    created_at: s.created_at,
                    author: s.author_email,
                })
                .collect(),
            photos: bundle
                .photos
                .into_iter()
                .map(|p| FullPhoto {
                    id: p.id,
                    url: p.image_url,
                    caption: p.description,
                })
                .collect(),
            foods: bundle
                .foods
                .into_iter()
                .map(|f| FullFood {
                    id: f.id,
                    name: f.name,
                    description: f.description,
                    image_url: f.image_url,
                })
                .collect(),
            specialties: bundle
                .specialties
                .into_iter()
                .map(|sp| FullSpecialty {
                    id: sp.id,
                    title: sp.title,
                    description: sp.description,
                    category: sp.category,
                    image_url: sp.image_url,
                })
                .collect(),
        }
    }
}

pub async fn village_full(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VillageFullResponse>, AppError> {
    let bundle = state
        .db
        .get_village_bundle(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Village not found".to_string()))?;

    Ok(Json(bundle.into()))
}
