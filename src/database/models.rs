use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostalArea {
    pub id: String,
    pub code: String,
    pub state: String,
    pub district: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Village {
    pub id: String,
    pub name: String,
    pub approved: bool,
    pub pincode_id: String,
    pub created_at: DateTime<Utc>,
}

/// The `{id, name}` projection used by the pincode resolver and debug
/// listing responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VillageSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub village_id: String,
    pub author_id: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub village_id: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub image_url: Option<String>,
    pub village_id: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub village_id: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Story joined with its author's email, as returned by the per-village
/// story listing and the aggregate views.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoryWithAuthor {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub village_id: String,
    pub author_id: String,
    pub author_email: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Story joined with author email and village/pincode context, feeding
/// the denormalized story listing and creation responses.
#[derive(Debug, Clone, FromRow)]
pub struct StoryDetail {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub created_at: DateTime<Utc>,
    pub author_email: String,
    pub village_id: String,
    pub village_name: String,
    pub pincode_code: String,
}

/// Photo joined with village name and pincode code.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub village_name: String,
    pub pincode_code: String,
}

/// Food joined with village name and pincode code.
#[derive(Debug, Clone, FromRow)]
pub struct FoodDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub image_url: Option<String>,
    pub village_name: String,
    pub pincode_code: String,
}

/// Specialty joined with village name and pincode code.
#[derive(Debug, Clone, FromRow)]
pub struct SpecialtyDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub village_name: String,
    pub pincode_code: String,
}

/// A postal area together with its villages, as returned by the resolver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAreaWithVillages {
    pub id: String,
    pub code: String,
    pub state: String,
    pub district: String,
    pub created_at: DateTime<Utc>,
    pub villages: Vec<VillageSummary>,
}

/// Everything the village aggregate views need in one fetch: villages
/// row, parent area, and the four content collections (stories
/// unfiltered, the rest approved-only).
#[derive(Debug, Clone)]
pub struct VillageBundle {
    pub village: Village,
    pub area: PostalArea,
    pub stories: Vec<StoryWithAuthor>,
    pub photos: Vec<Photo>,
    pub foods: Vec<Food>,
    pub specialties: Vec<Specialty>,
}
