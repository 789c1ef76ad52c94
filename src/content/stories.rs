use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::models::{StoryDetail, StoryWithAuthor};
use crate::error::AppError;
use crate::AppState;

fn default_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub title: Option<String>,
    pub original_text: Option<String>,
    #[serde(default = "default_lang")]
    pub original_lang: String,
    pub village_id: Option<String>,
    pub author_email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorRef,
    pub village: VillageRef,
}

#[derive(Debug, Serialize)]
pub struct AuthorRef {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct VillageRef {
    pub id: String,
    pub name: String,
    pub pincode: String,
}

impl From<StoryDetail> for StoryResponse {
    fn from(d: StoryDetail) -> Self {
        StoryResponse {
            id: d.id,
            title: d.title,
            original_text: d.original_text,
            original_lang: d.original_lang,
            created_at: d.created_at,
            author: AuthorRef {
                email: d.author_email,
            },
            village: VillageRef {
                id: d.village_id,
                name: d.village_name,
                pincode: d.pincode_code,
            },
        }
    }
}

/// Per-village listing shape: the story row plus its author's email.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageStoryResponse {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub original_lang: String,
    pub village_id: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorRef,
}

impl From<StoryWithAuthor> for VillageStoryResponse {
    fn from(s: StoryWithAuthor) -> Self {
        VillageStoryResponse {
            id: s.id,
            title: s.title,
            original_text: s.original_text,
            original_lang: s.original_lang,
            village_id: s.village_id,
            created_at: s.created_at,
            author: AuthorRef {
                email: s.author_email,
            },
        }
    }
}

/// POST /api/stories
///
/// The village is validated before the author is touched, so a bad
/// village id never leaves a stray user row behind. The author lookup is
/// an atomic upsert on email.
pub async fn create_story(
    State(state): State<AppState>,
    Json(req): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<StoryResponse>), AppError> {
    let (Some(title), Some(original_text), Some(village_id), Some(author_email)) = (
        req.title.as_deref(),
        req.original_text.as_deref(),
        req.village_id.as_deref(),
        req.author_email.as_deref(),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let village = state
        .db
        .find_village(village_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Village does not exist".to_string()))?;

    let author = state.db.upsert_user(author_email).await?;

    let story = state
        .db
        .insert_story(
            title,
            original_text,
            &req.original_lang,
            &village.id,
            &author.id,
        )
        .await?;

    info!("Story {} created for village {}", story.id, village.id);

    let detail = state
        .db
        .get_story_detail(&story.id)
        .await?
        .ok_or_else(|| AppError::Database("Story vanished after insert".to_string()))?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// GET /api/stories: all stories, newest first, approval ignored.
pub async fn list_stories(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoryResponse>>, AppError> {
    let stories = state.db.list_story_details().await?;
    Ok(Json(stories.into_iter().map(StoryResponse::from).collect()))
}

/// GET /api/stories/village/:villageId
pub async fn list_stories_for_village(
    State(state): State<AppState>,
    Path(village_id): Path<String>,
) -> Result<Json<Vec<VillageStoryResponse>>, AppError> {
    let stories = state.db.list_stories_for_village(&village_id).await?;
    Ok(Json(
        stories.into_iter().map(VillageStoryResponse::from).collect(),
    ))
}
