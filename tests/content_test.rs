use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use villagers_api::content::foods::{create_food, FoodUpload};
use villagers_api::content::photos::{create_photo, PhotoUpload};
use villagers_api::content::specialties::{create_specialty, CreateSpecialtyRequest};
use villagers_api::content::stories;
use villagers_api::content::UploadedImage;
use villagers_api::error::AppError;

mod common;
use common::*;

fn story_request(village_id: &str, email: &str) -> stories::CreateStoryRequest {
    stories::CreateStoryRequest {
        title: Some("The Old Banyan".to_string()),
        original_text: Some("There was a tree older than the village.".to_string()),
        original_lang: "en".to_string(),
        village_id: Some(village_id.to_string()),
        author_email: Some(email.to_string()),
    }
}

#[tokio::test]
async fn story_creation_returns_denormalized_view() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    let village = seed_village(&db, &area, "HighCourt").await;
    let state = test_state(db, "http://unused.invalid");

    let (status, Json(story)) = stories::create_story(
        State(state.clone()),
        Json(story_request(&village.id, "asha@example.com")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(story.title, "The Old Banyan");
    assert_eq!(story.author.email, "asha@example.com");
    assert_eq!(story.village.name, "HighCourt");
    assert_eq!(story.village.pincode, "560001");
}

#[tokio::test]
async fn story_with_missing_village_creates_no_user() {
    let db = setup_test_db().await;
    let state = test_state(db.clone(), "http://unused.invalid");

    let result = stories::create_story(
        State(state),
        Json(story_request("no-such-village", "new@example.com")),
    )
    .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    // The village check runs before the author upsert.
    assert!(db
        .find_user_by_email("new@example.com")
        .await
        .unwrap()
        .is_none());
    assert!(db.list_story_details().await.unwrap().is_empty());
}

#[tokio::test]
async fn story_missing_fields_is_a_validation_error() {
    let db = setup_test_db().await;
    let state = test_state(db, "http://unused.invalid");

    let mut req = story_request("some-id", "a@example.com");
    req.title = None;

    let result = stories::create_story(State(state), Json(req)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn repeat_story_submissions_reuse_the_author_row() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    let village = seed_village(&db, &area, "HighCourt").await;

    let first = db.upsert_user("asha@example.com").await.unwrap();
    let second = db.upsert_user("asha@example.com").await.unwrap();
    assert_eq!(first.id, second.id);

    db.insert_story("One", "text", "en", &village.id, &first.id)
        .await
        .unwrap();
    db.insert_story("Two", "text", "en", &village.id, &second.id)
        .await
        .unwrap();
    assert_eq!(db.list_story_details().await.unwrap().len(), 2);
}

#[tokio::test]
async fn photo_upload_stores_an_inline_data_url() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;

    let upload = PhotoUpload {
        title: Some("Temple gate".to_string()),
        description: Some("Morning light".to_string()),
        pincode: Some("560001".to_string()),
        village_name: Some("HighCourt".to_string()),
        image: Some(UploadedImage {
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3, 4],
        }),
    };

    let photo = create_photo(&db, upload).await.unwrap();
    assert!(photo.image_url.starts_with("data:image/png;base64,"));
    assert_eq!(photo.village, "HighCourt");
    assert_eq!(photo.pincode, "560001");

    let listed = db.list_photo_details().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].image_url, photo.image_url);
}

#[tokio::test]
async fn photo_without_file_is_rejected() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;

    let upload = PhotoUpload {
        title: Some("No file".to_string()),
        description: None,
        pincode: Some("560001".to_string()),
        village_name: Some("HighCourt".to_string()),
        image: None,
    };

    let result = create_photo(&db, upload).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn photo_for_unknown_village_is_not_found() {
    let db = setup_test_db().await;

    let upload = PhotoUpload {
        title: Some("Nowhere".to_string()),
        description: None,
        pincode: Some("560001".to_string()),
        village_name: Some("Ghost Town".to_string()),
        image: Some(UploadedImage {
            mime: "image/jpeg".to_string(),
            bytes: vec![0xff],
        }),
    };

    let result = create_photo(&db, upload).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

fn food_upload(name: &str) -> FoodUpload {
    FoodUpload {
        name: Some(name.to_string()),
        description: Some("Steamed rice cakes".to_string()),
        ingredients: Some("rice, lentils".to_string()),
        pincode: Some("560001".to_string()),
        village_name: Some("HighCourt".to_string()),
        image: None,
    }
}

#[tokio::test]
async fn duplicate_food_per_village_conflicts() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;

    create_food(&db, food_upload("Idli")).await.unwrap();
    let result = create_food(&db, food_upload("Idli")).await;

    match result {
        Err(AppError::Conflict(msg)) => {
            assert_eq!(msg, "This dish already exists for the selected village");
        }
        other => panic!("expected conflict, got {:?}", other.map(|f| f.name)),
    }
    assert_eq!(db.list_food_details().await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_food_name_in_another_village_is_fine() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;
    seed_village(&db, &area, "Vidhana Soudha").await;

    create_food(&db, food_upload("Idli")).await.unwrap();

    let mut other = food_upload("Idli");
    other.village_name = Some("Vidhana Soudha".to_string());
    create_food(&db, other).await.unwrap();

    assert_eq!(db.list_food_details().await.unwrap().len(), 2);
}

fn specialty_request(title: &str) -> CreateSpecialtyRequest {
    CreateSpecialtyRequest {
        title: Some(title.to_string()),
        description: Some("Hand-loomed cotton".to_string()),
        category: Some("craft".to_string()),
        pincode: Some("560001".to_string()),
        village_name: Some("HighCourt".to_string()),
    }
}

#[tokio::test]
async fn duplicate_specialty_per_village_conflicts() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;

    create_specialty(&db, specialty_request("Weaving")).await.unwrap();
    let result = create_specialty(&db, specialty_request("Weaving")).await;

    match result {
        Err(AppError::Conflict(msg)) => {
            assert_eq!(msg, "This specialty already exists for the selected village");
        }
        other => panic!("expected conflict, got {:?}", other.map(|s| s.title)),
    }
    assert_eq!(db.list_specialty_details().await.unwrap().len(), 1);
}

#[tokio::test]
async fn specialty_missing_category_is_rejected() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    seed_village(&db, &area, "HighCourt").await;

    let mut req = specialty_request("Weaving");
    req.category = None;

    let result = create_specialty(&db, req).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn per_village_story_listing_is_newest_first() {
    let db = setup_test_db().await;
    let area = seed_area(&db, "560001", "Karnataka", "Bangalore").await;
    let village = seed_village(&db, &area, "HighCourt").await;
    let author = db.upsert_user("asha@example.com").await.unwrap();

    db.insert_story("First", "a", "en", &village.id, &author.id)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    db.insert_story("Second", "b", "en", &village.id, &author.id)
        .await
        .unwrap();

    let state = test_state(db, "http://unused.invalid");
    let Json(listed) =
        stories::list_stories_for_village(State(state), Path(village.id.clone()))
            .await
            .unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Second");
    assert_eq!(listed[1].title, "First");
    assert_eq!(listed[0].author.email, "asha@example.com");
}
