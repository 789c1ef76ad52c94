#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use villagers_api::config::AppConfig;
use villagers_api::database::models::{PostalArea, Village};
use villagers_api::database::Database;
use villagers_api::postal::PostalClient;
use villagers_api::AppState;

/// Setup an in-memory SQLite database with the schema applied.
pub async fn setup_test_db() -> Database {
    let db = Database::new_in_memory()
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");
    db
}

/// App state wired to a test database and a mock postal service URL.
pub fn test_state(db: Database, postal_api_url: &str) -> AppState {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        postal_api_url: postal_api_url.to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
    };
    AppState::new(config, db)
}

pub fn test_postal_client(base_url: &str) -> PostalClient {
    PostalClient::new(base_url.to_string())
}

/// Seed a postal area directly, bypassing the resolver.
pub async fn seed_area(db: &Database, code: &str, state: &str, district: &str) -> PostalArea {
    db.upsert_postal_area(code, state, district)
        .await
        .expect("Failed to seed postal area")
}

/// Seed one village under an area and return the stored row.
pub async fn seed_village(db: &Database, area: &PostalArea, name: &str) -> Village {
    db.insert_villages(&area.id, &[name.to_string()])
        .await
        .expect("Failed to seed village");
    db.find_village_by_name_and_code(name, &area.code)
        .await
        .expect("Failed to look up seeded village")
        .expect("Seeded village missing")
}

/// Mount a "Success" directory response for a code, with one post office
/// per (name, district, state) triple. `expected_calls` asserts how many
/// times the upstream may be hit.
pub async fn mount_postal_success(
    server: &MockServer,
    code: &str,
    offices: &[(&str, &str, &str)],
    expected_calls: u64,
) {
    let post_offices: Vec<_> = offices
        .iter()
        .map(|(name, district, state)| {
            json!({ "Name": name, "District": district, "State": state })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/pincode/{}", code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Status": "Success", "PostOffice": post_offices }
        ])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount a non-"Success" directory response (code unknown upstream).
pub async fn mount_postal_error(server: &MockServer, code: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/pincode/{}", code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Status": "Error", "Message": "No records found", "PostOffice": null }
        ])))
        .mount(server)
        .await;
}
