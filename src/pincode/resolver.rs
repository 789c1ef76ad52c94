//! Pincode resolution: storage-backed cache-aside over the external
//! postal directory, self-populating on first use.

use tracing::info;

use crate::database::models::PostalAreaWithVillages;
use crate::database::Database;
use crate::error::AppError;
use crate::postal::PostalClient;

/// A pincode is exactly six ASCII digits. The explicit [0-9] class
/// keeps Unicode digit characters out.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if regex::Regex::new(r"^[0-9]{6}$").unwrap().is_match(code) {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid pincode".to_string()))
    }
}

/// Resolve a pincode to its postal area and villages.
///
/// Storage is the cache: a hit returns the stored area with its approved
/// villages and never refreshes. On a miss the directory service is
/// consulted, the area and villages are materialized (atomic upsert on
/// code, duplicate village names skipped), and the stored rows are
/// re-read and returned - on this first response with all villages,
/// approved or not.
pub async fn resolve(
    db: &Database,
    postal: &PostalClient,
    code: &str,
) -> Result<PostalAreaWithVillages, AppError> {
    validate_code(code)?;

    // 1. Check storage first
    if let Some(existing) = db.get_postal_area_with_villages(code, true).await? {
        return Ok(existing);
    }

    // 2. Fetch from the directory service
    let Some(post_offices) = postal.lookup(code).await? else {
        return Err(AppError::NotFound("Pincode not found".to_string()));
    };

    // 3. Materialize: area from the first post office, every office name
    // becomes a village
    let state = post_offices[0].state.clone();
    let district = post_offices[0].district.clone();

    let area = db.upsert_postal_area(code, &state, &district).await?;

    let names: Vec<String> = post_offices.into_iter().map(|po| po.name).collect();
    db.insert_villages(&area.id, &names).await?;

    info!(
        "Materialized pincode {} ({} / {}) with {} villages",
        code,
        district,
        state,
        names.len()
    );

    db.get_postal_area_with_villages(code, false)
        .await?
        .ok_or_else(|| AppError::Database("Pincode vanished after materialization".to_string()))
}
