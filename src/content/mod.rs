//! User-submitted content: stories, photos, foods and specialties.
//! Each kind shares the same village-attachment pattern; creation
//! responses and listings are denormalized with the village name and
//! pincode code for direct display.

pub mod foods;
pub mod photos;
pub mod specialties;
pub mod stories;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::database::models::Village;
use crate::database::Database;
use crate::error::AppError;

/// Resolve a village by name under a pincode code, the locator used by
/// photo/food/specialty submissions.
pub(crate) async fn resolve_village(
    db: &Database,
    name: &str,
    code: &str,
) -> Result<Village, AppError> {
    db.find_village_by_name_and_code(name, code)
        .await?
        .ok_or_else(|| AppError::NotFound("Village not found".to_string()))
}

/// Re-encode an uploaded file as an inline data URL. Images live in the
/// content row itself, not in blob storage.
pub(crate) fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// An uploaded file pulled out of a multipart field.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn to_data_url(&self) -> String {
        to_data_url(&self.mime, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_mime_and_payload() {
        let url = to_data_url("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn uploaded_image_round_trips() {
        let image = UploadedImage {
            mime: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        };
        assert!(image.to_data_url().starts_with("data:image/jpeg;base64,"));
    }
}
