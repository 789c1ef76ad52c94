use tracing::info;

use crate::error::AppError;
use crate::postal::types::{PostOffice, PostalResponse};

/// Client for the external postal-code directory service
/// (api.postalpincode.in or a compatible endpoint).
#[derive(Clone)]
pub struct PostalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostalClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up a pincode with the directory service. Returns the post
    /// offices on a "Success" status, `Ok(None)` when the service knows
    /// no such code, and an error on transport failure.
    pub async fn lookup(&self, code: &str) -> Result<Option<Vec<PostOffice>>, AppError> {
        let url = format!("{}/pincode/{}", self.base_url, code);
        info!("Fetching pincode {} from directory service", code);

        let body: Vec<PostalResponse> = self.client.get(&url).send().await?.json().await?;

        let Some(first) = body.into_iter().next() else {
            return Ok(None);
        };
        if first.status != "Success" {
            return Ok(None);
        }
        match first.post_offices {
            Some(offices) if !offices.is_empty() => Ok(Some(offices)),
            _ => Ok(None),
        }
    }
}
