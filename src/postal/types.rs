use serde::{Deserialize, Serialize};

/// One element of the directory service's top-level JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "PostOffice", default)]
    pub post_offices: Option<Vec<PostOffice>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostOffice {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "State")]
    pub state: String,
}
