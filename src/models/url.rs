use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One shortening record. Write-once: nothing here is ever mutated after the
/// initial insert, and the wire shape (camelCase) is also the stored BSON shape.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub original_url: String,
    pub short_url: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: i64,
}

impl ShortLink {
    pub fn new(
        original_url: String,
        short_url: String,
        code: String,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            id: Some(ObjectId::new()),
            original_url,
            short_url,
            code,
            owner_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
