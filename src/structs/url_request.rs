use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::url::ShortLink;

#[derive(Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

#[derive(Serialize)]
pub struct LinkResponse {
    pub data: ShortLink,
}

#[derive(Serialize)]
pub struct LinkListResponse {
    pub data: Vec<ShortLink>,
}
