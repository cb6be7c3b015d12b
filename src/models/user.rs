use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    /// Present only while the account is pending email verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub created_at: i64,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, verification_token: String) -> Self {
        Self {
            id: Some(ObjectId::new()),
            name,
            email,
            password_hash,
            is_verified: false,
            verification_token: Some(verification_token),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

// For API responses - stripped of sensitive data
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
        }
    }
}
