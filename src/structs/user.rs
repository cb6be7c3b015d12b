use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserResponse;

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by login and email verification so the client can start a
/// session immediately.
#[derive(Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub token: String,
    pub user: UserResponse,
}
