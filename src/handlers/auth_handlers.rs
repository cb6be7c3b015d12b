use actix_web::{HttpResponse, Result, error, web};
use bcrypt::{DEFAULT_COST, hash, verify};
use log::error as log_error;
use mongodb::bson::doc;
use uuid::Uuid;
use validator::Validate;

use crate::db::mongodb::is_duplicate_key;
use crate::models::user::{User, UserResponse};
use crate::state::app_state::AppState;
use crate::structs::user::{AuthResponse, LoginRequest, SignupRequest};
use crate::utils::jwt::create_token;
use crate::utils::mailer::{send_verification_email, verification_url};

/// A failed user insert is a 409 when the unique index on email caught a
/// racing signup for the same address, otherwise a 500.
fn signup_insert_failure(duplicate_email: bool) -> HttpResponse {
    if duplicate_email {
        HttpResponse::Conflict().json(serde_json::json!({
            "status": "fail",
            "message": "An account with this email already exists"
        }))
    } else {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "message": "Something went wrong"
        }))
    }
}

pub async fn signup(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "fail",
            "message": "Invalid signup details",
            "errors": errors
        })));
    }

    let db = &app_state.db;
    let users_collection = db.collection::<User>("users");

    // Reject duplicate accounts up front; the unique index on email backs
    // this up against races
    let existing = users_collection
        .find_one(doc! { "email": &req.email })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    if existing.is_some() {
        return Ok(HttpResponse::Conflict().json(serde_json::json!({
            "status": "fail",
            "message": "An account with this email already exists"
        })));
    }

    let password_hash = hash(&req.password, DEFAULT_COST)
        .map_err(|e| error::ErrorInternalServerError(format!("Failed to hash password: {}", e)))?;

    let verification_token = Uuid::new_v4().simple().to_string();
    let user = User::new(
        req.name.trim().to_string(),
        req.email.clone(),
        password_hash,
        verification_token.clone(),
    );

    // Two signups for the same email can both pass the find_one above; the
    // unique index rejects the loser and that still means 409, not 500
    if let Err(e) = users_collection.insert_one(&user).await {
        if !is_duplicate_key(&e) {
            log_error!("failed to insert user: {}", e);
        }
        return Ok(signup_insert_failure(is_duplicate_key(&e)));
    }

    let verify_url = verification_url(&app_state.frontend_url, &verification_token);
    send_verification_email(&user.email, &user.name, &verify_url);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": "Account created. Please check your email to verify your address."
    })))
}

pub async fn login(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let db = &app_state.db;
    let users_collection = db.collection::<User>("users");

    let user = users_collection
        .find_one(doc! { "email": &req.email })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let user = match user {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "status": "fail",
                "message": "Invalid credentials"
            })));
        }
    };

    let password_matches = verify(&req.password, &user.password_hash)
        .map_err(|_| error::ErrorInternalServerError("Password verification failed"))?;

    if !password_matches {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
            "status": "fail",
            "message": "Invalid credentials"
        })));
    }

    if !user.is_verified {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
            "status": "fail",
            "message": "Please verify your email address before logging in"
        })));
    }

    let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
    let token = create_token(&user_id)
        .map_err(|e| error::ErrorInternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        status: "success",
        token,
        user: UserResponse::from(user),
    }))
}

/// Verify an email address from the emailed token and log the user in.
pub async fn verify_email(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let token = path.into_inner();
    let db = &app_state.db;
    let users_collection = db.collection::<User>("users");

    let user = users_collection
        .find_one(doc! { "verificationToken": &token })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let user = match user {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "status": "fail",
                "message": "Verification link is invalid or has already been used"
            })));
        }
    };

    users_collection
        .update_one(
            doc! { "verificationToken": &token },
            doc! {
                "$set": { "isVerified": true },
                "$unset": { "verificationToken": "" }
            },
        )
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
    let jwt = create_token(&user_id)
        .map_err(|e| error::ErrorInternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        status: "success",
        token: jwt,
        user: UserResponse::from(user),
    }))
}
