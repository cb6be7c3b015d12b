use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, Result, http, web};
use log::error;
use validator::Validate;

use crate::registry::RegistryError;
use crate::state::app_state::AppState;
use crate::structs::url_request::{LinkListResponse, LinkResponse, ShortenRequest};
use crate::utils::jwt::Claims;

/// Map registry failures onto the HTTP taxonomy. Store failures get logged
/// here; the others carry messages meant for the caller.
fn registry_error_response(err: RegistryError) -> HttpResponse {
    match err {
        RegistryError::InvalidInput(_) => HttpResponse::BadRequest().json(serde_json::json!({
            "status": "fail",
            "message": err.to_string()
        })),
        RegistryError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "status": "fail",
            "message": err.to_string()
        })),
        RegistryError::ResourceExhausted(_) => {
            error!("{}", err);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "error",
                "message": err.to_string()
            }))
        }
        RegistryError::Store(_) => {
            error!("{}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "error",
                "message": "Something went wrong"
            }))
        }
    }
}

fn owner_from_request(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<Claims>().map(|c| c.sub.clone())
}

/// Create a shortened URL for the authenticated caller
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    web::Json(body): web::Json<ShortenRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "fail",
            "message": "Invalid URL format",
            "errors": errors
        })));
    }

    let owner_id = match owner_from_request(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "status": "fail",
                "message": "Authentication required"
            })));
        }
    };

    match app_state
        .registry
        .create(&body.original_url, Some(owner_id))
        .await
    {
        Ok(link) => Ok(HttpResponse::Created().json(LinkResponse { data: link })),
        Err(err) => Ok(registry_error_response(err)),
    }
}

/// List the authenticated caller's links, newest first
pub async fn get_all_urls(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder> {
    let owner_id = match owner_from_request(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "status": "fail",
                "message": "Authentication required"
            })));
        }
    };

    match app_state.registry.list_by_owner(&owner_id).await {
        Ok(links) => Ok(HttpResponse::Ok().json(LinkListResponse { data: links })),
        Err(err) => Ok(registry_error_response(err)),
    }
}

/// Redirect a short code to its original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();

    match app_state.registry.resolve(&code).await {
        Ok(original_url) => Ok(HttpResponse::Found()
            .append_header((http::header::LOCATION, original_url))
            .finish()),
        Err(err) => Ok(registry_error_response(err)),
    }
}
