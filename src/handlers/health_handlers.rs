use actix_web::{HttpResponse, web};
use mongodb::bson::doc;

use crate::state::app_state::AppState;

/// Liveness check: a ping round-trip to MongoDB.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "message": "Service is healthy"
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "message": "Database connection failed"
        })),
    }
}
