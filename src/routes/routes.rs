use actix_web::web;

use crate::handlers::auth_handlers::{login, signup, verify_email};
use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{create_short_url, get_all_urls, redirect_to_url};
use crate::middlewares::authmw::JwtAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Account routes - no auth required
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/verify-email/{token}", web::get().to(verify_email))
            .route("/health/check", web::get().to(health_check))
            // Redirect resolution is public; registered before the guarded
            // scope so it is matched first
            .route("/urls/redirect/{code}", web::get().to(redirect_to_url))
            // Link routes - require authentication
            .service(
                web::scope("/urls")
                    .wrap(JwtAuth)
                    .route("/shorten", web::post().to(create_short_url))
                    .route("", web::get().to(get_all_urls)),
            ),
    );
}
