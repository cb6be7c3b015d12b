mod db;
mod handlers;
mod middlewares;
mod models;
mod registry;
mod routes;
mod state;
mod structs;
mod utils;

use crate::registry::{DEFAULT_MAX_ATTEMPTS, Registry};
use crate::registry::codegen::RandomCodeGenerator;
use crate::registry::store::MongoLinkStore;
use crate::state::app_state::AppState;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use db::mongodb::{ensure_indexes, get_database};
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let port_string = env::var("PORT").expect("PORT not set.");
    let port = port_string.parse::<u16>().unwrap();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Initialize the database connection
    let db = match get_database().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error connecting to the database: {}", e);
            std::process::exit(1);
        }
    };

    // The unique index on urls.code is load-bearing for create; refuse to
    // start without it
    if let Err(e) = ensure_indexes(&db).await {
        eprintln!("Error creating indexes: {}", e);
        std::process::exit(1);
    }

    let base_url = env::var("BASE_URL").unwrap_or_else(|_| String::from("http://localhost:8080"));
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| String::from("http://localhost:5173"));

    let links = db.collection("urls");
    let registry = Registry::new(
        MongoLinkStore::new(links),
        RandomCodeGenerator::default(),
        &base_url,
        DEFAULT_MAX_ATTEMPTS,
    );

    // Create shared state
    let app_state = web::Data::new(AppState {
        db,
        registry,
        frontend_url: frontend_url.clone(),
    });

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        // Enable CORS for the frontend origins
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173") // Vite dev server
            .allowed_origin("http://localhost:4173")
            .allowed_origin(&frontend_url)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
