//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod preferences;
mod tasks;


use actix_web::web;

use crate::middleware::error::rejection;

/// JSON body limits and RFC 7807 rejections for malformed bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, req| rejection(req, err.to_string()))
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/sign-in", web::post().to(auth::sign_in))
                    .route("/sign-up", web::post().to(auth::sign_up))
                    .route("/sign-out", web::post().to(auth::sign_out))
                    .route("/session", web::get().to(auth::session)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(tasks::board))
                    .route("", web::post().to(tasks::create))
                    .route("/{id}", web::patch().to(tasks::update))
                    .route("/{id}", web::delete().to(tasks::delete))
                    .route("/{id}/status", web::put().to(tasks::move_to))
                    .route("/{id}/priority", web::put().to(tasks::set_priority)),
            )
            .route("/preferences/theme", web::put().to(preferences::set_theme)),
    );
}
