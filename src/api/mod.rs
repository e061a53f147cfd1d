use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub mod controllers;
mod dto;
mod error;
mod middlewares;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/api")
            .service(scope("/auth").configure(controllers::auth::routes))
            .service(scope("/email").configure(controllers::email::routes)),
    );
}
