pub mod flu_risk;
mod locations;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(flu_risk::init_routes)
            .configure(locations::init_routes),
    );
}
