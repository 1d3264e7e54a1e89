use crate::app_container::Application;
use crate::errors::ApiError;
use actix_web::web;
use entities::locations::LocationName;
use serde::Serialize;

#[derive(Serialize)]
struct LocationsResponse {
    items: Vec<LocationName>,
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn list_locations(
    app: web::Data<Application>,
) -> Result<web::Json<LocationsResponse>, ApiError> {
    let items = app
        .directory
        .locations()
        .await
        .map_err(anyhow::Error::new)?;
    Ok(web::Json(LocationsResponse { items }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/locations").service(web::resource("").route(web::get().to(list_locations))),
    );
}
