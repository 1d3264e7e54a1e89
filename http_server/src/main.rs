use crate::app_container::Application;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use prediction_api::client::PredictionApi;
use risk_aggregation::contracts::{LocationDirectory, RiskReadingSource};
use risk_aggregation::snapshot::RiskSurveillance;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

mod app_container;
mod errors;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("flu_risk_http_server");

    let prediction_api = Arc::new(PredictionApi::from_config()?);

    HttpServer::new(move || {
        let directory: Arc<dyn LocationDirectory> = prediction_api.clone();
        let readings: Arc<dyn RiskReadingSource> = prediction_api.clone();
        let app_container = Application::new(
            RiskSurveillance::new(directory.clone(), readings),
            directory,
        );
        App::new()
            .wrap(TracingLogger::default())
            // The dashboard is served from a different origin.
            .wrap(Cors::permissive())
            .configure(routes::config)
            .app_data(web::Data::new(app_container))
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
    .context("Server failed to run")?;

    shared_kernel::tracing::shutdown_global_tracer_provider();
    Ok(())
}
