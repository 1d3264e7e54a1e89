use crate::app_container::Application;
use crate::errors::ApiError;
use actix_web::web;
use chrono::NaiveDate;
use entities::locations::{LocationName, ProvinceCode};
use entities::risk::{AggregatedRisk, FutureRiskSeries, RiskLevel, RiskScore};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize)]
struct NationalRiskResponse {
    national_risk: RiskScore,
    risk_level: RiskLevel,
    provincial_risks: BTreeMap<ProvinceCode, RiskScore>,
    current_city_risks: HashMap<LocationName, RiskScore>,
    future_risks: HashMap<LocationName, FutureRiskSeries>,
}

impl From<AggregatedRisk> for NationalRiskResponse {
    fn from(aggregated: AggregatedRisk) -> Self {
        Self {
            risk_level: aggregated.national_risk.level(),
            national_risk: aggregated.national_risk,
            provincial_risks: aggregated.provincial_risks,
            current_city_risks: aggregated.current_city_risks,
            future_risks: aggregated.future_risks,
        }
    }
}

#[derive(Serialize)]
struct DailyRisk {
    date: NaiveDate,
    risk: RiskScore,
    risk_level: RiskLevel,
}

#[derive(Serialize)]
struct CityRiskResponse {
    location: LocationName,
    current_risk: RiskScore,
    risk_level: RiskLevel,
    future_risks: Vec<DailyRisk>,
}

#[tracing::instrument(skip(app), level = "info")]
async fn national_overview(app: web::Data<Application>) -> web::Json<NationalRiskResponse> {
    let aggregated = app.surveillance.current().await;
    web::Json(aggregated.into())
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn city_risk(
    path: web::Path<String>,
    app: web::Data<Application>,
) -> Result<web::Json<CityRiskResponse>, ApiError> {
    let location = LocationName::from(path.into_inner());
    let aggregated = app.surveillance.current().await;

    let current_risk = aggregated
        .current_city_risks
        .get(&location)
        .copied()
        .ok_or_else(|| ApiError::LocationNotFound(location.clone()))?;
    let future_risks = aggregated
        .future_risks
        .get(&location)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|(date, risk)| DailyRisk {
            date,
            risk,
            risk_level: risk.level(),
        })
        .collect();

    Ok(web::Json(CityRiskResponse {
        current_risk,
        risk_level: current_risk.level(),
        location,
        future_risks,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/flu-risk")
            .service(web::resource("").route(web::get().to(national_overview)))
            .service(web::resource("/{location}").route(web::get().to(city_risk))),
    );
}
