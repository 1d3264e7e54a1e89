use crate::config::SETTINGS_CONFIG;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use entities::locations::LocationName;
use entities::risk::{FutureRiskSeries, LocationReading, RiskScore};
use risk_aggregation::contracts::{LocationDirectory, ReadingsError, RiskReadingSource};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use std::collections::BTreeMap;
use url::Url;

const LOCATIONS_PATH: &str = "/api/locations";
const FLU_RISK_PATH: &str = "/api/flu-risk";

/// Client for the prediction service publishing per-city flu risk. The
/// model behind it is opaque; this side only sees the numbers. Timeout and
/// retry policy live in the shared http client.
pub struct PredictionApi {
    host: Url,
}

impl PredictionApi {
    pub fn from_config() -> anyhow::Result<Self> {
        Self::new(&SETTINGS_CONFIG.prediction_api.host)
    }

    pub fn new(host: &str) -> anyhow::Result<Self> {
        let host = Url::parse(host).with_context(|| format!("Failed to parse host {host}"))?;
        Ok(Self { host })
    }

    fn locations_url(&self) -> anyhow::Result<Url> {
        self.host
            .join(LOCATIONS_PATH)
            .context("Failed to build the locations url")
    }

    fn reading_url(&self, location: &LocationName) -> anyhow::Result<Url> {
        self.host
            .join(&format!("{FLU_RISK_PATH}/{location}"))
            .with_context(|| format!("Failed to build the reading url for {location}"))
    }
}

#[derive(Deserialize, Debug)]
struct FluRiskResponse {
    current_risk: f64,
    future_risks: BTreeMap<NaiveDate, f64>,
}

impl From<FluRiskResponse> for LocationReading {
    fn from(response: FluRiskResponse) -> Self {
        LocationReading {
            current_risk: RiskScore::new(response.current_risk),
            future_risks: response
                .future_risks
                .into_iter()
                .map(|(date, risk)| (date, RiskScore::new(risk)))
                .collect::<FutureRiskSeries>(),
        }
    }
}

#[async_trait]
impl LocationDirectory for PredictionApi {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn locations(&self) -> Result<Vec<LocationName>, ReadingsError> {
        let url = self
            .locations_url()
            .map_err(ReadingsError::DirectoryUnavailable)?;
        let names = HttpClient::get_json::<Vec<String>>(url)
            .await
            .map_err(ReadingsError::DirectoryUnavailable)?;
        Ok(names.into_iter().map(LocationName::from).collect())
    }
}

#[async_trait]
impl RiskReadingSource for PredictionApi {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn reading(&self, location: &LocationName) -> Result<LocationReading, ReadingsError> {
        let url = self
            .reading_url(location)
            .map_err(|source| ReadingsError::LocationUnavailable {
                location: location.clone(),
                source,
            })?;
        let response = HttpClient::get_json::<FluRiskResponse>(url)
            .await
            .map_err(|source| ReadingsError::LocationUnavailable {
                location: location.clone(),
                source,
            })?;
        Ok(response.into())
    }
}
