use crate::aggregate::aggregate;
use crate::contracts::{LocationDirectory, RiskReadingSource};
use chrono::{Duration, NaiveDate, Utc};
use entities::locations::LocationName;
use entities::risk::{AggregatedRisk, FutureRiskSeries, LocationReading, RiskScore};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Cities shown zeroed when the directory itself cannot be read.
const FALLBACK_CITIES: [&str; 8] = [
    "toronto",
    "montreal",
    "vancouver",
    "calgary",
    "edmonton",
    "ottawa",
    "winnipeg",
    "halifax",
];

const FALLBACK_FORECAST_DAYS: i64 = 7;

pub struct RiskSurveillance {
    directory: Arc<dyn LocationDirectory>,
    readings: Arc<dyn RiskReadingSource>,
}

impl RiskSurveillance {
    pub fn new(
        directory: Arc<dyn LocationDirectory>,
        readings: Arc<dyn RiskReadingSource>,
    ) -> Self {
        Self {
            directory,
            readings,
        }
    }

    /// Resolves every location's reading and folds them into the dashboard
    /// dataset. Never fails: locations that cannot be read are dropped from
    /// the means, and an unreadable directory yields the zeroed fallback.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn current(&self) -> AggregatedRisk {
        let locations = match self.directory.locations().await {
            Ok(locations) => locations,
            Err(error) => {
                warn!("Falling back to the zeroed dataset: {error:?}");
                return fallback(Utc::now().date_naive());
            }
        };

        let readings = self.resolve_readings(&locations).await;
        aggregate(&locations, &readings)
    }

    async fn resolve_readings(
        &self,
        locations: &[LocationName],
    ) -> HashMap<LocationName, Option<LocationReading>> {
        let mut futures: FuturesUnordered<_> = locations
            .iter()
            .map(|location| async move { (location.clone(), self.readings.reading(location).await) })
            .collect();

        let mut readings = HashMap::with_capacity(locations.len());
        while let Some((location, result)) = futures.next().await {
            match result {
                Ok(reading) => {
                    readings.insert(location, Some(reading));
                }
                Err(error) => {
                    warn!("Dropping reading: {error:?}");
                    readings.insert(location, None);
                }
            }
        }
        readings
    }
}

/// The dataset served when no upstream data is reachable: every fallback
/// city zeroed, with a week of zeroed forecasts each.
pub fn fallback(today: NaiveDate) -> AggregatedRisk {
    let series = (0..FALLBACK_FORECAST_DAYS)
        .map(|offset| (today + Duration::days(offset), RiskScore::default()))
        .collect::<FutureRiskSeries>();

    let mut dataset = aggregate(&[], &HashMap::new());
    for city in FALLBACK_CITIES {
        let city = LocationName::from(city);
        dataset
            .current_city_risks
            .insert(city.clone(), RiskScore::default());
        dataset.future_risks.insert(city, series.clone());
    }
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ReadingsError;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct StaticDirectory(Vec<LocationName>);

    #[async_trait]
    impl LocationDirectory for StaticDirectory {
        async fn locations(&self) -> Result<Vec<LocationName>, ReadingsError> {
            Ok(self.0.clone())
        }
    }

    struct UnavailableDirectory;

    #[async_trait]
    impl LocationDirectory for UnavailableDirectory {
        async fn locations(&self) -> Result<Vec<LocationName>, ReadingsError> {
            Err(ReadingsError::DirectoryUnavailable(anyhow!(
                "directory is down"
            )))
        }
    }

    struct StaticReadings(HashMap<LocationName, LocationReading>);

    #[async_trait]
    impl RiskReadingSource for StaticReadings {
        async fn reading(&self, location: &LocationName) -> Result<LocationReading, ReadingsError> {
            self.0
                .get(location)
                .cloned()
                .ok_or_else(|| ReadingsError::LocationUnavailable {
                    location: location.clone(),
                    source: anyhow!("read timed out"),
                })
        }
    }

    fn reading(risk: f64) -> LocationReading {
        LocationReading {
            current_risk: RiskScore::new(risk),
            future_risks: FutureRiskSeries::new(),
        }
    }

    #[tokio::test]
    async fn test_one_failing_location_does_not_abort_the_others() {
        let directory = StaticDirectory(vec![
            LocationName::from("toronto"),
            LocationName::from("montreal"),
        ]);
        let readings =
            StaticReadings(HashMap::from([(LocationName::from("toronto"), reading(7.0))]));
        let surveillance = RiskSurveillance::new(Arc::new(directory), Arc::new(readings));

        let result = surveillance.current().await;

        assert_eq!(result.national_risk, RiskScore::new(7.0));
        assert_eq!(
            result.current_city_risks[&LocationName::from("montreal")],
            RiskScore::default()
        );
    }

    #[tokio::test]
    async fn test_an_unreadable_directory_yields_the_fallback_dataset() {
        let surveillance = RiskSurveillance::new(
            Arc::new(UnavailableDirectory),
            Arc::new(StaticReadings(HashMap::new())),
        );

        let result = surveillance.current().await;

        assert_eq!(result.national_risk, RiskScore::default());
        assert_eq!(result.provincial_risks.len(), 13);
        assert_eq!(result.current_city_risks.len(), 8);
        assert!(result
            .current_city_risks
            .values()
            .all(|risk| *risk == RiskScore::default()));
        assert!(result.future_risks.values().all(|series| series.len() == 7));
    }

    #[test]
    fn test_fallback_serves_a_week_of_zeroed_forecasts_per_city() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        let dataset = fallback(today);

        let toronto = &dataset.future_risks[&LocationName::from("toronto")];
        assert_eq!(toronto.len(), 7);
        assert_eq!(toronto.keys().next(), Some(&today));
        assert!(toronto.values().all(|risk| *risk == RiskScore::default()));
    }
}
