use entities::locations::{LocationName, ProvinceCode};
use entities::risk::{AggregatedRisk, LocationReading, RiskScore};
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

/// Folds the per-location readings into the dashboard dataset.
///
/// Pure and order-independent. Locations without a reading are excluded
/// from every mean rather than counted as zero, but keep their city-level
/// rows (a zero score and an empty forecast). Provinces with no
/// contributing city report 0, and all thirteen codes are always present.
pub fn aggregate(
    locations: &[LocationName],
    readings: &HashMap<LocationName, Option<LocationReading>>,
) -> AggregatedRisk {
    let successful = locations
        .iter()
        .filter_map(|location| reading_for(readings, location).map(|reading| (location, reading)))
        .collect::<Vec<_>>();

    let provincial_contributions = successful
        .iter()
        .filter_map(|(location, reading)| {
            ProvinceCode::for_city(location)
                .map(|province| (province, reading.current_risk.inner()))
        })
        .into_group_map();

    let provincial_risks = ProvinceCode::ALL
        .iter()
        .map(|province| {
            let contributions = provincial_contributions
                .get(province)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (*province, mean(contributions))
        })
        .collect::<BTreeMap<_, _>>();

    let national_risk = mean(
        &successful
            .iter()
            .map(|(_, reading)| reading.current_risk.inner())
            .collect::<Vec<_>>(),
    );

    let current_city_risks = locations
        .iter()
        .map(|location| {
            let risk = reading_for(readings, location)
                .map(|reading| reading.current_risk)
                .unwrap_or_default();
            (location.clone(), risk)
        })
        .collect();

    let future_risks = locations
        .iter()
        .map(|location| {
            let series = reading_for(readings, location)
                .map(|reading| reading.future_risks.clone())
                .unwrap_or_default();
            (location.clone(), series)
        })
        .collect();

    AggregatedRisk {
        national_risk,
        provincial_risks,
        current_city_risks,
        future_risks,
    }
}

fn reading_for<'a>(
    readings: &'a HashMap<LocationName, Option<LocationReading>>,
    location: &LocationName,
) -> Option<&'a LocationReading> {
    readings.get(location).and_then(|reading| reading.as_ref())
}

fn mean(risks: &[f64]) -> RiskScore {
    if risks.is_empty() {
        return RiskScore::default();
    }
    RiskScore::new(risks.iter().sum::<f64>() / risks.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use entities::risk::FutureRiskSeries;

    fn reading(risk: f64) -> Option<LocationReading> {
        Some(LocationReading {
            current_risk: RiskScore::new(risk),
            future_risks: FutureRiskSeries::new(),
        })
    }

    #[test]
    fn test_empty_input_yields_the_zeroed_dataset() {
        let result = aggregate(&[], &HashMap::new());

        assert_eq!(result.national_risk, RiskScore::default());
        assert_eq!(result.provincial_risks.len(), 13);
        assert!(result
            .provincial_risks
            .values()
            .all(|risk| *risk == RiskScore::default()));
        assert!(result.current_city_risks.is_empty());
        assert!(result.future_risks.is_empty());
    }

    #[test]
    fn test_national_and_provincial_risks_are_means_over_readings() {
        let locations = vec![LocationName::from("Toronto"), LocationName::from("Montreal")];
        let readings = HashMap::from([
            (LocationName::from("Toronto"), reading(7.0)),
            (LocationName::from("Montreal"), reading(5.0)),
        ]);

        let result = aggregate(&locations, &readings);

        assert_eq!(result.national_risk, RiskScore::new(6.0));
        assert_eq!(
            result.provincial_risks[&ProvinceCode::ON],
            RiskScore::new(7.0)
        );
        assert_eq!(
            result.provincial_risks[&ProvinceCode::QC],
            RiskScore::new(5.0)
        );
        assert!(result
            .provincial_risks
            .iter()
            .filter(|(code, _)| !matches!(**code, ProvinceCode::ON | ProvinceCode::QC))
            .all(|(_, risk)| *risk == RiskScore::default()));
    }

    #[test]
    fn test_failed_locations_are_excluded_from_means_not_counted_as_zero() {
        let locations = vec![LocationName::from("toronto"), LocationName::from("montreal")];
        let readings = HashMap::from([
            (LocationName::from("toronto"), reading(7.0)),
            (LocationName::from("montreal"), None),
        ]);

        let result = aggregate(&locations, &readings);

        assert_eq!(result.national_risk, RiskScore::new(7.0));
        assert_eq!(
            result.current_city_risks[&LocationName::from("montreal")],
            RiskScore::default()
        );
        assert_eq!(
            result.future_risks[&LocationName::from("montreal")],
            FutureRiskSeries::new()
        );
    }

    #[test]
    fn test_cities_without_a_province_mapping_still_report_city_level() {
        let locations = vec![LocationName::from("moncton")];
        let readings = HashMap::from([(LocationName::from("moncton"), reading(4.0))]);

        let result = aggregate(&locations, &readings);

        // Contributes to the national mean and its own row, but to no
        // province.
        assert_eq!(result.national_risk, RiskScore::new(4.0));
        assert_eq!(
            result.current_city_risks[&LocationName::from("moncton")],
            RiskScore::new(4.0)
        );
        assert!(result
            .provincial_risks
            .values()
            .all(|risk| *risk == RiskScore::default()));
    }

    #[test]
    fn test_every_province_code_is_present_for_all_inputs() {
        let locations = vec![LocationName::from("toronto")];
        let readings = HashMap::from([(LocationName::from("toronto"), reading(2.0))]);

        let result = aggregate(&locations, &readings);

        let codes = result.provincial_risks.keys().copied().collect::<Vec<_>>();
        assert_eq!(codes, ProvinceCode::ALL.to_vec());
    }

    #[test]
    fn test_aggregate_is_invariant_under_input_reordering() {
        let readings: HashMap<LocationName, Option<LocationReading>> = HashMap::from([
            (LocationName::from("toronto"), reading(7.0)),
            (LocationName::from("montreal"), reading(5.0)),
            (LocationName::from("vancouver"), reading(4.0)),
        ]);
        let forwards = vec![
            LocationName::from("toronto"),
            LocationName::from("montreal"),
            LocationName::from("vancouver"),
        ];
        let backwards = forwards.iter().rev().cloned().collect::<Vec<_>>();

        assert_eq!(
            aggregate(&forwards, &readings),
            aggregate(&backwards, &readings)
        );
    }

    #[test]
    fn test_future_series_pass_through_per_city() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let series = FutureRiskSeries::from([(date, RiskScore::new(9.0))]);
        let locations = vec![LocationName::from("calgary")];
        let readings = HashMap::from([(
            LocationName::from("calgary"),
            Some(LocationReading {
                current_risk: RiskScore::new(9.0),
                future_risks: series.clone(),
            }),
        )]);

        let result = aggregate(&locations, &readings);

        assert_eq!(result.future_risks[&LocationName::from("calgary")], series);
    }
}
