use crate::locations::{LocationName, ProvinceCode};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Flu activity severity in the closed range [0, 10]. Out-of-range inputs
/// are clamped on construction. A value of 0 doubles as the "no data"
/// sentinel at the output boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RiskScore(f64);

impl RiskScore {
    pub fn new(value: f64) -> Self {
        RiskScore(value.clamp(0.0, 10.0))
    }

    pub fn inner(&self) -> f64 {
        self.0
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::classify(*self)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Buckets a score into a severity label. Boundary values resolve to
    /// the lower bucket.
    pub fn classify(score: RiskScore) -> RiskLevel {
        let risk = score.inner();
        if risk <= 3.0 {
            RiskLevel::Low
        } else if risk <= 6.0 {
            RiskLevel::Moderate
        } else if risk <= 8.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Per-day risk forecasts, keyed by date.
pub type FutureRiskSeries = BTreeMap<NaiveDate, RiskScore>;

/// What the reading source reports for a single location.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationReading {
    pub current_risk: RiskScore,
    pub future_risks: FutureRiskSeries,
}

/// The dashboard dataset: one national scalar, one scalar per province
/// code, and per-city current and forecast values. Recomputed on every
/// request, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedRisk {
    pub national_risk: RiskScore,
    pub provincial_risks: BTreeMap<ProvinceCode, RiskScore>,
    pub current_city_risks: HashMap<LocationName, RiskScore>,
    pub future_risks: HashMap<LocationName, FutureRiskSeries>,
}
