use risk_aggregation::contracts::LocationDirectory;
use risk_aggregation::snapshot::RiskSurveillance;
use std::sync::Arc;

pub struct Application {
    pub surveillance: RiskSurveillance,
    pub directory: Arc<dyn LocationDirectory>,
}

impl Application {
    pub fn new(surveillance: RiskSurveillance, directory: Arc<dyn LocationDirectory>) -> Self {
        Application {
            surveillance,
            directory,
        }
    }
}
