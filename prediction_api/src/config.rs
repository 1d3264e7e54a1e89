use lazy_static::lazy_static;
use serde::Deserialize;
use shared_kernel::configuration::config;

#[derive(Deserialize)]
pub struct Settings {
    pub prediction_api: PredictionApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionApiSettings {
    pub host: String,
}

lazy_static! {
    pub static ref SETTINGS_CONFIG: Settings = config::<Settings>().unwrap();
}
