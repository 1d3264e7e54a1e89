use async_trait::async_trait;
use entities::locations::LocationName;
use entities::risk::LocationReading;
use thiserror::Error;

/// Failures the upstream collaborators can report. Neither variant escapes
/// the pipeline: a missing reading degrades that location to "no data", a
/// missing directory degrades the whole dataset to the zeroed fallback.
#[derive(Debug, Error)]
pub enum ReadingsError {
    #[error("the location directory is unavailable: {0}")]
    DirectoryUnavailable(#[source] anyhow::Error),
    #[error("no reading available for {location}: {source}")]
    LocationUnavailable {
        location: LocationName,
        #[source]
        source: anyhow::Error,
    },
}

/// The current set of known measurement points.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn locations(&self) -> Result<Vec<LocationName>, ReadingsError>;
}

/// Per-location risk readings. Each read fails independently of the others.
#[async_trait]
pub trait RiskReadingSource: Send + Sync {
    async fn reading(&self, location: &LocationName) -> Result<LocationReading, ReadingsError>;
}
