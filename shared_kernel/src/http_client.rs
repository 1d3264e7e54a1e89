use anyhow::Context;
use lazy_static::lazy_static;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Reads that take longer than this are abandoned and reported as failures.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

lazy_static! {
    static ref CLIENT: ClientWithMiddleware = {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to construct the http client");
        ClientBuilder::new(client)
            // Retry transient failures before reporting a read as failed.
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TracingMiddleware::default())
            .build()
    };
}

pub struct HttpClient;

impl HttpClient {
    pub async fn get_json<DTO: DeserializeOwned>(url: Url) -> anyhow::Result<DTO> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} returned a failure status"))?;

        response
            .json::<DTO>()
            .await
            .with_context(|| format!("Failed to deserialize response from {url}"))
    }
}
