use crate::domain::model::Doctor;
use crate::domain::ports::{ConfigProvider, DoctorSource};
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// One unauthenticated GET of a JSON array of doctor records.
pub struct HttpDoctorSource {
    endpoint: String,
    timeout: Option<Duration>,
    client: Client,
}

impl HttpDoctorSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self::new(config.endpoint()).with_timeout(config.timeout())
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_all(&self) -> Result<Vec<Doctor>> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(FinderError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        let doctors: Vec<Doctor> = serde_json::from_slice(&body)?;
        tracing::info!("Fetched {} doctors from {}", doctors.len(), self.endpoint);
        Ok(doctors)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
