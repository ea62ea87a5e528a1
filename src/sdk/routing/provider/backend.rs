use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::types::HealthResponse;
use crate::sdk::routing::error::{BackendErrorPayload, RouteError};
use crate::sdk::routing::location::{normalize, Location, LocationPayload};
use crate::sdk::routing::route::{Preference, Route, TransportMode};
use crate::sdk::routing::service::RouteBackend;

const BACKEND_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the primary journey backend.
pub struct RemoteBackendProvider {
    client: Client,
    base_url: String,
}

impl RemoteBackendProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(BACKEND_TIMEOUT)
                .build()
                .expect("blocking client with static configuration"),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn unreachable(&self) -> RouteError {
        RouteError::Unreachable {
            endpoint: self.base_url.clone(),
        }
    }
}

/// Pulls the backend's own message out of a rejection body, falling
/// back to the raw text when the payload is not the structured form.
fn rejection_detail(body: &str) -> String {
    match serde_json::from_str::<BackendErrorPayload>(body) {
        Ok(payload) => payload.detail,
        Err(_) => body.to_string(),
    }
}

impl RouteBackend for RemoteBackendProvider {
    fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        log::debug!("[PROVIDER] Probing backend health at {}", url);
        match self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.json::<HealthResponse>())
        {
            Ok(health) => health.status == "healthy",
            Err(e) => {
                log::debug!("Backend health probe failed: {}", e);
                false
            }
        }
    }

    fn calculate_route(
        &self,
        start: &Location,
        end: &Location,
        preference: Preference,
    ) -> Result<Route, RouteError> {
        let url = format!("{}/api/calculate-route", self.base_url);
        let body = json!({
            "start_lat": start.lat,
            "start_lng": start.lng,
            "end_lat": end.lat,
            "end_lng": end.lng,
            "preference": preference,
        });
        log::debug!(
            "[PROVIDER] Calling calculate-route ({}) for {:?} -> {:?}",
            preference,
            start.name,
            end.name
        );

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            log::error!("Route request to {} failed: {}", url, e);
            self.unreachable()
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            log::error!("Failed to read route response body: {}", e);
            self.unreachable()
        })?;

        if !status.is_success() {
            return Err(RouteError::BackendRejected {
                status: status.as_u16(),
                detail: rejection_detail(&text),
            });
        }

        let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        if payload.is_null() {
            return Err(RouteError::EmptyResponse);
        }
        Ok(Route::repair(&payload))
    }

    fn search_locations(&self, query: &str) -> Result<Vec<Location>, Box<dyn Error>> {
        let url = format!("{}/api/search-locations", self.base_url);
        log::debug!("[PROVIDER] Calling backend search for \"{}\"", query);
        let payload: Value = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(normalize(&payload))
    }

    fn transport_modes(&self) -> Result<Vec<TransportMode>, Box<dyn Error>> {
        let url = format!("{}/api/transport-modes", self.base_url);
        log::debug!("[PROVIDER] Fetching transport modes");
        let modes = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json::<Vec<TransportMode>>()?;
        Ok(modes)
    }

    fn sample_locations(&self) -> Result<Vec<Location>, Box<dyn Error>> {
        let url = format!("{}/api/sample-locations", self.base_url);
        log::debug!("[PROVIDER] Fetching sample locations");
        let payload: Value = self.client.get(&url).send()?.error_for_status()?.json()?;
        match LocationPayload::classify(&payload) {
            LocationPayload::Unrecognized => {
                Err(format!("unrecognized sample-locations payload: {payload}").into())
            }
            shape => Ok(shape.into_locations()),
        }
    }
}
