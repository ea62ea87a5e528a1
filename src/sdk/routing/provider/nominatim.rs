use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use super::types::NominatimPlace;
use crate::sdk::routing::location::Location;
use crate::sdk::routing::service::GeocodeProvider;
use crate::sdk::util::rate_limit::Limiter;

const GEOCODER_TIMEOUT: Duration = Duration::from_secs(5);
const RESULT_LIMIT: usize = 8;
/// Fixed qualifier appended to every query; the planner serves one
/// metro area.
const LOCALITY_SUFFIX: &str = "Delhi, India";
const CLIENT_USER_AGENT: &str = concat!("routemaster/", env!("CARGO_PKG_VERSION"));

/// Nominatim-style public geocoder, the second search tier.
pub struct NominatimProvider {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl NominatimProvider {
    pub fn new(base_url: String, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(GEOCODER_TIMEOUT)
                .build()
                .expect("blocking client with static configuration"),
            base_url,
            limiter,
        }
    }
}

impl GeocodeProvider for NominatimProvider {
    fn search(&self, query: &str) -> Result<Vec<Location>, Box<dyn Error>> {
        self.limiter.wait();
        let url = format!("{}/search", self.base_url);
        let qualified = format!("{}, {}", query, LOCALITY_SUFFIX);
        let limit = RESULT_LIMIT.to_string();
        log::debug!("[PROVIDER] Calling public geocoder for \"{}\"", qualified);

        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(&[
                ("q", qualified.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
                ("accept-language", "en"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        // Entries with unparseable coordinates are skipped, not errors.
        Ok(places
            .into_iter()
            .filter_map(|place| {
                let lat = place.lat.parse::<f64>().ok()?;
                let lng = place.lon.parse::<f64>().ok()?;
                Some(Location::named(lat, lng, place.display_name))
            })
            .collect())
    }
}
