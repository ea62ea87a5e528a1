use serde::Deserialize;

/// Body of the backend health endpoint.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// One public-geocoder search hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
