use std::env;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

pub fn backend_base_url() -> String {
    env::var("ROUTEMASTER_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

pub fn geocoder_base_url() -> String {
    env::var("ROUTEMASTER_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string())
}
