use std::error::Error;

use super::error::RouteError;
use super::location::Location;
use super::route::{Preference, Route, TransportMode};

/// The primary journey backend. Injected as a constructed dependency
/// wherever route or search data is needed, so a test double can stand
/// in for the HTTP client.
pub trait RouteBackend: Send + Sync {
    /// Boolean liveness probe against the health endpoint.
    fn check_health(&self) -> bool;

    /// Requests a route for the given endpoints and preference.
    fn calculate_route(
        &self,
        start: &Location,
        end: &Location,
        preference: Preference,
    ) -> Result<Route, RouteError>;

    /// Free-text location search. An error here makes the resolver fall
    /// through to the next tier; an Ok empty list is a final answer.
    fn search_locations(&self, query: &str) -> Result<Vec<Location>, Box<dyn Error>>;

    /// Lists the transport modes the backend can route over.
    fn transport_modes(&self) -> Result<Vec<TransportMode>, Box<dyn Error>>;

    /// Curated starting points advertised by the backend.
    fn sample_locations(&self) -> Result<Vec<Location>, Box<dyn Error>>;
}

/// Secondary free-text geocoder consulted when the backend search is
/// down.
pub trait GeocodeProvider: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<Location>, Box<dyn Error>>;
}

/// One-shot device position fix. `None` is the normal outcome when the
/// capability is missing or the fix fails; it is never an error.
pub trait PositionProvider: Send + Sync {
    fn current_position(&self) -> Option<Location>;
}

/// Stand-in for platforms without a positioning capability.
pub struct NoGeolocation;

impl PositionProvider for NoGeolocation {
    fn current_position(&self) -> Option<Location> {
        log::warn!("Geolocation is not supported on this platform");
        None
    }
}
