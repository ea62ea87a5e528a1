use std::sync::Arc;

use crate::sdk::catalogue::PoiCatalogue;
use crate::sdk::routing::error::RouteError;
use crate::sdk::routing::location::Location;
use crate::sdk::routing::route::{Preference, Route, TransportMode};
use crate::sdk::routing::service::RouteBackend;
use crate::sdk::search::Field;

/// Session state observed by the view layer. Every mutation is a whole
/// value replace, so an observer never sees a torn route.
#[derive(Clone, Debug, Default)]
pub struct JourneySession {
    start: Option<Location>,
    end: Option<Location>,
    route: Option<Route>,
    is_calculating: bool,
}

impl JourneySession {
    pub fn start(&self) -> Option<&Location> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Location> {
        self.end.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn is_calculating(&self) -> bool {
        self.is_calculating
    }
}

/// Owns the session and orchestrates route acquisition against the
/// injected backend.
pub struct JourneyPlanner {
    backend: Arc<dyn RouteBackend>,
    session: JourneySession,
}

impl JourneyPlanner {
    pub fn new(backend: Arc<dyn RouteBackend>) -> Self {
        Self {
            backend,
            session: JourneySession::default(),
        }
    }

    pub fn session(&self) -> &JourneySession {
        &self.session
    }

    pub fn select_location(&mut self, field: Field, location: Location) {
        match field {
            Field::Start => self.session.start = Some(location),
            Field::End => self.session.end = Some(location),
        }
    }

    pub fn clear_route(&mut self) {
        self.session.route = None;
    }

    /// Acquires a route for the given endpoints. The previous route is
    /// cleared up front and `is_calculating` is reset on every exit
    /// path; only a successful acquisition repopulates the route slot.
    pub fn calculate_route(
        &mut self,
        start: Location,
        end: Location,
        preference: Preference,
    ) -> Result<&Route, RouteError> {
        self.session.start = Some(start.clone());
        self.session.end = Some(end.clone());
        self.session.route = None;
        self.session.is_calculating = true;

        let outcome = self.backend.calculate_route(&start, &end, preference);
        self.session.is_calculating = false;

        match outcome {
            Ok(route) => Ok(&*self.session.route.insert(route)),
            Err(e) => {
                log::error!("Route calculation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Transport modes advertised by the backend, or the built-in trio
    /// when the listing cannot be fetched.
    pub fn transport_modes(&self) -> Vec<TransportMode> {
        match self.backend.transport_modes() {
            Ok(modes) => modes,
            Err(e) => {
                log::warn!("Failed to fetch transport modes, using defaults: {}", e);
                TransportMode::defaults()
            }
        }
    }

    /// Sample locations advertised by the backend, falling back to the
    /// bundled catalogue.
    pub fn sample_locations(&self, catalogue: &PoiCatalogue) -> Vec<Location> {
        match self.backend.sample_locations() {
            Ok(locations) => locations,
            Err(e) => {
                log::warn!("Failed to fetch sample locations, using catalogue: {}", e);
                catalogue.defaults()
            }
        }
    }
}
