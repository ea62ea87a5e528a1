pub mod sdk;

pub use sdk::catalogue::PoiCatalogue;
pub use sdk::routing::{
    normalize, Location, LocationResolver, NominatimProvider, Preference, RemoteBackendProvider,
    Route, RouteBackend, RouteError, RouteStep,
};
pub use sdk::search::{Field, SearchController, DEBOUNCE_DELAY};
pub use sdk::session::{JourneyPlanner, JourneySession};
