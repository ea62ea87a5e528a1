pub mod error;
pub mod location;
pub mod provider;
pub mod resolver;
pub mod route;
pub mod service;

pub use error::RouteError;
pub use location::{normalize, Location, LocationPayload};
pub use provider::{NominatimProvider, RemoteBackendProvider};
pub use resolver::{LocationResolver, MIN_QUERY_LEN};
pub use route::{
    format_distance, format_duration, NumberLike, Preference, Route, RouteStep, TransportMode,
    TravelMode,
};
pub use service::{GeocodeProvider, NoGeolocation, PositionProvider, RouteBackend};
