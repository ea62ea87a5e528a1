pub mod backend;
pub mod nominatim;
pub mod types;

pub use backend::RemoteBackendProvider;
pub use nominatim::NominatimProvider;
