use std::sync::Arc;

use crate::sdk::catalogue::PoiCatalogue;
use crate::sdk::routing::location::Location;
use crate::sdk::routing::service::{GeocodeProvider, RouteBackend};

/// Minimum trimmed query length before any lookup is attempted.
pub const MIN_QUERY_LEN: usize = 2;

/// Free-text location resolution with a three-tier fallback chain:
/// backend search, then the public geocoder, then the bundled
/// catalogue. A tier is consulted only when the previous one *errors*;
/// a confirmed empty answer from a live tier is final. Resolution
/// itself never fails outward; total exhaustion degrades to an empty
/// list.
pub struct LocationResolver {
    backend: Arc<dyn RouteBackend>,
    geocoder: Arc<dyn GeocodeProvider>,
    catalogue: PoiCatalogue,
}

impl LocationResolver {
    pub fn new(
        backend: Arc<dyn RouteBackend>,
        geocoder: Arc<dyn GeocodeProvider>,
        catalogue: PoiCatalogue,
    ) -> Self {
        Self {
            backend,
            geocoder,
            catalogue,
        }
    }

    pub fn resolve(&self, query: &str) -> Vec<Location> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        match self.backend.search_locations(query) {
            Ok(found) => return found,
            Err(e) => log::info!("Backend search failed, trying public geocoder: {}", e),
        }

        match self.geocoder.search(query) {
            Ok(found) => return found,
            Err(e) => log::info!("Public geocoder failed, using bundled catalogue: {}", e),
        }

        self.catalogue.filter_matching(query)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::sdk::routing::error::RouteError;
    use crate::sdk::routing::route::{Preference, Route, TransportMode};

    struct FakeBackend {
        calls: AtomicUsize,
        outcome: Result<Vec<Location>, &'static str>,
    }

    impl FakeBackend {
        fn returning(locations: Vec<Location>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Ok(locations),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Err("backend down"),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RouteBackend for FakeBackend {
        fn check_health(&self) -> bool {
            false
        }

        fn calculate_route(
            &self,
            _start: &Location,
            _end: &Location,
            _preference: Preference,
        ) -> Result<Route, RouteError> {
            Err(RouteError::EmptyResponse)
        }

        fn search_locations(&self, _query: &str) -> Result<Vec<Location>, Box<dyn Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(locations) => Ok(locations.clone()),
                Err(message) => Err((*message).into()),
            }
        }

        fn transport_modes(&self) -> Result<Vec<TransportMode>, Box<dyn Error>> {
            Err("not under test".into())
        }

        fn sample_locations(&self) -> Result<Vec<Location>, Box<dyn Error>> {
            Err("not under test".into())
        }
    }

    struct FakeGeocoder {
        calls: AtomicUsize,
        outcome: Result<Vec<Location>, &'static str>,
    }

    impl FakeGeocoder {
        fn returning(locations: Vec<Location>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Ok(locations),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Err("geocoder down"),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GeocodeProvider for FakeGeocoder {
        fn search(&self, _query: &str) -> Result<Vec<Location>, Box<dyn Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(locations) => Ok(locations.clone()),
                Err(message) => Err((*message).into()),
            }
        }
    }

    fn resolver_with(
        backend: Arc<FakeBackend>,
        geocoder: Arc<FakeGeocoder>,
    ) -> LocationResolver {
        LocationResolver::new(backend, geocoder, PoiCatalogue::bundled())
    }

    #[test]
    fn short_queries_short_circuit_without_any_call() {
        let backend = Arc::new(FakeBackend::returning(vec![Location::new(1.0, 2.0)]));
        let geocoder = Arc::new(FakeGeocoder::returning(vec![]));
        let resolver = resolver_with(backend.clone(), geocoder.clone());

        assert!(resolver.resolve("").is_empty());
        assert!(resolver.resolve("a").is_empty());
        assert!(resolver.resolve("  a  ").is_empty());
        assert_eq!(backend.calls(), 0);
        assert_eq!(geocoder.calls(), 0);
    }

    #[test]
    fn backend_success_is_final_even_when_empty() {
        let backend = Arc::new(FakeBackend::returning(vec![]));
        let geocoder = Arc::new(FakeGeocoder::returning(vec![Location::new(9.0, 9.0)]));
        let resolver = resolver_with(backend.clone(), geocoder.clone());

        assert!(resolver.resolve("nowhere").is_empty());
        assert_eq!(backend.calls(), 1);
        assert_eq!(geocoder.calls(), 0);
    }

    #[test]
    fn backend_results_pass_through_untouched() {
        let expected = vec![
            Location::named(28.6129, 77.2295, "India Gate, New Delhi"),
            Location::named(28.6328, 77.2197, "Connaught Place, New Delhi"),
        ];
        let backend = Arc::new(FakeBackend::returning(expected.clone()));
        let geocoder = Arc::new(FakeGeocoder::failing());
        let resolver = resolver_with(backend, geocoder.clone());

        assert_eq!(resolver.resolve("gate"), expected);
        assert_eq!(geocoder.calls(), 0);
    }

    #[test]
    fn backend_failure_falls_through_to_the_geocoder() {
        let expected = vec![Location::named(28.55, 77.26, "Hauz Khas, New Delhi, India")];
        let backend = Arc::new(FakeBackend::failing());
        let geocoder = Arc::new(FakeGeocoder::returning(expected.clone()));
        let resolver = resolver_with(backend.clone(), geocoder.clone());

        assert_eq!(resolver.resolve("hauz"), expected);
        assert_eq!(backend.calls(), 1);
        assert_eq!(geocoder.calls(), 1);
    }

    #[test]
    fn total_exhaustion_degrades_to_the_catalogue() {
        let resolver = resolver_with(
            Arc::new(FakeBackend::failing()),
            Arc::new(FakeGeocoder::failing()),
        );

        let matches = resolver.resolve("delhi");
        assert!(matches.len() >= 2);
        let names: Vec<&str> = matches.iter().filter_map(|l| l.name.as_deref()).collect();
        assert!(names.contains(&"India Gate, New Delhi"));
        assert!(names.contains(&"Connaught Place, New Delhi"));

        // Substring, not prefix, and case-insensitive.
        let minar = resolver.resolve("MINAR");
        assert_eq!(minar.len(), 1);
        assert_eq!(minar[0].name.as_deref(), Some("Qutub Minar, Mehrauli"));
    }

    #[test]
    fn resolution_is_idempotent_against_an_unchanged_environment() {
        let resolver = resolver_with(
            Arc::new(FakeBackend::failing()),
            Arc::new(FakeGeocoder::failing()),
        );
        assert_eq!(resolver.resolve("delhi"), resolver.resolve("delhi"));
    }
}
