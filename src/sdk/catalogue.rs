use csv::ReaderBuilder;
use std::error::Error;

use crate::sdk::routing::Location;

/// Bundled points of interest; the last search tier and the default
/// sample set when the backend is unreachable.
const BUNDLED_POIS: &str = include_str!("../../data/delhi_pois.csv");

const MAX_MATCHES: usize = 8;

#[derive(Debug, Clone)]
pub struct PoiCatalogue {
    entries: Vec<Location>,
}

impl PoiCatalogue {
    /// The catalogue compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_csv(BUNDLED_POIS).expect("bundled POI catalogue parses")
    }

    /// Parses a 3-column CSV (name, lat, lng) with a header row.
    pub fn from_csv(data: &str) -> Result<Self, Box<dyn Error>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .from_reader(data.as_bytes());

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = record
                .get(0)
                .ok_or("missing name column in POI catalogue")?
                .trim()
                .to_string();
            let lat: f64 = record
                .get(1)
                .ok_or("missing lat column in POI catalogue")?
                .trim()
                .parse()?;
            let lng: f64 = record
                .get(2)
                .ok_or("missing lng column in POI catalogue")?
                .trim()
                .parse()?;
            entries.push(Location::named(lat, lng, name));
        }

        Ok(Self { entries })
    }

    /// Case-insensitive substring match of the query against each
    /// entry's name, capped at 8 results.
    pub fn filter_matching(&self, query: &str) -> Vec<Location> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|location| {
                location
                    .name
                    .as_deref()
                    .map_or(false, |name| name.to_lowercase().contains(&needle))
            })
            .take(MAX_MATCHES)
            .cloned()
            .collect()
    }

    /// The whole catalogue, for sample-location fallbacks.
    pub fn defaults(&self) -> Vec<Location> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogue_parses_every_row() {
        let catalogue = PoiCatalogue::bundled();
        assert_eq!(catalogue.len(), 8);
        assert!(catalogue
            .defaults()
            .iter()
            .all(|location| location.name.is_some()));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let catalogue = PoiCatalogue::bundled();

        let lower = catalogue.filter_matching("delhi");
        let upper = catalogue.filter_matching("DELHI");
        assert_eq!(lower, upper);
        assert!(lower.len() >= 2);

        // "minar" sits mid-name; a prefix match would miss it.
        let minar = catalogue.filter_matching("minar");
        assert_eq!(minar.len(), 1);
        assert_eq!(minar[0].name.as_deref(), Some("Qutub Minar, Mehrauli"));

        // "india" hits India Gate but not Qutub Minar.
        let india = catalogue.filter_matching("india");
        assert_eq!(india.len(), 1);
        assert_eq!(india[0].name.as_deref(), Some("India Gate, New Delhi"));
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let catalogue = PoiCatalogue::bundled();
        assert!(catalogue.filter_matching("mumbai").is_empty());
    }

    #[test]
    fn results_are_capped_at_eight() {
        let mut csv = String::from("name,lat,lng\n");
        for i in 0..12 {
            csv.push_str(&format!("\"Stop {i}, Delhi\",28.6,77.2\n"));
        }
        let catalogue = PoiCatalogue::from_csv(&csv).unwrap();
        assert_eq!(catalogue.len(), 12);
        assert_eq!(catalogue.filter_matching("stop").len(), 8);
    }

    #[test]
    fn malformed_rows_are_reported() {
        assert!(PoiCatalogue::from_csv("name,lat,lng\nBad Row,not-a-number,77.2\n").is_err());
    }
}
