use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resolved point on the map. Pure value type: identity is the
/// coordinate pair, and selections replace the whole value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }

    /// A device position fix mapped into the data model.
    pub fn current_position(lat: f64, lng: f64) -> Self {
        Self::named(lat, lng, "Current Location")
    }

    /// First comma-delimited segment of the label, for the prominent
    /// line of a suggestion entry.
    pub fn primary_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(|name| name.split(',').next().unwrap_or(name).trim())
    }

    /// Up to two further label segments, for the context line under a
    /// suggestion entry.
    pub fn secondary_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let rest: Vec<&str> = name.split(',').skip(1).take(2).map(str::trim).collect();
        if rest.is_empty() {
            None
        } else {
            Some(rest.join(", "))
        }
    }
}

/// Wrapper field names probed on object payloads, in priority order.
const WRAPPER_FIELDS: [&str; 3] = ["locations", "data", "results"];

/// The shapes a location payload is known to arrive in. Every provider
/// response goes through this decode before downstream code touches it.
#[derive(Debug)]
pub enum LocationPayload {
    /// A bare array of locations.
    List(Vec<Location>),
    /// An object wrapping the array under `locations`, `data`, or `results`.
    Wrapped(Vec<Location>),
    /// A single location object with numeric `lat` and `lng`.
    Single(Location),
    /// Anything else: null, scalar, malformed object.
    Unrecognized,
}

impl LocationPayload {
    pub fn classify(raw: &Value) -> Self {
        if let Value::Array(items) = raw {
            return Self::List(parse_items(items));
        }
        if let Value::Object(map) = raw {
            for key in WRAPPER_FIELDS {
                if let Some(Value::Array(items)) = map.get(key) {
                    return Self::Wrapped(parse_items(items));
                }
            }
            if map.get("lat").and_then(Value::as_f64).is_some()
                && map.get("lng").and_then(Value::as_f64).is_some()
            {
                if let Ok(location) = serde_json::from_value::<Location>(raw.clone()) {
                    return Self::Single(location);
                }
            }
        }
        Self::Unrecognized
    }

    pub fn into_locations(self) -> Vec<Location> {
        match self {
            Self::List(locations) | Self::Wrapped(locations) => locations,
            Self::Single(location) => vec![location],
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Coerces an arbitrary provider payload into a location list. Always
/// returns a sequence; unrecognized shapes become empty and malformed
/// array elements are dropped.
pub fn normalize(raw: &Value) -> Vec<Location> {
    LocationPayload::classify(raw).into_locations()
}

fn parse_items(items: &[Value]) -> Vec<Location> {
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}
