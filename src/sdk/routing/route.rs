use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Journey preference, forwarded to the backend unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Fastest,
    Cheapest,
    MinimalTransfers,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Fastest => "fastest",
            Preference::Cheapest => "cheapest",
            Preference::MinimalTransfers => "minimal_transfers",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fastest" => Ok(Preference::Fastest),
            "cheapest" => Ok(Preference::Cheapest),
            "minimal_transfers" => Ok(Preference::MinimalTransfers),
            other => Err(format!(
                "unknown preference \"{other}\" (expected fastest, cheapest, or minimal_transfers)"
            )),
        }
    }
}

/// A numeric wire field that sometimes arrives as a string with an
/// embedded number ("12 min"). The string arm is a compatibility shim
/// for older backends; plain numbers are the primary contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    /// Numeric value, extracting the leading numeric token from the
    /// string arm. No digits means 0.
    pub fn value(&self) -> f64 {
        match self {
            NumberLike::Number(n) => *n,
            NumberLike::Text(s) => leading_number(s),
        }
    }
}

impl Default for NumberLike {
    fn default() -> Self {
        NumberLike::Number(0.0)
    }
}

impl From<f64> for NumberLike {
    fn from(n: f64) -> Self {
        NumberLike::Number(n)
    }
}

impl From<&NumberLike> for NumberLike {
    fn from(n: &NumberLike) -> Self {
        n.clone()
    }
}

fn leading_number(text: &str) -> f64 {
    let start = match text.find(|c: char| c.is_ascii_digit()) {
        Some(index) => index,
        None => return 0.0,
    };
    let mut seen_dot = false;
    let token: String = text[start..]
        .chars()
        .take_while(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect();
    token.parse().unwrap_or(0.0)
}

/// Mode of travel for one step of a journey. Unknown wire values land
/// on `Other` rather than failing the whole route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Metro,
    Bus,
    #[serde(alias = "cab", alias = "taxi")]
    Car,
    Auto,
    #[default]
    #[serde(other)]
    Other,
}

impl TravelMode {
    /// Uppercase badge text for step rendering.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Walking => "WALKING",
            TravelMode::Metro => "METRO",
            TravelMode::Bus => "BUS",
            TravelMode::Car => "CAR",
            TravelMode::Auto => "AUTO",
            TravelMode::Other => "OTHER",
        }
    }
}

/// One leg of a journey. The `instructions` and `transport_mode`
/// aliases absorb the two field spellings seen in backend payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    #[serde(default, alias = "instructions")]
    pub instruction: String,
    #[serde(default)]
    pub duration: NumberLike,
    #[serde(default)]
    pub distance: NumberLike,
    #[serde(default, alias = "transport_mode")]
    pub mode: TravelMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// A computed journey. Produced atomically by route acquisition and
/// replaced wholesale in session state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub total_duration: f64,
    pub total_distance: f64,
    pub total_cost: f64,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
    #[serde(default)]
    pub geometry: Vec<(f64, f64)>,
}

impl Route {
    /// Repairs a present-but-untrusted backend payload:
    /// missing or non-numeric totals become 0, a non-array `steps`
    /// becomes empty, malformed steps and geometry points are dropped.
    /// A well-formed payload round-trips unchanged.
    pub fn repair(payload: &Value) -> Route {
        let number = |key: &str| payload.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        let steps = match payload.get("steps") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };
        let geometry = match payload.get("geometry") {
            Some(Value::Array(points)) => points
                .iter()
                .filter_map(|point| serde_json::from_value(point.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };
        Route {
            total_duration: number("total_duration"),
            total_distance: number("total_distance"),
            total_cost: number("total_cost"),
            steps,
            geometry,
        }
    }

    /// Sum of per-step distances in meters, tolerant of junk values.
    pub fn steps_distance(&self) -> f64 {
        self.steps.iter().map(|step| step.distance.value()).sum()
    }
}

/// An available mode of transport advertised by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportMode {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl TransportMode {
    /// The built-in trio served when the backend listing is down.
    pub fn defaults() -> Vec<TransportMode> {
        vec![
            TransportMode {
                id: "metro".to_string(),
                name: "Metro".to_string(),
                icon: "🚇".to_string(),
                description: "Delhi Metro".to_string(),
            },
            TransportMode {
                id: "bus".to_string(),
                name: "Bus".to_string(),
                icon: "🚌".to_string(),
                description: "DTC Bus".to_string(),
            },
            TransportMode {
                id: "walking".to_string(),
                name: "Walking".to_string(),
                icon: "🚶".to_string(),
                description: "Walk".to_string(),
            },
        ]
    }
}

/// Renders a duration in minutes; an hour or more becomes "N hr M min".
pub fn format_duration(duration: impl Into<NumberLike>) -> String {
    let minutes = duration.into().value();
    if minutes >= 60.0 {
        let hrs = (minutes / 60.0).floor();
        let mins = minutes % 60.0;
        if mins > 0.0 {
            format!("{} hr {} min", hrs, mins)
        } else {
            format!("{} hr", hrs)
        }
    } else {
        format!("{} min", minutes)
    }
}

/// Renders a distance in meters; a kilometer or more switches units.
pub fn format_distance(distance: impl Into<NumberLike>) -> String {
    let meters = distance.into().value();
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.1} m", meters)
    }
}
