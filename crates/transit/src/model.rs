//! Transit records exchanged between the mock service and its views.
//!
//! None of these carry a stable identity: every fetch fabricates a fresh
//! record, so two reads of the same `id` may disagree.

use std::fmt;
use std::str::FromStr;

use platform::{Error, bad_request};
use serde::{Deserialize, Serialize};

/// Simulated passenger crowding, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RushLevel {
    Low,
    Medium,
    High,
}

impl RushLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RushLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RushLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(bad_request!("unknown rush level: {}", other)),
        }
    }
}

/// A bus offered for a search or listed as a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusSummary {
    pub id: String,
    pub name: String,
    pub route: String,
    pub eta_min: u32,
    #[serde(alias = "rush")]
    pub rush_level: RushLevel,
    pub reliability: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub segment: String,
}

/// Geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// An alternative bus suggested on the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub id: String,
    pub name: String,
    pub eta_min: u32,
    pub rush_level: RushLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStop {
    pub name: String,
    pub eta: u32,
    pub rush: RushLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUpdate {
    pub time: String,
    pub message: String,
}

/// Everything the detail view shows for one bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusDetail {
    pub id: String,
    pub name: String,
    pub segment: String,
    pub eta_min: u32,
    pub predicted_eta_min: u32,
    pub confidence: u32,
    pub rush_level: RushLevel,
    pub rush_forecast: Vec<u32>,
    pub path: Vec<Coordinate>,
    pub user_location: Coordinate,
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub next_stops: Vec<NextStop>,
    #[serde(default)]
    pub live_updates: Vec<LiveUpdate>,
}

/// Where fleet on-time figures come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Sensor,
    Vision,
}

impl DataSource {
    /// Lowest on-time figure reported under vision data.
    pub const ON_TIME_FLOOR: u32 = 70;
    /// Highest on-time figure reported under sensor data.
    pub const ON_TIME_CEILING: u32 = 98;
    const OFFSET: u32 = 5;

    /// Shift an on-time percentage for this source.
    #[must_use]
    pub fn adjust(self, on_time: u32) -> u32 {
        match self {
            Self::Sensor => (on_time + Self::OFFSET).min(Self::ON_TIME_CEILING),
            Self::Vision => on_time.saturating_sub(Self::OFFSET).max(Self::ON_TIME_FLOOR),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Vision => "vision",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "sensor" => Ok(Self::Sensor),
            "vision" => Ok(Self::Vision),
            other => Err(bad_request!("unknown data source: {}", other)),
        }
    }
}

/// Owner-facing aggregate for one bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetEntry {
    pub id: String,
    pub name: String,
    pub route: String,
    pub area: String,
    pub on_time: u32,
    pub rush_level: RushLevel,
    pub incidents: u32,
    pub last_updated: String,
}

impl FleetEntry {
    /// Apply a data source offset in place.
    pub fn apply_source(&mut self, source: DataSource) {
        self.on_time = source.adjust(self.on_time);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetReport {
    pub fleet: Vec<FleetEntry>,
    pub source: DataSource,
}

/// Headline figures for the owner dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub size: usize,
    /// Mean on-time percentage, rounded half away from zero.
    pub average_on_time: u32,
    pub total_incidents: u32,
}

impl FleetSummary {
    #[must_use]
    pub fn from_entries(entries: &[FleetEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        let size = entries.len();
        let on_time: u64 = entries.iter().map(|e| u64::from(e.on_time)).sum();
        let count = size as u64;
        let average = (on_time * 2 + count) / (count * 2);

        Self {
            size,
            average_on_time: u32::try_from(average).unwrap_or(u32::MAX),
            total_incidents: entries.iter().map(|e| e.incidents).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaVariancePoint {
    pub time: String,
    pub actual: u32,
    pub predicted: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RushTrendPoint {
    pub time: String,
    pub rush: u32,
}

/// Per-bus analytics for the owner view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusAnalytics {
    pub id: String,
    pub name: String,
    pub route: String,
    pub confidence: u32,
    pub eta_variance: Vec<EtaVariancePoint>,
    pub rush_trend: Vec<RushTrendPoint>,
    pub notes: String,
}

/// One option returned by a journey search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Journey {
    Direct(DirectJourney),
    Transfer(TransferJourney),
}

impl Journey {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Direct(direct) => &direct.id,
            Self::Transfer(transfer) => &transfer.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectJourney {
    pub id: String,
    pub bus_number: String,
    pub route: String,
    pub eta: u32,
    pub delay: u32,
    pub rush: RushLevel,
    pub reliability: u32,
    pub fare: u32,
    pub stops: u32,
    pub next_bus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferJourney {
    pub id: String,
    pub total_time: u32,
    pub legs: Vec<Leg>,
    pub total_fare: u32,
    pub walking_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub bus_number: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub eta: u32,
    pub delay: u32,
    pub rush: RushLevel,
    pub fare: u32,
}

/// Search parameters. `time` defaults to "now".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub time: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: Some(from.into()), to: Some(to.into()), time: None }
    }

    /// Route label shown on results, e.g. `Downtown → Mall`.
    #[must_use]
    pub fn route_label(&self) -> String {
        format!(
            "{} → {}",
            self.from.as_deref().unwrap_or_default(),
            self.to.as_deref().unwrap_or_default()
        )
    }

    /// Departure label, `Leaving now` unless a time was given.
    #[must_use]
    pub fn departure_label(&self) -> String {
        match self.time.as_deref() {
            None | Some("now" | "") => "Leaving now".to_string(),
            Some(time) => format!("Leaving {time}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn rush_order() {
        assert!(RushLevel::Low < RushLevel::Medium);
        assert!(RushLevel::Medium < RushLevel::High);
        assert_eq!("high".parse::<RushLevel>(), Ok(RushLevel::High));
        assert!("extreme".parse::<RushLevel>().is_err());
    }

    #[test]
    fn summary_accepts_rush_alias() {
        let favorite: BusSummary = serde_json::from_value(json!({
            "id": "1",
            "name": "Express 42",
            "route": "Downtown → University",
            "etaMin": 8,
            "rush": "low",
            "reliability": 95
        }))
        .expect("should deserialize");

        assert_eq!(favorite.rush_level, RushLevel::Low);
        assert!(favorite.segment.is_empty());

        let value = serde_json::to_value(&favorite).expect("should serialize");
        assert_eq!(value["rushLevel"], "low");
        assert!(value.get("segment").is_none());
    }

    #[test]
    fn source_offsets_clamp() {
        assert_eq!(DataSource::Sensor.adjust(95), 98);
        assert_eq!(DataSource::Sensor.adjust(87), 92);
        assert_eq!(DataSource::Vision.adjust(87), 82);
        assert_eq!(DataSource::Vision.adjust(72), 70);
        assert_eq!(DataSource::Vision.adjust(3), 70);
    }

    #[test]
    fn fleet_summary_rounds() {
        let entry = |on_time, incidents| FleetEntry {
            id: "1".to_string(),
            name: "Express 42".to_string(),
            route: "Downtown → University".to_string(),
            area: "Central".to_string(),
            on_time,
            rush_level: RushLevel::Low,
            incidents,
            last_updated: "2 min ago".to_string(),
        };
        let fleet = vec![entry(95, 0), entry(87, 1), entry(92, 0), entry(89, 2)];

        let summary = FleetSummary::from_entries(&fleet);
        assert_eq!(summary, FleetSummary { size: 4, average_on_time: 91, total_incidents: 3 });

        // 90.5 rounds up
        let summary = FleetSummary::from_entries(&[entry(90, 0), entry(91, 0)]);
        assert_eq!(summary.average_on_time, 91);
        assert_eq!(FleetSummary::from_entries(&[]), FleetSummary::default());
    }

    #[test]
    fn journey_tagging() {
        let journey = Journey::Direct(DirectJourney {
            id: "direct-1".to_string(),
            bus_number: "Express 42".to_string(),
            route: "A → B".to_string(),
            eta: 8,
            delay: 0,
            rush: RushLevel::Low,
            reliability: 95,
            fare: 25,
            stops: 5,
            next_bus: 12,
        });

        let value = serde_json::to_value(&journey).expect("should serialize");
        assert_eq!(value["type"], "direct");
        assert_eq!(value["busNumber"], "Express 42");
        assert_eq!(journey.id(), "direct-1");
    }

    #[test]
    fn query_labels() {
        let mut query = SearchQuery::new("Downtown", "Mall");
        assert_eq!(query.route_label(), "Downtown → Mall");
        assert_eq!(query.departure_label(), "Leaving now");

        query.time = Some("18:30".to_string());
        assert_eq!(query.departure_label(), "Leaving 18:30");
    }
}
