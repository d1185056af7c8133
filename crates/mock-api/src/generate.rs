//! Record generators. Pure functions of their inputs and the random source.

use platform::Random;
use transit::{
    Alternative, BusAnalytics, BusDetail, BusSummary, Coordinate, DataSource, DirectJourney,
    EtaVariancePoint, FleetEntry, Journey, Leg, LiveUpdate, NextStop, RushLevel, RushTrendPoint,
    SearchQuery, TransferJourney,
};

const NIGHT_RIDER: &str = "Night Rider";
const DETAIL_SEGMENT: &str = "Downtown → University District";
const DEFAULT_NOTES: &str =
    "Bus performing well overall. Minor delays during peak hours due to traffic congestion.";

/// Display name for a bus id.
#[must_use]
pub fn bus_name(id: &str) -> &'static str {
    match id {
        "1" => "Express 42",
        "2" => "Metro 15",
        _ => "City Loop",
    }
}

fn rush(random: &impl Random) -> RushLevel {
    random.pick(&RushLevel::ALL).copied().unwrap_or(RushLevel::Low)
}

fn reliability(random: &impl Random) -> u32 {
    random.between(80, 100)
}

/// Buses serving a search, one per line. Night Rider is the alternative
/// route.
#[must_use]
pub fn search_buses(random: &impl Random, query: &SearchQuery) -> Vec<BusSummary> {
    let route = query.route_label();
    let lines = [
        ("1", bus_name("1"), (5, 15), "Direct route via Main St"),
        ("2", bus_name("2"), (8, 23), "Express route via Highway"),
        ("3", bus_name("3"), (12, 32), "Scenic route via Downtown"),
        ("4", NIGHT_RIDER, (20, 30), "Alternative route via Park Ave"),
    ];

    lines
        .into_iter()
        .map(|(id, name, (low, high), segment)| BusSummary {
            id: id.to_string(),
            name: name.to_string(),
            route: route.clone(),
            eta_min: random.between(low, high),
            rush_level: rush(random),
            reliability: reliability(random),
            segment: segment.to_string(),
        })
        .collect()
}

/// Detail view for bus `id`.
#[must_use]
pub fn bus_detail(random: &impl Random, id: &str) -> BusDetail {
    let path = vec![
        Coordinate { lat: 40.7128, lng: -74.006 },
        Coordinate { lat: 40.7589, lng: -73.9851 },
        Coordinate { lat: 40.7831, lng: -73.9712 },
    ];

    BusDetail {
        id: id.to_string(),
        name: bus_name(id).to_string(),
        segment: DETAIL_SEGMENT.to_string(),
        eta_min: random.between(5, 20),
        predicted_eta_min: random.between(5, 20),
        confidence: random.between(70, 100),
        rush_level: rush(random),
        rush_forecast: (0..12).map(|_| random.between(1, 11)).collect(),
        user_location: path[0],
        path,
        alternatives: vec![
            Alternative {
                id: "2".to_string(),
                name: bus_name("2").to_string(),
                eta_min: random.between(8, 18),
                rush_level: rush(random),
            },
            Alternative {
                id: "3".to_string(),
                name: bus_name("3").to_string(),
                eta_min: random.between(12, 27),
                rush_level: rush(random),
            },
        ],
        next_stops: vec![
            NextStop { name: "Central Plaza".to_string(), eta: 3, rush: RushLevel::Low },
            NextStop { name: "Market Street".to_string(), eta: 5, rush: RushLevel::Medium },
            NextStop { name: "University Gate".to_string(), eta: 8, rush: RushLevel::High },
        ],
        live_updates: vec![
            LiveUpdate {
                time: "2 min ago".to_string(),
                message: "Bus departed from Downtown Terminal".to_string(),
            },
            LiveUpdate {
                time: "5 min ago".to_string(),
                message: "Slight delay due to traffic".to_string(),
            },
            LiveUpdate {
                time: "8 min ago".to_string(),
                message: "Bus arrived at 3rd Street".to_string(),
            },
        ],
    }
}

/// Fixed direct and transfer options for a search.
#[must_use]
pub fn journeys(query: &SearchQuery) -> Vec<Journey> {
    let route = query.route_label();

    vec![
        Journey::Direct(DirectJourney {
            id: "direct-1".to_string(),
            bus_number: "Express 42".to_string(),
            route: route.clone(),
            eta: 8,
            delay: 0,
            rush: RushLevel::Low,
            reliability: 95,
            fare: 25,
            stops: 5,
            next_bus: 12,
        }),
        Journey::Direct(DirectJourney {
            id: "direct-2".to_string(),
            bus_number: "Metro 15".to_string(),
            route,
            eta: 15,
            delay: 3,
            rush: RushLevel::High,
            reliability: 87,
            fare: 30,
            stops: 8,
            next_bus: 8,
        }),
        Journey::Transfer(TransferJourney {
            id: "transfer-1".to_string(),
            total_time: 35,
            legs: vec![
                Leg {
                    bus_number: "Local 23".to_string(),
                    from: query.from.clone(),
                    to: Some("Central Hub".to_string()),
                    eta: 12,
                    delay: 0,
                    rush: RushLevel::Medium,
                    fare: 15,
                },
                Leg {
                    bus_number: "Express 67".to_string(),
                    from: Some("Central Hub".to_string()),
                    to: query.to.clone(),
                    eta: 18,
                    delay: 2,
                    rush: RushLevel::Low,
                    fare: 20,
                },
            ],
            total_fare: 35,
            walking_time: 5,
        }),
    ]
}

struct FleetLine {
    id: &'static str,
    name: &'static str,
    route: &'static str,
    area: &'static str,
    on_time: u32,
    max_incidents: u32,
    updated: (u32, u32),
}

const FLEET: [FleetLine; 4] = [
    FleetLine {
        id: "1",
        name: "Express 42",
        route: "Downtown → University",
        area: "Central",
        on_time: 95,
        max_incidents: 3,
        updated: (1, 6),
    },
    FleetLine {
        id: "2",
        name: "Metro 15",
        route: "Central → Mall",
        area: "North",
        on_time: 87,
        max_incidents: 3,
        updated: (1, 6),
    },
    FleetLine {
        id: "3",
        name: "City Loop",
        route: "Station → Airport",
        area: "South",
        on_time: 92,
        max_incidents: 3,
        updated: (1, 6),
    },
    FleetLine {
        id: "4",
        name: NIGHT_RIDER,
        route: "Downtown → Suburbs",
        area: "West",
        on_time: 89,
        max_incidents: 4,
        updated: (2, 10),
    },
];

/// Fleet snapshot with on-time figures adjusted for `source`.
#[must_use]
pub fn fleet(random: &impl Random, source: DataSource) -> Vec<FleetEntry> {
    FLEET
        .iter()
        .map(|line| FleetEntry {
            id: line.id.to_string(),
            name: line.name.to_string(),
            route: line.route.to_string(),
            area: line.area.to_string(),
            on_time: source.adjust(line.on_time),
            rush_level: rush(random),
            incidents: random.between(0, line.max_incidents),
            last_updated: format!("{} min ago", random.between(line.updated.0, line.updated.1)),
        })
        .collect()
}

/// Hourly labels starting at 8:00.
fn hours() -> impl Iterator<Item = String> {
    (8..15).map(|hour| format!("{hour}:00"))
}

/// Owner analytics for bus `id`.
#[must_use]
pub fn bus_analytics(random: &impl Random, id: &str) -> BusAnalytics {
    BusAnalytics {
        id: id.to_string(),
        name: bus_name(id).to_string(),
        route: DETAIL_SEGMENT.to_string(),
        confidence: random.between(70, 100),
        eta_variance: hours()
            .map(|time| EtaVariancePoint {
                time,
                actual: random.between(5, 15),
                predicted: random.between(5, 15),
            })
            .collect(),
        rush_trend: hours()
            .map(|time| RushTrendPoint { time, rush: random.between(2, 10) })
            .collect(),
        notes: DEFAULT_NOTES.to_string(),
    }
}

/// The rider's saved routes.
#[must_use]
pub fn favorites(random: &impl Random) -> Vec<BusSummary> {
    let lines = [
        ("1", "Downtown → University", (5, 20)),
        ("2", "Central → Mall", (8, 28)),
        ("3", "Station → Airport", (15, 45)),
    ];

    lines
        .into_iter()
        .map(|(id, route, (low, high))| BusSummary {
            id: id.to_string(),
            name: bus_name(id).to_string(),
            route: route.to_string(),
            eta_min: random.between(low, high),
            rush_level: rush(random),
            reliability: reliability(random),
            segment: String::new(),
        })
        .collect()
}
