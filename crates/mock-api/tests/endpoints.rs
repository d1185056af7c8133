#![allow(missing_docs)]


use std::time::Duration;

use mock_api::latency::LATENCY_SCALE;
use mock_api::{
    BusAnalyticsRequest, BusDetailRequest, FavoritesRequest, FleetRequest, SearchBusesRequest,
    SearchRequest, TripRequest,
};
use platform::Error;
use platform::api::{Client, Handler};
use pretty_assertions::assert_eq;
use transit::{DataSource, Journey, SearchQuery};

use self::provider::MockProvider;

const SEEDS: u64 = 40;

// Should keep every generated detail field within its bounds.
#[tokio::test]
async fn bus_detail_bounds() {
    for seed in 0..SEEDS {
        let provider = MockProvider::new(seed);
        let client = Client::new(provider.clone());

        let request = <BusDetailRequest as Handler<MockProvider>>::from_input("1".to_string())
            .expect("valid id");
        let detail = client.request(request).owner("owner").await.expect("should handle").body;

        assert_eq!(detail.name, "Express 42");
        assert!((5..20).contains(&detail.eta_min));
        assert!((5..20).contains(&detail.predicted_eta_min));
        assert!((70..100).contains(&detail.confidence));
        assert_eq!(detail.rush_forecast.len(), 12);
        assert!(detail.rush_forecast.iter().all(|v| (1..11).contains(v)));
        assert!((8..18).contains(&detail.alternatives[0].eta_min));
        assert!((12..27).contains(&detail.alternatives[1].eta_min));
        assert_eq!(detail.next_stops.len(), 3);
        assert_eq!(detail.live_updates.len(), 3);
        assert_eq!(detail.path.len(), 3);
        assert_eq!(provider.sleeps(), vec![Duration::from_millis(600)]);
    }
}

// Should reject an empty bus id.
#[test]
fn bus_detail_requires_id() {
    let result = <BusDetailRequest as Handler<MockProvider>>::from_input("  ".to_string());
    let Err(Error::BadRequest(_)) = result else {
        panic!("expected bad request");
    };
}

// Should bound ETAs per line for a bus search.
#[tokio::test]
async fn search_buses_bounds() {
    for seed in 0..SEEDS {
        let provider = MockProvider::new(seed);
        let query = SearchQuery::new("Downtown", "Mall");
        let request = <SearchBusesRequest as Handler<MockProvider>>::from_input(query)
            .expect("valid query");

        let buses = Client::new(provider.clone())
            .request(request)
            .owner("owner")
            .await
            .expect("should handle")
            .body;

        let names: Vec<&str> = buses.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Express 42", "Metro 15", "City Loop", "Night Rider"]);
        assert!((5..15).contains(&buses[0].eta_min));
        assert!((8..23).contains(&buses[1].eta_min));
        assert!((12..32).contains(&buses[2].eta_min));
        assert!((20..30).contains(&buses[3].eta_min));
        assert_eq!(buses[3].segment, "Alternative route via Park Ave");
        assert!(buses.iter().all(|b| (80..100).contains(&b.reliability)));
        assert!(buses.iter().all(|b| b.route == "Downtown → Mall"));
        assert_eq!(provider.sleeps(), vec![Duration::from_millis(800)]);
    }
}

// Should return the fixed journeys and echo the search parameters.
#[tokio::test]
async fn journey_search() {
    let provider = MockProvider::new(1);
    let mut query = SearchQuery::new("Downtown", "Mall");
    query.time = Some("18:30".to_string());

    let request =
        <SearchRequest as Handler<MockProvider>>::from_input(query.clone()).expect("valid query");
    let reply =
        Client::new(provider.clone()).request(request).owner("owner").await.expect("should handle");

    assert!(reply.body.success);
    assert_eq!(reply.body.search_params, query);
    let ids: Vec<&str> = reply.body.results.iter().map(Journey::id).collect();
    assert_eq!(ids, vec!["direct-1", "direct-2", "transfer-1"]);
    assert_eq!(provider.sleeps(), vec![Duration::from_millis(800)]);
}

// Should confirm a posted booking with a timestamped id.
#[tokio::test]
async fn trip_booking() {
    let provider = MockProvider::new(1);
    let body = r#"{"busType":"luxury","members":"25","budget":"50000","pickup":"A","dropoff":"B"}"#;

    let request =
        <TripRequest as Handler<MockProvider>>::from_input(body.to_string()).expect("valid body");
    let confirmation = Client::new(provider.clone())
        .request(request)
        .owner("owner")
        .await
        .expect("should handle")
        .body;

    assert!(confirmation.success);
    assert_eq!(confirmation.booking_id, format!("TRP-{}", provider.now().timestamp_millis()));
    assert_eq!(confirmation.booking.bus_type, "luxury");
    assert_eq!(confirmation.booking.dropoff, "B");
    assert_eq!(provider.sleeps(), vec![Duration::from_millis(1500)]);
}

// Should reject a malformed booking body.
#[test]
fn trip_booking_malformed() {
    let result = <TripRequest as Handler<MockProvider>>::from_input("{\"busType\":".to_string());
    let Err(Error::BadRequest(_)) = result else {
        panic!("expected bad request");
    };
}

// Should offset on-time figures by data source.
#[tokio::test]
async fn fleet_sources() {
    let provider = MockProvider::new(3);
    let client = Client::new(provider.clone());

    for (source, expected) in
        [(None, [98, 92, 97, 94]), (Some("vision"), [90, 82, 87, 84])]
    {
        let request = <FleetRequest as Handler<MockProvider>>::from_input(source.map(String::from))
            .expect("valid source");
        let report = client.request(request).owner("owner").await.expect("should handle").body;

        let on_time: Vec<u32> = report.fleet.iter().map(|e| e.on_time).collect();
        assert_eq!(on_time, expected.to_vec());
        assert_eq!(report.source, source.map_or(DataSource::Sensor, |_| DataSource::Vision));
    }
}

// Should bound incidents and update labels, wider for the night bus.
#[tokio::test]
async fn fleet_bounds() {
    for seed in 0..SEEDS {
        let provider = MockProvider::new(seed);
        let request =
            <FleetRequest as Handler<MockProvider>>::from_input(None).expect("valid source");
        let fleet = Client::new(provider.clone())
            .request(request)
            .owner("owner")
            .await
            .expect("should handle")
            .body
            .fleet;

        for entry in &fleet {
            let minutes: u32 = entry
                .last_updated
                .strip_suffix(" min ago")
                .and_then(|m| m.parse().ok())
                .expect("should be a minutes label");
            if entry.name == "Night Rider" {
                assert!(entry.incidents < 4);
                assert!((2..10).contains(&minutes));
            } else {
                assert!(entry.incidents < 3);
                assert!((1..6).contains(&minutes));
            }
        }
        assert_eq!(provider.sleeps(), vec![Duration::from_millis(700)]);
    }
}

// Should reject an unknown data source.
#[test]
fn fleet_unknown_source() {
    let result = <FleetRequest as Handler<MockProvider>>::from_input(Some("radar".to_string()));
    let Err(Error::BadRequest(_)) = result else {
        panic!("expected bad request");
    };
}

// Should keep analytics series within bounds.
#[tokio::test]
async fn analytics_bounds() {
    for seed in 0..SEEDS {
        let provider = MockProvider::new(seed);
        let request = <BusAnalyticsRequest as Handler<MockProvider>>::from_input("3".to_string())
            .expect("valid id");
        let analytics = Client::new(provider.clone())
            .request(request)
            .owner("owner")
            .await
            .expect("should handle")
            .body;

        assert_eq!(analytics.name, "City Loop");
        assert!((70..100).contains(&analytics.confidence));
        assert_eq!(analytics.eta_variance.len(), 7);
        assert!(analytics.eta_variance.iter().all(|p| (5..15).contains(&p.actual)
            && (5..15).contains(&p.predicted)));
        assert!(analytics.rush_trend.iter().all(|p| (2..10).contains(&p.rush)));
        assert!(!analytics.notes.is_empty());
        assert_eq!(provider.sleeps(), vec![Duration::from_millis(500)]);
    }
}

// Should bound favorite ETAs per line.
#[tokio::test]
async fn favorites_bounds() {
    for seed in 0..SEEDS {
        let provider = MockProvider::new(seed);
        let request =
            <FavoritesRequest as Handler<MockProvider>>::from_input(()).expect("no input");
        let favorites = Client::new(provider.clone())
            .request(request)
            .owner("owner")
            .await
            .expect("should handle")
            .body;

        assert!((5..20).contains(&favorites[0].eta_min));
        assert!((8..28).contains(&favorites[1].eta_min));
        assert!((15..45).contains(&favorites[2].eta_min));
        assert!(favorites.iter().all(|f| (80..100).contains(&f.reliability)));
    }
}

// Should scale simulated latency by configuration.
#[tokio::test]
async fn latency_scale() {
    let cases = [
        (Some("50"), vec![Duration::from_millis(300)]),
        (Some("0"), vec![]),
        (Some("fast"), vec![Duration::from_millis(600)]),
        (None, vec![Duration::from_millis(600)]),
    ];

    for (scale, expected) in cases {
        let mut provider = MockProvider::new(9);
        if let Some(scale) = scale {
            provider = provider.with_config(LATENCY_SCALE, scale);
        }

        let request = <BusDetailRequest as Handler<MockProvider>>::from_input("2".to_string())
            .expect("valid id");
        Client::new(provider.clone()).request(request).owner("owner").await.expect("should handle");

        assert_eq!(provider.sleeps(), expected);
    }
}
