#![allow(missing_docs)]


use std::time::Duration;

use client::views::{BusView, CURRENT_LOCATION, HomeView, OwnerBusView, OwnerView, ResultsView};
use client::{LocationFix, Session, User};
use platform::Error;
use platform::api::Client;
use platform::store::MemoryStore;
use pretty_assertions::assert_eq;
use tokio::time::Instant;
use transit::map;
use transit::pipeline::{Controls, RushFilter, SortKey};
use transit::{Coordinate, DataSource, SearchQuery};

use self::provider::{MockGeolocation, MockProvider, Units};

fn rider() -> User {
    User { email: "rider@example.com".to_string(), name: "Rider".to_string() }
}

async fn signed_in() -> Session<MemoryStore> {
    let session = Session::new(MemoryStore::new());
    session.login(&rider()).await.expect("should login");
    session
}

// Should refuse the home view without a session.
#[tokio::test(start_paused = true)]
async fn home_requires_session() {
    let client = Client::new(MockProvider::new(1));
    let session = Session::new(MemoryStore::new());

    let Err(Error::Unauthorized(_)) = HomeView::mount(&client, &session).await else {
        panic!("expected unauthorized");
    };
}

// Should load favorites and plan a trip.
#[tokio::test(start_paused = true)]
async fn home_loads_favorites() {
    let client = Client::new(MockProvider::new(1));
    let session = signed_in().await;

    let mut home = HomeView::mount(&client, &session).await.expect("should mount");
    assert!(home.is_loading());
    assert_eq!(home.user(), &rider());
    assert_eq!(home.from(), "");

    home.settle().await.expect("should settle");
    assert!(!home.is_loading());
    let names: Vec<&str> = home.favorites().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Express 42", "Metro 15", "City Loop"]);

    home.set_from("Downtown");
    let Err(Error::BadRequest(_)) = home.search_query() else {
        panic!("expected bad request without a destination");
    };

    home.set_to("Mall");
    home.swap();
    let query = home.search_query().expect("both ends set");
    assert_eq!(query.route_label(), "Mall → Downtown");
    assert_eq!(query.departure_label(), "Leaving now");
}

// Should prefill the origin from a saved location.
#[tokio::test(start_paused = true)]
async fn home_uses_saved_location() {
    let client = Client::new(MockProvider::new(1));
    let session = signed_in().await;
    let fix = LocationFix { lat: 40.7128, lng: -74.006, timestamp: 1 };
    session.save_location(&fix).await.expect("should save");

    let home = HomeView::mount(&client, &session).await.expect("should mount");
    assert_eq!(home.from(), CURRENT_LOCATION);
    assert!(home.location_detected());
}

// Should carry on without a location when permission is denied.
#[tokio::test(start_paused = true)]
async fn home_location_denied() {
    let provider = MockProvider::new(1);
    let client = Client::new(provider.clone());
    let session = signed_in().await;

    let mut home = HomeView::mount(&client, &session).await.expect("should mount");
    let found = home.detect_location(&MockGeolocation(None), &provider).await.expect("no error");
    assert!(!found);
    assert_eq!(home.from(), "");

    let position = Coordinate { lat: 40.75, lng: -73.99 };
    let found =
        home.detect_location(&MockGeolocation(Some(position)), &provider).await.expect("no error");
    assert!(found);
    assert_eq!(home.from(), CURRENT_LOCATION);
    assert!(session.location().await.expect("should read").is_some());
}

// Should count ETAs down with a floor of one minute.
#[tokio::test(start_paused = true)]
async fn home_tick() {
    let client = Client::new(MockProvider::new(2));
    let session = signed_in().await;
    let mut home = HomeView::mount(&client, &session).await.expect("should mount");
    home.settle().await.expect("should settle");

    let before: Vec<u32> = home.favorites().iter().map(|f| f.eta_min).collect();
    home.tick(&Units::new(&[0.9, 0.1, 0.71]));
    let after: Vec<u32> = home.favorites().iter().map(|f| f.eta_min).collect();
    assert_eq!(after, vec![before[0] - 1, before[1], before[2] - 1]);

    for _ in 0..60 {
        home.tick(&Units::new(&[0.99, 0.99, 0.99]));
    }
    assert!(home.favorites().iter().all(|f| f.eta_min == 1));
}

// Should clear the session on logout.
#[tokio::test(start_paused = true)]
async fn home_logout() {
    let client = Client::new(MockProvider::new(1));
    let session = signed_in().await;

    let home = HomeView::mount(&client, &session).await.expect("should mount");
    home.logout().await.expect("should logout");

    assert!(session.store().is_empty());
}

// Should filter, sort and reset the loaded results.
#[tokio::test(start_paused = true)]
async fn results_controls() {
    let client = Client::new(MockProvider::new(4));
    let query = SearchQuery::new("Downtown", "Mall");

    let mut results =
        ResultsView::mount(&client, query, Controls::default()).expect("should mount");
    assert!(results.is_loading());
    assert!(!results.no_results());

    results.settle().await.expect("should settle");
    assert_eq!(results.results().len(), 4);
    assert!(results.results().windows(2).all(|w| w[0].eta_min <= w[1].eta_min));
    assert_eq!(results.route_label(), "Downtown → Mall");

    results.set_sort(SortKey::Reliability);
    assert!(results.results().windows(2).all(|w| w[0].reliability >= w[1].reliability));

    results.toggle_alternatives();
    let names: Vec<&str> = results.results().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Night Rider"]);
    assert!(!results.no_results());

    results.reset_filters();
    assert_eq!(results.results().len(), 4);
    assert!(!results.controls().alternatives_only);
    assert_eq!(results.controls().sort, SortKey::Reliability);

    let level = results.results()[0].rush_level;
    results.set_rush(RushFilter::Only(level));
    assert!(results.results().iter().all(|b| b.rush_level == level));
}

// Should fetch while on screen so settling after the latency is immediate.
#[tokio::test(start_paused = true)]
async fn results_fetch_on_mount() {
    let client = Client::new(MockProvider::new(4));
    let query = SearchQuery::new("Downtown", "Mall");
    let mut results =
        ResultsView::mount(&client, query, Controls::default()).expect("should mount");

    tokio::time::sleep(Duration::from_millis(900)).await;

    let start = Instant::now();
    results.settle().await.expect("should settle");
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(results.results().len(), 4);
}

// Should drop a fetch that completes after the view is disposed.
#[tokio::test(start_paused = true)]
async fn results_disposed() {
    let client = Client::new(MockProvider::new(4));
    let query = SearchQuery::new("Downtown", "Mall");
    let mut results =
        ResultsView::mount(&client, query, Controls::default()).expect("should mount");

    let disposer = results.disposer();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        disposer.cancel();
    });

    results.settle().await.expect("should settle");
    assert!(results.results().is_empty());
}

// Should toggle tracking and notifications with notices.
#[tokio::test(start_paused = true)]
async fn bus_toggles() {
    let client = Client::new(MockProvider::new(6));
    let mut bus = BusView::mount(&client, "1").expect("should mount");
    assert!(bus.bus_marker(Duration::ZERO).is_none());

    bus.settle().await.expect("should settle");
    let detail = bus.detail().expect("detail loaded");
    assert_eq!(detail.name, "Express 42");
    let base = map::project(detail.path[1]);

    let notice = bus.toggle_tracking();
    assert_eq!(notice.title, "Now tracking live");
    assert_eq!(notice.description, "You'll get real-time location updates");
    let marker = bus.bus_marker(Duration::from_secs(2)).expect("has marker");
    assert!((marker.x - (base.x + 20.0)).abs() < 1e-6);

    let notice = bus.toggle_tracking();
    assert_eq!(notice.title, "Stopped tracking");
    assert_eq!(bus.bus_marker(Duration::from_secs(2)), Some(base));

    let notice = bus.toggle_notifications();
    assert_eq!(notice.title, "Notifications enabled");
    assert!(bus.notifications_enabled());
    let notice = bus.toggle_notifications();
    assert_eq!(notice.description, "You won't receive updates for this bus");

    assert_eq!(bus.forecast().len(), 12);
    assert!(bus.confidence().is_some());
    assert!(bus.route_path().is_some_and(|p| p.starts_with("M ")));
}

// Should shift on-time figures in place when the source changes.
#[tokio::test(start_paused = true)]
async fn owner_source_toggle() {
    let client = Client::new(MockProvider::new(8));
    let mut owner = OwnerView::mount(&client, DataSource::Sensor).expect("should mount");
    owner.settle().await.expect("should settle");

    let on_time: Vec<u32> = owner.fleet().iter().map(|e| e.on_time).collect();
    assert_eq!(on_time, vec![98, 92, 97, 94]);
    let incidents: u32 = owner.fleet().iter().map(|e| e.incidents).sum();

    owner.set_source(DataSource::Vision);
    let on_time: Vec<u32> = owner.fleet().iter().map(|e| e.on_time).collect();
    assert_eq!(on_time, vec![93, 87, 92, 89]);

    // same source again changes nothing
    owner.set_source(DataSource::Vision);
    let summary = owner.summary();
    assert_eq!(summary.size, 4);
    assert_eq!(summary.average_on_time, 90);
    assert_eq!(summary.total_incidents, incidents);
}

// Should seed notes from the analytics default and persist edits.
#[tokio::test(start_paused = true)]
async fn owner_bus_notes() {
    let client = Client::new(MockProvider::new(10));
    let session = Session::new(MemoryStore::new());

    let mut view = OwnerBusView::mount(&client, &session, "2").expect("should mount");
    view.settle().await.expect("should settle");
    let default = view.analytics().expect("loaded").notes.clone();
    assert_eq!(view.notes(), default);

    view.edit_notes("Replace left mirror").await.expect("should save");
    assert_eq!(session.notes("2").await, Ok(Some("Replace left mirror".to_string())));

    let mut reopened = OwnerBusView::mount(&client, &session, "2").expect("should mount");
    reopened.settle().await.expect("should settle");
    assert_eq!(reopened.notes(), "Replace left mirror");
    assert_eq!(reopened.rush_trend().len(), 7);
}
