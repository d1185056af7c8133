use std::time::Duration;

use mock_api::BusDetailRequest;
use platform::api::{Client, Handler};
use platform::{Clock, Config, Random, Result};
use serde::Serialize;
use tracing::info;
use transit::indicators::{self, ConfidenceChip, RushBadge, SparkBar};
use transit::map::{self, Point};
use transit::BusDetail;

use crate::loader::Loader;
use crate::OWNER;

/// Toast shown after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

/// Live detail for one bus.
pub struct BusView {
    id: String,
    detail: Option<BusDetail>,
    tracking: bool,
    notify: bool,
    loader: Loader<BusDetail>,
}

impl BusView {
    /// Open the detail view and start loading bus `id`.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` error when `id` is empty.
    pub fn mount<P>(client: &Client<P>, id: &str) -> Result<Self>
    where
        P: Config + Clock + Random + Clone + 'static,
    {
        let request = <BusDetailRequest as Handler<P>>::from_input(id.to_string())?;
        let client = client.clone();
        let fetch = async move {
            client.request(request).owner(OWNER).await.map(|reply| reply.body)
        };
        let loader = Loader::mount(format!("bus {id}"), fetch);

        Ok(Self { id: id.to_string(), detail: None, tracking: false, notify: false, loader })
    }

    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn settle(&mut self) -> Result<()> {
        if let Some(detail) = self.loader.settle().await? {
            self.detail = Some(detail);
        }
        Ok(())
    }

    pub fn dispose(&self) {
        self.loader.dispose();
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&BusDetail> {
        self.detail.as_ref()
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    #[must_use]
    pub const fn notifications_enabled(&self) -> bool {
        self.notify
    }

    pub fn toggle_tracking(&mut self) -> Notice {
        self.tracking = !self.tracking;
        info!(bus_id = %self.id, tracking = self.tracking, "tracking toggled");

        if self.tracking {
            Notice {
                title: "Now tracking live",
                description: "You'll get real-time location updates",
            }
        } else {
            Notice { title: "Stopped tracking", description: "Live updates paused" }
        }
    }

    pub fn toggle_notifications(&mut self) -> Notice {
        self.notify = !self.notify;
        info!(bus_id = %self.id, notify = self.notify, "notifications toggled");

        if self.notify {
            Notice {
                title: "Notifications enabled",
                description: "We'll nudge you when it's close",
            }
        } else {
            Notice {
                title: "Notifications disabled",
                description: "You won't receive updates for this bus",
            }
        }
    }

    /// Bus marker `elapsed` into the tracking animation.
    #[must_use]
    pub fn bus_marker(&self, elapsed: Duration) -> Option<Point> {
        let detail = self.detail.as_ref()?;
        map::bus_marker(&detail.path, self.tracking, elapsed)
    }

    #[must_use]
    pub fn user_marker(&self) -> Option<Point> {
        self.detail.as_ref().map(|d| map::project(d.user_location))
    }

    #[must_use]
    pub fn route_path(&self) -> Option<String> {
        self.detail.as_ref().map(|d| map::svg_path(&d.path))
    }

    #[must_use]
    pub fn rush_badge(&self) -> Option<RushBadge> {
        self.detail.as_ref().and_then(|d| indicators::rush_badge(d.rush_level))
    }

    #[must_use]
    pub fn confidence(&self) -> Option<ConfidenceChip> {
        self.detail.as_ref().map(|d| ConfidenceChip::new(d.confidence, Some(d.predicted_eta_min)))
    }

    /// Rush forecast for the next 12 hours.
    #[must_use]
    pub fn forecast(&self) -> Vec<SparkBar> {
        self.detail.as_ref().map(|d| indicators::sparkline(&d.rush_forecast)).unwrap_or_default()
    }
}
