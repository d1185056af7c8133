//! # Wizard
//!
//! Linear state machine: `Details -> Preferences -> Review -> Submitted`.
//! Next and previous move one step within the first three and are no-ops at
//! either end. Submission is only accepted from `Review`; after the reset
//! delay the wizard returns to `Details` with a cleared draft and switches
//! to the booked tab.

use std::time::Duration;

use platform::{Clock, Result, bad_request, not_found};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{DraftField, TripBooking, TripBookingDraft};

/// Simulated submission latency.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Time the confirmation stays up before the wizard resets.
pub const RESET_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Step 1, trip details.
    #[default]
    Details,
    /// Step 2, preferences.
    Preferences,
    /// Step 3, review.
    Review,
    Submitted,
}

impl Step {
    /// 1-based position. `Submitted` reports 4.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Preferences => 2,
            Self::Review => 3,
            Self::Submitted => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Book,
    Booked,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    draft: TripBookingDraft,
    bookings: Vec<TripBooking>,
    tab: Tab,
    last_id: i64,
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &TripBookingDraft {
        &self.draft
    }

    /// Booked trips, newest first.
    #[must_use]
    pub fn bookings(&self) -> &[TripBooking] {
        &self.bookings
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.bookings.len()
    }

    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub const fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub const fn next(&mut self) {
        self.step = match self.step {
            Step::Details => Step::Preferences,
            Step::Preferences => Step::Review,
            step @ (Step::Review | Step::Submitted) => step,
        };
    }

    pub const fn previous(&mut self) {
        self.step = match self.step {
            Step::Preferences => Step::Details,
            Step::Review => Step::Preferences,
            step @ (Step::Details | Step::Submitted) => step,
        };
    }

    /// Edit one draft field. Ignored once submitted, until the wizard resets.
    pub fn update(&mut self, field: DraftField, value: impl Into<String>) {
        if self.step == Step::Submitted {
            debug!(field = ?field, "draft is locked after submission");
            return;
        }
        self.draft.set(field, value);
    }

    /// Submit the draft after the simulated delay, prepending the new
    /// booking to the list. The wizard stays on `Submitted` until
    /// [`Wizard::finish_submission`] runs.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` error unless the wizard is on the review step.
    pub async fn submit(&mut self, clock: &impl Clock) -> Result<TripBooking> {
        if self.step != Step::Review {
            return Err(bad_request!("cannot submit from step {}", self.step.number()));
        }

        clock.sleep(SUBMIT_DELAY).await;

        let now = clock.now();
        // ids are millisecond timestamps, bumped when two land together
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        let booking = TripBooking {
            id: id.to_string(),
            draft: self.draft.clone(),
            booked_at: now.format("%-m/%-d/%Y").to_string(),
        };
        info!(id = %booking.id, bus_type = %booking.draft.bus_type, "trip booked");

        self.bookings.insert(0, booking.clone());
        self.step = Step::Submitted;
        Ok(booking)
    }

    /// Hold the confirmation for the reset delay, then clear the draft,
    /// return to the first step and show booked trips. No-op unless a
    /// submission just completed.
    pub async fn finish_submission(&mut self, clock: &impl Clock) {
        if self.step != Step::Submitted {
            return;
        }
        clock.sleep(RESET_DELAY).await;

        debug!("resetting booking wizard");
        self.step = Step::Details;
        self.draft = TripBookingDraft::default();
        self.tab = Tab::Booked;
    }

    /// Remove a booked trip.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error when no booking has `id`.
    pub fn delete(&mut self, id: &str) -> Result<TripBooking> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found!("no booking with id {}", id))?;
        Ok(self.bookings.remove(index))
    }
}
