use std::str::FromStr;

use platform::{Error, bad_request};
use serde::{Deserialize, Serialize};

/// Trip request collected by the wizard. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TripBookingDraft {
    pub bus_type: String,
    pub members: String,
    pub start_date: String,
    pub end_date: String,
    pub destinations: String,
    pub budget: String,
    pub pickup: String,
    pub dropoff: String,
    pub special_requests: String,
}

impl TripBookingDraft {
    /// Set a single field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::BusType => &mut self.bus_type,
            DraftField::Members => &mut self.members,
            DraftField::StartDate => &mut self.start_date,
            DraftField::EndDate => &mut self.end_date,
            DraftField::Destinations => &mut self.destinations,
            DraftField::Budget => &mut self.budget,
            DraftField::Pickup => &mut self.pickup,
            DraftField::Dropoff => &mut self.dropoff,
            DraftField::SpecialRequests => &mut self.special_requests,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Names of the editable draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    BusType,
    Members,
    StartDate,
    EndDate,
    Destinations,
    Budget,
    Pickup,
    Dropoff,
    SpecialRequests,
}

impl FromStr for DraftField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let field = match s {
            "busType" => Self::BusType,
            "members" => Self::Members,
            "startDate" => Self::StartDate,
            "endDate" => Self::EndDate,
            "destinations" => Self::Destinations,
            "budget" => Self::Budget,
            "pickup" => Self::Pickup,
            "dropoff" => Self::Dropoff,
            "specialRequests" => Self::SpecialRequests,
            other => return Err(bad_request!("unknown booking field: {}", other)),
        };
        Ok(field)
    }
}

/// A submitted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBooking {
    pub id: String,
    #[serde(flatten)]
    pub draft: TripBookingDraft,
    pub booked_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self { phone: "+91-9876543210".to_string(), email: "bookings@smartride.com".to_string() }
    }
}

/// Reply to a posted trip booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub booking_id: String,
    pub message: String,
    pub estimated_response: String,
    pub contact_info: ContactInfo,
    pub booking: TripBookingDraft,
}

impl BookingConfirmation {
    /// Confirmation for `booking`, identified by `TRP-<millis>`.
    #[must_use]
    pub fn new(booking: TripBookingDraft, millis: i64) -> Self {
        Self {
            success: true,
            booking_id: format!("TRP-{millis}"),
            message: "Trip booking submitted successfully".to_string(),
            estimated_response: "24 hours".to_string(),
            contact_info: ContactInfo::default(),
            booking,
        }
    }
}
