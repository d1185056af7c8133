//! Data-to-indicator mappings used by the views.

use serde::Serialize;

use crate::model::RushLevel;

/// Three-way visual tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Fair,
    Poor,
}

/// Warning badge for a crowded bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RushBadge {
    pub text: &'static str,
    pub description: &'static str,
}

/// Badge for `level`. Only high rush is flagged.
#[must_use]
pub const fn rush_badge(level: RushLevel) -> Option<RushBadge> {
    match level {
        RushLevel::High => Some(RushBadge {
            text: "High Rush",
            description: "Very crowded, consider alternatives",
        }),
        RushLevel::Low | RushLevel::Medium => None,
    }
}

#[must_use]
pub const fn reliability_tone(reliability: u32) -> Tone {
    if reliability > 90 {
        Tone::Good
    } else if reliability > 80 {
        Tone::Fair
    } else {
        Tone::Poor
    }
}

/// Direction a predicted ETA points relative to the 8 minute pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Falling,
    Steady,
    Rising,
}

const TREND_PIVOT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceChip {
    pub confidence: u32,
    pub tone: Tone,
    pub trend: Trend,
    pub predicted_eta: Option<u32>,
}

impl ConfidenceChip {
    #[must_use]
    pub fn new(confidence: u32, predicted_eta: Option<u32>) -> Self {
        let tone = if confidence >= 85 {
            Tone::Good
        } else if confidence >= 70 {
            Tone::Fair
        } else {
            Tone::Poor
        };

        // a zero prediction carries no signal
        let predicted_eta = predicted_eta.filter(|eta| *eta > 0);
        let trend = match predicted_eta {
            None => Trend::Steady,
            Some(eta) if eta < TREND_PIVOT => Trend::Falling,
            Some(eta) if eta > TREND_PIVOT => Trend::Rising,
            Some(_) => Trend::Steady,
        };

        Self { confidence, tone, trend, predicted_eta }
    }
}

/// Crowding band of one sparkline sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crowding {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparkBar {
    pub label: String,
    pub value: u32,
    pub height: f64,
    pub crowding: Crowding,
}

/// Maximum bar height in pixels.
pub const SPARK_HEIGHT: f64 = 40.0;
const FIRST_HOUR: usize = 8;

/// Hourly bars for a rush forecast starting at 8:00.
#[must_use]
pub fn sparkline(values: &[u32]) -> Vec<SparkBar> {
    let max = f64::from(values.iter().copied().max().unwrap_or_default());

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let value_f = f64::from(value);
            let (height, crowding) = if max > 0.0 {
                let crowding = if value_f <= max * 0.3 {
                    Crowding::Low
                } else if value_f <= max * 0.7 {
                    Crowding::Moderate
                } else {
                    Crowding::High
                };
                (value_f / max * SPARK_HEIGHT, crowding)
            } else {
                (0.0, Crowding::Low)
            };

            SparkBar { label: format!("{}:00", FIRST_HOUR + index), value, height, crowding }
        })
        .collect()
}
