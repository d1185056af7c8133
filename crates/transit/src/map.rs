//! Screen projection for the mock route map.

use std::fmt::Write;
use std::time::Duration;

use serde::Serialize;

use crate::model::Coordinate;

const LNG_ORIGIN: f64 = -74.1;
const LAT_ORIGIN: f64 = 40.8;
const SCALE: f64 = 400.0;

/// Length of one loop of the tracking animation.
pub const TRACK_PERIOD: Duration = Duration::from_secs(8);

/// Offsets the tracked bus cycles through, evenly spaced over the period.
pub const TRACK_KEYFRAMES: [(f64, f64); 5] =
    [(0.0, 0.0), (20.0, -15.0), (-10.0, 10.0), (15.0, -5.0), (0.0, 0.0)];

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[must_use]
pub fn project(coordinate: Coordinate) -> Point {
    Point { x: (coordinate.lng - LNG_ORIGIN) * SCALE, y: (LAT_ORIGIN - coordinate.lat) * SCALE }
}

/// SVG path data through every coordinate of `path`.
#[must_use]
pub fn svg_path(path: &[Coordinate]) -> String {
    let mut data = String::new();
    for (index, coordinate) in path.iter().enumerate() {
        let Point { x, y } = project(*coordinate);
        let command = if index == 0 { "M" } else { "L" };
        if !data.is_empty() {
            data.push(' ');
        }
        let _ = write!(data, "{command} {x} {y}");
    }
    data
}

/// Offset of the tracked bus `elapsed` into the animation.
#[must_use]
pub fn track_offset(elapsed: Duration) -> Point {
    let period = TRACK_PERIOD.as_secs_f64();
    let phase = (elapsed.as_secs_f64() % period) / period;
    let segments = (TRACK_KEYFRAMES.len() - 1) as f64;

    let position = phase * segments;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (position.floor() as usize).min(TRACK_KEYFRAMES.len() - 2);
    let t = position - index as f64;

    let (x0, y0) = TRACK_KEYFRAMES[index];
    let (x1, y1) = TRACK_KEYFRAMES[index + 1];
    Point { x: (x1 - x0).mul_add(t, x0), y: (y1 - y0).mul_add(t, y0) }
}

/// Bus marker position. The bus sits on the second path point; while
/// tracking it drifts along the keyframe loop. `None` when the path has
/// fewer than two points.
#[must_use]
pub fn bus_marker(path: &[Coordinate], tracking: bool, elapsed: Duration) -> Option<Point> {
    let base = project(*path.get(1)?);
    if !tracking {
        return Some(base);
    }
    let offset = track_offset(elapsed);
    Some(Point { x: base.x + offset.x, y: base.y + offset.y })
}
