//! Results filter/sort pipeline.
//!
//! The derived list is recomputed synchronously on every change to the
//! source list or to a control.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use platform::{Error, bad_request};
use serde::{Deserialize, Serialize};

use crate::model::{BusSummary, RushLevel};

const ALTERNATIVE_MARKER: &str = "Alternative";

/// Record the pipeline can filter and rank.
pub trait Ranked {
    fn eta_min(&self) -> u32;
    fn reliability(&self) -> u32;
    fn rush_level(&self) -> RushLevel;

    /// Whether the record is an alternative route.
    fn is_alternative(&self) -> bool;
}

impl Ranked for BusSummary {
    fn eta_min(&self) -> u32 {
        self.eta_min
    }

    fn reliability(&self) -> u32 {
        self.reliability
    }

    fn rush_level(&self) -> RushLevel {
        self.rush_level
    }

    fn is_alternative(&self) -> bool {
        self.name.contains(ALTERNATIVE_MARKER) || self.segment.contains(ALTERNATIVE_MARKER)
    }
}

/// Rush-level filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RushFilter {
    #[default]
    All,
    Only(RushLevel),
}

impl RushFilter {
    #[must_use]
    pub fn admits(self, level: RushLevel) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == level,
        }
    }
}

impl fmt::Display for RushFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(level) => level.fmt(f),
        }
    }
}

impl FromStr for RushFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<RushLevel>().map(Self::Only)
    }
}

impl TryFrom<String> for RushFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Error> {
        value.parse()
    }
}

impl From<RushFilter> for String {
    fn from(filter: RushFilter) -> Self {
        filter.to_string()
    }
}

/// Sort control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending ETA.
    #[default]
    Eta,
    /// Descending reliability.
    Reliability,
    /// Ascending rush level.
    Rush,
}

impl SortKey {
    #[must_use]
    pub fn compare<T: Ranked>(self, a: &T, b: &T) -> Ordering {
        match self {
            Self::Eta => a.eta_min().cmp(&b.eta_min()),
            Self::Reliability => b.reliability().cmp(&a.reliability()),
            Self::Rush => a.rush_level().cmp(&b.rush_level()),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "eta" => Ok(Self::Eta),
            "reliability" => Ok(Self::Reliability),
            "rush" => Ok(Self::Rush),
            other => Err(bad_request!("unknown sort key: {}", other)),
        }
    }
}

/// The three result controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub rush: RushFilter,
    pub sort: SortKey,
    pub alternatives_only: bool,
}

impl Controls {
    /// Restore filters to defaults. The sort key is kept.
    pub const fn reset_filters(&mut self) {
        self.rush = RushFilter::All;
        self.alternatives_only = false;
    }

    fn admits<T: Ranked>(&self, record: &T) -> bool {
        self.rush.admits(record.rush_level()) && (!self.alternatives_only || record.is_alternative())
    }
}

/// Filter then stable-sort `records` under `controls`.
#[must_use]
pub fn apply<T: Ranked + Clone>(records: &[T], controls: &Controls) -> Vec<T> {
    let mut derived: Vec<T> = records.iter().filter(|r| controls.admits(*r)).cloned().collect();
    derived.sort_by(|a, b| controls.sort.compare(a, b));
    derived
}

/// Source list, controls and the derived list kept in step.
#[derive(Debug, Clone)]
pub struct Pipeline<T> {
    source: Vec<T>,
    controls: Controls,
    derived: Vec<T>,
}

impl<T: Ranked + Clone> Pipeline<T> {
    #[must_use]
    pub fn new(source: Vec<T>, controls: Controls) -> Self {
        let derived = apply(&source, &controls);
        Self { source, controls, derived }
    }

    #[must_use]
    pub fn source(&self) -> &[T] {
        &self.source
    }

    #[must_use]
    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    #[must_use]
    pub fn derived(&self) -> &[T] {
        &self.derived
    }

    /// No record survives the current controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }

    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.recompute();
    }

    pub fn set_rush(&mut self, rush: RushFilter) {
        self.controls.rush = rush;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.controls.sort = sort;
        self.recompute();
    }

    pub fn set_alternatives_only(&mut self, alternatives_only: bool) {
        self.controls.alternatives_only = alternatives_only;
        self.recompute();
    }

    pub fn toggle_alternatives(&mut self) {
        self.set_alternatives_only(!self.controls.alternatives_only);
    }

    pub fn reset_filters(&mut self) {
        self.controls.reset_filters();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = apply(&self.source, &self.controls);
    }
}

impl<T: Ranked + Clone> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new(Vec::new(), Controls::default())
    }
}
