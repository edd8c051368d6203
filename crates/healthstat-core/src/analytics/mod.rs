//! Aggregate statistics over the encounter list.
//!
//! Every function here is pure: it takes the full record slice, never mutates
//! it, and recomputes from scratch on each call. Malformed input is excluded
//! rather than rejected, so none of them can fail.

mod summary;

pub use summary::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Encounter;

/// A label and how many records fell under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub label: String,
    pub count: usize,
}

impl Tally {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Fixed age ranges used by the histogram, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgeBand {
    Infant,
    EarlyChild,
    Child,
    Youth,
    Adult,
    Older,
}

impl AgeBand {
    pub const ALL: [AgeBand; 6] = [
        AgeBand::Infant,
        AgeBand::EarlyChild,
        AgeBand::Child,
        AgeBand::Youth,
        AgeBand::Adult,
        AgeBand::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Infant => "<1",
            AgeBand::EarlyChild => "1-4",
            AgeBand::Child => "5-14",
            AgeBand::Youth => "15-24",
            AgeBand::Adult => "25-49",
            AgeBand::Older => "50+",
        }
    }

    /// Band for an age in years.
    ///
    /// Bounds cascade upwards, so a fractional age between two bands
    /// (e.g. 4.5) lands in the higher one.
    pub fn for_age(age: f64) -> Self {
        if age < 1.0 {
            AgeBand::Infant
        } else if age <= 4.0 {
            AgeBand::EarlyChild
        } else if age <= 14.0 {
            AgeBand::Child
        } else if age <= 24.0 {
            AgeBand::Youth
        } else if age <= 49.0 {
            AgeBand::Adult
        } else {
            AgeBand::Older
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Count labels and order them by descending count.
///
/// Labels with equal counts keep the order in which they were first seen.
fn rank<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for label in labels {
        match positions.get(label) {
            Some(&pos) => tallies[pos].count += 1,
            None => {
                positions.insert(label, tallies.len());
                tallies.push(Tally::new(label, 1));
            }
        }
    }

    // sort_by is stable, which preserves first-seen order among ties
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

/// Diagnoses ranked by frequency. Matching is exact and case-sensitive;
/// an empty diagnosis is its own group.
pub fn top_conditions(records: &[Encounter]) -> Vec<Tally> {
    rank(records.iter().map(|r| r.diagnosis.as_str()))
}

/// Medication strings ranked by frequency. Records without meds are skipped.
pub fn meds_frequency(records: &[Encounter]) -> Vec<Tally> {
    rank(
        records
            .iter()
            .filter(|r| r.has_meds())
            .map(|r| r.meds.as_str()),
    )
}

/// Age histogram over the six fixed bands, always in band order.
///
/// Records whose age is not numeric are left out of every band.
pub fn age_bands(records: &[Encounter]) -> Vec<Tally> {
    let mut counts = [0usize; 6];
    for age in records.iter().filter_map(Encounter::age_years) {
        counts[AgeBand::for_age(age).index()] += 1;
    }

    AgeBand::ALL
        .iter()
        .map(|band| Tally::new(band.label(), counts[band.index()]))
        .collect()
}
