//! Dashboard summary built from the aggregate functions.

use serde::{Deserialize, Serialize};

use super::{age_bands, meds_frequency, top_conditions, Tally};
use crate::models::Encounter;

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    /// Number of recorded encounters
    pub total_visits: usize,
    /// Most frequent diagnosis, if any
    pub top_condition: Option<Tally>,
    /// Most frequent medication, if any
    pub top_medication: Option<Tally>,
    /// Ranked diagnoses, truncated to the configured limit
    pub top_conditions: Vec<Tally>,
    /// Age histogram, six bands in fixed order
    pub age_bands: Vec<Tally>,
}

impl DashboardSummary {
    /// Compute the summary for `records`, keeping at most `top_limit` conditions.
    pub fn compute(records: &[Encounter], top_limit: usize) -> Self {
        let mut conditions = top_conditions(records);
        let top_condition = conditions.first().cloned();
        conditions.truncate(top_limit);

        Self {
            total_visits: records.len(),
            top_condition,
            top_medication: meds_frequency(records).into_iter().next(),
            top_conditions: conditions,
            age_bands: age_bands(records),
        }
    }
}

/// Dashboard summary stamped with its export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardExport {
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    pub summary: DashboardSummary,
}

impl DashboardExport {
    pub fn new(summary: DashboardSummary) -> Self {
        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            summary,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
