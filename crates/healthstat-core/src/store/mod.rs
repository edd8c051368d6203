//! In-memory encounter store.
//!
//! Records are kept most-recent-first and are never mutated or removed once
//! appended. The store has no failure modes.

use tracing::info;

use crate::models::{Encounter, EncounterFields};

/// Ordered, append-only collection of encounters.
#[derive(Debug, Clone)]
pub struct EncounterStore {
    /// Most recent first
    records: Vec<Encounter>,
    next_id: u64,
}

impl Default for EncounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EncounterStore {
    /// Create an empty store. The first appended record gets id 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store holding `records` in the given order.
    ///
    /// Ids are taken as-is; the next id continues after the largest one.
    pub fn with_records(records: Vec<Encounter>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self { records, next_id }
    }

    /// Assign an id and insert the record at the front.
    ///
    /// Ids come from a counter that only moves forward, so they stay unique
    /// even if the store was seeded with arbitrary ids. For a fresh store the
    /// id always equals the record count after the append.
    pub fn append(&mut self, fields: EncounterFields) -> Encounter {
        let encounter = Encounter::from_fields(self.next_id, fields);
        self.next_id += 1;
        self.records.insert(0, encounter.clone());

        info!(
            id = encounter.id,
            diagnosis = %encounter.diagnosis,
            total = self.records.len(),
            "Encounter recorded"
        );
        encounter
    }

    /// All records, most recently added first.
    pub fn all(&self) -> &[Encounter] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_encounters;

    fn fields(diagnosis: &str) -> EncounterFields {
        EncounterFields {
            date: "2025-03-01".into(),
            age: "30".into(),
            diagnosis: diagnosis.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sequential_ids() {
        let mut store = EncounterStore::new();
        let ids: Vec<u64> = ["A", "B", "C"]
            .iter()
            .map(|d| store.append(fields(d)).id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_most_recent_first() {
        let mut store = EncounterStore::new();
        store.append(fields("first"));
        store.append(fields("second"));

        let all = store.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].diagnosis, "second");
        assert_eq!(all[1].diagnosis, "first");
    }

    #[test]
    fn test_store_accepts_incomplete_records() {
        let mut store = EncounterStore::new();
        let record = store.append(EncounterFields::default());
        assert_eq!(record.id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_seeded_store_continues_ids() {
        let mut store = EncounterStore::with_records(sample_encounters());
        assert_eq!(store.len(), 3);

        let record = store.append(fields("Typhoid"));
        assert_eq!(record.id, 4);
        assert_eq!(store.all()[0].id, 4);
        assert_eq!(store.all()[1].id, 1);
    }

    #[test]
    fn test_empty_store() {
        let store = EncounterStore::default();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }
}
