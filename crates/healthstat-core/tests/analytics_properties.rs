//! Property tests for the counting invariants of the aggregator.

use healthstat_core::models::{EncounterFields, Sex};
use healthstat_core::{age_bands, meds_frequency, top_conditions, EncounterStore};
use proptest::prelude::*;

const BAND_LABELS: [&str; 6] = ["<1", "1-4", "5-14", "15-24", "25-49", "50+"];

fn fields_strategy() -> impl Strategy<Value = EncounterFields> {
    let age = prop_oneof![
        (0u32..110).prop_map(|a| a.to_string()),
        (0.0f64..110.0).prop_map(|a| format!("{:.1}", a)),
        Just(String::new()),
        Just("unknown".to_string()),
    ];
    let diagnosis = prop_oneof![
        Just("Malaria".to_string()),
        Just("URTI".to_string()),
        Just("malaria".to_string()),
        Just(String::new()),
    ];
    let meds = prop_oneof![
        Just(String::new()),
        Just("Amoxicillin".to_string()),
        Just("ORS, Zinc".to_string()),
    ];
    (age, diagnosis, meds).prop_map(|(age, diagnosis, meds)| EncounterFields {
        date: "2025-01-15".to_string(),
        age,
        sex: Sex::Other,
        diagnosis,
        meds,
        tests: String::new(),
    })
}

fn build_store(fields: Vec<EncounterFields>) -> EncounterStore {
    let mut store = EncounterStore::new();
    for f in fields {
        store.append(f);
    }
    store
}

proptest! {
    #[test]
    fn store_len_and_ids(fields in prop::collection::vec(fields_strategy(), 0..40)) {
        let n = fields.len();
        let store = build_store(fields);
        prop_assert_eq!(store.len(), n);

        let ids: Vec<u64> = store.all().iter().map(|e| e.id).collect();
        let expected: Vec<u64> = (1..=n as u64).rev().collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn condition_counts_sum_to_total(fields in prop::collection::vec(fields_strategy(), 0..40)) {
        let store = build_store(fields);
        let total: usize = top_conditions(store.all()).iter().map(|t| t.count).sum();
        prop_assert_eq!(total, store.len());
    }

    #[test]
    fn meds_counts_sum_to_records_with_meds(fields in prop::collection::vec(fields_strategy(), 0..40)) {
        let store = build_store(fields);
        let with_meds = store.all().iter().filter(|e| !e.meds.is_empty()).count();
        let total: usize = meds_frequency(store.all()).iter().map(|t| t.count).sum();
        prop_assert_eq!(total, with_meds);
    }

    #[test]
    fn rankings_are_descending(fields in prop::collection::vec(fields_strategy(), 0..40)) {
        let store = build_store(fields);
        let ranked = top_conditions(store.all());
        prop_assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn age_bands_account_for_every_record(fields in prop::collection::vec(fields_strategy(), 0..40)) {
        let store = build_store(fields);
        let bands = age_bands(store.all());

        let labels: Vec<&str> = bands.iter().map(|t| t.label.as_str()).collect();
        prop_assert_eq!(labels, BAND_LABELS.to_vec());

        let non_numeric = store.all().iter().filter(|e| e.age_years().is_none()).count();
        let banded: usize = bands.iter().map(|t| t.count).sum();
        prop_assert_eq!(banded + non_numeric, store.len());
    }
}
