//! CSV layout for encounter lists.
//!
//! Columns follow the bulk-import template so an exported list can be fed
//! back through a future importer unchanged. There is no import here.

use crate::models::Encounter;

/// Column order shared by the template and the exporter.
pub const ENCOUNTER_CSV_HEADER: &str = "date,age,sex,diagnosis,meds,tests";

/// Template for bulk import: the header plus one example row.
pub const CSV_IMPORT_TEMPLATE: &str = "date,age,sex,diagnosis,meds,tests\n\
2025-01-15,8,F,Malaria,\"Artemether-Lumefantrine\",\"RDT\"\n";

/// Export encounters in the order given.
pub fn encounters_to_csv(records: &[Encounter]) -> String {
    let mut csv = String::new();

    csv.push_str(ENCOUNTER_CSV_HEADER);
    csv.push('\n');

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape_csv(&record.date),
            escape_csv(&record.age),
            record.sex.code(),
            escape_csv(&record.diagnosis),
            escape_csv(&record.meds),
            escape_csv(&record.tests),
        ));
    }

    csv
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
