//! Encounter records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseError;

/// Patient sex as recorded on the entry form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male (form default)
    #[default]
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
    /// Other
    #[serde(rename = "O")]
    Other,
}

impl Sex {
    /// Single-letter code used in the list view and CSV files.
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Other => "O",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            "O" => Ok(Sex::Other),
            other => Err(ParseError::UnknownSex(other.to_string())),
        }
    }
}

/// The recorded content of an encounter, without its store-assigned id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EncounterFields {
    /// Visit date as entered (`YYYY-MM-DD`, not checked against the calendar)
    pub date: String,
    /// Age in years as entered; read as a number only when aggregating
    pub age: String,
    /// Patient sex
    pub sex: Sex,
    /// Diagnosis label
    pub diagnosis: String,
    /// Medications, optionally comma separated, kept as one string
    pub meds: String,
    /// Tests ordered
    pub tests: String,
}

/// A single recorded clinical visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Encounter {
    /// Store-assigned identifier
    pub id: u64,
    /// Visit date (`YYYY-MM-DD`)
    pub date: String,
    /// Age in years as entered
    pub age: String,
    /// Patient sex
    pub sex: Sex,
    /// Diagnosis label
    pub diagnosis: String,
    /// Medications
    pub meds: String,
    /// Tests ordered
    pub tests: String,
}

impl Encounter {
    /// Attach an id to a set of fields.
    pub fn from_fields(id: u64, fields: EncounterFields) -> Self {
        Self {
            id,
            date: fields.date,
            age: fields.age,
            sex: fields.sex,
            diagnosis: fields.diagnosis,
            meds: fields.meds,
            tests: fields.tests,
        }
    }

    /// Age as a number, or `None` when the text is not numeric.
    pub fn age_years(&self) -> Option<f64> {
        let trimmed = self.age.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|age| age.is_finite())
    }

    /// Whether any medication was recorded.
    pub fn has_meds(&self) -> bool {
        !self.meds.is_empty()
    }
}

/// The three encounters the prototype starts with.
pub fn sample_encounters() -> Vec<Encounter> {
    let sample = |id, date: &str, age: &str, sex, diagnosis: &str, meds: &str, tests: &str| {
        Encounter {
            id,
            date: date.into(),
            age: age.into(),
            sex,
            diagnosis: diagnosis.into(),
            meds: meds.into(),
            tests: tests.into(),
        }
    };

    vec![
        sample(1, "2025-01-15", "8", Sex::Female, "Malaria", "Artemether-Lumefantrine", "RDT"),
        sample(2, "2025-01-16", "32", Sex::Male, "URTI", "Amoxicillin", ""),
        sample(3, "2025-01-20", "3", Sex::Female, "Malaria", "Artemether-Lumefantrine", "RDT"),
    ]
}
