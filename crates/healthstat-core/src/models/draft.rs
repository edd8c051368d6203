//! The in-progress new-encounter form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encounter::{EncounterFields, Sex};
use super::ParseError;

/// Draft errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Draft is missing required fields: {}", join_fields(.missing))]
    Incomplete { missing: Vec<DraftField> },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type DraftResult<T> = Result<T, DraftError>;

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One editable field of the draft form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Date,
    Age,
    Sex,
    Diagnosis,
    Meds,
    Tests,
}

impl DraftField {
    /// Fields that must be filled before a draft can be saved.
    pub const REQUIRED: [DraftField; 3] = [DraftField::Date, DraftField::Age, DraftField::Diagnosis];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Date => "date",
            DraftField::Age => "age",
            DraftField::Sex => "sex",
            DraftField::Diagnosis => "diagnosis",
            DraftField::Meds => "meds",
            DraftField::Tests => "tests",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(DraftField::Date),
            "age" => Ok(DraftField::Age),
            "sex" => Ok(DraftField::Sex),
            "diagnosis" => Ok(DraftField::Diagnosis),
            "meds" => Ok(DraftField::Meds),
            "tests" => Ok(DraftField::Tests),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

/// A partial update to the draft. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftPatch {
    pub date: Option<String>,
    pub age: Option<String>,
    pub sex: Option<Sex>,
    pub diagnosis: Option<String>,
    pub meds: Option<String>,
    pub tests: Option<String>,
}

/// Form state for a not-yet-saved encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftForm {
    pub date: String,
    pub age: String,
    pub sex: Sex,
    pub diagnosis: String,
    pub meds: String,
    pub tests: String,
}

impl DraftForm {
    /// Apply a partial update.
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(sex) = patch.sex {
            self.sex = sex;
        }
        if let Some(diagnosis) = patch.diagnosis {
            self.diagnosis = diagnosis;
        }
        if let Some(meds) = patch.meds {
            self.meds = meds;
        }
        if let Some(tests) = patch.tests {
            self.tests = tests;
        }
    }

    /// Set a single field from its text value.
    ///
    /// `sex` must be one of `M`, `F`, `O`; the draft is left unchanged otherwise.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> DraftResult<()> {
        let value = value.into();
        match field {
            DraftField::Date => self.date = value,
            DraftField::Age => self.age = value,
            DraftField::Sex => self.sex = value.parse()?,
            DraftField::Diagnosis => self.diagnosis = value,
            DraftField::Meds => self.meds = value,
            DraftField::Tests => self.tests = value,
        }
        Ok(())
    }

    /// Required fields that are blank.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::REQUIRED
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    /// Text value of a field (`sex` as its code).
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Date => &self.date,
            DraftField::Age => &self.age,
            DraftField::Sex => self.sex.code(),
            DraftField::Diagnosis => &self.diagnosis,
            DraftField::Meds => &self.meds,
            DraftField::Tests => &self.tests,
        }
    }

    /// Check the presence rules without consuming the draft.
    pub fn validate(&self) -> DraftResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::Incomplete { missing })
        }
    }

    /// Convert a complete draft into encounter fields.
    pub fn to_fields(&self) -> DraftResult<EncounterFields> {
        self.validate()?;
        Ok(EncounterFields {
            date: self.date.clone(),
            age: self.age.clone(),
            sex: self.sex,
            diagnosis: self.diagnosis.clone(),
            meds: self.meds.clone(),
            tests: self.tests.clone(),
        })
    }

    /// Reset every field to its default (`sex` back to `M`).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> DraftForm {
        DraftForm {
            date: "2025-02-01".into(),
            age: "41".into(),
            sex: Sex::Other,
            diagnosis: "Hypertension".into(),
            meds: "Amlodipine".into(),
            tests: String::new(),
        }
    }

    #[test]
    fn test_default_draft() {
        let draft = DraftForm::default();
        assert_eq!(draft.sex, Sex::Male);
        assert!(draft.date.is_empty());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let draft = DraftForm::default();
        assert_eq!(
            draft.missing_fields(),
            vec![DraftField::Date, DraftField::Age, DraftField::Diagnosis]
        );

        let mut draft = complete_draft();
        draft.diagnosis = "   ".into();
        assert_eq!(draft.missing_fields(), vec![DraftField::Diagnosis]);
    }

    #[test]
    fn test_missing_fields_checks_each_field() {
        let mut draft = complete_draft();
        draft.date.clear();
        assert_eq!(draft.missing_fields(), vec![DraftField::Date]);

        let mut draft = complete_draft();
        draft.age.clear();
        assert_eq!(draft.missing_fields(), vec![DraftField::Age]);

        let mut draft = complete_draft();
        draft.date.clear();
        draft.diagnosis.clear();
        assert_eq!(
            draft.missing_fields(),
            vec![DraftField::Date, DraftField::Diagnosis]
        );
    }

    #[test]
    fn test_field_values() {
        let draft = complete_draft();
        assert_eq!(draft.value(DraftField::Diagnosis), "Hypertension");
        assert_eq!(draft.value(DraftField::Age), "41");
        assert_eq!(draft.value(DraftField::Sex), "O");
        assert_eq!(draft.value(DraftField::Tests), "");
    }

    #[test]
    fn test_optional_fields_not_required() {
        let mut draft = complete_draft();
        draft.meds.clear();
        draft.tests.clear();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_incomplete_error_message() {
        let err = DraftForm::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Draft is missing required fields: date, age, diagnosis"
        );
    }

    #[test]
    fn test_apply_patch() {
        let mut draft = DraftForm::default();
        draft.apply(DraftPatch {
            diagnosis: Some("Malaria".into()),
            sex: Some(Sex::Female),
            ..Default::default()
        });
        assert_eq!(draft.diagnosis, "Malaria");
        assert_eq!(draft.sex, Sex::Female);
        assert!(draft.date.is_empty());
    }

    #[test]
    fn test_set_field() {
        let mut draft = DraftForm::default();
        draft.set(DraftField::Age, "12").unwrap();
        draft.set(DraftField::Sex, "F").unwrap();
        assert_eq!(draft.age, "12");
        assert_eq!(draft.sex, Sex::Female);

        let err = draft.set(DraftField::Sex, "Z").unwrap_err();
        assert!(matches!(err, DraftError::Parse(ParseError::UnknownSex(_))));
        assert_eq!(draft.sex, Sex::Female);
    }

    #[test]
    fn test_parse_field_name() {
        assert_eq!("Diagnosis".parse::<DraftField>().unwrap(), DraftField::Diagnosis);
        assert!("weight".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_to_fields_and_reset() {
        let mut draft = complete_draft();
        let fields = draft.to_fields().unwrap();
        assert_eq!(fields.diagnosis, "Hypertension");
        assert_eq!(fields.sex, Sex::Other);

        draft.reset();
        assert_eq!(draft, DraftForm::default());
    }
}
