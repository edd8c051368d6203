//! HealthStat Hub Core Library
//!
//! In-memory recording of clinical encounters with simple summary statistics.
//!
//! # Architecture
//!
//! ```text
//!   navigate / edit draft
//!            │
//!            ▼
//!   ┌─────────────────┐   save    ┌─────────────────┐
//!   │ ViewController  │──────────▶│ EncounterStore  │
//!   │ view + draft    │           │ most recent     │
//!   └────────┬────────┘           │ first           │
//!            │                    └────────┬────────┘
//!            │ current_screen()            │ all()
//!            ▼                             ▼
//!   Dashboard │ New │ List         analytics (pure)
//!                                  top conditions, meds, age bands
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Encounter, DraftForm, View)
//! - [`store`]: Append-only encounter store
//! - [`analytics`]: Frequency rankings, age histogram, dashboard summary
//! - [`controller`]: Screen state and the save/clear actions
//! - [`export`]: CSV layout and import template
//! - [`config`]: Startup configuration

pub mod analytics;
pub mod config;
pub mod controller;
pub mod export;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use analytics::{
    age_bands, meds_frequency, top_conditions, AgeBand, DashboardExport, DashboardSummary, Tally,
};
pub use config::{ConfigError, CoreConfig};
pub use controller::{Screen, ViewController};
pub use models::{
    DraftError, DraftField, DraftForm, DraftPatch, Encounter, EncounterFields, ParseError, Sex,
    View,
};
pub use store::EncounterStore;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum HealthStatError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Incomplete draft: {0}")]
    IncompleteDraft(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<DraftError> for HealthStatError {
    fn from(e: DraftError) -> Self {
        match &e {
            DraftError::Incomplete { .. } => HealthStatError::IncompleteDraft(e.to_string()),
            DraftError::Parse(inner) => HealthStatError::InvalidInput(inner.to_string()),
        }
    }
}

impl From<ParseError> for HealthStatError {
    fn from(e: ParseError) -> Self {
        HealthStatError::InvalidInput(e.to_string())
    }
}

impl From<ConfigError> for HealthStatError {
    fn from(e: ConfigError) -> Self {
        HealthStatError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for HealthStatError {
    fn from(e: serde_json::Error) -> Self {
        HealthStatError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HealthStatError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HealthStatError::LockPoisoned(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Start an app instance with the default configuration (sample data loaded).
#[uniffi::export]
pub fn open_app() -> Arc<HealthStatCore> {
    Arc::new(HealthStatCore::new(ViewController::default()))
}

/// Start an app instance with explicit configuration.
#[uniffi::export]
pub fn open_app_with_config(
    seed_sample_data: bool,
    top_conditions_limit: u32,
) -> Result<Arc<HealthStatCore>, HealthStatError> {
    let config = CoreConfig::new(seed_sample_data, top_conditions_limit as usize)?;
    Ok(Arc::new(HealthStatCore::new(ViewController::new(config))))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe controller wrapper for FFI.
///
/// All actions go through one mutex, so appends never race.
#[derive(uniffi::Object)]
pub struct HealthStatCore {
    controller: Arc<Mutex<ViewController>>,
}

impl HealthStatCore {
    pub fn new(controller: ViewController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}

#[uniffi::export]
impl HealthStatCore {
    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to "dashboard", "new" or "list".
    pub fn navigate(&self, view: String) -> Result<(), HealthStatError> {
        let view: View = view.parse()?;
        let mut controller = self.controller.lock()?;
        controller.navigate(view);
        Ok(())
    }

    /// Name of the active screen.
    pub fn current_view(&self) -> Result<String, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(controller.view().to_string())
    }

    // =========================================================================
    // Draft Operations
    // =========================================================================

    /// Set one draft field by name.
    pub fn set_draft_field(&self, field: String, value: String) -> Result<(), HealthStatError> {
        let field: DraftField = field.parse()?;
        let mut controller = self.controller.lock()?;
        controller.set_draft_field(field, value)?;
        Ok(())
    }

    /// Current draft contents.
    pub fn draft(&self) -> Result<FfiDraft, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(controller.draft().clone().into())
    }

    /// Save the draft; returns the new encounter.
    pub fn save_draft(&self) -> Result<FfiEncounter, HealthStatError> {
        let mut controller = self.controller.lock()?;
        let encounter = controller.save()?;
        Ok(encounter.into())
    }

    /// Reset the draft to its defaults.
    pub fn clear_draft(&self) -> Result<(), HealthStatError> {
        let mut controller = self.controller.lock()?;
        controller.clear_draft();
        Ok(())
    }

    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Append an encounter directly, bypassing the draft form.
    pub fn append_encounter(
        &self,
        fields: FfiEncounterFields,
    ) -> Result<FfiEncounter, HealthStatError> {
        let fields = EncounterFields::try_from(fields)?;
        let mut controller = self.controller.lock()?;
        Ok(controller.append(fields).into())
    }

    /// All encounters, most recent first.
    pub fn list_encounters(&self) -> Result<Vec<FfiEncounter>, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(controller
            .store()
            .all()
            .iter()
            .cloned()
            .map(|e| e.into())
            .collect())
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    pub fn top_conditions(&self) -> Result<Vec<FfiTally>, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(to_ffi_tallies(top_conditions(controller.store().all())))
    }

    pub fn meds_frequency(&self) -> Result<Vec<FfiTally>, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(to_ffi_tallies(meds_frequency(controller.store().all())))
    }

    pub fn age_bands(&self) -> Result<Vec<FfiTally>, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(to_ffi_tallies(age_bands(controller.store().all())))
    }

    /// Dashboard figures for the current records.
    pub fn dashboard(&self) -> Result<FfiDashboard, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(controller.dashboard().into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export all encounters as CSV.
    pub fn export_encounters_csv(&self) -> Result<String, HealthStatError> {
        let controller = self.controller.lock()?;
        Ok(export::encounters_to_csv(controller.store().all()))
    }

    /// Export dashboard figures as JSON.
    pub fn export_dashboard_json(&self) -> Result<String, HealthStatError> {
        let controller = self.controller.lock()?;
        let export = DashboardExport::new(controller.dashboard());
        Ok(export.to_json()?)
    }

    /// Template for preparing bulk-import CSV files.
    pub fn csv_import_template(&self) -> String {
        export::CSV_IMPORT_TEMPLATE.to_string()
    }
}

fn to_ffi_tallies(tallies: Vec<Tally>) -> Vec<FfiTally> {
    tallies.into_iter().map(|t| t.into()).collect()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe encounter.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEncounter {
    pub id: u64,
    pub date: String,
    pub age: String,
    pub sex: String,
    pub diagnosis: String,
    pub meds: String,
    pub tests: String,
}

impl From<Encounter> for FfiEncounter {
    fn from(e: Encounter) -> Self {
        Self {
            id: e.id,
            date: e.date,
            age: e.age,
            sex: e.sex.to_string(),
            diagnosis: e.diagnosis,
            meds: e.meds,
            tests: e.tests,
        }
    }
}

/// FFI-safe encounter input (no id).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEncounterFields {
    pub date: String,
    pub age: String,
    pub sex: String,
    pub diagnosis: String,
    pub meds: String,
    pub tests: String,
}

impl TryFrom<FfiEncounterFields> for EncounterFields {
    type Error = ParseError;

    fn try_from(f: FfiEncounterFields) -> Result<Self, Self::Error> {
        Ok(EncounterFields {
            date: f.date,
            age: f.age,
            sex: f.sex.parse()?,
            diagnosis: f.diagnosis,
            meds: f.meds,
            tests: f.tests,
        })
    }
}

/// FFI-safe draft form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDraft {
    pub date: String,
    pub age: String,
    pub sex: String,
    pub diagnosis: String,
    pub meds: String,
    pub tests: String,
    pub missing_fields: Vec<String>,
}

impl From<DraftForm> for FfiDraft {
    fn from(d: DraftForm) -> Self {
        let missing_fields = d
            .missing_fields()
            .iter()
            .map(|f| f.to_string())
            .collect();
        Self {
            date: d.date,
            age: d.age,
            sex: d.sex.to_string(),
            diagnosis: d.diagnosis,
            meds: d.meds,
            tests: d.tests,
            missing_fields,
        }
    }
}

/// FFI-safe tally.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTally {
    pub label: String,
    pub count: u32,
}

impl From<Tally> for FfiTally {
    fn from(t: Tally) -> Self {
        Self {
            label: t.label,
            count: t.count as u32,
        }
    }
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub total_visits: u32,
    pub top_condition: Option<FfiTally>,
    pub top_medication: Option<FfiTally>,
    pub top_conditions: Vec<FfiTally>,
    pub age_bands: Vec<FfiTally>,
}

impl From<DashboardSummary> for FfiDashboard {
    fn from(s: DashboardSummary) -> Self {
        Self {
            total_visits: s.total_visits as u32,
            top_condition: s.top_condition.map(|t| t.into()),
            top_medication: s.top_medication.map(|t| t.into()),
            top_conditions: to_ffi_tallies(s.top_conditions),
            age_bands: to_ffi_tallies(s.age_bands),
        }
    }
}
