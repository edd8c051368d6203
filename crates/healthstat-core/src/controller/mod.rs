//! View controller: active screen, draft form and the save/clear actions.
//!
//! The controller owns the store and the draft outright. Every action runs to
//! completion through `&mut self`; callers that share a controller across
//! threads must wrap it in a single lock (see [`crate::HealthStatCore`]).

use tracing::{debug, warn};

use crate::analytics::DashboardSummary;
use crate::config::CoreConfig;
use crate::models::{
    sample_encounters, DraftError, DraftField, DraftForm, DraftPatch, DraftResult, Encounter,
    EncounterFields, View,
};
use crate::store::EncounterStore;

/// What the active screen shows, computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Dashboard(DashboardSummary),
    NewEncounter(&'a DraftForm),
    List(&'a [Encounter]),
}

/// Application state for one running instance.
#[derive(Debug, Clone)]
pub struct ViewController {
    view: View,
    draft: DraftForm,
    store: EncounterStore,
    config: CoreConfig,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}

impl ViewController {
    /// Create a controller on the dashboard with an empty draft.
    ///
    /// The store starts with the sample encounters when the config asks for them.
    pub fn new(config: CoreConfig) -> Self {
        let store = if config.seed_sample_data() {
            EncounterStore::with_records(sample_encounters())
        } else {
            EncounterStore::new()
        };
        Self::with_store(store, config)
    }

    pub fn with_store(store: EncounterStore, config: CoreConfig) -> Self {
        Self {
            view: View::default(),
            draft: DraftForm::default(),
            store,
            config,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn store(&self) -> &EncounterStore {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Switch to any screen.
    pub fn navigate(&mut self, view: View) {
        debug!(from = %self.view, to = %view, "Navigate");
        self.view = view;
    }

    /// Apply a partial update to the draft.
    pub fn update_draft(&mut self, patch: DraftPatch) {
        debug!(?patch, "Draft updated");
        self.draft.apply(patch);
    }

    /// Set one draft field by name.
    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) -> DraftResult<()> {
        self.draft.set(field, value)?;
        debug!(%field, "Draft field set");
        Ok(())
    }

    /// Save the draft as a new encounter.
    ///
    /// On success the draft is reset and the dashboard becomes active. An
    /// incomplete draft is rejected with everything left as it was.
    pub fn save(&mut self) -> DraftResult<Encounter> {
        let fields = match self.draft.to_fields() {
            Ok(fields) => fields,
            Err(err) => {
                if let DraftError::Incomplete { missing } = &err {
                    warn!(?missing, "Save rejected: draft incomplete");
                }
                return Err(err);
            }
        };

        let encounter = self.store.append(fields);
        self.draft.reset();
        self.navigate(View::Dashboard);
        Ok(encounter)
    }

    /// Append a record straight to the store, leaving draft and screen alone.
    pub fn append(&mut self, fields: EncounterFields) -> Encounter {
        self.store.append(fields)
    }

    /// Reset the draft. The store and the active screen are untouched.
    pub fn clear_draft(&mut self) {
        debug!("Draft cleared");
        self.draft.reset();
    }

    /// Dashboard figures for the current store contents.
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::compute(self.store.all(), self.config.top_conditions_limit())
    }

    /// Render model for the active screen.
    pub fn current_screen(&self) -> Screen<'_> {
        match self.view {
            View::Dashboard => Screen::Dashboard(self.dashboard()),
            View::New => Screen::NewEncounter(&self.draft),
            View::List => Screen::List(self.store.all()),
        }
    }
}
