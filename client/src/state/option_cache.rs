//! Cached make/model/trim option lists and their generation counters.

use common::options::{MakeOptions, ModelOptions, TrimOptions};

use crate::state::generation::{Generation, GenerationCounter};

/// The dependent option lists. Only the cascade resolver writes here.
#[derive(Debug, Default)]
pub struct OptionCache {
    pub(crate) makes: MakeOptions,
    pub(crate) models: ModelOptions,
    pub(crate) trims: TrimOptions,
    pub(crate) makes_generation: GenerationCounter,
    pub(crate) models_generation: GenerationCounter,
    pub(crate) trims_generation: GenerationCounter,
    pub(crate) models_loading: bool,
    pub(crate) trims_loading: bool,
}

impl OptionCache {
    pub fn makes(&self) -> &MakeOptions {
        &self.makes
    }

    pub fn models(&self) -> &ModelOptions {
        &self.models
    }

    pub fn trims(&self) -> &TrimOptions {
        &self.trims
    }

    pub fn models_loading(&self) -> bool {
        self.models_loading
    }

    pub fn trims_loading(&self) -> bool {
        self.trims_loading
    }

    /// Starts a model refresh. Current entries stay visible until the
    /// refresh is applied; earlier refreshes become stale.
    pub(crate) fn begin_models(&mut self) -> Generation {
        self.models_loading = true;
        self.models_generation.issue()
    }

    pub(crate) fn begin_trims(&mut self) -> Generation {
        self.trims_loading = true;
        self.trims_generation.issue()
    }

    pub(crate) fn begin_makes(&mut self) -> Generation {
        self.makes_generation.issue()
    }

    /// Empties the model list and invalidates any model fetch in flight.
    pub(crate) fn clear_models(&mut self) {
        self.models = ModelOptions::empty();
        self.models_loading = false;
        self.models_generation.issue();
    }

    pub(crate) fn clear_trims(&mut self) {
        self.trims = TrimOptions::empty();
        self.trims_loading = false;
        self.trims_generation.issue();
    }
}
