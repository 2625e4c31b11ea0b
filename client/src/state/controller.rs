//! The listings controller: owns every piece of engine state and turns user
//! intents into effects.
//!
//! The controller never awaits. Each method updates state and queues
//! [`Effect`]s; the driver runs them with [`crate::state::run_effect`] and
//! hands the outcome back through [`ListingsController::handle`].

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use common::filter_state::{FieldValue, FilterError, FilterKey, FilterState, MultiField, RangeBounds, RangeField};
use common::pagination::{Page, PaginationController};
use common::query_params::QueryParams;
use common::vehicle::VehicleRecord;

use crate::config::{ClientConfig, PrunePolicy};
use crate::error::ApiError;
use crate::state::cascade::{ApplyOutcome, CascadeResolver};
use crate::state::debounce::{DebounceGate, EditPolicy};
use crate::state::effects::{Effect, EffectOutcome};
use crate::state::fetch_orchestrator::FetchOrchestrator;
use crate::state::filter_store::{CommitSummary, FilterEdit, FilterSlot, FilterStore};

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingsView {
    pub vehicles: Vec<VehicleRecord>,
    pub is_loading: bool,
    /// Committed filters, the ones the displayed search ran with.
    pub filters: Arc<FilterState>,
    /// Committed filters with pending edits applied, for input widgets.
    pub draft: FilterState,
    pub page: Page,
    pub has_more_listings: bool,
    pub error: Option<ApiError>,
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub trims: Vec<String>,
    pub models_loading: bool,
    pub trims_loading: bool,
}

#[derive(Debug)]
pub struct ListingsController {
    store: FilterStore,
    pagination: PaginationController,
    cascade: CascadeResolver,
    debounce: DebounceGate<FilterSlot, FilterEdit>,
    orchestrator: FetchOrchestrator,
    effects: VecDeque<Effect>,
    prune_policy: PrunePolicy,
    /// Whether the model list came from a refresh where every call succeeded.
    models_complete: bool,
}

impl ListingsController {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_initial(config, FilterState::new(), Page::FIRST)
    }

    /// Starts from a restored state, e.g. one read back from the address bar.
    pub fn with_initial(config: &ClientConfig, state: FilterState, page: Page) -> Self {
        Self {
            store: FilterStore::new(state),
            pagination: PaginationController::new(page),
            cascade: CascadeResolver::default(),
            debounce: DebounceGate::new(config.debounce),
            orchestrator: FetchOrchestrator::default(),
            effects: VecDeque::new(),
            prune_policy: config.prune_policy,
            models_complete: true,
        }
    }

    /// Queues the initial make list, the models for any restored makes and
    /// the first search.
    pub fn start(&mut self) {
        let plan = self.cascade.plan_makes();
        self.effects.push_back(Effect::FetchMakes(plan));
        let state = self.store.snapshot();
        if let Some(plan) = self.cascade.plan_models(state.selection(MultiField::Make)) {
            self.models_complete = false;
            self.effects.push_back(Effect::FetchModels(plan));
        }
        self.queue_search();
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.effects.drain(..).collect()
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn view(&self) -> ListingsView {
        let options = self.cascade.options();
        ListingsView {
            vehicles: self.orchestrator.vehicles().to_vec(),
            is_loading: self.orchestrator.is_loading(),
            filters: self.store.snapshot(),
            draft: self.draft(),
            page: self.pagination.page(),
            has_more_listings: self.orchestrator.has_more_listings(),
            error: self.orchestrator.error().cloned(),
            makes: options.makes().labels().into_iter().map(String::from).collect(),
            models: options.models().labels().into_iter().map(String::from).collect(),
            trims: options.trims().labels().into_iter().map(String::from).collect(),
            models_loading: options.models_loading(),
            trims_loading: options.trims_loading(),
        }
    }

    pub fn filters(&self) -> Arc<FilterState> {
        self.store.snapshot()
    }

    /// Committed state with every pending edit applied.
    pub fn draft(&self) -> FilterState {
        self.debounce
            .pending_values()
            .fold((*self.store.snapshot()).clone(), |state, edit| edit.apply_to(&state))
    }

    pub fn page(&self) -> Page {
        self.pagination.page()
    }

    /// Parameters for the current filters and page.
    pub fn query(&self) -> QueryParams {
        QueryParams::from_filters(&self.store.snapshot(), self.pagination.page())
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Debounced discrete edit. Returns when it will be due.
    pub fn edit(&mut self, key: FilterKey, value: FieldValue, now: u64) -> Result<u64, FilterError> {
        let edit = FilterEdit::resolve(&self.draft(), key, value)?;
        Ok(self.debounce.push(edit.slot(), edit, EditPolicy::Discrete, now))
    }

    /// Debounced slider movement.
    pub fn drag_range(&mut self, field: RangeField, bounds: RangeBounds, now: u64) -> u64 {
        let edit = FilterEdit::Range(field, bounds);
        self.debounce.push(edit.slot(), edit, EditPolicy::Continuous, now)
    }

    /// Debounced multi-select checkbox.
    pub fn toggle(&mut self, field: MultiField, value: &str, now: u64) -> u64 {
        let next = self.draft().with_toggled(field, value);
        let edit = FilterEdit::Selection(field, next.selection(field).to_vec());
        self.debounce.push(edit.slot(), edit, EditPolicy::Discrete, now)
    }

    /// Commits every edit whose quiet window elapsed. Returns whether
    /// anything was committed.
    pub fn tick(&mut self, now: u64) -> bool {
        let edits = self.debounce.due(now);
        if edits.is_empty() {
            return false;
        }
        self.commit(&edits);
        true
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.debounce.next_deadline()
    }

    /// Immediate commit, bypassing the debounce gate.
    pub fn set_field(&mut self, key: FilterKey, value: FieldValue) -> Result<(), FilterError> {
        let edit = FilterEdit::resolve(&self.draft(), key, value)?;
        self.debounce.cancel(&edit.slot());
        self.commit(&[edit]);
        Ok(())
    }

    pub fn set_range(&mut self, field: RangeField, bounds: RangeBounds) {
        let edit = FilterEdit::Range(field, bounds);
        self.debounce.cancel(&edit.slot());
        self.commit(&[edit]);
    }

    /// Commits pending edits right away and searches.
    pub fn submit(&mut self) {
        let edits = self.debounce.flush();
        if edits.is_empty() {
            self.queue_search();
        } else {
            self.commit(&edits);
        }
    }

    pub fn next_page(&mut self) {
        self.pagination.next();
        self.queue_search();
    }

    pub fn prev_page(&mut self) {
        if self.pagination.page() == Page::FIRST {
            return;
        }
        self.pagination.prev();
        self.queue_search();
    }

    /// Feeds back the result of an effect.
    pub fn handle(&mut self, outcome: EffectOutcome) {
        match outcome {
            EffectOutcome::Makes(outcome) => {
                self.cascade.apply_makes(outcome);
            }
            EffectOutcome::Models(outcome) => {
                if let ApplyOutcome::Applied { complete } = self.cascade.apply_models(outcome) {
                    self.models_complete = complete;
                    if !(complete && self.prune(MultiField::Model)) {
                        self.queue_trims();
                    }
                }
            }
            EffectOutcome::Trims(outcome) => {
                if let ApplyOutcome::Applied { complete: true } = self.cascade.apply_trims(outcome) {
                    self.prune(MultiField::Trim);
                }
            }
            EffectOutcome::Search(outcome) => {
                self.orchestrator.complete(outcome);
            }
        }
    }

    /// Drops selected values the refreshed option list no longer offers.
    /// Returns whether a commit happened.
    fn prune(&mut self, field: MultiField) -> bool {
        if self.prune_policy == PrunePolicy::Keep {
            return false;
        }
        let state = self.store.snapshot();
        let selected = state.selection(field);
        let stale = match field {
            MultiField::Model => self.cascade.stale_models(selected),
            MultiField::Trim => self.cascade.stale_trims(selected),
            MultiField::Make => Vec::new(),
        };
        if stale.is_empty() {
            return false;
        }
        info!("Pruning {} no longer offered: {:?}", field.label(), stale);
        let kept: Vec<String> = selected.iter().filter(|value| !stale.contains(value)).cloned().collect();
        self.commit(&[FilterEdit::Selection(field, kept)]);
        true
    }

    fn commit(&mut self, edits: &[FilterEdit]) {
        let summary = self.store.apply_all(edits);
        self.pagination.reset_on_filter_change();
        debug!("Committed {} edit(s), revision {}", edits.len(), summary.revision);
        self.cascade_after(summary);
        self.queue_search();
    }

    fn cascade_after(&mut self, summary: CommitSummary) {
        if summary.make_changed {
            let state = self.store.snapshot();
            match self.cascade.plan_models(state.selection(MultiField::Make)) {
                Some(plan) => {
                    self.models_complete = false;
                    self.effects.push_back(Effect::FetchModels(plan));
                }
                None => self.models_complete = true,
            }
        } else if summary.model_changed {
            self.queue_trims();
        }
    }

    /// Plans trims for the selected models. When no (make, model) pair is
    /// left the trim list is emptied. Selected trims are only pruned then if
    /// the model list is settled and complete.
    fn queue_trims(&mut self) {
        let state = self.store.snapshot();
        match self.cascade.plan_trims(state.selection(MultiField::Model)) {
            Some(plan) => self.effects.push_back(Effect::FetchTrims(plan)),
            None if self.models_complete && !self.cascade.options().models_loading() => {
                self.prune(MultiField::Trim);
            }
            None => debug!("Keeping selected trims until models load"),
        }
    }

    fn queue_search(&mut self) {
        if let Some(ticket) = self.orchestrator.begin(self.query()) {
            self.effects.push_back(Effect::Search(ticket));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::effects::run_effect;
    use crate::state::test_support::{FakeListingsApi, strings};
    use common::filter_state::{Bound, ScalarField};
    use pretty_assertions::assert_eq;

    /// Runs queued effects one at a time until none are left.
    async fn drain(controller: &mut ListingsController, api: &FakeListingsApi) {
        while controller.has_effects() {
            for effect in controller.take_effects() {
                let outcome = run_effect(api, effect).await;
                controller.handle(outcome);
            }
        }
    }

    async fn started(api: &FakeListingsApi, config: &ClientConfig) -> ListingsController {
        let mut controller = ListingsController::new(config);
        controller.start();
        drain(&mut controller, api).await;
        api.clear_calls();
        controller
    }

    fn make_key() -> FilterKey {
        FilterKey::Multi(MultiField::Make)
    }

    fn model_key() -> FilterKey {
        FilterKey::Multi(MultiField::Model)
    }

    #[tokio::test]
    async fn test_start_loads_makes_and_first_page() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = ListingsController::new(&ClientConfig::default());
        controller.start();
        drain(&mut controller, &api).await;

        assert_eq!(api.calls(), strings(&["makes", "search:page=1"]));
        let view = controller.view();
        assert_eq!(view.makes.len(), 5);
        assert_eq!(view.vehicles.len(), 2);
        assert!(!view.is_loading);
        assert!(view.has_more_listings);
    }

    #[tokio::test]
    async fn test_rapid_vin_edits_commit_once_with_last_value() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        let vin = FilterKey::Scalar(ScalarField::Vin);

        controller.edit(vin, "1HG".into(), 1_000).unwrap();
        controller.edit(vin, "1HGCM".into(), 1_100).unwrap();
        assert_eq!(controller.next_deadline(), Some(1_400));
        assert!(!controller.tick(1_300));
        assert_eq!(controller.revision(), 0);

        assert!(controller.tick(1_400));
        drain(&mut controller, &api).await;
        assert_eq!(controller.revision(), 1);
        assert_eq!(controller.filters().scalar(ScalarField::Vin), "1HGCM");
        assert_eq!(api.calls(), strings(&["search:vin=1HGCM&page=1"]));
    }

    #[tokio::test]
    async fn test_commit_resets_page_but_paging_never_touches_filters() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;

        controller.next_page();
        controller.next_page();
        drain(&mut controller, &api).await;
        assert_eq!(controller.page().number(), 3);
        assert_eq!(controller.revision(), 0);

        controller.edit(FilterKey::Scalar(ScalarField::Fuel), "Diesel".into(), 0).unwrap();
        // still page 3 until the edit commits
        assert_eq!(controller.page().number(), 3);
        controller.tick(300);
        assert_eq!(controller.page(), Page::FIRST);

        controller.prev_page();
        assert_eq!(controller.page(), Page::FIRST);
        drain(&mut controller, &api).await;
        assert_eq!(api.calls(), strings(&["search:page=2", "search:page=3", "search:fuel=Diesel&page=1"]));
    }

    #[tokio::test]
    async fn test_prev_at_first_page_queues_nothing() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.prev_page();
        assert!(!controller.has_effects());
        assert_eq!(controller.page(), Page::FIRST);
    }

    #[tokio::test]
    async fn test_next_page_ignores_result_count() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        api.scripted_searches.borrow_mut().push_back(Ok(Vec::new()));
        controller.next_page();
        drain(&mut controller, &api).await;
        assert!(!controller.view().has_more_listings);
        controller.next_page();
        assert_eq!(controller.page().number(), 3);
    }

    #[tokio::test]
    async fn test_make_and_model_selection_cascades() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;

        controller.toggle(MultiField::Make, "Toyota", 0);
        controller.toggle(MultiField::Make, "Honda", 50);
        controller.tick(350);
        drain(&mut controller, &api).await;
        assert_eq!(api.count_calls("models:"), 2);
        assert_eq!(controller.filters().selection(MultiField::Make), strings(&["Toyota", "Honda"]).as_slice());
        assert!(controller.view().models.contains(&"Civic".to_string()));

        controller.set_field(model_key(), "Camry;Civic".into()).unwrap();
        drain(&mut controller, &api).await;
        assert_eq!(api.count_calls("trims:"), 2);
        let trims = controller.view().trims;
        assert!(trims.contains(&"XLE".to_string()) && trims.contains(&"Si".to_string()));
        assert!(api.calls().contains(&"search:make=Toyota%3BHonda&model=Camry%3BCivic&page=1".to_string()));
    }

    #[tokio::test]
    async fn test_clearing_makes_issues_no_model_calls() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.set_field(make_key(), "Toyota".into()).unwrap();
        drain(&mut controller, &api).await;
        api.clear_calls();

        controller.set_field(make_key(), FieldValue::List(Vec::new())).unwrap();
        drain(&mut controller, &api).await;
        assert_eq!(api.count_calls("models:"), 0);
        assert!(controller.view().models.is_empty());
    }

    #[tokio::test]
    async fn test_stale_model_selection_is_pruned() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.set_field(make_key(), "Toyota".into()).unwrap();
        drain(&mut controller, &api).await;
        controller.set_field(model_key(), "Camry".into()).unwrap();
        controller.set_field(FilterKey::Multi(MultiField::Trim), "LE".into()).unwrap();
        drain(&mut controller, &api).await;

        controller.set_field(make_key(), "Honda".into()).unwrap();
        drain(&mut controller, &api).await;
        let filters = controller.filters();
        assert!(filters.selection(MultiField::Model).is_empty());
        assert!(filters.selection(MultiField::Trim).is_empty());
        assert_eq!(controller.query().to_query_string(), "make=Honda&page=1");
    }

    #[tokio::test]
    async fn test_keep_policy_leaves_selection_alone() {
        let api = FakeListingsApi::with_catalog();
        let config = ClientConfig { prune_policy: PrunePolicy::Keep, ..ClientConfig::default() };
        let mut controller = started(&api, &config).await;
        controller.set_field(make_key(), "Toyota".into()).unwrap();
        controller.set_field(model_key(), "Camry".into()).unwrap();
        drain(&mut controller, &api).await;

        controller.set_field(make_key(), "Honda".into()).unwrap();
        drain(&mut controller, &api).await;
        assert_eq!(controller.filters().selection(MultiField::Model), strings(&["Camry"]).as_slice());
        assert!(!controller.view().models.contains(&"Camry".to_string()));
    }

    #[tokio::test]
    async fn test_partial_model_failure_does_not_prune() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.set_field(make_key(), "Toyota;Honda".into()).unwrap();
        drain(&mut controller, &api).await;
        controller.set_field(model_key(), "Camry;Civic".into()).unwrap();
        drain(&mut controller, &api).await;

        api.fail("models:Honda");
        controller.set_field(make_key(), "Honda".into()).unwrap();
        drain(&mut controller, &api).await;
        // Civic survives through carry-over, Camry is kept because the refresh failed
        assert_eq!(controller.filters().selection(MultiField::Model), strings(&["Camry", "Civic"]).as_slice());
        assert_eq!(controller.view().models, strings(&["Civic", "Accord", "Pilot"]));
    }

    #[tokio::test]
    async fn test_failed_search_keeps_listings() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        api.fail("search:page=2");
        controller.next_page();
        drain(&mut controller, &api).await;

        let view = controller.view();
        assert_eq!(view.vehicles.len(), 2);
        assert!(matches!(view.error, Some(ApiError::Network(_))));
        assert_eq!(view.page.number(), 2);
    }

    #[tokio::test]
    async fn test_invalid_edit_is_rejected_without_effects() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        let err = controller.edit(FilterKey::Range(RangeField::Price, Bound::From), "cheap".into(), 0);
        assert!(matches!(err, Err(FilterError::InvalidNumber { .. })));
        assert!(controller.set_field(FilterKey::Scalar(ScalarField::Vin), FieldValue::List(strings(&["x"]))).is_err());
        assert_eq!(controller.next_deadline(), None);
        assert!(!controller.has_effects());
    }

    #[tokio::test]
    async fn test_typed_bounds_combine_before_commit() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.edit(FilterKey::Range(RangeField::Price, Bound::From), "3000".into(), 0).unwrap();
        controller.edit(FilterKey::Range(RangeField::Price, Bound::To), "8000".into(), 10).unwrap();
        assert_eq!(controller.view().draft.range(RangeField::Price), RangeBounds::new(Some(3000), Some(8000)));

        controller.submit();
        drain(&mut controller, &api).await;
        assert_eq!(controller.revision(), 1);
        assert_eq!(api.calls(), strings(&["search:priceFrom=3000&priceTo=8000&page=1"]));
    }

    #[tokio::test]
    async fn test_slider_waits_for_continuous_window() {
        let api = FakeListingsApi::with_catalog();
        let mut controller = started(&api, &ClientConfig::default()).await;
        controller.drag_range(RangeField::Year, RangeBounds::new(Some(2005), None), 0);
        controller.drag_range(RangeField::Year, RangeBounds::new(Some(2010), None), 200);
        assert!(!controller.tick(900));
        assert!(controller.tick(1_000));
        drain(&mut controller, &api).await;
        assert_eq!(api.calls(), strings(&["search:yearFrom=2010&page=1"]));
    }

    #[tokio::test]
    async fn test_restored_state_loads_its_models() {
        let api = FakeListingsApi::with_catalog();
        let (state, page) = QueryParams::parse("?make=GMC&model=Express&page=4").to_filters();
        let mut controller = ListingsController::with_initial(&ClientConfig::default(), state, page);
        controller.start();
        drain(&mut controller, &api).await;

        assert_eq!(controller.page().number(), 4);
        assert!(api.calls().contains(&"models:GMC".to_string()));
        assert!(api.calls().contains(&"trims:GMC:Express".to_string()));
        assert_eq!(controller.view().trims, strings(&["3500", "Cutaway"]));
    }

    #[tokio::test]
    async fn test_failed_model_list_keeps_restored_trim_and_page() {
        let api = FakeListingsApi::with_catalog();
        api.fail("models:Toyota");
        let (state, page) = QueryParams::parse("?make=Toyota&model=Camry&trim=LE&page=4").to_filters();
        let mut controller = ListingsController::with_initial(&ClientConfig::default(), state, page);
        controller.start();
        drain(&mut controller, &api).await;

        assert_eq!(
            api.calls(),
            strings(&["makes", "models:Toyota", "search:make=Toyota&model=Camry&trim=LE&page=4"])
        );
        assert_eq!(controller.filters().selection(MultiField::Trim), strings(&["LE"]).as_slice());
        assert_eq!(controller.page().number(), 4);
        assert_eq!(controller.query().to_query_string(), "make=Toyota&model=Camry&trim=LE&page=4");
        assert!(controller.view().trims.is_empty());
    }

    #[tokio::test]
    async fn test_failed_trim_list_keeps_selected_trim() {
        let api = FakeListingsApi::with_catalog();
        api.fail("trims:Toyota:Camry");
        let (state, page) = QueryParams::parse("?make=Toyota&model=Camry&trim=LE&page=4").to_filters();
        let mut controller = ListingsController::with_initial(&ClientConfig::default(), state, page);
        controller.start();
        drain(&mut controller, &api).await;

        assert!(api.calls().contains(&"trims:Toyota:Camry".to_string()));
        assert_eq!(controller.filters().selection(MultiField::Trim), strings(&["LE"]).as_slice());
        assert_eq!(controller.page().number(), 4);
        assert!(!api.calls().iter().any(|call| call.ends_with("page=1")));
    }
}
