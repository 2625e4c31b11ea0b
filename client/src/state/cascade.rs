//! make → model → trim dependency chain.
//!
//! Every refresh is split in three steps so that nothing holds the cache
//! across an await:
//!
//! 1. `plan_*` records the new dependency and issues a generation token,
//! 2. `fetch_*` runs the backend calls for the plan,
//! 3. `apply_*` replaces the option set, unless a newer plan was issued in
//!    the meantime, in which case the outcome is dropped.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, warn};

use common::options::{ModelOption, OptionEntry, OptionSet, TrimOption};

use crate::api::ListingsApi;
use crate::error::ApiError;
use crate::state::generation::Generation;
use crate::state::option_cache::OptionCache;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakesFetchPlan {
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFetchPlan {
    pub generation: Generation,
    pub makes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimFetchPlan {
    pub generation: Generation,
    pub pairs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MakesFetchOutcome {
    pub generation: Generation,
    pub result: Result<Vec<String>, ApiError>,
}

/// Results of one call per dependency key, in completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBatch<K> {
    pub generation: Generation,
    pub keys: Vec<K>,
    pub results: Vec<(K, Result<Vec<String>, ApiError>)>,
}

pub type ModelFetchOutcome = FetchBatch<String>;
pub type TrimFetchOutcome = FetchBatch<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A newer plan exists; nothing changed.
    Stale,
    /// The option set was replaced. `complete` is false when some calls
    /// failed and their previous entries were carried over.
    Applied { complete: bool },
}

pub async fn fetch_makes<A: ListingsApi>(api: &A, plan: MakesFetchPlan) -> MakesFetchOutcome {
    MakesFetchOutcome { generation: plan.generation, result: api.list_makes().await }
}

pub async fn fetch_models<A: ListingsApi>(api: &A, plan: ModelFetchPlan) -> ModelFetchOutcome {
    let mut pending: FuturesUnordered<_> = plan
        .makes
        .iter()
        .cloned()
        .map(|make| async move {
            let result = api.list_models(&make).await;
            (make, result)
        })
        .collect();
    let mut results = Vec::with_capacity(plan.makes.len());
    while let Some(done) = pending.next().await {
        results.push(done);
    }
    FetchBatch { generation: plan.generation, keys: plan.makes, results }
}

pub async fn fetch_trims<A: ListingsApi>(api: &A, plan: TrimFetchPlan) -> TrimFetchOutcome {
    let mut pending: FuturesUnordered<_> = plan
        .pairs
        .iter()
        .cloned()
        .map(|(make, model)| async move {
            let result = api.list_trims(&make, &model).await;
            ((make, model), result)
        })
        .collect();
    let mut results = Vec::with_capacity(plan.pairs.len());
    while let Some(done) = pending.next().await {
        results.push(done);
    }
    FetchBatch { generation: plan.generation, keys: plan.pairs, results }
}

#[derive(Debug, Default)]
pub struct CascadeResolver {
    cache: OptionCache,
}

impl CascadeResolver {
    pub fn options(&self) -> &OptionCache {
        &self.cache
    }

    pub fn plan_makes(&mut self) -> MakesFetchPlan {
        MakesFetchPlan { generation: self.cache.begin_makes() }
    }

    pub fn apply_makes(&mut self, outcome: MakesFetchOutcome) -> ApplyOutcome {
        if !self.cache.makes_generation.is_current(outcome.generation) {
            debug!("Discarding stale make list");
            return ApplyOutcome::Stale;
        }
        match outcome.result {
            Ok(makes) => {
                self.cache.makes = OptionSet::from_entries(Vec::new(), makes);
                ApplyOutcome::Applied { complete: true }
            }
            Err(err) => {
                warn!("Make list fetch failed, keeping {} cached makes: {}", self.cache.makes.len(), err);
                ApplyOutcome::Applied { complete: false }
            }
        }
    }

    /// New make selection. With no makes, models and trims are emptied and
    /// no call is planned. Trim fetches in flight are abandoned either way:
    /// trims are re-planned once the new models arrive.
    pub fn plan_models(&mut self, selected_makes: &[String]) -> Option<ModelFetchPlan> {
        let makes = distinct(selected_makes.iter().cloned());
        if makes.is_empty() {
            self.cache.clear_models();
            self.cache.clear_trims();
            return None;
        }
        self.cache.trims_generation.issue();
        self.cache.trims_loading = false;
        let generation = self.cache.begin_models();
        Some(ModelFetchPlan { generation, makes })
    }

    pub fn apply_models(&mut self, outcome: ModelFetchOutcome) -> ApplyOutcome {
        if !self.cache.models_generation.is_current(outcome.generation) {
            debug!("Discarding stale models for {:?}", outcome.keys);
            return ApplyOutcome::Stale;
        }
        let (models, complete) = merge_batch(&self.cache.models, outcome, |make, model| ModelOption::new(make.clone(), model));
        self.cache.models = models;
        self.cache.models_loading = false;
        ApplyOutcome::Applied { complete }
    }

    /// New model selection. Each selected model is resolved to every make
    /// offering it in the current model list; one call per (make, model).
    pub fn plan_trims(&mut self, selected_models: &[String]) -> Option<TrimFetchPlan> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for model in selected_models {
            let makes = self.cache.models.owning_makes(model);
            if makes.is_empty() {
                debug!("Selected model {} is not offered by the current makes", model);
            }
            for make in makes {
                let pair = (make.to_string(), model.clone());
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        if pairs.is_empty() {
            self.cache.clear_trims();
            return None;
        }
        let generation = self.cache.begin_trims();
        Some(TrimFetchPlan { generation, pairs })
    }

    pub fn apply_trims(&mut self, outcome: TrimFetchOutcome) -> ApplyOutcome {
        if !self.cache.trims_generation.is_current(outcome.generation) {
            debug!("Discarding stale trims for {:?}", outcome.keys);
            return ApplyOutcome::Stale;
        }
        let (trims, complete) = merge_batch(&self.cache.trims, outcome, |(make, model), trim| {
            TrimOption::new(make.clone(), model.clone(), trim)
        });
        self.cache.trims = trims;
        self.cache.trims_loading = false;
        ApplyOutcome::Applied { complete }
    }

    /// Selected models the current model list does not offer.
    pub fn stale_models(&self, selected: &[String]) -> Vec<String> {
        selected.iter().filter(|m| !self.cache.models.contains_label(m)).cloned().collect()
    }

    pub fn stale_trims(&self, selected: &[String]) -> Vec<String> {
        selected.iter().filter(|t| !self.cache.trims.contains_label(t)).cloned().collect()
    }
}

/// Full replace from one batch. Keys whose call failed keep the entries the
/// previous set had for them.
fn merge_batch<T: OptionEntry>(
    previous: &OptionSet<T>,
    batch: FetchBatch<T::Owner>,
    build: impl Fn(&T::Owner, String) -> T,
) -> (OptionSet<T>, bool) {
    let mut complete = true;
    let mut entries: Vec<T> = Vec::new();
    for (owner, result) in batch.results {
        match result {
            Ok(labels) => entries.extend(labels.into_iter().map(|label| build(&owner, label))),
            Err(err) => {
                complete = false;
                warn!("Option fetch for {:?} failed, keeping previous entries: {}", owner, err);
                entries.extend(previous.entries_owned_by(&owner).cloned());
            }
        }
    }
    (OptionSet::from_entries(batch.keys, entries), complete)
}

fn distinct(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{FakeListingsApi, strings};
    use pretty_assertions::assert_eq;

    fn model_labels(resolver: &CascadeResolver) -> Vec<(String, String)> {
        let mut out: Vec<_> = resolver
            .options()
            .models()
            .entries()
            .iter()
            .map(|m| (m.make.clone(), m.model.clone()))
            .collect();
        out.sort();
        out
    }

    #[tokio::test]
    async fn test_empty_make_selection_issues_no_calls() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        assert_eq!(resolver.plan_models(&[]), None);
        assert!(resolver.options().models().is_empty());
        assert!(resolver.options().trims().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_two_makes_issue_two_calls_without_duplicate_pairs() {
        let mut api = FakeListingsApi::with_catalog();
        api.models.insert("Toyota".into(), strings(&["Camry", "Shared", "Camry"]));
        api.models.insert("Honda".into(), strings(&["Civic", "Shared"]));
        let mut resolver = CascadeResolver::default();

        let plan = resolver.plan_models(&strings(&["Toyota", "Honda"])).unwrap();
        let outcome = fetch_models(&api, plan).await;
        assert_eq!(api.count_calls("models:"), 2);
        assert_eq!(resolver.apply_models(outcome), ApplyOutcome::Applied { complete: true });

        let expected = vec![
            ("Honda".to_string(), "Civic".to_string()),
            ("Honda".to_string(), "Shared".to_string()),
            ("Toyota".to_string(), "Camry".to_string()),
            ("Toyota".to_string(), "Shared".to_string()),
        ];
        assert_eq!(model_labels(&resolver), expected);
    }

    #[tokio::test]
    async fn test_repeated_make_is_fetched_once() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Toyota", "Toyota"])).unwrap();
        assert_eq!(plan.makes, strings(&["Toyota"]));
        fetch_models(&api, plan).await;
        assert_eq!(api.calls(), strings(&["models:Toyota"]));
    }

    #[tokio::test]
    async fn test_stale_model_response_is_discarded() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();

        let toyota_plan = resolver.plan_models(&strings(&["Toyota"])).unwrap();
        let honda_plan = resolver.plan_models(&strings(&["Honda"])).unwrap();
        let toyota = fetch_models(&api, toyota_plan).await;
        let honda = fetch_models(&api, honda_plan).await;

        // the stale response lands first, before the current one
        assert_eq!(resolver.apply_models(toyota.clone()), ApplyOutcome::Stale);
        assert!(resolver.options().models().is_empty());
        assert!(resolver.options().models_loading());

        assert_eq!(resolver.apply_models(honda), ApplyOutcome::Applied { complete: true });
        // and a late duplicate of the stale one changes nothing
        assert_eq!(resolver.apply_models(toyota), ApplyOutcome::Stale);
        assert!(model_labels(&resolver).iter().all(|(make, _)| make == "Honda"));
        assert!(!resolver.options().models_loading());
    }

    #[tokio::test]
    async fn test_clearing_makes_invalidates_in_flight_models() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Toyota"])).unwrap();
        let outcome = fetch_models(&api, plan).await;
        assert_eq!(resolver.plan_models(&[]), None);
        assert_eq!(resolver.apply_models(outcome), ApplyOutcome::Stale);
        assert!(resolver.options().models().is_empty());
    }

    #[tokio::test]
    async fn test_failed_make_keeps_previous_models() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Toyota", "Honda"])).unwrap();
        resolver.apply_models(fetch_models(&api, plan).await);

        api.fail("models:Honda");
        let plan = resolver.plan_models(&strings(&["Toyota", "Honda"])).unwrap();
        let applied = resolver.apply_models(fetch_models(&api, plan).await);
        assert_eq!(applied, ApplyOutcome::Applied { complete: false });
        assert!(resolver.options().models().contains_label("Civic"));
        assert!(resolver.options().models().contains_label("Camry"));
    }

    #[tokio::test]
    async fn test_trims_resolve_owning_make_per_model() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Chevrolet", "GMC", "Toyota"])).unwrap();
        resolver.apply_models(fetch_models(&api, plan).await);

        let plan = resolver.plan_trims(&strings(&["Express", "Camry"])).unwrap();
        let mut pairs = plan.pairs.clone();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("Chevrolet".to_string(), "Express".to_string()),
                ("GMC".to_string(), "Express".to_string()),
                ("Toyota".to_string(), "Camry".to_string()),
            ]
        );
        assert_eq!(resolver.apply_trims(fetch_trims(&api, plan).await), ApplyOutcome::Applied { complete: true });
        assert_eq!(api.count_calls("trims:"), 3);

        let trims = resolver.options().trims();
        // "3500" exists under both Express owners and stays two entries
        assert_eq!(trims.entries().iter().filter(|t| t.trim == "3500").count(), 2);
        assert_eq!(trims.len(), 7);
    }

    #[tokio::test]
    async fn test_unresolvable_models_clear_trims_without_calls() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        assert_eq!(resolver.plan_trims(&strings(&["Camry"])), None);
        assert!(resolver.options().trims().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_make_change_abandons_trim_fetch_in_flight() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Toyota"])).unwrap();
        resolver.apply_models(fetch_models(&api, plan).await);
        let trim_plan = resolver.plan_trims(&strings(&["Camry"])).unwrap();
        let trims = fetch_trims(&api, trim_plan).await;

        resolver.plan_models(&strings(&["Honda"])).unwrap();
        assert_eq!(resolver.apply_trims(trims), ApplyOutcome::Stale);
    }

    #[tokio::test]
    async fn test_stale_selection_lookup() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_models(&strings(&["Honda"])).unwrap();
        resolver.apply_models(fetch_models(&api, plan).await);
        assert_eq!(resolver.stale_models(&strings(&["Civic", "Camry"])), strings(&["Camry"]));
    }

    #[tokio::test]
    async fn test_make_list_failure_keeps_cached_makes() {
        let api = FakeListingsApi::with_catalog();
        let mut resolver = CascadeResolver::default();
        let plan = resolver.plan_makes();
        resolver.apply_makes(fetch_makes(&api, plan).await);
        assert_eq!(resolver.options().makes().len(), 5);

        api.fail("makes");
        let plan = resolver.plan_makes();
        assert_eq!(resolver.apply_makes(fetch_makes(&api, plan).await), ApplyOutcome::Applied { complete: false });
        assert_eq!(resolver.options().makes().len(), 5);
    }
}
