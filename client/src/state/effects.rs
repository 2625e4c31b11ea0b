//! Work the controller asks its driver to perform, and the results fed back.

use crate::api::ListingsApi;
use crate::state::cascade::{
    MakesFetchOutcome, MakesFetchPlan, ModelFetchOutcome, ModelFetchPlan, TrimFetchOutcome, TrimFetchPlan,
    fetch_makes, fetch_models, fetch_trims,
};
use crate::state::fetch_orchestrator::{SearchOutcome, SearchTicket, run_search};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchMakes(MakesFetchPlan),
    FetchModels(ModelFetchPlan),
    FetchTrims(TrimFetchPlan),
    Search(SearchTicket),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchMakes(_) => "fetch_makes",
            Self::FetchModels(_) => "fetch_models",
            Self::FetchTrims(_) => "fetch_trims",
            Self::Search(_) => "search",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    Makes(MakesFetchOutcome),
    Models(ModelFetchOutcome),
    Trims(TrimFetchOutcome),
    Search(SearchOutcome),
}

/// Performs one effect against `api`.
pub async fn run_effect<A: ListingsApi>(api: &A, effect: Effect) -> EffectOutcome {
    match effect {
        Effect::FetchMakes(plan) => EffectOutcome::Makes(fetch_makes(api, plan).await),
        Effect::FetchModels(plan) => EffectOutcome::Models(fetch_models(api, plan).await),
        Effect::FetchTrims(plan) => EffectOutcome::Trims(fetch_trims(api, plan).await),
        Effect::Search(ticket) => EffectOutcome::Search(run_search(api, ticket).await),
    }
}
