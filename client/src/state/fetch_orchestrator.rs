//! Search requests, loading state and the displayed result list.

use tracing::{debug, info, warn};

use common::{query_params::QueryParams, vehicle::VehicleRecord};

use crate::api::ListingsApi;
use crate::error::ApiError;
use crate::state::generation::{Generation, GenerationCounter};

/// A search the orchestrator decided to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: Generation,
    pub params: QueryParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub generation: Generation,
    pub params: QueryParams,
    pub result: Result<Vec<VehicleRecord>, ApiError>,
}

pub async fn run_search<A: ListingsApi>(api: &A, ticket: SearchTicket) -> SearchOutcome {
    let result = api.search_vehicles(&ticket.params).await;
    SearchOutcome { generation: ticket.generation, params: ticket.params, result }
}

#[derive(Debug, Default)]
pub struct FetchOrchestrator {
    generation: GenerationCounter,
    in_flight: Option<QueryParams>,
    vehicles: Vec<VehicleRecord>,
    displayed: Option<QueryParams>,
    error: Option<ApiError>,
    has_more: bool,
}

impl FetchOrchestrator {
    /// Starts a search for `params`, unless the same search is already in
    /// flight. Any earlier search becomes stale.
    pub fn begin(&mut self, params: QueryParams) -> Option<SearchTicket> {
        if self.in_flight.as_ref() == Some(&params) {
            debug!("Search already in flight: {}", params);
            return None;
        }
        let generation = self.generation.issue();
        self.in_flight = Some(params.clone());
        Some(SearchTicket { generation, params })
    }

    /// Applies an outcome if it belongs to the latest search. Returns
    /// whether it was applied.
    pub fn complete(&mut self, outcome: SearchOutcome) -> bool {
        if !self.generation.is_current(outcome.generation) {
            debug!("Discarding stale search result for {}", outcome.params);
            return false;
        }
        self.in_flight = None;
        match outcome.result {
            Ok(vehicles) => {
                info!("Search returned {} listings", vehicles.len());
                self.has_more = !vehicles.is_empty();
                self.vehicles = vehicles;
                self.displayed = Some(outcome.params);
                self.error = None;
            }
            Err(err) => {
                warn!("Search failed, keeping {} displayed listings: {}", self.vehicles.len(), err);
                self.error = Some(err);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Whether the last successful page had any listings.
    pub fn has_more_listings(&self) -> bool {
        self.has_more
    }

    /// Parameters of the results currently displayed.
    pub fn displayed_params(&self) -> Option<&QueryParams> {
        self.displayed.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{FakeListingsApi, vehicle};
    use pretty_assertions::assert_eq;

    fn params(query: &str) -> QueryParams {
        QueryParams::parse(query)
    }

    #[test]
    fn test_identical_search_in_flight_is_suppressed() {
        let mut orchestrator = FetchOrchestrator::default();
        assert!(orchestrator.begin(params("make=Toyota&page=1")).is_some());
        assert!(orchestrator.begin(params("make=Toyota&page=1")).is_none());
        assert!(orchestrator.begin(params("make=Honda&page=1")).is_some());
        assert!(orchestrator.is_loading());
    }

    #[tokio::test]
    async fn test_older_search_result_is_dropped() {
        let api = FakeListingsApi::with_catalog();
        let mut orchestrator = FetchOrchestrator::default();
        let first = orchestrator.begin(params("page=1")).unwrap();
        let second = orchestrator.begin(params("page=2")).unwrap();

        let second = run_search(&api, second).await;
        let first = run_search(&api, first).await;
        assert!(orchestrator.complete(second));
        assert!(!orchestrator.complete(first));
        assert_eq!(orchestrator.displayed_params(), Some(&params("page=2")));
        assert!(!orchestrator.is_loading());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_vehicles() {
        let api = FakeListingsApi::with_catalog();
        let mut orchestrator = FetchOrchestrator::default();
        let ticket = orchestrator.begin(params("page=1")).unwrap();
        orchestrator.complete(run_search(&api, ticket).await);
        assert_eq!(orchestrator.vehicles().len(), 2);

        api.fail("search:page=2");
        let ticket = orchestrator.begin(params("page=2")).unwrap();
        orchestrator.complete(run_search(&api, ticket).await);
        assert_eq!(orchestrator.vehicles().len(), 2);
        assert!(matches!(orchestrator.error(), Some(ApiError::Network(_))));
        assert_eq!(orchestrator.displayed_params(), Some(&params("page=1")));

        let ticket = orchestrator.begin(params("page=1")).unwrap();
        orchestrator.complete(run_search(&api, ticket).await);
        assert_eq!(orchestrator.error(), None);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let api = FakeListingsApi::with_catalog();
        api.scripted_searches.borrow_mut().push_back(Ok(vec![vehicle("2001 Ford Ranger")]));
        api.scripted_searches.borrow_mut().push_back(Ok(Vec::new()));
        let mut orchestrator = FetchOrchestrator::default();

        let ticket = orchestrator.begin(params("page=1")).unwrap();
        orchestrator.complete(run_search(&api, ticket).await);
        assert!(orchestrator.has_more_listings());

        let ticket = orchestrator.begin(params("page=2")).unwrap();
        orchestrator.complete(run_search(&api, ticket).await);
        assert!(orchestrator.vehicles().is_empty());
        assert!(!orchestrator.has_more_listings());
        assert_eq!(orchestrator.error(), None);
    }
}
