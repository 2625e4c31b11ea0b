//! In-memory backend for engine tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use common::{query_params::QueryParams, vehicle::VehicleRecord};

use crate::{api::ListingsApi, error::ApiError};

#[derive(Debug, Default)]
pub(crate) struct FakeListingsApi {
    pub makes: Vec<String>,
    pub models: BTreeMap<String, Vec<String>>,
    pub trims: BTreeMap<(String, String), Vec<String>>,
    /// Served in order by `search_vehicles`; when empty every search returns `listings`.
    pub scripted_searches: RefCell<VecDeque<Result<Vec<VehicleRecord>, ApiError>>>,
    pub listings: Vec<VehicleRecord>,
    failing: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeListingsApi {
    pub fn with_catalog() -> Self {
        let models = [
            ("Toyota", vec!["Camry", "Corolla", "Tacoma"]),
            ("Honda", vec!["Civic", "Accord", "Pilot"]),
            ("Chevrolet", vec!["Express", "Silverado"]),
            ("GMC", vec!["Express", "Sierra"]),
        ];
        let trims = [
            (("Toyota", "Camry"), vec!["LE", "SE", "XLE"]),
            (("Toyota", "Tacoma"), vec!["SR5", "TRD Off-Road"]),
            (("Honda", "Civic"), vec!["LX", "Si"]),
            (("Chevrolet", "Express"), vec!["2500", "3500"]),
            (("GMC", "Express"), vec!["3500", "Cutaway"]),
        ];
        Self {
            makes: ["Toyota", "Honda", "Ford", "Chevrolet", "GMC"].map(String::from).to_vec(),
            models: models
                .into_iter()
                .map(|(make, list)| (make.to_string(), strings(&list)))
                .collect(),
            trims: trims
                .into_iter()
                .map(|((make, model), list)| ((make.to_string(), model.to_string()), strings(&list)))
                .collect(),
            listings: vec![vehicle("2015 Toyota Camry LE"), vehicle("2018 Honda Civic Si")],
            ..Default::default()
        }
    }

    /// Makes calls whose log entry equals `call` fail with a network error.
    pub fn fail(&self, call: &str) {
        self.failing.borrow_mut().insert(call.to_string());
    }

    pub fn recover(&self, call: &str) {
        self.failing.borrow_mut().remove(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let failing = self.failing.borrow().contains(&call);
        self.calls.borrow_mut().push(call.clone());
        if failing { Err(ApiError::Network(format!("{call} refused"))) } else { Ok(()) }
    }
}

impl ListingsApi for FakeListingsApi {
    async fn search_vehicles(&self, params: &QueryParams) -> Result<Vec<VehicleRecord>, ApiError> {
        self.record(format!("search:{}", params))?;
        match self.scripted_searches.borrow_mut().pop_front() {
            Some(result) => result,
            None => Ok(self.listings.clone()),
        }
    }

    async fn list_makes(&self) -> Result<Vec<String>, ApiError> {
        self.record("makes".to_string())?;
        Ok(self.makes.clone())
    }

    async fn list_models(&self, make: &str) -> Result<Vec<String>, ApiError> {
        self.record(format!("models:{make}"))?;
        Ok(self.models.get(make).cloned().unwrap_or_default())
    }

    async fn list_trims(&self, make: &str, model: &str) -> Result<Vec<String>, ApiError> {
        self.record(format!("trims:{make}:{model}"))?;
        Ok(self.trims.get(&(make.to_string(), model.to_string())).cloned().unwrap_or_default())
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn vehicle(title: &str) -> VehicleRecord {
    VehicleRecord { listing_title: Some(title.to_string()), ..Default::default() }
}
