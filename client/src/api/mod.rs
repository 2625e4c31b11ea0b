//! Calls against the listings backend and module exports.

use common::{query_params::QueryParams, vehicle::VehicleRecord};

use crate::{config::ClientConfig, error::ApiError};

mod search_vehicles;
pub use search_vehicles::search_vehicles;

mod makes_models_trims;
pub use makes_models_trims::{list_makes, list_models, list_trims};

/// The backend as seen by the filter engine.
///
/// Futures are not required to be `Send`; everything runs on one logical
/// thread.
#[allow(async_fn_in_trait)]
pub trait ListingsApi {
    async fn search_vehicles(&self, params: &QueryParams) -> Result<Vec<VehicleRecord>, ApiError>;
    async fn list_makes(&self) -> Result<Vec<String>, ApiError>;
    async fn list_models(&self, make: &str) -> Result<Vec<String>, ApiError>;
    async fn list_trims(&self, make: &str, model: &str) -> Result<Vec<String>, ApiError>;
}

/// [`ListingsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpListingsApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpListingsApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ListingsApi for HttpListingsApi {
    async fn search_vehicles(&self, params: &QueryParams) -> Result<Vec<VehicleRecord>, ApiError> {
        search_vehicles(&self.client, &self.config, params).await
    }

    async fn list_makes(&self) -> Result<Vec<String>, ApiError> {
        list_makes(&self.client, &self.config).await
    }

    async fn list_models(&self, make: &str) -> Result<Vec<String>, ApiError> {
        list_models(&self.client, &self.config, make).await
    }

    async fn list_trims(&self, make: &str, model: &str) -> Result<Vec<String>, ApiError> {
        list_trims(&self.client, &self.config, make, model).await
    }
}
