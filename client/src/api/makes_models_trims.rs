use tracing::debug;

use crate::{config::ClientConfig, error::ApiError, http_utils::request::get_json};

pub const MAKES_MODELS_TRIMS_PATH: &str = "/api/makes-models-trims/";

pub async fn list_makes(client: &reqwest::Client, config: &ClientConfig) -> Result<Vec<String>, ApiError> {
    debug!("Fetching makes");
    get_json(client, config, MAKES_MODELS_TRIMS_PATH, &[]).await
}

pub async fn list_models(client: &reqwest::Client, config: &ClientConfig, make: &str) -> Result<Vec<String>, ApiError> {
    debug!("Fetching models for {}", make);
    let params = [("make".to_string(), make.to_string())];
    get_json(client, config, MAKES_MODELS_TRIMS_PATH, &params).await
}

pub async fn list_trims(
    client: &reqwest::Client,
    config: &ClientConfig,
    make: &str,
    model: &str,
) -> Result<Vec<String>, ApiError> {
    debug!("Fetching trims for {} {}", make, model);
    let params = [("make".to_string(), make.to_string()), ("model".to_string(), model.to_string())];
    get_json(client, config, MAKES_MODELS_TRIMS_PATH, &params).await
}
