use common::{query_params::QueryParams, search_const::NO_LISTINGS_FOUND, vehicle::VehicleRecord};
use serde::Deserialize;
use tracing::info;

use crate::{config::ClientConfig, error::ApiError, http_utils::request::get_json};

pub const SEARCH_PATH: &str = "/api/";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Listings(Vec<VehicleRecord>),
    Failure { error: String },
}

pub async fn search_vehicles(
    client: &reqwest::Client,
    config: &ClientConfig,
    params: &QueryParams,
) -> Result<Vec<VehicleRecord>, ApiError> {
    info!("Searching listings: {}", params);
    let response = get_json::<SearchResponse>(client, config, SEARCH_PATH, params.pairs()).await?;
    interpret(response)
}

fn interpret(response: SearchResponse) -> Result<Vec<VehicleRecord>, ApiError> {
    match response {
        SearchResponse::Listings(listings) => Ok(listings),
        SearchResponse::Failure { error } if error == NO_LISTINGS_FOUND => Ok(Vec::new()),
        SearchResponse::Failure { error } => Err(ApiError::Backend(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> Result<Vec<VehicleRecord>, ApiError> {
        let response: SearchResponse = serde_json::from_str(json)?;
        interpret(response)
    }

    #[test]
    fn test_listing_array_decodes() {
        let listings = decode(r#"[{"listing_title": "2012 Honda Civic", "year": 2012, "price": "8500"}]"#).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].year, Some(2012));
    }

    #[test]
    fn test_no_listings_payload_is_empty_result() {
        assert_eq!(decode(r#"{"error": "No listings found"}"#), Ok(Vec::new()));
    }

    #[test]
    fn test_other_error_payload_is_backend_error() {
        assert_eq!(decode(r#"{"error": "upstream down"}"#), Err(ApiError::Backend("upstream down".into())));
    }

    #[test]
    fn test_unexpected_shape_is_decode_error() {
        assert!(matches!(decode(r#""hello""#), Err(ApiError::Decode(_))));
        assert!(matches!(decode("<html>"), Err(ApiError::Decode(_))));
    }
}
