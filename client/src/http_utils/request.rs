//! JSON GET helper with timeout and bounded retry.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::ApiError;
use crate::http_utils::timer::{sleep_ms, with_timeout};

pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &ClientConfig,
    path: &str,
    params: &[(String, String)],
) -> Result<T, ApiError> {
    let url = config.api_url(path);
    let url = url.as_str();
    retry_with_backoff(&config.retry, url, move || async move {
        match with_timeout(get_json_once::<T>(client, url, params), config.timeout_ms).await {
            Some(result) => result,
            None => Err(ApiError::Timeout { after_ms: config.timeout_ms.unwrap_or_default() }),
        }
    })
    .await
}

/// Re-runs `op` while it fails with a retryable error, up to the policy's
/// attempt limit.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                let delay = policy.delay_for_attempt(attempt);
                warn!("{} failed (attempt {}): {}; retrying in {}ms", label, attempt, err, delay);
                sleep_ms(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

async fn get_json_once<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
) -> Result<T, ApiError> {
    let response = client.get(url).query(params).send().await?;
    let status = response.status();
    let response_txt = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        return Err(ApiError::Status { code: status.as_u16(), body: response_txt });
    }
    debug!("GET {} -> {} bytes", url, response_txt.len());
    let response: T = serde_json::from_str(&response_txt)?;
    Ok(response)
}
