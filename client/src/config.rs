//! Client and filter engine configuration.

use anyhow::Context;
use common::search_const::{CONTINUOUS_DEBOUNCE_MS, DISCRETE_DEBOUNCE_MS};
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the listings backend, without the `/api` suffix.
    pub base_url: String,
    /// Abort a request and report [`crate::ApiError::Timeout`] after this long.
    pub timeout_ms: Option<u64>,
    pub retry: RetryPolicy,
    pub debounce: DebounceDelays,
    pub prune_policy: PrunePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: None,
            retry: RetryPolicy::default(),
            debounce: DebounceDelays::default(),
            prune_policy: PrunePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Reads `LISTINGS_API_URL`, `LISTINGS_API_TIMEOUT_MS` and
    /// `LISTINGS_API_RETRIES`. Missing or unparsable values keep defaults.
    pub fn from_env() -> Self {
        let mut config = Self {
            base_url: std::env::var("LISTINGS_API_URL").unwrap_or(DEFAULT_API_URL.to_string()),
            ..Self::default()
        };
        match env_u64("LISTINGS_API_TIMEOUT_MS") {
            Ok(timeout_ms) => config.timeout_ms = timeout_ms,
            Err(e) => warn!("ignoring timeout setting: {e:#}"),
        }
        match env_u64("LISTINGS_API_RETRIES") {
            Ok(Some(retries)) => config.retry.max_attempts = (retries as u32).saturating_add(1),
            Ok(None) => {}
            Err(e) => warn!("ignoring retry setting: {e:#}"),
        }
        config
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn env_u64(name: &str) -> anyhow::Result<Option<u64>> {
    let Ok(raw) = std::env::var(name) else { return Ok(None) };
    let value = raw.trim().parse::<u64>().with_context(|| format!("{name}={raw:?} is not a number"))?;
    Ok(Some(value))
}

/// Bounded retry with exponential backoff, applied to retryable errors only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. 1 disables retries.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 1, base_delay_ms: 250, max_delay_ms: 4_000 }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt + 1`, where `attempt` starts at 1.
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let factor = 1_u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceDelays {
    pub discrete_ms: u64,
    pub continuous_ms: u64,
}

impl Default for DebounceDelays {
    fn default() -> Self {
        Self { discrete_ms: DISCRETE_DEBOUNCE_MS, continuous_ms: CONTINUOUS_DEBOUNCE_MS }
    }
}

/// What happens to selected models/trims that disappear from a refreshed
/// option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Drop them from the filter state once the refresh fully succeeded.
    #[default]
    PruneStale,
    /// Leave them selected and let the backend ignore unknown combinations.
    Keep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy { max_attempts: 6, base_delay_ms: 100, max_delay_ms: 1_000 };
        let delays: Vec<u64> = (1..=5).map(|a| policy.delay_for_attempt(a)).collect();
        assert_eq!(delays, vec![100, 200, 400, 800, 1_000]);
    }

    #[test]
    fn test_api_url_joins_without_double_slash() {
        let config = ClientConfig::with_base_url("http://cars.local:4000/");
        assert_eq!(config.api_url("/api/"), "http://cars.local:4000/api/");
    }

    #[test]
    fn test_defaults_match_debounce_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.debounce.discrete_ms, 300);
        assert_eq!(config.debounce.continuous_ms, 800);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.prune_policy, PrunePolicy::PruneStale);
    }
}
