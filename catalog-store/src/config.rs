//! Configuration types for the ranking store.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`ProductRankingStore`](crate::ProductRankingStore).
///
/// # Examples
///
/// ```
/// use catalog_store::config::StoreConfig;
/// use std::time::Duration;
///
/// // Fail remote calls after ten seconds (default)
/// let config = StoreConfig::default();
///
/// // Never time out
/// let config = StoreConfig {
///     remote_timeout: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// How long to wait for any single remote call before treating it as failed
    #[serde(default = "default_remote_timeout", with = "humantime_serde::option")]
    pub remote_timeout: Option<Duration>,
}

fn default_remote_timeout() -> Option<Duration> {
    Some(Duration::from_secs(10))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote_timeout: default_remote_timeout(),
        }
    }
}
