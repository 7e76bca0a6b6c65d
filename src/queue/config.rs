//! Pool configuration

use serde::Deserialize;

/// Construction options for a [`QueuePoolManager`](crate::queue::QueuePoolManager)
///
/// Loadable from TOML:
///
/// ```toml
/// pool-size = 16
/// ```
///
/// An absent `pool-size` means the pool is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PoolConfig {
    #[serde(default)]
    pub pool_size: Option<usize>,
}

impl PoolConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_pool_size(pool_size: usize) -> Self {
        Self {
            pool_size: Some(pool_size),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
