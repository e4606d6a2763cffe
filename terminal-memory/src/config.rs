//! Analysis memory configuration

use std::env;

/// Namespace holding stored analyses
pub const DEFAULT_NAMESPACE: &str = "kalshi-analyses";

/// Number of similar analyses returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 5;

/// Upper bound on a single similarity request
pub const DEFAULT_MAX_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Moorcheh namespace name
    pub namespace: String,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl MemoryConfig {
    /// Load configuration from environment variables
    ///
    /// Reads MOORCHEH_NAMESPACE (optional). Everything else uses defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(namespace) = lookup("MOORCHEH_NAMESPACE")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
        {
            config.namespace = namespace;
        }
        config
    }

    /// Clamp a requested result count to the configured maximum
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.min(self.max_limit)
    }
}
