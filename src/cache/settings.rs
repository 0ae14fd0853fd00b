//! Cache Settings Module
//!
//! Construction-time parameters, validated once.

use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of live entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default sweep multiplier: a full sweep runs at most every `ttl * 10`.
pub const DEFAULT_SWEEP_MULTIPLIER: u32 = 10;

// == Cache Settings ==
/// Parameters fixed for the lifetime of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of live entries
    pub capacity: usize,
    /// Entry lifetime, None = entries never expire
    pub ttl: Option<Duration>,
    /// Sweep interval as a multiple of `ttl`
    pub sweep_multiplier: u32,
}

impl CacheSettings {
    /// Settings with the given capacity and defaults elsewhere.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Validate ==
    /// Rejects settings the cache cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be a positive integer".to_string(),
            ));
        }
        if self.ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be positive when set".to_string(),
            ));
        }
        if self.sweep_multiplier == 0 {
            return Err(CacheError::InvalidConfiguration(
                "sweep multiplier must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: None,
            sweep_multiplier: DEFAULT_SWEEP_MULTIPLIER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = CacheSettings::default();
        assert_eq!(settings.capacity, 1000);
        assert_eq!(settings.ttl, None);
        assert_eq!(settings.sweep_multiplier, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = CacheSettings::with_capacity(0).validate();
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let settings = CacheSettings {
            ttl: Some(Duration::ZERO),
            ..CacheSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let settings = CacheSettings {
            ttl: Some(Duration::from_secs(1)),
            sweep_multiplier: 0,
            ..CacheSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }
}
