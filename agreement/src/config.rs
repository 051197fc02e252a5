//! Session configuration.

use crate::history::DEFAULT_HISTORY_CAPACITY;
use std::time::Duration;

/// Configuration for an [`AgreementSession`](crate::AgreementSession)
///
/// # Example
///
/// ```
/// use checklist_agreement::AgreementConfig;
///
/// let config = AgreementConfig::default()
///     .with_history_capacity(10)
///     .with_load_on_start(false);
/// assert_eq!(config.history_capacity, 10);
/// ```
#[derive(Debug, Clone)]
pub struct AgreementConfig {
    /// Maximum number of undo steps
    pub history_capacity: usize,
    /// Buffered one-shot notifications per subscriber
    pub effect_capacity: usize,
    /// Dispatch `Load` as soon as the session opens
    pub load_on_start: bool,
    /// How long a graceful shutdown waits for running effects
    pub shutdown_timeout: Duration,
}

impl AgreementConfig {
    /// Set the undo depth
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the per-subscriber notification buffer
    #[must_use]
    pub const fn with_effect_capacity(mut self, capacity: usize) -> Self {
        self.effect_capacity = capacity;
        self
    }

    /// Enable or disable the implicit initial `Load`
    #[must_use]
    pub const fn with_load_on_start(mut self, load: bool) -> Self {
        self.load_on_start = load;
        self
    }

    /// Set the graceful shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            effect_capacity: 16,
            load_on_start: true,
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}
