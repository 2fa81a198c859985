/// Configuration for message-status polling behavior.
///
/// Controls how [`wait_for_message_status`](crate::CrossChainMessenger::wait_for_message_status)
/// polls the messenger while a cross-chain message works through its
/// lifecycle. Use the builder methods to customize, or the preset for
/// local development chains.
///
/// # Examples
///
/// ```rust
/// use op_bridge::PollingConfig;
///
/// // Use defaults (60 attempts, 12 second intervals)
/// let config = PollingConfig::default();
///
/// // Customize polling behavior
/// let config = PollingConfig::default()
///     .with_max_attempts(20)
///     .with_poll_interval_secs(30);
///
/// // Use preset for devnets with instant output roots
/// let config = PollingConfig::devnet();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Maximum number of polling attempts before giving up.
    pub max_attempts: u32,
    /// Seconds to wait between polling attempts.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    /// Creates a polling configuration suitable for public testnets.
    ///
    /// - `max_attempts`: 60
    /// - `poll_interval_secs`: 12 (one L1 slot)
    ///
    /// This gives a maximum wait of 12 minutes per status transition, which
    /// covers output-root publication and the short testnet challenge period.
    fn default() -> Self {
        Self {
            max_attempts: 60,
            poll_interval_secs: 12,
        }
    }
}

impl PollingConfig {
    /// Creates a polling configuration for local devnets.
    ///
    /// - `max_attempts`: 30
    /// - `poll_interval_secs`: 2
    ///
    /// Devnet sequencers publish output roots near-instantly, so polling
    /// more frequently with shorter intervals keeps turnaround tight.
    pub fn devnet() -> Self {
        Self {
            max_attempts: 30,
            poll_interval_secs: 2,
        }
    }

    /// Sets the maximum number of polling attempts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use op_bridge::PollingConfig;
    ///
    /// let config = PollingConfig::default().with_max_attempts(120);
    /// assert_eq!(config.max_attempts, 120);
    /// ```
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the interval between polling attempts in seconds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use op_bridge::PollingConfig;
    ///
    /// let config = PollingConfig::default().with_poll_interval_secs(30);
    /// assert_eq!(config.poll_interval_secs, 30);
    /// ```
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Returns the total maximum wait time in seconds.
    ///
    /// This is calculated as `max_attempts * poll_interval_secs`.
    pub fn total_timeout_secs(&self) -> u64 {
        self.max_attempts as u64 * self.poll_interval_secs
    }
}
