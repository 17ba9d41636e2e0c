//! Default values a fresh hook deployment starts with
//!
//! Shared by the settings loader and the engine so a missing settings section
//! and a freshly constructed engine agree.

/// Protocol share of each realized swap fee (basis points, 1_000 = 10%)
pub const PROTOCOL_SHARE_BPS: u64 = 1_000;

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "FEE_HOOK";

/// Volatility estimator defaults
pub mod volatility {
    /// EWMA weight of a new sample, in units of 1/10_000 (2_000 = 0.2)
    pub const EWMA_ALPHA: u64 = 2_000;

    /// Seconds a previous observation stays fresh
    pub const VOLATILITY_WINDOW_SECS: u64 = 300;

    /// Fee premium per unit of volatility, in units of 1/10_000
    pub const FEE_MULTIPLIER: u64 = 50;
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";
}
