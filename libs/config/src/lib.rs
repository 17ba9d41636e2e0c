//! # Dynamic Fee Hook Configuration
//!
//! Settings loading, default parameter values and logging setup for the
//! dynamic fee hook and the tools built on it.
//!
//! ## Features
//!
//! - **Defaults**: Protocol share and volatility parameters a fresh deployment starts with
//! - **Settings**: TOML settings with `FEE_HOOK_`-prefixed environment overrides
//! - **Logging**: `tracing-subscriber` setup with env-filter and optional JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hook_config::{init_tracing, HookSettings};
//! use std::path::Path;
//!
//! let settings = HookSettings::load(Path::new("config/hook.toml")).unwrap();
//! init_tracing(&settings.logging).unwrap();
//! let treasury = settings.treasury_address().unwrap();
//! ```

pub mod defaults;
pub mod hook_settings;
pub mod logging;

// Re-export commonly used types
pub use hook_settings::{
    parse_address, HookSection, HookSettings, LoggingSettings, VolatilitySection,
};
pub use logging::init_tracing;
