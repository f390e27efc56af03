//! # spool-settings
//!
//! Configuration with layered sources for the spool agent.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`SpoolSettings::default()`]
//! 2. **User file** — `~/.spool/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `SPOOL_*` overrides (highest priority)
//!
//! There is no global singleton: [`load_settings`] returns a value the
//! caller owns and threads through explicitly. Long-lived services load
//! once at startup and inject the result wherever it is needed.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_overrides, deep_merge, load_settings, load_settings_from_path, settings_path,
};
pub use types::{
    ContextSettings, DEFAULT_SYSTEM_PROMPT, LlmSettings, SpoolSettings, StoreSettings,
};
