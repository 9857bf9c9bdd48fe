//! Configuration
//!
//! Settings are loaded from `elm-lens.toml` in the workspace root:
//!
//! ```toml
//! [capabilities]
//! expose_unexpose = true
//! ```
//!
//! The client can override the file through `initializationOptions`:
//!
//! ```json
//! { "extendedCapabilities": { "exposeUnexposeSupport": true } }
//! ```

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{Capabilities, ConfigError, Settings, SETTINGS_FILE};
