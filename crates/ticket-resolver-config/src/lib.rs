//! Ticket resolver configuration.
//!
//! Timings, password policy and storage backend, read from layered json5
//! files and checked before use.

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
pub use model::*;
