/*!
 * Homeflow Core
 *
 * This crate provides the shared foundation for the homeflow system:
 * identifiers and parameter values, configuration, logging, and the
 * base error type.
 */

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

/// Re-export of dependencies that are part of the public API
pub mod deps {
    pub use anyhow;
    pub use chrono;
    pub use serde;
    pub use tracing;
    pub use uuid;
}

/// Homeflow core crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization with the default log filter
pub fn init() -> Result<(), error::Error> {
    logging::init()?;
    tracing::info!("Homeflow Core {} initialized", VERSION);
    Ok(())
}
