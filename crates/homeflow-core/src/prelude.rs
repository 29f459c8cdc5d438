/*!
 * Prelude module for Homeflow Core.
 *
 * Re-exports the commonly used types so downstream crates can
 * `use homeflow_core::prelude::*;`.
 */

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::types::{Id, Value};

pub use tracing::{debug, error, info, trace, warn};
