/*!
 * Homeflow Devices
 *
 * Device kinds, the tag-driven device factory, and the record format used
 * to persist devices.
 */

#![warn(missing_docs)]

pub mod device;
pub mod devices;
pub mod factory;
pub mod record;

pub use device::{Device, DeviceError, DeviceEvent, DeviceKind, DeviceType, Result, Setting};
pub use factory::{Constructor, DeviceFactory, DeviceParams};
pub use record::DeviceRecord;

/// Homeflow devices crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
