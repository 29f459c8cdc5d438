/*!
 * Homeflow Engine
 *
 * The device collection manager ([`Home`]), the notifications it emits, and
 * the snapshot stores it saves to and loads from.
 */

#![warn(missing_docs)]

pub mod error;
pub mod home;
pub mod notify;
pub mod store;

pub use error::{Error, Result};
pub use home::Home;
pub use notify::{HomeEvent, LogNotifier, MemoryNotifier, Notification, Notifier};
pub use store::{DeviceStore, JsonFileStore, MemoryStore};

/// Homeflow engine crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
