/*!
 * Notifications emitted by the collection manager.
 *
 * Every user-visible side effect is a [`HomeEvent`] handed to a [`Notifier`].
 * The notifier is injected, so callers decide whether events are logged,
 * printed, or collected.
 */
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;

use homeflow_devices::DeviceEvent;

/// A user-visible event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    /// A device changed
    Device(DeviceEvent),
    /// A device was added to the collection
    DeviceAdded {
        /// Device name
        name: String,
    },
    /// A device was removed from the collection
    DeviceRemoved {
        /// Device name
        name: String,
    },
    /// Summary line of one device
    DeviceInfo(String),
    /// Leave-home mode finished its pass
    LeaveHomeActivated,
    /// A snapshot was written
    Saved {
        /// Number of records written
        count: usize,
        /// Where the snapshot went
        target: String,
    },
    /// A snapshot was read back
    Loaded {
        /// Number of devices appended
        count: usize,
        /// Where the snapshot came from
        target: String,
    },
    /// There was no snapshot to read
    NothingToLoad {
        /// Where the snapshot was expected
        target: String,
    },
}

impl From<DeviceEvent> for HomeEvent {
    fn from(event: DeviceEvent) -> Self {
        HomeEvent::Device(event)
    }
}

impl fmt::Display for HomeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeEvent::Device(event) => write!(f, "{}", event),
            HomeEvent::DeviceAdded { name } => write!(f, "{} added.", name),
            HomeEvent::DeviceRemoved { name } => write!(f, "{} removed.", name),
            HomeEvent::DeviceInfo(line) => f.write_str(line),
            HomeEvent::LeaveHomeActivated => f.write_str("Leave-home mode activated."),
            HomeEvent::Saved { count, target } => {
                write!(f, "Saved {} devices to {}.", count, target)
            }
            HomeEvent::Loaded { count, target } => {
                write!(f, "Loaded {} devices from {}.", count, target)
            }
            HomeEvent::NothingToLoad { target } => {
                write!(f, "No saved file at {}, nothing loaded.", target)
            }
        }
    }
}

/// A timestamped event as recorded by [`MemoryNotifier`]
#[derive(Debug, Clone)]
pub struct Notification {
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    /// The event
    pub event: HomeEvent,
}

/// Receives user-visible events
pub trait Notifier {
    /// Emit one event
    fn notify(&self, event: HomeEvent);
}

/// Writes events to the `tracing` log at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: HomeEvent) {
        info!(target: "homeflow::notify", "{}", event);
    }
}

/// Collects events in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    /// Create an empty notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded notifications, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> Vec<HomeEvent> {
        self.lock().iter().map(|n| n.event.clone()).collect()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, event: HomeEvent) {
        self.lock().push(Notification {
            timestamp: Utc::now(),
            event,
        });
    }
}
