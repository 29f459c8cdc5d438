//! Door lock.

use crate::device::Result;
use crate::factory::DeviceParams;

/// Door attributes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Door {
    locked: bool,
}

impl Door {
    /// Create a door in the given lock state
    pub fn new(locked: bool) -> Self {
        Self { locked }
    }

    /// Build from the optional `locked` parameter (unlocked when absent)
    pub fn from_params(params: &DeviceParams) -> Result<Self> {
        Ok(Self::new(params.bool_or("locked", false)?))
    }

    /// Whether the door is locked
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock state label
    pub fn lock_status(&self) -> &'static str {
        if self.locked {
            "Locked"
        } else {
            "Unlocked"
        }
    }

    /// Lock or unlock
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub(crate) fn describe(&self) -> String {
        format!("Lock: {}", self.lock_status())
    }

    pub(crate) fn params(&self) -> DeviceParams {
        DeviceParams::new().with("locked", self.locked)
    }
}
