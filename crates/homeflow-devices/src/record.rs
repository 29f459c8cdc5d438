/*!
 * Persisted device records.
 *
 * One record per device: `type`, `name`, `status` and the kind's own keys
 * flattened alongside, e.g.
 * `{"type": "TV", "name": "Living Room TV", "status": true, "channel": 5, "volume": 10}`.
 * Identity is not persisted.
 */
use serde::{Deserialize, Serialize};

use crate::device::{Device, Result};
use crate::factory::{DeviceFactory, DeviceParams};

/// A serialized device entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Factory tag of the device kind
    #[serde(rename = "type")]
    pub device_type: String,
    /// Device name
    pub name: String,
    /// Power state
    pub status: bool,
    /// Kind-specific keys
    #[serde(flatten)]
    pub params: DeviceParams,
}

impl Device {
    /// Snapshot this device as a record
    pub fn to_record(&self) -> DeviceRecord {
        DeviceRecord {
            device_type: self.device_type().as_str().to_string(),
            name: self.name().to_string(),
            status: self.is_on(),
            params: self.kind().params(),
        }
    }
}

impl DeviceFactory {
    /// Rebuild a device from a record and restore its power state
    pub fn create_from_record(&self, record: &DeviceRecord) -> Result<Device> {
        let mut device = self.create(&record.device_type, &record.name, &record.params)?;
        device.set_power(record.status);
        Ok(device)
    }
}
