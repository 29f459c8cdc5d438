//! Dimmable light.

use crate::device::Result;
use crate::factory::DeviceParams;

/// Light attributes
///
/// Brightness is a percentage but is stored as given; nothing clamps it to
/// 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Light {
    brightness: i64,
}

impl Light {
    /// Create a light at `brightness` percent
    pub fn new(brightness: i64) -> Self {
        Self { brightness }
    }

    /// Build from the `brightness` parameter
    pub fn from_params(params: &DeviceParams) -> Result<Self> {
        Ok(Self::new(params.require_integer("brightness")?))
    }

    /// Current brightness in percent
    pub fn brightness(&self) -> i64 {
        self.brightness
    }

    /// Change brightness
    pub fn set_brightness(&mut self, brightness: i64) {
        self.brightness = brightness;
    }

    pub(crate) fn describe(&self) -> String {
        format!("Brightness: {} %", self.brightness)
    }

    pub(crate) fn params(&self) -> DeviceParams {
        DeviceParams::new().with("brightness", self.brightness)
    }
}
