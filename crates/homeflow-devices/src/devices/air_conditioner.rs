//! Air conditioner with a bounded temperature setpoint.

use std::ops::RangeInclusive;

use crate::device::{DeviceError, Result};
use crate::factory::DeviceParams;

/// Air conditioner attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirConditioner {
    temperature: i64,
}

impl AirConditioner {
    /// Temperatures the setter accepts, in °C
    pub const TEMPERATURE_RANGE: RangeInclusive<i64> = -5..=30;

    /// Create an air conditioner set to `temperature`
    ///
    /// The range guard only applies to [`AirConditioner::set_temperature`];
    /// construction stores the value as given.
    pub fn new(temperature: i64) -> Self {
        Self { temperature }
    }

    /// Build from the `temperature` parameter
    pub fn from_params(params: &DeviceParams) -> Result<Self> {
        Ok(Self::new(params.require_integer("temperature")?))
    }

    /// Current temperature setpoint in °C
    pub fn temperature(&self) -> i64 {
        self.temperature
    }

    /// Set the temperature
    ///
    /// Values outside [`AirConditioner::TEMPERATURE_RANGE`] are refused and
    /// the previous setpoint is kept.
    pub fn set_temperature(&mut self, temperature: i64) -> Result<()> {
        if !Self::TEMPERATURE_RANGE.contains(&temperature) {
            return Err(DeviceError::ValueOutOfRange(
                "temperature".to_string(),
                format!(
                    "{} is outside {}..={}",
                    temperature,
                    Self::TEMPERATURE_RANGE.start(),
                    Self::TEMPERATURE_RANGE.end()
                ),
            ));
        }

        self.temperature = temperature;
        Ok(())
    }

    pub(crate) fn describe(&self) -> String {
        format!("Temperature: {} C", self.temperature)
    }

    pub(crate) fn params(&self) -> DeviceParams {
        DeviceParams::new().with("temperature", self.temperature)
    }
}
