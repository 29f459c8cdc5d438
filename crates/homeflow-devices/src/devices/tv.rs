//! Television.

use crate::device::Result;
use crate::factory::DeviceParams;

/// Television attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tv {
    channel: i64,
    volume: i64,
}

impl Tv {
    /// Create a TV tuned to `channel` at `volume`
    pub fn new(channel: i64, volume: i64) -> Self {
        Self { channel, volume }
    }

    /// Build from the `channel` and `volume` parameters
    pub fn from_params(params: &DeviceParams) -> Result<Self> {
        Ok(Self::new(
            params.require_integer("channel")?,
            params.require_integer("volume")?,
        ))
    }

    /// Current channel
    pub fn channel(&self) -> i64 {
        self.channel
    }

    /// Current volume
    pub fn volume(&self) -> i64 {
        self.volume
    }

    /// Switch channel
    pub fn set_channel(&mut self, channel: i64) {
        self.channel = channel;
    }

    /// Change volume
    pub fn set_volume(&mut self, volume: i64) {
        self.volume = volume;
    }

    pub(crate) fn describe(&self) -> String {
        format!("Channel: {}, Volume: {}", self.channel, self.volume)
    }

    pub(crate) fn params(&self) -> DeviceParams {
        DeviceParams::new()
            .with("channel", self.channel)
            .with("volume", self.volume)
    }
}
