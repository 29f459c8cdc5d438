//! Security camera.

use crate::device::Result;
use crate::factory::DeviceParams;

/// Camera attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    resolution: String,
}

impl Camera {
    /// Create a camera recording at `resolution` (a free-form label such as "1080p")
    pub fn new<S: Into<String>>(resolution: S) -> Self {
        Self {
            resolution: resolution.into(),
        }
    }

    /// Build from the `resolution` parameter
    pub fn from_params(params: &DeviceParams) -> Result<Self> {
        Ok(Self::new(params.require_string("resolution")?))
    }

    /// Current resolution label
    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    /// Change resolution
    pub fn set_resolution<S: Into<String>>(&mut self, resolution: S) {
        self.resolution = resolution.into();
    }

    pub(crate) fn describe(&self) -> String {
        format!("Resolution: {}", self.resolution)
    }

    pub(crate) fn params(&self) -> DeviceParams {
        DeviceParams::new().with("resolution", self.resolution.as_str())
    }
}
