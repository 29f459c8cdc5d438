/*!
 * Device abstraction and core device types.
 *
 * A [`Device`] carries the state every kind shares (identity, name, power)
 * and a [`DeviceKind`] holding the per-kind attributes. The set of kinds is
 * closed, so kind-specific behaviour dispatches with `match`.
 *
 * Mutators never print or publish anything themselves. They return a
 * [`DeviceEvent`] describing what happened and leave emission to the caller.
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use homeflow_core::types::Id;

use crate::devices::{AirConditioner, Camera, Door, Light, Tv};
use crate::factory::DeviceParams;

/// Error type for device operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// No constructor is registered for the tag
    #[error("Unknown device type: {0}")]
    UnknownDeviceType(String),

    /// A construction parameter was not supplied
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// The value type is not valid for the parameter
    #[error("Invalid value type for parameter {0}: expected {1}, got {2}")]
    InvalidValueType(String, String, String),

    /// The value is out of range for the property
    #[error("Value out of range for property {0}: {1}")]
    ValueOutOfRange(String, String),

    /// The device kind has no setter for the setting
    #[error("{device_type} devices do not support setting {setting}")]
    UnsupportedSetting {
        /// The device type tag
        device_type: DeviceType,
        /// The setting key that was attempted
        setting: &'static str,
    },
}

/// Result type for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;

/// The closed set of device kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Television
    #[serde(rename = "TV")]
    Tv,
    /// Dimmable light
    Light,
    /// Air conditioner
    AirConditioner,
    /// Door lock
    Door,
    /// Security camera
    Camera,
}

impl DeviceType {
    /// Every device type, in registration order
    pub const ALL: [DeviceType; 5] = [
        DeviceType::Tv,
        DeviceType::Light,
        DeviceType::AirConditioner,
        DeviceType::Door,
        DeviceType::Camera,
    ];

    /// The tag used for this type in the factory and in saved records
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Tv => "TV",
            DeviceType::Light => "Light",
            DeviceType::AirConditioner => "AirConditioner",
            DeviceType::Door => "Door",
            DeviceType::Camera => "Camera",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self> {
        DeviceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DeviceError::UnknownDeviceType(s.to_string()))
    }
}

/// A single kind-specific parameter change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Setting {
    /// TV channel
    Channel(i64),
    /// TV volume
    Volume(i64),
    /// Light brightness in percent
    Brightness(i64),
    /// Air conditioner temperature in °C
    Temperature(i64),
    /// Door lock state
    Locked(bool),
    /// Camera resolution label
    Resolution(String),
}

impl Setting {
    /// The parameter key this setting writes
    pub fn key(&self) -> &'static str {
        match self {
            Setting::Channel(_) => "channel",
            Setting::Volume(_) => "volume",
            Setting::Brightness(_) => "brightness",
            Setting::Temperature(_) => "temperature",
            Setting::Locked(_) => "locked",
            Setting::Resolution(_) => "resolution",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Channel(v) | Setting::Volume(v) | Setting::Brightness(v) => {
                write!(f, "{} {}", self.key(), v)
            }
            Setting::Temperature(v) => write!(f, "temperature {} C", v),
            Setting::Locked(true) => f.write_str("locked"),
            Setting::Locked(false) => f.write_str("unlocked"),
            Setting::Resolution(v) => write!(f, "resolution {}", v),
        }
    }
}

/// What a device mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The device was switched on (possibly already on)
    PoweredOn {
        /// Device name
        name: String,
    },
    /// The device was switched off (possibly already off)
    PoweredOff {
        /// Device name
        name: String,
    },
    /// A setting was applied
    SettingChanged {
        /// Device name
        name: String,
        /// The applied setting
        setting: Setting,
    },
    /// A setting was refused and the previous value kept
    SettingRejected {
        /// Device name
        name: String,
        /// The refused setting
        setting: Setting,
        /// Why the setting was refused
        reason: String,
    },
}

impl fmt::Display for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceEvent::PoweredOn { name } => write!(f, "{} turned on.", name),
            DeviceEvent::PoweredOff { name } => write!(f, "{} turned off.", name),
            DeviceEvent::SettingChanged { name, setting } => {
                write!(f, "{}: {}.", name, setting)
            }
            DeviceEvent::SettingRejected {
                name,
                setting,
                reason,
            } => write!(f, "{}: {} refused ({}).", name, setting, reason),
        }
    }
}

/// Per-kind attributes
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceKind {
    /// Television
    Tv(Tv),
    /// Dimmable light
    Light(Light),
    /// Air conditioner
    AirConditioner(AirConditioner),
    /// Door lock
    Door(Door),
    /// Security camera
    Camera(Camera),
}

impl DeviceKind {
    /// The type tag of this kind
    pub fn device_type(&self) -> DeviceType {
        match self {
            DeviceKind::Tv(_) => DeviceType::Tv,
            DeviceKind::Light(_) => DeviceType::Light,
            DeviceKind::AirConditioner(_) => DeviceType::AirConditioner,
            DeviceKind::Door(_) => DeviceType::Door,
            DeviceKind::Camera(_) => DeviceType::Camera,
        }
    }

    /// Kind-specific part of the summary line
    pub fn describe(&self) -> String {
        match self {
            DeviceKind::Tv(tv) => tv.describe(),
            DeviceKind::Light(light) => light.describe(),
            DeviceKind::AirConditioner(ac) => ac.describe(),
            DeviceKind::Door(door) => door.describe(),
            DeviceKind::Camera(camera) => camera.describe(),
        }
    }

    /// Kind-specific parameters, keyed as in saved records
    pub fn params(&self) -> DeviceParams {
        match self {
            DeviceKind::Tv(tv) => tv.params(),
            DeviceKind::Light(light) => light.params(),
            DeviceKind::AirConditioner(ac) => ac.params(),
            DeviceKind::Door(door) => door.params(),
            DeviceKind::Camera(camera) => camera.params(),
        }
    }
}

/// A controllable device
#[derive(Debug)]
pub struct Device {
    id: Id,
    name: String,
    powered: bool,
    kind: DeviceKind,
}

impl Device {
    /// Create a new, powered-off device with a fresh identity
    pub fn new<S: Into<String>>(name: S, kind: DeviceKind) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            powered: false,
            kind,
        }
    }

    /// Get the device identity
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Get the device name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device type
    pub fn device_type(&self) -> DeviceType {
        self.kind.device_type()
    }

    /// Get the kind-specific attributes
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    /// Get the kind-specific attributes mutably
    pub fn kind_mut(&mut self) -> &mut DeviceKind {
        &mut self.kind
    }

    /// Whether the device is powered on
    pub fn is_on(&self) -> bool {
        self.powered
    }

    /// Switch the device on
    pub fn turn_on(&mut self) -> DeviceEvent {
        self.powered = true;
        debug!(device = %self.name, "Powered on");
        DeviceEvent::PoweredOn {
            name: self.name.clone(),
        }
    }

    /// Switch the device off
    pub fn turn_off(&mut self) -> DeviceEvent {
        self.powered = false;
        debug!(device = %self.name, "Powered off");
        DeviceEvent::PoweredOff {
            name: self.name.clone(),
        }
    }

    /// Switch the device on or off
    pub fn set_power(&mut self, on: bool) -> DeviceEvent {
        if on {
            self.turn_on()
        } else {
            self.turn_off()
        }
    }

    /// Apply a kind-specific setting through the kind's own setter
    ///
    /// An out-of-range value is not an error: the previous value is kept and
    /// a [`DeviceEvent::SettingRejected`] is returned. A setting the kind has
    /// no setter for fails with [`DeviceError::UnsupportedSetting`].
    pub fn apply(&mut self, setting: Setting) -> Result<DeviceEvent> {
        let outcome = match (&mut self.kind, &setting) {
            (DeviceKind::Tv(tv), Setting::Channel(v)) => {
                tv.set_channel(*v);
                Ok(())
            }
            (DeviceKind::Tv(tv), Setting::Volume(v)) => {
                tv.set_volume(*v);
                Ok(())
            }
            (DeviceKind::Light(light), Setting::Brightness(v)) => {
                light.set_brightness(*v);
                Ok(())
            }
            (DeviceKind::AirConditioner(ac), Setting::Temperature(v)) => ac.set_temperature(*v),
            (DeviceKind::Door(door), Setting::Locked(v)) => {
                door.set_locked(*v);
                Ok(())
            }
            (DeviceKind::Camera(camera), Setting::Resolution(v)) => {
                camera.set_resolution(v.clone());
                Ok(())
            }
            (kind, setting) => {
                return Err(DeviceError::UnsupportedSetting {
                    device_type: kind.device_type(),
                    setting: setting.key(),
                })
            }
        };

        let name = self.name.clone();
        match outcome {
            Ok(()) => {
                debug!(device = %name, %setting, "Setting applied");
                Ok(DeviceEvent::SettingChanged { name, setting })
            }
            Err(e) => {
                debug!(device = %name, %setting, "Setting rejected: {}", e);
                Ok(DeviceEvent::SettingRejected {
                    name,
                    setting,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Human-readable summary line
    ///
    /// `"<name> - Status: <ON|OFF>, <kind fields>"`. A door reports its lock
    /// state in place of the power state.
    pub fn info(&self) -> String {
        match &self.kind {
            DeviceKind::Door(door) => format!("{} - Status: {}", self.name, door.lock_status()),
            kind => format!(
                "{} - Status: {}, {}",
                self.name,
                if self.powered { "ON" } else { "OFF" },
                kind.describe()
            ),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}
