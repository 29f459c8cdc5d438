/*!
 * Device factory for homeflow.
 *
 * The factory maps a type tag to a constructor. Callers build devices
 * generically from a tag, a name, and a bag of named parameters; the factory
 * does not know which parameters a kind needs, the kind's constructor does.
 */
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use homeflow_core::types::Value;

use crate::device::{Device, DeviceError, DeviceKind, DeviceType, Result};
use crate::devices::{AirConditioner, Camera, Door, Light, Tv};

/// Named construction parameters for a device kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceParams(BTreeMap<String, Value>);

impl DeviceParams {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a parameter
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets a raw parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterates over the parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a required integer parameter
    pub fn require_integer(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        value
            .as_integer()
            .ok_or_else(|| invalid_type(key, "integer", value))
    }

    /// Gets a required boolean parameter
    pub fn require_bool(&self, key: &str) -> Result<bool> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| invalid_type(key, "bool", value))
    }

    /// Gets a required string parameter
    pub fn require_string(&self, key: &str) -> Result<String> {
        let value = self.require(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid_type(key, "string", value))
    }

    /// Gets an optional boolean parameter, falling back to `default`
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(_) => self.require_bool(key),
        }
    }

    fn require(&self, key: &str) -> Result<&Value> {
        self.0
            .get(key)
            .ok_or_else(|| DeviceError::MissingParameter(key.to_string()))
    }
}

fn invalid_type(key: &str, expected: &str, got: &Value) -> DeviceError {
    DeviceError::InvalidValueType(
        key.to_string(),
        expected.to_string(),
        got.type_name().to_string(),
    )
}

/// A constructor registered under a type tag
pub type Constructor = Box<dyn Fn(&str, &DeviceParams) -> Result<Device> + Send + Sync>;

/// Maps type tags to device constructors
#[derive(Default)]
pub struct DeviceFactory {
    constructors: HashMap<String, Constructor>,
}

impl fmt::Debug for DeviceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceFactory")
            .field("tags", &self.tags())
            .finish()
    }
}

impl DeviceFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with the five built-in kinds registered under their tags
    pub fn with_builtin_types() -> Self {
        let mut factory = Self::new();
        factory.register(DeviceType::Tv.as_str(), |name, params| {
            Ok(Device::new(name, DeviceKind::Tv(Tv::from_params(params)?)))
        });
        factory.register(DeviceType::Light.as_str(), |name, params| {
            Ok(Device::new(name, DeviceKind::Light(Light::from_params(params)?)))
        });
        factory.register(DeviceType::AirConditioner.as_str(), |name, params| {
            Ok(Device::new(
                name,
                DeviceKind::AirConditioner(AirConditioner::from_params(params)?),
            ))
        });
        factory.register(DeviceType::Door.as_str(), |name, params| {
            Ok(Device::new(name, DeviceKind::Door(Door::from_params(params)?)))
        });
        factory.register(DeviceType::Camera.as_str(), |name, params| {
            Ok(Device::new(
                name,
                DeviceKind::Camera(Camera::from_params(params)?),
            ))
        });
        factory
    }

    /// Register a constructor, replacing any previous one for the tag
    pub fn register<S, F>(&mut self, tag: S, constructor: F)
    where
        S: Into<String>,
        F: Fn(&str, &DeviceParams) -> Result<Device> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!("Registered device constructor for {}", tag);
        self.constructors.insert(tag, Box::new(constructor));
    }

    /// Whether a constructor is registered for the tag
    pub fn is_registered(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Build a device
    ///
    /// Fails with [`DeviceError::UnknownDeviceType`] when nothing is
    /// registered for `tag`; parameter errors come from the kind's constructor.
    pub fn create(&self, tag: &str, name: &str, params: &DeviceParams) -> Result<Device> {
        let constructor = self
            .constructors
            .get(tag)
            .ok_or_else(|| DeviceError::UnknownDeviceType(tag.to_string()))?;
        let device = constructor(name, params)?;
        debug!(device = %name, tag = %tag, "Constructed device");
        Ok(device)
    }
}
