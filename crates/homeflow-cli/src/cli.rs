//! Command-line arguments and their conversion into core operations.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use homeflow_devices::{DeviceParams, Setting};

/// Manage the devices of a smart home from the command line
#[derive(Debug, Parser)]
#[command(name = "homeflow", version, about)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Save file, overriding the configured one
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the save file with the default household
    Init,
    /// Show every device
    List,
    /// Add a device
    Add {
        /// Device type: TV, Light, AirConditioner, Door, or Camera
        device_type: String,
        /// Device name
        name: String,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Remove the first device with the given name
    Remove { name: String },
    /// Switch every device on
    OnAll,
    /// Switch every device off
    OffAll,
    /// Switch one device on or off
    Power { name: String, state: PowerState },
    /// Change one setting of a device
    Set {
        name: String,
        setting: SettingKey,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Turn off lights, TVs and air conditioners, lock doors, switch cameras on
    LeaveHome,
}

/// Kind-specific construction parameters
#[derive(Debug, Default, clap::Args)]
pub struct ParamArgs {
    #[arg(long)]
    pub channel: Option<i64>,
    #[arg(long)]
    pub volume: Option<i64>,
    #[arg(long)]
    pub brightness: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<i64>,
    #[arg(long)]
    pub locked: Option<bool>,
    #[arg(long)]
    pub resolution: Option<String>,
}

impl ParamArgs {
    /// Collect the supplied flags; the factory decides which ones the kind needs
    pub fn into_params(self) -> DeviceParams {
        let mut params = DeviceParams::new();
        if let Some(v) = self.channel {
            params.insert("channel", v);
        }
        if let Some(v) = self.volume {
            params.insert("volume", v);
        }
        if let Some(v) = self.brightness {
            params.insert("brightness", v);
        }
        if let Some(v) = self.temperature {
            params.insert("temperature", v);
        }
        if let Some(v) = self.locked {
            params.insert("locked", v);
        }
        if let Some(v) = self.resolution {
            params.insert("resolution", v);
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    Channel,
    Volume,
    Brightness,
    Temperature,
    Locked,
    Resolution,
}

impl SettingKey {
    /// Coerce the raw value for this key into a setting
    pub fn parse(self, raw: &str) -> Result<Setting> {
        let integer = || {
            raw.trim()
                .parse::<i64>()
                .with_context(|| format!("{:?} is not a whole number", raw))
        };
        Ok(match self {
            SettingKey::Channel => Setting::Channel(integer()?),
            SettingKey::Volume => Setting::Volume(integer()?),
            SettingKey::Brightness => Setting::Brightness(integer()?),
            SettingKey::Temperature => Setting::Temperature(integer()?),
            SettingKey::Locked => match raw.trim().to_lowercase().as_str() {
                "true" => Setting::Locked(true),
                "false" => Setting::Locked(false),
                _ => bail!("{:?} is not true or false", raw),
            },
            SettingKey::Resolution => Setting::Resolution(raw.to_string()),
        })
    }
}
