/*!
 * `homeflow` command-line front end.
 *
 * Every invocation loads the save file, runs one operation against the
 * device collection, and writes the snapshot back.
 */
mod cli;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::debug;

use homeflow_core::logging;
use homeflow_core::prelude::{ConfigBuilder, Id};
use homeflow_devices::DeviceFactory;
use homeflow_engine::{DeviceStore, Home, HomeEvent, JsonFileStore, Notifier};

use crate::cli::{Cli, Command, PowerState};

/// Prints every event on its own line
#[derive(Debug, Default, Clone, Copy)]
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: HomeEvent) {
        println!("{}", event);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new().with_environment_prefix("homeflow");
    if let Some(path) = &cli.config {
        builder = builder.with_config_file(path);
    }
    let config = builder.build().context("failed to load configuration")?;
    logging::init_from_config(&config.logging).context("failed to initialize logging")?;

    let path = cli.file.clone().unwrap_or_else(|| config.save_path());

    let mut home = Home::new(DeviceFactory::with_builtin_types(), ConsoleNotifier);
    run(&mut home, &path, cli.command)
}

/// Run one command against the save file at `path`
fn run<N: Notifier>(home: &mut Home<N>, path: &Path, command: Command) -> Result<()> {
    let store = JsonFileStore::new(path);
    debug!(save_file = %path.display(), ?command, "Running command");

    // `init` starts from an empty household rather than the saved one
    if !matches!(command, Command::Init) {
        home.load(&store)
            .with_context(|| format!("failed to load {}", store.location()))?;
    }

    match command {
        Command::Init => home.seed_demo()?,
        Command::List => {
            home.list_info();
            return Ok(());
        }
        Command::Add {
            device_type,
            name,
            params,
        } => {
            home.create(&device_type, &name, &params.into_params())?;
        }
        Command::Remove { name } => {
            let id = id_by_name(home, &name)?;
            home.delete(&id);
        }
        Command::OnAll => home.turn_on_all(),
        Command::OffAll => home.turn_off_all(),
        Command::Power { name, state } => {
            let id = id_by_name(home, &name)?;
            home.set_power(&id, state == PowerState::On)?;
        }
        Command::Set {
            name,
            setting,
            value,
        } => {
            let setting = setting.parse(&value)?;
            let id = id_by_name(home, &name)?;
            home.update(&id, setting)?;
        }
        Command::LeaveHome => home.leave_home(),
    }

    home.save(&store)
        .with_context(|| format!("failed to save {}", store.location()))?;
    Ok(())
}

fn id_by_name<N: Notifier>(home: &Home<N>, name: &str) -> Result<Id> {
    home.find_by_name(name)
        .map(|device| device.id().clone())
        .ok_or_else(|| anyhow!("device not found: {}", name))
}
