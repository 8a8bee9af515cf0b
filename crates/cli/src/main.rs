use std::io;

use anyhow::Context;
use clap::Parser;

use stockroom_cli::{Cli, RunOptions, execute};
use stockroom_infra::{AppConfig, Autosave, FileKeyValueStore, JsonFileBridge};
use stockroom_inventory::InventoryStore;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stockroom_observability::init(AppConfig::log_format_from_env().unwrap_or_default());
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(?config, "configuration loaded");

    let kv = FileKeyValueStore::open(&config.data_dir)?;
    let mut store = InventoryStore::init(kv);
    let autosave = Autosave::new(
        JsonFileBridge::in_dir(&config.data_dir),
        config.autosave_interval,
    );
    let backups = JsonFileBridge::backup_in(&config.data_dir);

    let options = RunOptions {
        json: cli.json,
        csv_quoting: config.csv_quoting,
    };
    let stdout = io::stdout();
    execute(
        cli.command,
        &mut store,
        autosave,
        &backups,
        options,
        &mut stdout.lock(),
    )
}
