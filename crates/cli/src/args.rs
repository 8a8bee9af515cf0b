//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use stockroom_inventory::Quoting;

#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about = "Small-shop inventory manager")]
pub struct Cli {
    /// Data directory (overrides STOCKROOM_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every item.
    List,
    /// Filter items by text, category and location.
    Search {
        /// Matches name or category, ignoring case.
        term: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Add an item.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        location: String,
    },
    /// Change fields of an existing item.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete an item by id.
    Delete { id: String },
    /// Items at or below the low-stock threshold.
    LowStock,
    /// Show the low-stock threshold, or set it.
    Threshold { value: Option<String> },
    /// Dashboard totals.
    Summary,
    /// Quantity per category with its share of all stock.
    Report,
    /// Write the inventory as CSV.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// `never` (legacy, default from config) or `minimal`.
        #[arg(long)]
        quoting: Option<Quoting>,
    },
    /// Add the rows of a CSV file as new items.
    Import { file: PathBuf },
    /// Replace the inventory with the sample dataset.
    Reset,
    /// Save a copy of the whole inventory to the backup file.
    Backup,
    /// Put back the backed-up version of every item that still exists.
    Restore,
}
