//! Command execution and terminal output.

use std::fs;
use std::io::Write;

use anyhow::{Context, anyhow, bail};
use serde::Serialize;

use stockroom_infra::Autosave;
use stockroom_inventory::{
    AppDataBridge, Clock, DomainError, InventoryStore, Item, ItemForm, ItemId, KeyValueStore,
    Quoting, SearchFilters, import_csv,
};

use crate::args::Command;

/// Settings shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Emit JSON instead of tables.
    pub json: bool,
    /// Quoting used by `export` when the command line does not pick one.
    pub csv_quoting: Quoting,
}

/// Run one command as a whole process does: execute it, then write the
/// shutdown snapshot through `autosave` whether or not the command succeeded.
pub fn execute<P, C, A, B>(
    command: Command,
    store: &mut InventoryStore<P, C>,
    autosave: Autosave<A>,
    backups: &B,
    options: RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()>
where
    P: KeyValueStore,
    C: Clock,
    A: AppDataBridge,
    B: AppDataBridge,
{
    let result = run(command, store, backups, options, out);
    autosave.shutdown(store);
    result
}

/// Execute one command against `store`, writing results to `out`.
///
/// `backup` and `restore` use `backups`, which must not be the bridge the
/// shutdown snapshot goes to.
pub fn run<P, C, B>(
    command: Command,
    store: &mut InventoryStore<P, C>,
    backups: &B,
    options: RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()>
where
    P: KeyValueStore,
    C: Clock,
    B: AppDataBridge,
{
    match command {
        Command::List => {
            let items = store.inventory();
            print_items(out, &items, store.low_stock_threshold(), options)
        }
        Command::Search {
            term,
            category,
            location,
        } => {
            let filters = SearchFilters {
                search_term: term,
                category,
                location,
            };
            let items = store.search_inventory(&filters);
            print_items(out, &items, store.low_stock_threshold(), options)
        }
        Command::Add {
            name,
            category,
            quantity,
            price,
            location,
        } => {
            let form = ItemForm {
                name,
                category,
                quantity,
                price,
                location,
            };
            let item = store.add_item(form.validate()?)?;
            if options.json {
                return print_json(out, &item);
            }
            writeln!(out, "added item {} ({})", item.id, item.name)?;
            Ok(())
        }
        Command::Update {
            id,
            name,
            category,
            quantity,
            price,
            location,
        } => {
            let id: ItemId = id.parse()?;
            let mut item = store
                .get_item(id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
            if let Some(name) = name {
                item.name = name.trim().to_string();
            }
            if let Some(category) = category {
                item.category = category.trim().to_string();
            }
            if let Some(quantity) = quantity {
                item.quantity = quantity;
            }
            if let Some(price) = price {
                item.price = price;
            }
            if let Some(location) = location {
                item.location = location.trim().to_string();
            }
            if !store.update_item(item) {
                bail!("item {id} was not updated: fields are invalid");
            }
            writeln!(out, "updated item {id}")?;
            Ok(())
        }
        Command::Delete { id } => {
            let id: ItemId = id.parse()?;
            if !store.delete_item(id) {
                return Err(DomainError::not_found(format!("item {id}")).into());
            }
            writeln!(out, "deleted item {id}")?;
            Ok(())
        }
        Command::LowStock => {
            let items = store.low_stock_items();
            print_items(out, &items, store.low_stock_threshold(), options)
        }
        Command::Threshold { value } => {
            let threshold = match value {
                Some(input) => store.set_low_stock_threshold_input(&input),
                None => store.low_stock_threshold(),
            };
            if options.json {
                return print_json(out, &threshold);
            }
            writeln!(out, "low-stock threshold: {threshold}")?;
            Ok(())
        }
        Command::Summary => {
            let summary = store.summary();
            if options.json {
                return print_json(out, &summary);
            }
            writeln!(out, "items:           {}", summary.distinct_items)?;
            writeln!(out, "total quantity:  {}", summary.total_quantity)?;
            writeln!(out, "total value:     {}", currency(summary.total_value))?;
            writeln!(
                out,
                "low stock:       {} (threshold {})",
                summary.low_stock_items, summary.low_stock_threshold
            )?;
            writeln!(out, "categories:      {}", summary.categories)?;
            writeln!(out, "locations:       {}", summary.locations)?;
            Ok(())
        }
        Command::Report => {
            let shares = store.category_breakdown();
            if options.json {
                return print_json(out, &shares);
            }
            let width = shares
                .iter()
                .map(|s| s.category.chars().count())
                .max()
                .unwrap_or(0)
                .max("Category".len());
            writeln!(out, "{:<width$}  {:>8}  {:>5}", "Category", "Quantity", "Share")?;
            for share in &shares {
                let percent = share
                    .percent
                    .map(|p| format!("{p}%"))
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:<width$}  {:>8}  {:>5}",
                    share.category, share.quantity, percent
                )?;
            }
            Ok(())
        }
        Command::Export { output, quoting } => {
            let csv = store.export_to_csv_with(quoting.unwrap_or(options.csv_quoting));
            match output {
                Some(path) => {
                    fs::write(&path, &csv)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "inventory exported");
                    writeln!(out, "exported {} items to {}", store.items().len(), path.display())?;
                }
                None => writeln!(out, "{csv}")?,
            }
            Ok(())
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let summary = import_csv(store, &text).ok_or_else(|| {
                anyhow!(
                    "{} has no data rows or lacks a Name, Category, Quantity, Price or Location column",
                    file.display()
                )
            })?;
            if options.json {
                return print_json(out, &summary);
            }
            writeln!(
                out,
                "imported {} items ({} rows skipped)",
                summary.count, summary.skipped
            )?;
            Ok(())
        }
        Command::Reset => {
            store.reset_to_sample_data();
            writeln!(out, "inventory reset to sample data")?;
            Ok(())
        }
        Command::Backup => {
            backups
                .save_app_data(&store.snapshot())
                .context("failed to write backup")?;
            writeln!(out, "backup saved ({} items)", store.items().len())?;
            Ok(())
        }
        Command::Restore => {
            let data = backups
                .load_app_data()
                .context("failed to read backup")?
                .ok_or_else(|| anyhow!("no backup has been saved"))?;
            let updated = store.apply_app_data(&data);
            writeln!(out, "restored {updated} items from backup")?;
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_items(
    out: &mut dyn Write,
    items: &[Item],
    threshold: u32,
    options: RunOptions,
) -> anyhow::Result<()> {
    if options.json {
        return print_json(out, items);
    }
    if items.is_empty() {
        writeln!(out, "no items")?;
        return Ok(());
    }

    let rows: Vec<[String; 7]> = items
        .iter()
        .map(|item| {
            [
                item.id.to_string(),
                item.name.clone(),
                item.category.clone(),
                item.quantity.to_string(),
                currency(item.price),
                item.location.clone(),
                item.last_updated.to_string(),
            ]
        })
        .collect();
    let header = ["ID", "Name", "Category", "Qty", "Price", "Location", "Updated"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 7]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    writeln!(out, "{}", line(header).trim_end())?;
    for (row, item) in rows.iter().zip(items) {
        let cells: [&str; 7] = std::array::from_fn(|i| row[i].as_str());
        let mut text = line(cells).trim_end().to_string();
        if item.is_low_stock(threshold) {
            text.push_str("  LOW");
        }
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn currency(amount: f64) -> String {
    format!("${amount:.2}")
}
