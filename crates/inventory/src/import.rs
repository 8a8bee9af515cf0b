//! Bulk import of decoded CSV rows as new items.

use serde::Serialize;

use stockroom_csv::CsvRow;

use crate::clock::Clock;
use crate::coerce;
use crate::item::NewItem;
use crate::persistence::KeyValueStore;
use crate::store::InventoryStore;

/// Header names an import file must carry (any letter case).
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "category", "quantity", "price", "location"];

/// Outcome of an accepted import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows added to the inventory.
    pub count: usize,
    /// Rows dropped for a missing name, category or location, or because
    /// the store could not take another item.
    pub skipped: usize,
}

/// Decode `text` and import its rows. See [`import_rows`].
pub fn import_csv<P, C>(store: &mut InventoryStore<P, C>, text: &str) -> Option<ImportSummary>
where
    P: KeyValueStore,
    C: Clock,
{
    let rows = stockroom_csv::decode(text);
    import_rows(store, &rows)
}

/// Add every usable row as a new item.
///
/// Returns `None` when there are no rows or the header lacks one of
/// [`REQUIRED_FIELDS`]; nothing is added in that case. Unreadable quantities
/// and prices import as 0. Rows without a name, category or location are
/// skipped.
pub fn import_rows<P, C>(store: &mut InventoryStore<P, C>, rows: &[CsvRow]) -> Option<ImportSummary>
where
    P: KeyValueStore,
    C: Clock,
{
    let Some(first) = rows.first() else {
        tracing::warn!("CSV import rejected: no data rows");
        return None;
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !first.has_header_ignore_case(field))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "CSV import rejected: required columns absent");
        return None;
    }

    let mut summary = ImportSummary::default();
    for (index, row) in rows.iter().enumerate() {
        let candidate = NewItem::new(
            field(row, "name"),
            field(row, "category"),
            coerce::non_negative_int(field(row, "quantity")),
            coerce::non_negative_price(field(row, "price")),
            field(row, "location"),
        );

        match candidate.and_then(|item| store.add_item(item)) {
            Ok(_) => summary.count += 1,
            Err(err) => {
                tracing::debug!(row = index + 1, error = %err, "skipping CSV row");
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        imported = summary.count,
        skipped = summary.skipped,
        "CSV import finished"
    );
    Some(summary)
}

/// Look a column up as `name`, then `Name`, then in any letter case.
fn field<'r>(row: &'r CsvRow, name: &str) -> &'r str {
    row.get(name)
        .or_else(|| row.get(&capitalize(name)))
        .or_else(|| row.get_ignore_case(name))
        .unwrap_or("")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::FixedClock;
    use crate::persistence::{InMemoryKeyValueStore, INVENTORY_KEY};
    use stockroom_core::ItemId;

    fn store() -> InventoryStore<InMemoryKeyValueStore, FixedClock> {
        InventoryStore::with_clock(
            InMemoryKeyValueStore::new(),
            FixedClock::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        )
    }

    #[test]
    fn quoted_name_with_comma_is_imported() {
        let mut store = store();
        let csv = "Name,Category,Quantity,Price,Location\n\"Gadget, Pro\",Electronics,10,9.99,WH1";

        let summary = import_csv(&mut store, csv).unwrap();
        assert_eq!(summary, ImportSummary { count: 1, skipped: 0 });

        let added = store.inventory().pop().unwrap();
        assert_eq!(added.name, "Gadget, Pro");
        assert_eq!(added.category, "Electronics");
        assert_eq!(added.quantity, 10);
        assert_eq!(added.price, 9.99);
        assert_eq!(added.id.get(), 6);
        assert!(store.locations().contains(&"WH1".to_string()));
    }

    #[test]
    fn spreadsheet_byte_order_mark_is_tolerated() {
        let mut store = store();
        let csv = "\u{feff}Name,Category,Quantity,Price,Location\r\nBolt,Parts,5,0.1,Bin\r\n";
        assert_eq!(import_csv(&mut store, csv).unwrap().count, 1);
        assert_eq!(store.inventory().pop().unwrap().name, "Bolt");
    }

    #[test]
    fn headers_match_in_any_case() {
        let mut store = store();
        let csv = "NAME,category,QuAnTiTy,Price,LOCATION\nBolt,Parts,5,0.1,Bin";
        assert_eq!(import_csv(&mut store, csv).unwrap().count, 1);
        assert_eq!(store.inventory().pop().unwrap().name, "Bolt");
    }

    #[test]
    fn missing_required_column_rejects_the_file() {
        let mut store = store();
        let csv = "Name,Category,Quantity,Location\nBolt,Parts,5,Bin";
        assert_eq!(import_csv(&mut store, csv), None);
        assert_eq!(store.inventory().len(), 5);
    }

    #[test]
    fn empty_file_is_rejected() {
        let mut store = store();
        assert_eq!(import_csv(&mut store, ""), None);
        assert_eq!(import_csv(&mut store, "Name,Category,Quantity,Price,Location\n"), None);
    }

    #[test]
    fn unreadable_numbers_default_to_zero() {
        let mut store = store();
        let csv = "name,category,quantity,price,location\nBolt,Parts,lots,free,Bin\nNut,Parts,-4,-1,Bin";
        assert_eq!(import_csv(&mut store, csv).unwrap().count, 2);

        let items = store.inventory();
        let imported = &items[5..];
        assert!(imported.iter().all(|i| i.quantity == 0 && i.price == 0.0));
    }

    #[test]
    fn rows_without_labels_are_skipped() {
        let mut store = store();
        let csv = "Name,Category,Quantity,Price,Location\n\
                   ,Parts,1,1,Bin\n\
                   Bolt,,1,1,Bin\n\
                   Bolt,Parts,1,1,\n\
                   Nut,Parts,2,0.05,Bin";
        let summary = import_csv(&mut store, csv).unwrap();
        assert_eq!(summary, ImportSummary { count: 1, skipped: 3 });
    }

    #[test]
    fn malformed_lines_are_dropped_before_import() {
        let mut store = store();
        let csv = "Name,Category,Quantity,Price,Location\nBolt,Parts,1\nNut,Parts,2,0.05,Bin";
        assert_eq!(import_csv(&mut store, csv).unwrap().count, 1);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut store = store();
        let csv = "ID,Name,Category,Quantity,Price,Location,Last Updated\n\
                   900,Bolt,Parts,3,0.5,Bin,1999-01-01";
        assert_eq!(import_csv(&mut store, csv).unwrap().count, 1);

        let added = store.inventory().pop().unwrap();
        assert_eq!(added.id.get(), 6, "ids are always assigned by the store");
        assert_eq!(added.last_updated, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    }

    #[test]
    fn exported_csv_imports_back() {
        let mut store = store();
        let exported = store.export_to_csv();
        assert_eq!(import_csv(&mut store, &exported).unwrap().count, 5);
        assert_eq!(store.inventory().len(), 10);
        assert_eq!(store.total_item_count(), 2 * 1935);
    }

    #[test]
    fn rows_beyond_the_last_id_are_skipped() {
        let mut last = crate::seed::sample_items().remove(0);
        last.id = ItemId::new(u64::MAX).unwrap();
        let kv = InMemoryKeyValueStore::with_entries([(
            INVENTORY_KEY,
            serde_json::to_string(&vec![last]).unwrap(),
        )]);
        let mut store = InventoryStore::with_clock(
            kv,
            FixedClock::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        );

        let csv = "Name,Category,Quantity,Price,Location\nBolt,Parts,1,1,Bin";
        assert_eq!(
            import_csv(&mut store, csv),
            Some(ImportSummary { count: 0, skipped: 1 })
        );
        assert_eq!(store.inventory().len(), 1);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize(""), "");
    }
}
