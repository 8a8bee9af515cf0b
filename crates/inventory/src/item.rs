use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ItemId};

use crate::coerce;

/// A stored inventory record.
///
/// `id` and `last_updated` are owned by the store: `id` is assigned on add
/// and `last_updated` is re-stamped on every add and update, whatever value
/// the caller put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: f64,
    pub location: String,
    pub last_updated: NaiveDate,
}

impl Item {
    /// Stock value of this record (quantity × unit price).
    pub fn value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Inclusive: an item exactly at the threshold is low on stock.
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, &self.category, self.price, &self.location)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// The caller-supplied part of an item, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    name: String,
    category: String,
    quantity: u32,
    price: f64,
    location: String,
}

impl NewItem {
    /// Text fields are trimmed. Name, category and location must be non-empty
    /// and the price finite and non-negative.
    pub fn new(
        name: impl AsRef<str>,
        category: impl AsRef<str>,
        quantity: u32,
        price: f64,
        location: impl AsRef<str>,
    ) -> DomainResult<Self> {
        let name = name.as_ref().trim().to_string();
        let category = category.as_ref().trim().to_string();
        let location = location.as_ref().trim().to_string();
        validate_fields(&name, &category, price, &location)?;

        Ok(Self {
            name,
            category,
            quantity,
            price,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub(crate) fn into_item(self, id: ItemId, last_updated: NaiveDate) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            price: self.price,
            location: self.location,
            last_updated,
        }
    }
}

/// Raw add-item form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
}

impl ItemForm {
    /// Turn form text into a [`NewItem`].
    ///
    /// Unlike CSV import, which defaults unreadable numbers to zero, the form
    /// rejects a quantity or price that is not a non-negative number.
    pub fn validate(&self) -> DomainResult<NewItem> {
        let quantity = match coerce::leading_int(&self.quantity) {
            Some(q) if q >= 0 => u32::try_from(q)
                .map_err(|_| DomainError::validation("quantity is too large"))?,
            Some(_) => return Err(DomainError::validation("quantity cannot be negative")),
            None => return Err(DomainError::validation("quantity must be a whole number")),
        };

        let price = match coerce::leading_float(&self.price) {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            Some(_) => return Err(DomainError::validation("price cannot be negative")),
            None => return Err(DomainError::validation("price must be a number")),
        };

        NewItem::new(&self.name, &self.category, quantity, price, &self.location)
    }
}

fn validate_fields(name: &str, category: &str, price: f64, location: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if category.trim().is_empty() {
        return Err(DomainError::validation("category cannot be empty"));
    }
    if location.trim().is_empty() {
        return Err(DomainError::validation("location cannot be empty"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation("price must be a non-negative amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn form(name: &str, quantity: &str, price: &str) -> ItemForm {
        ItemForm {
            name: name.to_string(),
            category: "Parts".to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
            location: "Warehouse A".to_string(),
        }
    }

    #[test]
    fn new_item_trims_and_validates() {
        let item = NewItem::new("  Bolt ", " Parts", 3, 0.25, "Bin 4 ").unwrap();
        assert_eq!(item.name(), "Bolt");
        assert_eq!(item.category(), "Parts");
        assert_eq!(item.location(), "Bin 4");

        assert!(NewItem::new("   ", "Parts", 1, 1.0, "A").is_err());
        assert!(NewItem::new("Bolt", "", 1, 1.0, "A").is_err());
        assert!(NewItem::new("Bolt", "Parts", 1, 1.0, " ").is_err());
        assert!(NewItem::new("Bolt", "Parts", 1, -0.01, "A").is_err());
        assert!(NewItem::new("Bolt", "Parts", 1, f64::NAN, "A").is_err());
    }

    #[test]
    fn form_rejects_non_numeric_input() {
        assert!(form("Bolt", "3", "0.25").validate().is_ok());
        assert_eq!(
            form("Bolt", "three", "0.25").validate().unwrap_err(),
            DomainError::validation("quantity must be a whole number")
        );
        assert_eq!(
            form("Bolt", "-1", "0.25").validate().unwrap_err(),
            DomainError::validation("quantity cannot be negative")
        );
        assert_eq!(
            form("Bolt", "3", "").validate().unwrap_err(),
            DomainError::validation("price must be a number")
        );
        assert!(form("", "3", "1").validate().unwrap_err().is_validation());
    }

    #[test]
    fn item_serializes_with_camel_case_keys() {
        let item = NewItem::new("Widget A", "Electronics", 150, 29.99, "Warehouse A")
            .unwrap()
            .into_item(ItemId::FIRST, date());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["lastUpdated"], "2025-04-20");
        assert_eq!(json["price"], 29.99);

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn low_stock_is_inclusive() {
        let item = NewItem::new("Tool Set C", "Equipment", 28, 149.99, "Warehouse A")
            .unwrap()
            .into_item(ItemId::FIRST, date());
        assert!(item.is_low_stock(28));
        assert!(!item.is_low_stock(27));
        assert!((item.value() - 28.0 * 149.99).abs() < 1e-9);
    }
}
