//! Inventory search filters.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Conjunctive item filter. `None` or an empty string imposes no constraint.
///
/// - `search_term`: case-insensitive substring of the name **or** category
/// - `category` / `location`: exact match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// True when no filter would constrain anything.
    pub fn is_empty(&self) -> bool {
        active(&self.search_term).is_none()
            && active(&self.category).is_none()
            && active(&self.location).is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(term) = active(&self.search_term) {
            let term = term.to_lowercase();
            if !item.name.to_lowercase().contains(&term)
                && !item.category.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            if item.category != category {
                return false;
            }
        }

        if let Some(location) = active(&self.location) {
            if item.location != location {
                return false;
            }
        }

        true
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn names(filters: &SearchFilters) -> Vec<String> {
        seed::sample_items()
            .into_iter()
            .filter(|item| filters.matches(item))
            .map(|item| item.name)
            .collect()
    }

    #[test]
    fn term_matches_name_or_category_ignoring_case() {
        assert_eq!(names(&SearchFilters::new().with_search_term("WIDGET")), vec!["Widget A"]);
        assert_eq!(
            names(&SearchFilters::new().with_search_term("raw")),
            vec!["Material D"]
        );
    }

    #[test]
    fn filters_are_conjunctive() {
        let filters = SearchFilters::new()
            .with_search_term("e")
            .with_location("Warehouse A");
        assert_eq!(names(&filters), vec!["Widget A", "Tool Set C"]);

        let none = SearchFilters::new()
            .with_category("Parts")
            .with_location("Warehouse A");
        assert!(names(&none).is_empty());
    }

    #[test]
    fn category_and_location_are_exact() {
        assert!(names(&SearchFilters::new().with_category("parts")).is_empty());
        assert_eq!(names(&SearchFilters::new().with_category("Parts")), vec!["Component B"]);
    }

    #[test]
    fn empty_strings_do_not_filter() {
        let filters = SearchFilters::new()
            .with_search_term("")
            .with_category("")
            .with_location("");
        assert!(filters.is_empty());
        assert_eq!(names(&filters).len(), 5);
    }
}
