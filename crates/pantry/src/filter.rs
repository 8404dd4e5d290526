// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! List filtering: search text, category, status, price, and expiry
//! predicates combined with AND semantics.

use pantry_core::{ItemStatus, ShoppingItem};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A combined filter. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring match on name or store.
    pub query: Option<String>,
    /// Category labels to include.
    pub categories: Option<Vec<String>>,
    /// Statuses to include.
    pub statuses: Option<Vec<ItemStatus>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Day-granularity bound: matches items expiring on or before this
    /// timestamp's calendar day.
    pub expires_on_or_before: Option<i64>,
}

impl ItemFilter {
    pub fn matches(&self, item: &ShoppingItem) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let in_name = item.name.to_lowercase().contains(&needle);
            let in_store = item
                .store
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(&needle));
            if !in_name && !in_store {
                return false;
            }
        }

        if let Some(categories) = &self.categories {
            if !categories.iter().any(|c| c == &item.category) {
                return false;
            }
        }

        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&item.status) {
                return false;
            }
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            // An unknown price never satisfies an active price filter.
            let Some(price) = item.price else {
                return false;
            };
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        if let Some(bound) = self.expires_on_or_before {
            let Some(expiry) = item.expiry_date else {
                return false;
            };
            if expiry.div_euclid(DAY_MS) > bound.div_euclid(DAY_MS) {
                return false;
            }
        }

        true
    }

    /// Filter a slice, preserving its order.
    pub fn apply<'a>(&self, items: &'a [ShoppingItem]) -> Vec<&'a ShoppingItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::Currency;

    fn item(name: &str, store: Option<&str>) -> ShoppingItem {
        ShoppingItem {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: "Food & Drinks".to_string(),
            price: Some(10.0),
            currency: Currency::Jpy,
            store: store.map(str::to_string),
            status: ItemStatus::ToBuy,
            notes: String::new(),
            media: Vec::new(),
            expiry_date: None,
            created_at: 0,
            deleted_at: None,
            order: Some(0),
        }
    }

    #[test]
    fn query_matches_name_and_store_case_insensitively() {
        let milk = item("Whole Milk", Some("Corner Shop"));
        let filter = ItemFilter {
            query: Some("milk".to_string()),
            ..ItemFilter::default()
        };
        assert!(filter.matches(&milk));

        let by_store = ItemFilter {
            query: Some("CORNER".to_string()),
            ..ItemFilter::default()
        };
        assert!(by_store.matches(&milk));

        let miss = ItemFilter {
            query: Some("bread".to_string()),
            ..ItemFilter::default()
        };
        assert!(!miss.matches(&milk));
    }

    #[test]
    fn category_filter_requires_membership() {
        let milk = item("Milk", None);
        let hit = ItemFilter {
            categories: Some(vec!["Food & Drinks".to_string(), "Medicine".to_string()]),
            ..ItemFilter::default()
        };
        assert!(hit.matches(&milk));

        let miss = ItemFilter {
            categories: Some(vec!["Electronics".to_string()]),
            ..ItemFilter::default()
        };
        assert!(!miss.matches(&milk));
    }

    #[test]
    fn status_filter_requires_membership() {
        let mut milk = item("Milk", None);
        milk.status = ItemStatus::Low;
        let hit = ItemFilter {
            statuses: Some(vec![ItemStatus::Low, ItemStatus::ToBuy]),
            ..ItemFilter::default()
        };
        assert!(hit.matches(&milk));

        let miss = ItemFilter {
            statuses: Some(vec![ItemStatus::InStock]),
            ..ItemFilter::default()
        };
        assert!(!miss.matches(&milk));
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let milk = item("Milk", None);
        let filter = ItemFilter {
            min_price: Some(10.0),
            max_price: Some(10.0),
            ..ItemFilter::default()
        };
        assert!(filter.matches(&milk));

        let below = ItemFilter {
            min_price: Some(10.5),
            ..ItemFilter::default()
        };
        assert!(!below.matches(&milk));
    }

    #[test]
    fn unknown_price_never_matches_a_price_filter() {
        let mut milk = item("Milk", None);
        milk.price = None;
        let filter = ItemFilter {
            min_price: Some(0.0),
            ..ItemFilter::default()
        };
        assert!(!filter.matches(&milk));
        // But it matches when no price bound is set.
        assert!(ItemFilter::default().matches(&milk));
    }

    #[test]
    fn expiry_bound_compares_calendar_days() {
        let mut milk = item("Milk", None);
        milk.expiry_date = Some(10 * DAY_MS + 5_000);

        let same_day = ItemFilter {
            expires_on_or_before: Some(10 * DAY_MS + 80_000_000),
            ..ItemFilter::default()
        };
        assert!(same_day.matches(&milk));

        let day_before = ItemFilter {
            expires_on_or_before: Some(9 * DAY_MS),
            ..ItemFilter::default()
        };
        assert!(!day_before.matches(&milk));

        let mut no_expiry = item("Rice", None);
        no_expiry.expiry_date = None;
        assert!(!same_day.matches(&no_expiry));
    }

    #[test]
    fn apply_preserves_input_order() {
        let items = vec![item("B", None), item("A", None), item("C", None)];
        let filter = ItemFilter::default();
        let names: Vec<&str> = filter.apply(&items).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }
}
