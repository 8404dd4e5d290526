// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upcoming-expiration scan for the perishables alert.

use pantry_core::{ItemStatus, ShoppingItem};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Items worth warning about: active stock (`in-stock` or `low`) whose
/// expiry date falls between the start of today and the end of the day
/// `warning_days` out, soonest first.
///
/// Items on the shopping list (`to-buy`, `dont-like`) and trashed items are
/// never alerted on.
pub fn upcoming_expirations<'a>(
    items: &'a [ShoppingItem],
    now_ms: i64,
    warning_days: u32,
) -> Vec<&'a ShoppingItem> {
    let today_start = now_ms.div_euclid(DAY_MS) * DAY_MS;
    let window_end = today_start + (i64::from(warning_days) + 1) * DAY_MS - 1;

    let mut upcoming: Vec<&ShoppingItem> = items
        .iter()
        .filter(|item| !item.is_trashed())
        .filter(|item| matches!(item.status, ItemStatus::InStock | ItemStatus::Low))
        .filter(|item| {
            item.expiry_date
                .is_some_and(|expiry| expiry >= today_start && expiry <= window_end)
        })
        .collect();
    upcoming.sort_by_key(|item| item.expiry_date);
    upcoming
}
