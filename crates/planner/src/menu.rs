//! The canteen menu and per-slot demand adjustments.
//!
//! Adjustments belong to the presentation layer: they nudge an item's
//! inputs before the record is built, the orchestrator never sees them.

use features::{MenuItem, TimeSlot};

use crate::context::{ItemProfile, OperatingContext};

/// Items shown in the all-items overview, in display order
pub const MENU: [&str; 6] = ["Idli", "Dosa", "Samosa", "Chai", "Coffee", "Fried Rice"];

/// Extra historical orders for hot drinks during Snacks
pub const SNACK_DRINK_ORDER_BOOST: u32 = 20;
/// Extra popularity for hot drinks during Snacks (capped at 1.0)
pub const SNACK_DRINK_POPULARITY_BOOST: f64 = 0.1;
/// Extra historical orders for South Indian breakfast items
pub const BREAKFAST_ORDER_BOOST: u32 = 15;

pub fn menu_items() -> Vec<MenuItem> {
    MENU.into_iter().map(MenuItem::from).collect()
}

/// Profile actually used for `item` in the overview.
///
/// - Chai and Coffee during Snacks: more orders and popularity
/// - Idli and Dosa during Breakfast: more orders
/// - Everything else: unchanged
pub fn adjust_for_slot(
    context: &OperatingContext,
    item: &MenuItem,
    profile: &ItemProfile,
) -> ItemProfile {
    let mut adjusted = profile.clone();
    match (item.as_str(), context.time_slot) {
        ("Chai" | "Coffee", TimeSlot::Snacks) => {
            adjusted.historical_orders = profile
                .historical_orders
                .saturating_add(SNACK_DRINK_ORDER_BOOST);
            adjusted.item_popularity =
                (profile.item_popularity + SNACK_DRINK_POPULARITY_BOOST).min(1.0);
        }
        ("Idli" | "Dosa", TimeSlot::Breakfast) => {
            adjusted.historical_orders = profile
                .historical_orders
                .saturating_add(BREAKFAST_ORDER_BOOST);
        }
        _ => {}
    }
    adjusted
}
