//! Operating context and item profile, the two halves of an input record.
//!
//! The dashboard collects one `OperatingContext` (shared by every item in a
//! request) and one `ItemProfile` (per item), then builds one
//! `InputRecord` per item from them.

use features::{DayOfWeek, InputRecord, MenuItem, TimeSlot, Weather};

/// Time slot and operations inputs shared by every item
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingContext {
    pub day_of_week: DayOfWeek,
    pub time_slot: TimeSlot,
    pub is_exam_week: bool,
    pub special_event_flag: bool,
    pub weather: Weather,
    pub queue_length: u32,
    pub active_counters: u32,
    pub staff_count: u32,
    /// Minutes
    pub avg_prep_time: f64,
}

impl Default for OperatingContext {
    fn default() -> Self {
        Self {
            day_of_week: DayOfWeek::Mon,
            time_slot: TimeSlot::Breakfast,
            is_exam_week: false,
            special_event_flag: false,
            weather: Weather::Normal,
            queue_length: 10,
            active_counters: 2,
            staff_count: 5,
            avg_prep_time: 5.0,
        }
    }
}

/// Menu and financial inputs for one item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProfile {
    pub historical_orders: u32,
    pub item_popularity: f64,
    pub profit_margin: f64,
    pub ingredient_availability: f64,
    /// Minutes
    pub prep_time: f64,
    pub wastage_history: f64,
}

impl Default for ItemProfile {
    fn default() -> Self {
        Self {
            historical_orders: 50,
            item_popularity: 0.5,
            profit_margin: 0.6,
            ingredient_availability: 0.9,
            prep_time: 7.0,
            wastage_history: 0.2,
        }
    }
}

/// Combine context, item and profile into one record
pub fn build_record(
    context: &OperatingContext,
    item: &MenuItem,
    profile: &ItemProfile,
) -> InputRecord {
    InputRecord {
        day_of_week: context.day_of_week,
        time_slot: context.time_slot,
        item: item.clone(),
        is_exam_week: context.is_exam_week,
        special_event_flag: context.special_event_flag,
        weather: context.weather,
        queue_length: context.queue_length,
        active_counters: context.active_counters,
        staff_count: context.staff_count,
        avg_prep_time: context.avg_prep_time,
        historical_orders: profile.historical_orders,
        item_popularity: profile.item_popularity,
        profit_margin: profile.profit_margin,
        ingredient_availability: profile.ingredient_availability,
        prep_time: profile.prep_time,
        wastage_history: profile.wastage_history,
    }
}
