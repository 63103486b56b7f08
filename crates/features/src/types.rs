//! Typed input record for one (context, item) pair.
//!
//! Categorical fields are enums with the exact labels the models were
//! trained on; `as_str` returns that label and `FromStr` parses it back.
//! Menu items are an open set, so `MenuItem` wraps a string instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLabel;

// =============================================================================
// Categorical fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "day_of_week",
                value: s.to_string(),
            })
    }
}

/// Service period of the canteen day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Breakfast,
        TimeSlot::Lunch,
        TimeSlot::Snacks,
        TimeSlot::Dinner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Breakfast => "Breakfast",
            TimeSlot::Lunch => "Lunch",
            TimeSlot::Snacks => "Snacks",
            TimeSlot::Dinner => "Dinner",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "time_slot",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Normal,
    Rainy,
}

impl Weather {
    pub const ALL: [Weather; 2] = [Weather::Normal, Weather::Rainy];

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Normal => "Normal",
            Weather::Rainy => "Rainy",
        }
    }
}

impl FromStr for Weather {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|weather| weather.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "weather",
                value: s.to_string(),
            })
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(DayOfWeek, TimeSlot, Weather);

/// A menu item label such as "Idli" or "Fried Rice".
///
/// Any label is accepted here; whether a model knows it is decided at
/// inference time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItem(String);

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MenuItem {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// InputRecord
// =============================================================================

/// Everything the three models need for one (context, item) pair.
///
/// Value ranges are not checked here; the presentation layer is
/// responsible for keeping inputs inside their domains.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    // Temporal context
    pub day_of_week: DayOfWeek,
    pub time_slot: TimeSlot,
    pub item: MenuItem,
    pub is_exam_week: bool,
    pub special_event_flag: bool,
    pub weather: Weather,

    // Operational context
    pub queue_length: u32,
    pub active_counters: u32,
    pub staff_count: u32,
    /// Minutes
    pub avg_prep_time: f64,

    // Item context
    pub historical_orders: u32,
    pub item_popularity: f64,
    pub profit_margin: f64,
    pub ingredient_availability: f64,
    /// Minutes
    pub prep_time: f64,
    pub wastage_history: f64,
}

impl InputRecord {
    /// Every field name, in declaration order
    pub const FIELDS: [&'static str; 16] = [
        "day_of_week",
        "time_slot",
        "item",
        "is_exam_week",
        "special_event_flag",
        "weather",
        "queue_length",
        "active_counters",
        "staff_count",
        "avg_prep_time",
        "historical_orders",
        "item_popularity",
        "profit_margin",
        "ingredient_availability",
        "prep_time",
        "wastage_history",
    ];
}
