//! The three feature views, one per model.
//!
//! - `DemandView` feeds the demand regressor
//! - `WaitTimeView` feeds the wait-time regressor
//! - `PrepLevelView` feeds the prep-level classifier
//!
//! The prep-level view does not carry predicted demand. Its model was
//! trained on item attributes only.

use model_registry::FeatureRow;

use crate::traits::FeatureView;
use crate::types::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DemandView {
    pub day_of_week: DayOfWeek,
    pub time_slot: TimeSlot,
    pub item: MenuItem,
    pub historical_orders: u32,
    pub item_popularity: f64,
    pub is_exam_week: bool,
    pub special_event_flag: bool,
    pub weather: Weather,
}

impl FeatureView for DemandView {
    const NAME: &'static str = "demand";

    const COLUMNS: &'static [&'static str] = &[
        "day_of_week",
        "time_slot",
        "item",
        "historical_orders",
        "item_popularity",
        "is_exam_week",
        "special_event_flag",
        "weather",
    ];

    fn project(record: &InputRecord) -> Self {
        Self {
            day_of_week: record.day_of_week,
            time_slot: record.time_slot,
            item: record.item.clone(),
            historical_orders: record.historical_orders,
            item_popularity: record.item_popularity,
            is_exam_week: record.is_exam_week,
            special_event_flag: record.special_event_flag,
            weather: record.weather,
        }
    }

    fn to_row(&self) -> FeatureRow {
        FeatureRow::with_capacity(Self::COLUMNS.len())
            .with("day_of_week", self.day_of_week.as_str())
            .with("time_slot", self.time_slot.as_str())
            .with("item", self.item.as_str())
            .with("historical_orders", self.historical_orders)
            .with("item_popularity", self.item_popularity)
            .with("is_exam_week", self.is_exam_week)
            .with("special_event_flag", self.special_event_flag)
            .with("weather", self.weather.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitTimeView {
    pub queue_length: u32,
    pub active_counters: u32,
    pub staff_count: u32,
    pub avg_prep_time: f64,
    pub time_slot: TimeSlot,
}

impl FeatureView for WaitTimeView {
    const NAME: &'static str = "wait_time";

    const COLUMNS: &'static [&'static str] = &[
        "queue_length",
        "active_counters",
        "staff_count",
        "avg_prep_time",
        "time_slot",
    ];

    fn project(record: &InputRecord) -> Self {
        Self {
            queue_length: record.queue_length,
            active_counters: record.active_counters,
            staff_count: record.staff_count,
            avg_prep_time: record.avg_prep_time,
            time_slot: record.time_slot,
        }
    }

    fn to_row(&self) -> FeatureRow {
        FeatureRow::with_capacity(Self::COLUMNS.len())
            .with("queue_length", self.queue_length)
            .with("active_counters", self.active_counters)
            .with("staff_count", self.staff_count)
            .with("avg_prep_time", self.avg_prep_time)
            .with("time_slot", self.time_slot.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrepLevelView {
    pub historical_orders: u32,
    pub profit_margin: f64,
    pub ingredient_availability: f64,
    pub prep_time: f64,
    pub item_popularity: f64,
    pub wastage_history: f64,
}

impl FeatureView for PrepLevelView {
    const NAME: &'static str = "prep_level";

    const COLUMNS: &'static [&'static str] = &[
        "historical_orders",
        "profit_margin",
        "ingredient_availability",
        "prep_time",
        "item_popularity",
        "wastage_history",
    ];

    fn project(record: &InputRecord) -> Self {
        Self {
            historical_orders: record.historical_orders,
            profit_margin: record.profit_margin,
            ingredient_availability: record.ingredient_availability,
            prep_time: record.prep_time,
            item_popularity: record.item_popularity,
            wastage_history: record.wastage_history,
        }
    }

    fn to_row(&self) -> FeatureRow {
        FeatureRow::with_capacity(Self::COLUMNS.len())
            .with("historical_orders", self.historical_orders)
            .with("profit_margin", self.profit_margin)
            .with("ingredient_availability", self.ingredient_availability)
            .with("prep_time", self.prep_time)
            .with("item_popularity", self.item_popularity)
            .with("wastage_history", self.wastage_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_registry::FeatureValue;

    fn record() -> InputRecord {
        InputRecord {
            day_of_week: DayOfWeek::Mon,
            time_slot: TimeSlot::Lunch,
            item: MenuItem::from("Idli"),
            is_exam_week: true,
            special_event_flag: false,
            weather: Weather::Normal,
            queue_length: 10,
            active_counters: 2,
            staff_count: 5,
            avg_prep_time: 5.0,
            historical_orders: 50,
            item_popularity: 0.5,
            profit_margin: 0.6,
            ingredient_availability: 0.9,
            prep_time: 7.0,
            wastage_history: 0.2,
        }
    }

    fn assert_row_follows_columns<V: FeatureView>() {
        let row = V::project(&record()).to_row();
        assert_eq!(row.columns(), V::COLUMNS, "{} row order", V::NAME);
    }

    #[test]
    fn test_rows_follow_declared_columns() {
        assert_row_follows_columns::<DemandView>();
        assert_row_follows_columns::<WaitTimeView>();
        assert_row_follows_columns::<PrepLevelView>();
    }

    #[test]
    fn test_columns_are_record_fields() {
        for columns in [DemandView::COLUMNS, WaitTimeView::COLUMNS, PrepLevelView::COLUMNS] {
            for column in columns {
                assert!(InputRecord::FIELDS.contains(column), "{} is not a field", column);
            }
        }
    }

    #[test]
    fn test_every_field_feeds_some_view() {
        for field in InputRecord::FIELDS {
            let used = DemandView::COLUMNS.contains(&field)
                || WaitTimeView::COLUMNS.contains(&field)
                || PrepLevelView::COLUMNS.contains(&field);
            assert!(used, "{} is not used by any view", field);
        }
    }

    #[test]
    fn test_demand_row_encoding() {
        let row = DemandView::project(&record()).to_row();

        assert_eq!(row.get("item"), Some(&FeatureValue::Category("Idli".into())));
        assert_eq!(row.get("historical_orders"), Some(&FeatureValue::Number(50.0)));
        assert_eq!(row.get("is_exam_week"), Some(&FeatureValue::Number(1.0)));
        assert_eq!(row.get("special_event_flag"), Some(&FeatureValue::Number(0.0)));
        assert_eq!(row.get("weather"), Some(&FeatureValue::Category("Normal".into())));
    }

    #[test]
    fn test_wait_time_view_ignores_weather() {
        let mut rainy = record();
        rainy.weather = Weather::Rainy;

        assert_eq!(WaitTimeView::project(&record()), WaitTimeView::project(&rainy));
        assert_ne!(DemandView::project(&record()), DemandView::project(&rainy));
    }

    #[test]
    fn test_prep_level_view_has_no_demand_column() {
        assert!(!PrepLevelView::COLUMNS.contains(&"demand"));
        assert_eq!(PrepLevelView::project(&record()).to_row().len(), 6);
    }
}
