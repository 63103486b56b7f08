//! Conversion between raw field maps and `InputRecord`.
//!
//! Raw records are flat JSON objects keyed by field name, the shape a
//! form or a JSON file hands over. Conversion collects every absent field
//! before failing, so the caller learns everything it has to resubmit.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::error::{MissingFeatureError, RecordError};
use crate::types::*;

/// A flat mapping of field names to scalar values
pub type RawRecord = Map<String, Value>;

impl InputRecord {
    /// Build a typed record from a raw one.
    ///
    /// # Returns
    /// * `Err(RecordError::Missing)` naming every absent (or null) field
    /// * `Err(RecordError::InvalidValue)` for the first unusable value
    pub fn from_raw(raw: &RawRecord) -> Result<Self, RecordError> {
        let missing: Vec<&'static str> = Self::FIELDS
            .into_iter()
            .filter(|field| matches!(raw.get(*field), None | Some(Value::Null)))
            .collect();
        if !missing.is_empty() {
            return Err(MissingFeatureError { fields: missing }.into());
        }

        let fields = Fields(raw);
        Ok(Self {
            day_of_week: fields.label("day_of_week")?,
            time_slot: fields.label("time_slot")?,
            item: MenuItem::new(fields.text("item")?),
            is_exam_week: fields.flag("is_exam_week")?,
            special_event_flag: fields.flag("special_event_flag")?,
            weather: fields.label("weather")?,
            queue_length: fields.count("queue_length")?,
            active_counters: fields.count("active_counters")?,
            staff_count: fields.count("staff_count")?,
            avg_prep_time: fields.number("avg_prep_time")?,
            historical_orders: fields.count("historical_orders")?,
            item_popularity: fields.number("item_popularity")?,
            profit_margin: fields.number("profit_margin")?,
            ingredient_availability: fields.number("ingredient_availability")?,
            prep_time: fields.number("prep_time")?,
            wastage_history: fields.number("wastage_history")?,
        })
    }

    /// Flatten back into a raw record; flags become 0/1
    pub fn to_raw(&self) -> RawRecord {
        let mut raw = RawRecord::new();
        raw.insert("day_of_week".into(), json!(self.day_of_week.as_str()));
        raw.insert("time_slot".into(), json!(self.time_slot.as_str()));
        raw.insert("item".into(), json!(self.item.as_str()));
        raw.insert("is_exam_week".into(), json!(u8::from(self.is_exam_week)));
        raw.insert("special_event_flag".into(), json!(u8::from(self.special_event_flag)));
        raw.insert("weather".into(), json!(self.weather.as_str()));
        raw.insert("queue_length".into(), json!(self.queue_length));
        raw.insert("active_counters".into(), json!(self.active_counters));
        raw.insert("staff_count".into(), json!(self.staff_count));
        raw.insert("avg_prep_time".into(), json!(self.avg_prep_time));
        raw.insert("historical_orders".into(), json!(self.historical_orders));
        raw.insert("item_popularity".into(), json!(self.item_popularity));
        raw.insert("profit_margin".into(), json!(self.profit_margin));
        raw.insert("ingredient_availability".into(), json!(self.ingredient_availability));
        raw.insert("prep_time".into(), json!(self.prep_time));
        raw.insert("wastage_history".into(), json!(self.wastage_history));
        raw
    }
}

/// Typed accessors over a raw record whose fields are known to be present
struct Fields<'a>(&'a RawRecord);

impl Fields<'_> {
    fn value(&self, field: &'static str) -> Result<&Value, RecordError> {
        self.0.get(field).ok_or_else(|| {
            MissingFeatureError {
                fields: vec![field],
            }
            .into()
        })
    }

    fn invalid(field: &'static str, value: &Value) -> RecordError {
        RecordError::InvalidValue {
            field,
            value: value.to_string(),
        }
    }

    fn text(&self, field: &'static str) -> Result<String, RecordError> {
        let value = self.value(field)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::invalid(field, value))
    }

    fn label<T: FromStr>(&self, field: &'static str) -> Result<T, RecordError> {
        let value = self.value(field)?;
        value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Self::invalid(field, value))
    }

    /// Accepts `true`/`false` and `0`/`1`
    fn flag(&self, field: &'static str) -> Result<bool, RecordError> {
        let value = self.value(field)?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_f64() {
                Some(x) if x == 0.0 => Ok(false),
                Some(x) if x == 1.0 => Ok(true),
                _ => Err(Self::invalid(field, value)),
            },
            _ => Err(Self::invalid(field, value)),
        }
    }

    /// Non-negative integer; integral floats such as `10.0` are accepted
    fn count(&self, field: &'static str) -> Result<u32, RecordError> {
        let value = self.value(field)?;
        value
            .as_f64()
            .filter(|x| x.fract() == 0.0 && *x >= 0.0 && *x <= f64::from(u32::MAX))
            .map(|x| x as u32)
            .ok_or_else(|| Self::invalid(field, value))
    }

    fn number(&self, field: &'static str) -> Result<f64, RecordError> {
        let value = self.value(field)?;
        value
            .as_f64()
            .filter(|x| x.is_finite())
            .ok_or_else(|| Self::invalid(field, value))
    }
}
