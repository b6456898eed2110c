//! Order payload helpers
//!
//! Orders are stored as free-form JSON. These helpers pull out the few
//! fields the service relies on: `order_id`, `point_id` and `dishes[].total_price`.

use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order payload errors raised while computing totals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Order has no dishes")]
    MissingDishes,

    #[error("Dish {index} has an invalid total_price")]
    InvalidPrice { index: usize },
}

/// A raw order field value that counts as present
///
/// Null, empty strings, zero, `false` and empty collections are missing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderField(Value);

impl OrderField {
    fn from_order(order: &Value, key: &str) -> Option<Self> {
        let value = order.get(key)?;
        is_present(value).then(|| Self(value.clone()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// JSON text of the value, for comparing against stored payloads
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Integer form (integer, integral float or numeric string)
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// `order.order_id`, if present
pub fn order_id(order: &Value) -> Option<OrderField> {
    OrderField::from_order(order, "order_id")
}

/// `order.point_id`, if present
pub fn point_id(order: &Value) -> Option<OrderField> {
    OrderField::from_order(order, "point_id")
}

/// Sum of `dishes[].total_price` in decimal arithmetic
pub fn total_amount(order: &Value) -> Result<Decimal, OrderError> {
    let dishes = order
        .get("dishes")
        .and_then(Value::as_array)
        .ok_or(OrderError::MissingDishes)?;

    dishes
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |acc, (index, dish)| {
            let price = dish
                .get("total_price")
                .and_then(number_to_decimal)
                .ok_or(OrderError::InvalidPrice { index })?;
            Ok(acc + price)
        })
}

/// Parse a JSON number through its textual form so 11.4 stays 11.4
pub fn number_to_decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
