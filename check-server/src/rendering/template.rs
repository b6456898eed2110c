//! Check HTML template (Handlebars)
//!
//! Kitchen checks list dishes and quantities only; client checks add line
//! prices and the amount due.

use handlebars::Handlebars;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::{Check, CheckType, OrderError, order};
use thiserror::Error;

const TEMPLATE_NAME: &str = "check";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/check.html");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid order: {0}")]
    Order(#[from] OrderError),

    #[error("Template render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub struct CheckTemplate {
    registry: Handlebars<'static>,
}

impl CheckTemplate {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { registry })
    }

    /// Render the check to HTML
    ///
    /// Fails when the order has no `dishes` or a non-numeric `total_price`.
    pub fn render(&self, check: &Check) -> Result<String, TemplateError> {
        let context = Self::context(check)?;
        Ok(self.registry.render(TEMPLATE_NAME, &context)?)
    }

    fn context(check: &Check) -> Result<Value, TemplateError> {
        let total = order::total_amount(&check.order)?;

        let dishes: Vec<Value> = check
            .order
            .get("dishes")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|dish| {
                        json!({
                            "name": dish.get("name").cloned().unwrap_or(Value::Null),
                            "quantity": dish.get("quantity").cloned().unwrap_or(Value::Null),
                            "total_price": dish
                                .get("total_price")
                                .and_then(order::number_to_decimal)
                                .map(format_money),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({
            "check_id": check.id,
            "order_id": order::order_id(&check.order).map(|id| id.to_string()),
            "point_id": order::point_id(&check.order).map(|id| id.to_string()),
            "is_client": check.check_type == CheckType::Client,
            "dishes": dishes,
            "total_amount_due": format_money(total),
        }))
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
