//! Declarative form validation for products, orders, payments and invoices.
//!
//! # Design
//! Each form type is a serde struct carrying `validator` rules. Raw form
//! input (a `serde_json::Value` from the form layer, where numeric fields may
//! arrive as strings) is deserialized with coercing helpers and then
//! validated field by field. The result is either the typed form value or a
//! flat list of path-qualified failures (`items[0].quantity` style for
//! nested records). Validation never performs I/O and is meant to run before
//! any request is built.
//!
//! Enumerated fields (unit, order status, payment mode) stay `String` here:
//! form input is free text until validated, and a value outside the literal
//! set must surface as a field error rather than a deserialization failure.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path to the offending field, e.g. `price` or `items[0].quantity`.
    pub path: String,
    pub message: String,
}

/// Outcome of a failed form parse.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input was not even structurally a form of this type.
    #[error("malformed form input: {0}")]
    Shape(String),

    /// The input parsed but one or more fields violated their rules.
    #[error("validation failed on {} field(s)", .0.len())]
    Invalid(Vec<FieldError>),
}

/// Deserialize and validate raw form input into a typed form value.
pub fn parse_form<T>(value: serde_json::Value) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Validate,
{
    let form: T = serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))?;
    match form.validate() {
        Ok(()) => Ok(form),
        Err(errors) => Err(SchemaError::Invalid(flatten_errors(&errors))),
    }
}

/// Product create/edit form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "Product name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "coerce_f64")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "SKU Code is required"))]
    pub sku_code: String,
    #[serde(deserialize_with = "coerce_i64")]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock_quantity: i64,
    #[validate(custom(function = validate_unit))]
    pub unit: String,
    #[serde(deserialize_with = "coerce_i64")]
    #[validate(range(min = 1, message = "Wholesaler ID is required"))]
    pub wholesaler_id: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One line item of an order form. Also `Serialize`: the length rule on
/// `OrderFormData::items` records the offending value in its error params.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemForm {
    pub product_id: String,
    pub product_name: String,
    #[serde(deserialize_with = "coerce_f64")]
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be greater than 0"))]
    pub quantity: f64,
    #[serde(deserialize_with = "coerce_f64")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub total: f64,
}

/// Order creation form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormData {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Retailer is required"))]
    pub retailer_id: String,
    #[validate(length(min = 1, message = "Retailer name is required"))]
    pub retailer_name: String,
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<OrderItemForm>,
    #[serde(deserialize_with = "coerce_f64")]
    pub total_amount: f64,
    #[validate(custom(function = validate_order_status))]
    pub status: String,
    pub order_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payment entry form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFormData {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Order ID is required"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "Retailer name is required"))]
    pub retailer_name: String,
    #[serde(deserialize_with = "coerce_f64")]
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than 0"))]
    pub amount: f64,
    #[validate(custom(function = validate_payment_mode))]
    pub payment_mode: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub payment_date: String,
    #[validate(custom(function = validate_payment_status))]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One line item of an order-modification form. Price is informational here,
/// so only the quantity carries a rule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderItemForm {
    pub product_id: String,
    pub product_name: String,
    #[serde(deserialize_with = "coerce_f64")]
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be greater than 0"))]
    pub quantity: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub price: f64,
}

/// Order-modification request form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderFormData {
    pub order_id: String,
    #[validate(nested)]
    pub items: Vec<ModifyOrderItemForm>,
    #[validate(length(min = 5, message = "Please provide a reason for modification"))]
    pub reason: String,
}

/// Invoice display data. Derived entirely server-side; parsed here only for
/// structural checks before rendering.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub invoice_number: String,
    pub order_id: String,
    pub wholesaler_name: String,
    pub wholesaler_address: String,
    #[serde(default, rename = "wholesalerGST")]
    pub wholesaler_gst: Option<String>,
    pub retailer_name: String,
    pub retailer_address: String,
    #[serde(default, rename = "retailerGST")]
    pub retailer_gst: Option<String>,
    #[validate(nested)]
    pub items: Vec<OrderItemForm>,
    pub subtotal: f64,
    pub tax: f64,
    pub total_amount: f64,
    pub invoice_date: String,
}

pub const UNITS: [&str; 9] = [
    "kg", "liter", "piece", "box", "packet", "carton", "dozen", "gms", "ml",
];
pub const ORDER_STATUSES: [&str; 4] = ["pending", "approved", "rejected", "completed"];
pub const PAYMENT_MODES: [&str; 4] = ["cash", "upi", "bank_transfer", "cheque"];
pub const PAYMENT_STATUSES: [&str; 3] = ["pending", "completed", "failed"];

fn validate_unit(value: &str) -> Result<(), ValidationError> {
    in_set(value, &UNITS, "Invalid unit")
}

fn validate_order_status(value: &str) -> Result<(), ValidationError> {
    in_set(value, &ORDER_STATUSES, "Invalid order status")
}

fn validate_payment_mode(value: &str) -> Result<(), ValidationError> {
    in_set(value, &PAYMENT_MODES, "Invalid payment mode")
}

fn validate_payment_status(value: &str) -> Result<(), ValidationError> {
    in_set(value, &PAYMENT_STATUSES, "Invalid payment status")
}

fn in_set(value: &str, set: &[&str], message: &'static str) -> Result<(), ValidationError> {
    if set.contains(&value) {
        return Ok(());
    }
    let mut error = ValidationError::new("enum");
    error.message = Some(message.into());
    Err(error)
}

fn default_true() -> bool {
    true
}

/// Accept a JSON number or a numeric string, as HTML form inputs arrive as
/// text.
fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => {
            let trimmed = s.trim();
            // An empty form input coerces to zero; bound rules then report
            // on the field itself.
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                trimmed
                    .parse()
                    .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}")))
            }
        }
    }
}

/// Like `coerce_f64`, but the value must be a whole number.
fn coerce_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Num(f64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Num(f) if f.fract() == 0.0 => Ok(f as i64),
        Raw::Num(f) => Err(D::Error::custom(format!("expected an integer, got {f}"))),
        Raw::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(0)
            } else {
                trimmed
                    .parse()
                    .map_err(|_| D::Error::custom(format!("expected an integer, got {s:?}")))
            }
        }
    }
}

/// Flatten validator's nested error tree into path-qualified failures.
fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    flatten_into(errors, "", &mut out);
    out
}

fn flatten_into(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        // Paths use the JSON (camelCase) field names so the form layer can
        // map them back to its inputs.
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    out.push(FieldError {
                        path: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(nested, &path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    flatten_into(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
