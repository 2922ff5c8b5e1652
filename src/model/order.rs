// Order types - the checkout half of the data model
//
// An order is assembled from two independently supplied fragments:
// `OrderDetails` (payment + address, created when checkout starts) and
// `ContactInfo` (email + phone, supplied on form submit). The order
// controller combines them with the current basket snapshot; the combined
// `Order` is never partially valid.

use crate::model::BasketLine;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of supported payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Flip to the other method (the form's left/right toggle).
    pub fn toggled(self) -> Self {
        match self {
            PaymentMethod::Card => PaymentMethod::Cash,
            PaymentMethod::Cash => PaymentMethod::Card,
        }
    }
}

/// Payment method and delivery address for the checkout in progress.
///
/// The address may be empty while completion is pending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub payment: PaymentMethod,
    pub address: String,
}

/// Buyer contact fields. Free text; validation belongs to the form layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Line descriptor carried inside an assembled order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub title: String,
    pub item_count: u32,
}

/// An order total is numeric only when every line has a numeric price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderTotal {
    Amount(Decimal),
    Unavailable,
}

impl OrderTotal {
    /// Sum a basket snapshot. Any priced-unavailable product makes the
    /// whole total unavailable rather than silently dropping the line.
    pub fn of_lines(lines: &[BasketLine]) -> Self {
        let mut sum = Decimal::ZERO;
        for line in lines {
            match line.product.price {
                Some(price) => sum += price * Decimal::from(line.item_count),
                None => return OrderTotal::Unavailable,
            }
        }
        OrderTotal::Amount(sum)
    }
}

impl fmt::Display for OrderTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTotal::Amount(amount) => write!(f, "{} cr", amount),
            OrderTotal::Unavailable => write!(f, "—"),
        }
    }
}

/// The union of both checkout fragments plus the basket-derived items.
///
/// Constructed only once `OrderDetails` and `ContactInfo` have both been
/// recorded in the same checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub payment: PaymentMethod,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: OrderTotal,
    pub items: Vec<OrderItem>,
    pub assembled_at: DateTime<Utc>,
}

impl Order {
    pub fn assemble(details: &OrderDetails, contact: &ContactInfo, lines: &[BasketLine]) -> Self {
        Self {
            payment: details.payment,
            address: details.address.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            total: OrderTotal::of_lines(lines),
            items: lines
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product.id.clone(),
                    title: line.product.title.clone(),
                    item_count: line.item_count,
                })
                .collect(),
            assembled_at: Utc::now(),
        }
    }
}

/// Field name to human-readable message, for form-rendering views only.
/// A BTreeMap keeps render order deterministic.
pub type FormErrors = BTreeMap<&'static str, String>;
