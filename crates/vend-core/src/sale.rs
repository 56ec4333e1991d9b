//! # Sales
//!
//! Record of a completed purchase. The session keeps these in memory only.

use crate::product::{Price, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dispensed product and the money that changed hands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique sale ID (generated)
    pub id: Uuid,

    /// Selection code
    pub code: String,

    /// Product name as shown at the time of sale
    pub name: String,

    /// Price at the moment of sale
    pub price: Price,

    /// Amount the buyer inserted
    pub paid: Price,

    /// Change returned
    pub change: Price,

    /// Whether this was an add-on to a previous purchase
    #[serde(default)]
    pub add_on: bool,

    /// Sale timestamp
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Record a sale of `product` for `paid`.
    ///
    /// Returns `None` when the payment does not cover the price.
    pub fn record(product: &Product, paid: Price) -> Option<Self> {
        let change = paid.checked_change(product.price)?;
        Some(Self {
            id: Uuid::new_v4(),
            code: product.code.clone(),
            name: product.name.clone(),
            price: product.price,
            paid,
            change,
            add_on: false,
            sold_at: Utc::now(),
        })
    }

    /// Builder: mark as add-on
    pub fn as_add_on(mut self) -> Self {
        self.add_on = true;
        self
    }
}

/// Sum of the prices of `sales`
pub fn revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Price {
    Price::from_cents(sales.into_iter().map(|s| s.price.amount).sum())
}
