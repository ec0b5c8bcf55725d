use crate::domain::coin::{Cents, join_coin_values};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::product::Product;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// One line of the order report. Coin logs are flattened to their
/// `;`-joined form so the report stays a plain rectangular CSV.
#[derive(Debug, Serialize)]
struct OrderRow {
    id: u64,
    product: String,
    created_at: DateTime<Utc>,
    inserted_values: String,
    thrown_in_cents: Cents,
    returned_values: String,
    return_cents: Cents,
    donation_cents: Cents,
    settled: bool,
}

impl From<(Order, Product)> for OrderRow {
    fn from((order, product): (Order, Product)) -> Self {
        Self {
            id: order.id.0,
            product: product.name,
            created_at: order.created_at,
            inserted_values: join_coin_values(&order.inserted_values),
            thrown_in_cents: order.thrown_in_cents,
            returned_values: join_coin_values(&order.returned_values),
            return_cents: order.return_cents,
            donation_cents: order.donation_cents,
            settled: order.status == OrderStatus::Settled,
        }
    }
}

/// Writes the order report as CSV to any `Write` destination.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    /// Creates a new `OrderWriter` targeting the given destination (e.g., Stdout).
    pub fn new(dest: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(dest),
        }
    }

    /// Serializes one row per order, pairing each order with its product.
    pub fn write_orders(&mut self, orders: Vec<(Order, Product)>) -> Result<()> {
        for entry in orders {
            self.writer.serialize(OrderRow::from(entry))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
