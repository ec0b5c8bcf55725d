use crate::domain::coin::{Cents, Coin, CoinValue, join_coin_values, parse_coin_values};
use crate::domain::product::{Product, ProductId};
use crate::error::VendingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Open,
    Settled,
}

/// One purchase transaction: the product it is bound to, the coins thrown in
/// so far, and, once settled, the coins handed back plus any donation
/// remainder the depot could not pay out.
///
/// Orders are `Open` while they accept coins and become `Settled` exactly
/// once, on the insertion that first reaches the product price. A settled
/// order is never mutated again.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    /// Assigned by the order store when the order is first persisted.
    pub id: OrderId,
    /// The product this order was created for. Fixed at creation.
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
    /// Every coin value inserted, in insertion order.
    #[serde(
        serialize_with = "serialize_coin_log",
        deserialize_with = "deserialize_coin_log"
    )]
    pub inserted_values: Vec<CoinValue>,
    /// Running sum of `inserted_values`.
    pub thrown_in_cents: Cents,
    /// Coin values dispensed as change, in dispensing order (highest first).
    #[serde(
        serialize_with = "serialize_coin_log",
        deserialize_with = "deserialize_coin_log"
    )]
    pub returned_values: Vec<CoinValue>,
    /// Overpayment owed back to the customer, fixed by the sufficient insertion.
    pub return_cents: Cents,
    /// The part of `return_cents` the depot could not pay out.
    pub donation_cents: Cents,
    #[serde(
        rename = "settled",
        serialize_with = "serialize_settled",
        deserialize_with = "deserialize_settled"
    )]
    pub status: OrderStatus,
}

fn serialize_coin_log<S>(values: &[CoinValue], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&join_coin_values(values))
}

fn deserialize_coin_log<'de, D>(deserializer: D) -> Result<Vec<CoinValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    parse_coin_values(&encoded).map_err(serde::de::Error::custom)
}

fn serialize_settled<S>(status: &OrderStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(*status == OrderStatus::Settled)
}

fn deserialize_settled<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let settled = bool::deserialize(deserializer)?;
    if settled {
        Ok(OrderStatus::Settled)
    } else {
        Ok(OrderStatus::Open)
    }
}

impl Order {
    pub fn new(product: &Product) -> Self {
        Self {
            id: OrderId::default(),
            product_id: product.id,
            created_at: Utc::now(),
            inserted_values: Vec::new(),
            thrown_in_cents: Cents::ZERO,
            returned_values: Vec::new(),
            return_cents: Cents::ZERO,
            donation_cents: Cents::ZERO,
            status: OrderStatus::Open,
        }
    }

    /// Accepts one coin. `price` is the price of the product the order was
    /// created for; the caller resolves it from the catalog.
    ///
    /// Returns `Ok(true)` once the accumulated insertions reach the price,
    /// fixing `return_cents`; the caller must settle next. Returns
    /// `Ok(false)` while more coins are needed. Inserting into a settled
    /// order is a caller bug and fails with `OrderSettledError`.
    pub fn insert_coin(&mut self, value: CoinValue, price: Cents) -> Result<bool, VendingError> {
        if self.status == OrderStatus::Settled {
            return Err(VendingError::OrderSettledError(self.id));
        }

        self.inserted_values.push(value);
        self.thrown_in_cents += value.into();

        let diff = self.thrown_in_cents - price;
        if diff >= Cents::ZERO {
            self.return_cents = diff;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Pays out `return_cents` from the given depot snapshot and transitions
    /// the order to `Settled`.
    ///
    /// Single greedy pass: sorts the slice descending by value in place, then
    /// takes coins from each denomination while one is available and still
    /// fits the remaining amount. There is no backtracking: whatever cannot
    /// be paid out this way becomes `donation_cents` and stays in the depot.
    /// The snapshot counts are decremented as coins are taken; committing
    /// those decrements to the store is the caller's job.
    pub fn settle(&mut self, coins: &mut [Coin]) -> Result<(), VendingError> {
        if self.status == OrderStatus::Settled {
            return Err(VendingError::OrderSettledError(self.id));
        }

        coins.sort_by(|a, b| b.value.cmp(&a.value));

        let mut remaining = self.return_cents;
        for coin in coins.iter_mut() {
            while coin.count > 0 && remaining - coin.value.cents() >= Cents::ZERO {
                self.returned_values.push(coin.value);
                remaining -= coin.value.cents();
                coin.count -= 1;
            }
        }

        self.donation_cents = remaining;
        self.status = OrderStatus::Settled;
        Ok(())
    }
}
