use crate::domain::coin::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable product with a fixed price. Immutable once defined.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Cents,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price: Cents::new(price),
        }
    }
}
