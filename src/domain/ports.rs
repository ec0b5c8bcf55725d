use super::coin::{Coin, CoinValue};
use super::order::Order;
use super::product::Product;
use crate::error::Result;
use async_trait::async_trait;

/// The machine's coin inventory.
#[async_trait]
pub trait CoinStore: Send + Sync {
    /// Snapshot of every depot row, ordered by descending coin value.
    async fn depot(&self) -> Result<Vec<Coin>>;
    /// Adds one coin of the given value. Unknown denominations get a new row
    /// so that inserted money is never lost.
    async fn credit(&self, value: CoinValue) -> Result<()>;
    /// Removes one coin of the given value. Fails if none are left.
    async fn debit(&self, value: CoinValue) -> Result<()>;
}

/// Persisted order history.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, assigning its id. Returns the stored order.
    async fn create(&self, order: Order) -> Result<Order>;
    /// Replaces the stored state of an existing order.
    async fn update(&self, order: Order) -> Result<()>;
    /// All orders, oldest first.
    async fn all(&self) -> Result<Vec<Order>>;
}

/// The fixed list of purchasable products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// All products, ordered by name.
    async fn products(&self) -> Result<Vec<Product>>;
}

pub type CoinStoreBox = Box<dyn CoinStore>;
pub type OrderStoreBox = Box<dyn OrderStore>;
pub type ProductCatalogBox = Box<dyn ProductCatalog>;
