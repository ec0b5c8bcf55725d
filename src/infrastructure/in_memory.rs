use crate::domain::coin::{Coin, CoinValue};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{CoinStore, OrderStore, ProductCatalog};
use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Coin depot held in a `BTreeMap` keyed by denomination, so iteration
/// order is the denomination order and `depot` only has to reverse it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCoinStore {
    coins: Arc<RwLock<BTreeMap<CoinValue, u32>>>,
}

impl InMemoryCoinStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(coins: &[Coin]) -> Self {
        let map = coins
            .iter()
            .map(|coin| (coin.value, coin.count))
            .collect::<BTreeMap<_, _>>();
        Self {
            coins: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl CoinStore for InMemoryCoinStore {
    async fn depot(&self) -> Result<Vec<Coin>> {
        let coins = self.coins.read().await;
        Ok(coins
            .iter()
            .rev()
            .map(|(value, count)| Coin::new(*value, *count))
            .collect())
    }

    async fn credit(&self, value: CoinValue) -> Result<()> {
        let mut coins = self.coins.write().await;
        *coins.entry(value).or_insert(0) += 1;
        Ok(())
    }

    async fn debit(&self, value: CoinValue) -> Result<()> {
        let mut coins = self.coins.write().await;
        match coins.get_mut(&value) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(VendingError::ValidationError(format!(
                "No {} cent coins left in the depot",
                value
            ))),
        }
    }
}

/// Order log with ids handed out by an atomic counter, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<BTreeMap<OrderId, Order>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let mut order = order;
        order.id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// Fixed product list, sorted by name once at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            products: Arc::new(products),
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(value: i64) -> CoinValue {
        CoinValue::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_depot_is_sorted_from_highest_denomination() {
        let store = InMemoryCoinStore::with_coins(&[
            Coin::new(cents(5), 3),
            Coin::new(cents(200), 3),
            Coin::new(cents(50), 3),
        ]);

        let depot = store.depot().await.unwrap();
        let values: Vec<i64> = depot.iter().map(|c| c.value.cents().0).collect();
        assert_eq!(values, vec![200, 50, 5]);
    }

    #[tokio::test]
    async fn test_credit_and_debit_adjust_counts() {
        let store = InMemoryCoinStore::with_coins(&[Coin::new(cents(10), 1)]);

        store.credit(cents(10)).await.unwrap();
        store.debit(cents(10)).await.unwrap();
        store.debit(cents(10)).await.unwrap();

        let depot = store.depot().await.unwrap();
        assert_eq!(depot, vec![Coin::new(cents(10), 0)]);
    }

    #[tokio::test]
    async fn test_credit_registers_unknown_denomination() {
        let store = InMemoryCoinStore::new();

        store.credit(cents(25)).await.unwrap();

        let depot = store.depot().await.unwrap();
        assert_eq!(depot, vec![Coin::new(cents(25), 1)]);
    }

    #[tokio::test]
    async fn test_debit_fails_on_exhausted_denomination() {
        let store = InMemoryCoinStore::with_coins(&[Coin::new(cents(50), 0)]);

        let result = store.debit(cents(50)).await;
        assert!(matches!(result, Err(VendingError::ValidationError(_))));

        let result = store.debit(cents(5)).await;
        assert!(matches!(result, Err(VendingError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_order_store_assigns_sequential_ids() {
        let store = InMemoryOrderStore::new();
        let product = Product::new(1, "Espresso", 50);

        let first = store.create(Order::new(&product)).await.unwrap();
        let second = store.create(Order::new(&product)).await.unwrap();

        assert_eq!(first.id, OrderId(1));
        assert_eq!(second.id, OrderId(2));
        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_order_store_update_replaces_existing_order() {
        let store = InMemoryOrderStore::new();
        let product = Product::new(1, "Espresso", 50);

        let mut order = store.create(Order::new(&product)).await.unwrap();
        order.insert_coin(cents(50), product.price).unwrap();
        store.update(order.clone()).await.unwrap();

        let stored = store.all().await.unwrap();
        assert_eq!(stored, vec![order]);
    }

    #[tokio::test]
    async fn test_catalog_sorts_products_by_name() {
        let catalog = InMemoryCatalog::new(vec![
            Product::new(2, "Ristretto", 45),
            Product::new(1, "Cappuccino", 65),
        ]);

        let products = catalog.products().await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cappuccino", "Ristretto"]);
    }
}
