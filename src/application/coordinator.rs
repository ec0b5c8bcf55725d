use crate::domain::coin::{Coin, CoinValue};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{CoinStoreBox, OrderStoreBox, ProductCatalogBox};
use crate::domain::product::{Product, ProductId};
use crate::error::{Result, VendingError};
use std::collections::HashMap;

/// Sequences one purchase at a time: catalog lookup, order creation, coin
/// insertion and the settlement commit.
///
/// `OrderCoordinator` owns the storage backends behind their port traits and
/// awaits every storage operation, so a single order's Open → Settled loop is
/// strictly sequential. Nothing serializes two interleaved orders against the
/// shared depot; callers run one order to completion before starting the next.
pub struct OrderCoordinator {
    catalog: ProductCatalogBox,
    coin_store: CoinStoreBox,
    order_store: OrderStoreBox,
}

impl OrderCoordinator {
    /// Creates a new `OrderCoordinator` instance.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The product catalog.
    /// * `coin_store` - The coin depot.
    /// * `order_store` - The store for order history.
    pub fn new(
        catalog: ProductCatalogBox,
        coin_store: CoinStoreBox,
        order_store: OrderStoreBox,
    ) -> Self {
        Self {
            catalog,
            coin_store,
            order_store,
        }
    }

    /// All products, ordered by name.
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.catalog.products().await
    }

    /// The current depot content, ordered by descending coin value.
    pub async fn coin_depot(&self) -> Result<Vec<Coin>> {
        self.coin_store.depot().await
    }

    /// Creates and persists a new order for the given product.
    ///
    /// Fails with `ValidationError` if the product is not in the catalog;
    /// nothing is created in that case.
    pub async fn place_order(&self, product: &Product) -> Result<Order> {
        let products = self.catalog.products().await?;
        if !products.contains(product) {
            return Err(VendingError::ValidationError(format!(
                "Product not available: {}",
                product.name
            )));
        }

        self.order_store.create(Order::new(product)).await
    }

    /// Feeds one coin into an open order.
    ///
    /// The coin is credited to the depot before the sufficiency decision, so
    /// the change pass may hand the same coin straight back out. When the
    /// insertion reaches the product price, the order is settled against the
    /// depot, and `Ok(true)` is returned. The order is persisted after every
    /// insertion, so an abandoned order keeps the coins it swallowed.
    pub async fn insert_coin(&self, order: &mut Order, value: CoinValue) -> Result<bool> {
        if order.status == OrderStatus::Settled {
            return Err(VendingError::OrderSettledError(order.id));
        }
        let product = self.product_for(order.product_id).await?;

        self.coin_store.credit(value).await?;
        let finished = order.insert_coin(value, product.price)?;

        if finished {
            let mut coins = self.coin_store.depot().await?;
            order.settle(&mut coins)?;
            // Two separate commits; no transaction spans the depot and the
            // order store.
            for value in &order.returned_values {
                self.coin_store.debit(*value).await?;
            }
        }
        self.order_store.update(order.clone()).await?;

        Ok(finished)
    }

    /// The depot content as a display string: `"<count>*<value>"` per
    /// denomination, descending, joined by `" + "`.
    pub async fn depot_summary(&self) -> Result<String> {
        let coins = self.coin_store.depot().await?;
        Ok(coins
            .iter()
            .map(Coin::to_string)
            .collect::<Vec<_>>()
            .join(" + "))
    }

    /// The full order history, each order joined with its product.
    pub async fn orders_with_products(&self) -> Result<Vec<(Order, Product)>> {
        let products: HashMap<ProductId, Product> = self
            .catalog
            .products()
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        self.order_store
            .all()
            .await?
            .into_iter()
            .map(|order| {
                let product = products.get(&order.product_id).cloned().ok_or_else(|| {
                    VendingError::ValidationError(format!(
                        "Order {} references unknown product {}",
                        order.id, order.product_id
                    ))
                })?;
                Ok((order, product))
            })
            .collect()
    }

    async fn product_for(&self, id: ProductId) -> Result<Product> {
        self.catalog
            .products()
            .await?
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| {
                VendingError::ValidationError(format!("Unknown product id: {id}"))
            })
    }
}
