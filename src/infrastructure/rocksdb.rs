use crate::domain::coin::{Coin, CoinValue};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{CoinStore, OrderStore, ProductCatalog};
use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for the coin depot.
pub const CF_COINS: &str = "coins";
/// Column Family for the order log.
pub const CF_ORDERS: &str = "orders";
/// Column Family for the product catalog.
pub const CF_PRODUCTS: &str = "products";

/// A persistent store implementation using RocksDB.
///
/// Handles storage for coins, orders and products using separate Column
/// Families, so the depot, the order log and the catalog can be scanned
/// independently. Keys are big-endian encoded, which keeps the natural
/// ordering of denominations and order ids intact on disk.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("coins", "orders" and
    /// "products") exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_coins = ColumnFamilyDescriptor::new(CF_COINS, Options::default());
        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_coins, cf_orders, cf_products])?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Provisions the catalog and the depot on first use.
    ///
    /// A database that already holds products is left untouched, so coin
    /// counts and orders accumulated in earlier runs survive.
    pub fn seed_if_empty(&self, products: &[Product], coins: &[Coin]) -> Result<()> {
        let cf_products = self.cf(CF_PRODUCTS)?;

        let mut iter = self.db.iterator_cf(cf_products, rocksdb::IteratorMode::Start);
        if iter.next().is_some() {
            return Ok(());
        }

        for product in products {
            let value = to_json(product)?;
            self.db.put_cf(&cf_products, product.id.0.to_be_bytes(), value)?;
        }

        let cf_coins = self.cf(CF_COINS)?;
        for coin in coins {
            let value = to_json(coin)?;
            self.db
                .put_cf(&cf_coins, coin.value.cents().0.to_be_bytes(), value)?;
        }

        Ok(())
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            VendingError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        VendingError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {}", e),
        )))
    })
}

fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        VendingError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl CoinStore for RocksDBStore {
    async fn depot(&self) -> Result<Vec<Coin>> {
        let cf = self.cf(CF_COINS)?;

        let mut coins = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::End);

        for item in iter {
            let (_key, value) = item.map_err(|e| {
                VendingError::InternalError(Box::new(std::io::Error::other(format!(
                    "RocksDB iteration error: {}",
                    e
                ))))
            })?;
            coins.push(from_json(&value)?);
        }

        Ok(coins)
    }

    async fn credit(&self, value: CoinValue) -> Result<()> {
        let cf = self.cf(CF_COINS)?;
        let key = value.cents().0.to_be_bytes();

        let mut coin = match self.db.get_cf(&cf, key)? {
            Some(bytes) => from_json::<Coin>(&bytes)?,
            None => Coin::new(value, 0),
        };
        coin.count += 1;

        self.db.put_cf(&cf, key, to_json(&coin)?)?;

        Ok(())
    }

    async fn debit(&self, value: CoinValue) -> Result<()> {
        let cf = self.cf(CF_COINS)?;
        let key = value.cents().0.to_be_bytes();

        let mut coin = match self.db.get_cf(&cf, key)? {
            Some(bytes) => from_json::<Coin>(&bytes)?,
            None => {
                return Err(VendingError::ValidationError(format!(
                    "No {} cent coins left in the depot",
                    value
                )));
            }
        };
        if coin.count == 0 {
            return Err(VendingError::ValidationError(format!(
                "No {} cent coins left in the depot",
                value
            )));
        }
        coin.count -= 1;

        self.db.put_cf(&cf, key, to_json(&coin)?)?;

        Ok(())
    }
}

#[async_trait]
impl OrderStore for RocksDBStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let cf = self.cf(CF_ORDERS)?;

        // The highest key so far determines the next order id.
        let mut iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::End);
        let next_id = match iter.next() {
            Some(item) => {
                let (key, _value) = item.map_err(|e| {
                    VendingError::InternalError(Box::new(std::io::Error::other(format!(
                        "RocksDB iteration error: {}",
                        e
                    ))))
                })?;
                let bytes: [u8; 8] = key.as_ref().try_into().map_err(|_| {
                    VendingError::InternalError(Box::new(std::io::Error::other(
                        "Malformed order key",
                    )))
                })?;
                u64::from_be_bytes(bytes) + 1
            }
            None => 1,
        };

        let mut order = order;
        order.id = OrderId(next_id);

        self.db
            .put_cf(&cf, next_id.to_be_bytes(), to_json(&order)?)?;

        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<()> {
        let cf = self.cf(CF_ORDERS)?;

        self.db
            .put_cf(&cf, order.id.0.to_be_bytes(), to_json(&order)?)?;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ORDERS)?;

        let mut orders = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (_key, value) = item.map_err(|e| {
                VendingError::InternalError(Box::new(std::io::Error::other(format!(
                    "RocksDB iteration error: {}",
                    e
                ))))
            })?;
            orders.push(from_json(&value)?);
        }

        Ok(orders)
    }
}

#[async_trait]
impl ProductCatalog for RocksDBStore {
    async fn products(&self) -> Result<Vec<Product>> {
        let cf = self.cf(CF_PRODUCTS)?;

        let mut products: Vec<Product> = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (_key, value) = item.map_err(|e| {
                VendingError::InternalError(Box::new(std::io::Error::other(format!(
                    "RocksDB iteration error: {}",
                    e
                ))))
            })?;
            products.push(from_json(&value)?);
        }

        products.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(products)
    }
}
