use clap::Parser;
use coinbrew::application::coordinator::OrderCoordinator;
use coinbrew::domain::coin::CoinValue;
use coinbrew::domain::order::Order;
use coinbrew::domain::ports::{CoinStoreBox, OrderStoreBox, ProductCatalogBox};
use coinbrew::domain::product::Product;
use coinbrew::error::VendingError;
use coinbrew::infrastructure::in_memory::{InMemoryCatalog, InMemoryCoinStore, InMemoryOrderStore};
use coinbrew::infrastructure::seed;
use coinbrew::interfaces::csv::event_reader::{EventReader, EventType, VendingEvent};
use coinbrew::interfaces::csv::order_writer::OrderWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input events CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let coordinator = match cli.db_path {
        Some(db_path) => persistent_coordinator(db_path)?,
        None => in_memory_coordinator(),
    };

    // Process events
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    let mut current: Option<Order> = None;
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = apply_event(&coordinator, &mut current, event).await {
                    eprintln!("Error processing event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    // Output the order report
    let orders = coordinator.orders_with_products().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(orders).into_diagnostic()?;

    let summary = coordinator.depot_summary().await.into_diagnostic()?;
    eprintln!("depot: {}", summary);

    Ok(())
}

/// Applies one event to the machine. A coin event feeds the currently open
/// order; an order event starts a new one, abandoning any order still open.
async fn apply_event(
    coordinator: &OrderCoordinator,
    current: &mut Option<Order>,
    event: VendingEvent,
) -> coinbrew::error::Result<()> {
    match event.r#type {
        EventType::Order => {
            let name = event.product.ok_or_else(|| {
                VendingError::ValidationError("Order event without a product".to_string())
            })?;
            let product = product_named(coordinator, &name).await?;
            *current = Some(coordinator.place_order(&product).await?);
        }
        EventType::Coin => {
            let cents = event.cents.ok_or_else(|| {
                VendingError::ValidationError("Coin event without a value".to_string())
            })?;
            let value: CoinValue = cents.try_into()?;
            let order = current.as_mut().ok_or_else(|| {
                VendingError::ValidationError("Coin event without an open order".to_string())
            })?;
            if coordinator.insert_coin(order, value).await? {
                *current = None;
            }
        }
    }
    Ok(())
}

async fn product_named(
    coordinator: &OrderCoordinator,
    name: &str,
) -> coinbrew::error::Result<Product> {
    coordinator
        .products()
        .await?
        .into_iter()
        .find(|product| product.name == name)
        .ok_or_else(|| VendingError::ValidationError(format!("Product not available: {}", name)))
}

fn in_memory_coordinator() -> OrderCoordinator {
    let catalog: ProductCatalogBox = Box::new(InMemoryCatalog::new(seed::default_products()));
    let coin_store: CoinStoreBox = Box::new(InMemoryCoinStore::with_coins(&seed::initial_depot()));
    let order_store: OrderStoreBox = Box::new(InMemoryOrderStore::new());

    OrderCoordinator::new(catalog, coin_store, order_store)
}

#[cfg(feature = "storage-rocksdb")]
fn persistent_coordinator(db_path: PathBuf) -> Result<OrderCoordinator> {
    use coinbrew::infrastructure::rocksdb::RocksDBStore;

    // Use persistent storage (RocksDB)
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    store
        .seed_if_empty(&seed::default_products(), &seed::initial_depot())
        .into_diagnostic()?;

    // Create boxed instances for each trait
    let catalog: ProductCatalogBox = Box::new(store.clone());
    let coin_store: CoinStoreBox = Box::new(store.clone());
    let order_store: OrderStoreBox = Box::new(store);

    Ok(OrderCoordinator::new(catalog, coin_store, order_store))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn persistent_coordinator(_db_path: PathBuf) -> Result<OrderCoordinator> {
    eprintln!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(in_memory_coordinator())
}
