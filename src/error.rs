use crate::domain::order::OrderId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VendingError>;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Order {0} is already settled")]
    OrderSettledError(OrderId),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
}
