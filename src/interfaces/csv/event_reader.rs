use crate::error::{Result, VendingError};
use serde::Deserialize;
use std::io::Read;

/// What happened at the machine: a drink was picked or a coin was thrown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Order,
    Coin,
}

/// A single row of the event stream.
///
/// `order` rows carry the product name, `coin` rows carry the coin value in
/// cents. The other column is left empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VendingEvent {
    pub r#type: EventType,
    pub product: Option<String>,
    pub cents: Option<i64>,
}

/// Reads vending events from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<VendingEvent>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    ///
    /// This allows for processing large files in a streaming fashion without loading
    /// the entire dataset into memory.
    pub fn events(self) -> impl Iterator<Item = Result<VendingEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
