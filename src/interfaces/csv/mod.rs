//! CSV input and output for the vending machine CLI.
//!
//! The machine consumes a stream of `order` and `coin` events and reports
//! the resulting order log. Both directions go through the `csv` crate.

pub mod event_reader;
pub mod order_writer;
