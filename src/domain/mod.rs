//! Domain entities and the port contracts the core depends on.
//!
//! Nothing in here touches a concrete storage implementation: the engine is
//! written against the `ports` traits and stays testable with in-memory
//! fakes.

pub mod coin;
pub mod order;
pub mod ports;
pub mod product;
