//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `OrderCoordinator`, the primary entry point for
//! running a purchase: catalog validation, order creation, coin insertion
//! and settlement. It owns the storage ports and ensures sequential
//! consistency by awaiting every storage operation.

pub mod coordinator;
