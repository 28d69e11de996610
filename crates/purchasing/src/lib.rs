//! Purchasing domain module (replenishment orders).
//!
//! Business rules for the order queue, implemented as deterministic domain
//! logic (no IO, no storage).

pub mod order;

pub use order::{
    CancelOrder, CompleteOrder, OrderCancelled, OrderCommand, OrderCompleted, OrderEvent,
    OrderId, OrderPlaced, OrderStatus, PlaceOrder, ReplenishmentOrder,
};
