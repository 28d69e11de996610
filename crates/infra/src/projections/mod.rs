//! Read-side projections.
//!
//! Projections are recomputed from the session's lists on demand; they hold
//! no state of their own and are never written back.

pub mod dashboard;

pub use dashboard::{Dashboard, OrderStats, PieSlice, StatusCount, StockPoint};
