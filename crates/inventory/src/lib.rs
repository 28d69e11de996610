//! Inventory domain module: material registry items and the stock ledger.
//!
//! Business rules only (no IO, no storage). The session in `stockroom-infra`
//! composes these types.

pub mod ledger;
pub mod material;

pub use ledger::{
    Ledger, Movement, MovementKind, MovementTotals, ORDER_RECEIPT_NOTE, Transaction,
    TransactionId, WRITE_OFF_NOTE,
};
pub use material::{
    Material, MaterialCommand, MaterialEvent, MaterialId, MaterialRegistered, ReceiveStock,
    RegisterMaterial, StockLevel, StockReceived, StockStatus, StockWrittenOff, WriteOff,
};
