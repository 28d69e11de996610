//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes; to "modify"
/// one, build a new one. `StockLevel` is the main example in this workspace:
/// two levels with the same current and minimum stock are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
