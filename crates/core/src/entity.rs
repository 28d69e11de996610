//! Identity for records that are not aggregates.

/// Something addressed by a stable id for its whole lifetime.
///
/// Ledger transactions are entities: they never change after being recorded,
/// but they are still looked up and exported by id.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
