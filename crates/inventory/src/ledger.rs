//! Transaction ledger: append-only log of stock movements.
//!
//! Entries are produced by the session from accepted write-offs and order
//! completions; nothing outside this module can edit an entry once recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, SeqId, seq_id_newtype};

use crate::material::MaterialId;

seq_id_newtype!(
    /// Transaction identifier (position in the ledger, 1-based).
    TransactionId
);

/// Default note for write-offs recorded without one.
pub const WRITE_OFF_NOTE: &str = "Списание";

/// Note attached to receipts generated by order completion.
pub const ORDER_RECEIPT_NOTE: &str = "Поступление по заказу";

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MovementKind::In => "Приход",
            MovementKind::Out => "Расход",
        }
    }
}

/// One recorded stock movement. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    material_id: MaterialId,
    material_name: String,
    kind: MovementKind,
    quantity: i64,
    date: NaiveDate,
    note: String,
}

impl Transaction {
    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    /// Material name at the time of the movement.
    pub fn material_name(&self) -> &str {
        &self.material_name
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for [`Ledger::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub material_id: MaterialId,
    pub material_name: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub date: NaiveDate,
    pub note: String,
}

/// Sums of inbound and outbound quantities.
///
/// Held as `i128`: a ledger has at most `u32::MAX` entries of `i64` each, so
/// neither side can overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MovementTotals {
    #[serde(rename = "in")]
    pub inbound: i128,
    #[serde(rename = "out")]
    pub outbound: i128,
}

impl MovementTotals {
    pub fn net(&self) -> i128 {
        self.inbound - self.outbound
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    // Insertion order; readers get the reverse.
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movement and return the stored entry.
    pub fn record(&mut self, movement: Movement) -> &Transaction {
        let id = TransactionId::new(SeqId::next_after(self.entries.len()));
        self.entries.push(Transaction {
            id,
            material_id: movement.material_id,
            material_name: movement.material_name,
            kind: movement.kind,
            quantity: movement.quantity,
            date: movement.date,
            note: movement.note,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().rev()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|t| t.id() == &id)
    }

    pub fn for_material(&self, material_id: MaterialId) -> impl Iterator<Item = &Transaction> {
        self.iter().filter(move |t| t.material_id == material_id)
    }

    pub fn totals(&self) -> MovementTotals {
        self.entries
            .iter()
            .fold(MovementTotals::default(), |mut acc, t| {
                match t.kind {
                    MovementKind::In => acc.inbound += i128::from(t.quantity),
                    MovementKind::Out => acc.outbound += i128::from(t.quantity),
                }
                acc
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn movement(material: u32, kind: MovementKind, quantity: i64, d: u32) -> Movement {
        Movement {
            material_id: MaterialId::from(material),
            material_name: format!("material {material}"),
            kind,
            quantity,
            date: day(d),
            note: String::new(),
        }
    }

    #[test]
    fn ids_are_sequential_and_listing_is_newest_first() {
        let mut ledger = Ledger::new();
        ledger.record(movement(1, MovementKind::In, 100, 10));
        ledger.record(movement(4, MovementKind::Out, 5, 12));
        let third = ledger.record(movement(2, MovementKind::Out, 2, 13)).id_typed();

        assert_eq!(third, TransactionId::from(3));
        let ids: Vec<u32> = ledger.iter().map(|t| t.id_typed().get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(ledger.get(third).unwrap().material_name(), "material 2");
    }

    #[test]
    fn totals_split_by_direction() {
        let mut ledger = Ledger::new();
        ledger.record(movement(1, MovementKind::In, 100, 10));
        ledger.record(movement(4, MovementKind::Out, 5, 12));
        ledger.record(movement(2, MovementKind::Out, 2, 13));

        let totals = ledger.totals();
        assert_eq!(totals.inbound, 100);
        assert_eq!(totals.outbound, 7);
        assert_eq!(totals.net(), 93);
    }

    #[test]
    fn totals_hold_sums_beyond_i64() {
        let mut ledger = Ledger::new();
        ledger.record(movement(1, MovementKind::Out, i64::MAX, 10));
        ledger.record(movement(1, MovementKind::Out, i64::MAX, 11));
        ledger.record(movement(1, MovementKind::In, i64::MIN, 12));

        let totals = ledger.totals();
        assert_eq!(totals.outbound, 2 * i128::from(i64::MAX));
        assert_eq!(totals.inbound, i128::from(i64::MIN));
        assert_eq!(totals.net(), i128::from(i64::MIN) - 2 * i128::from(i64::MAX));
    }

    #[test]
    fn filters_by_material() {
        let mut ledger = Ledger::new();
        ledger.record(movement(1, MovementKind::In, 100, 10));
        ledger.record(movement(2, MovementKind::Out, 5, 12));
        ledger.record(movement(1, MovementKind::Out, 3, 13));

        let quantities: Vec<i64> = ledger
            .for_material(MaterialId::from(1))
            .map(Transaction::quantity)
            .collect();
        assert_eq!(quantities, vec![3, 100]);
        assert!(ledger.get(TransactionId::from(4)).is_none());
    }
}
