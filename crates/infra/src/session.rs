//! In-memory inventory session.
//!
//! `Stockroom` owns the material registry, the transaction ledger and the
//! order queue, and is the only place where commands are routed to aggregates.
//! Every operation follows the same pipeline:
//!
//! ```text
//! Command
//!   ↓
//! 1. Locate the target aggregate (NotFound if it does not exist)
//!   ↓
//! 2. Handle the command (pure decision logic, produces events)
//!   ↓
//! 3. Apply events, mirror them into the ledger, record them in the journal
//! ```
//!
//! Steps 1–2 run for every aggregate an operation touches before step 3 runs
//! for any of them, so a rejected command leaves the session untouched.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use stockroom_core::{Aggregate, DomainError, DomainResult, SeqId};
use stockroom_events::Journal;
use stockroom_inventory::{
    Ledger, Material, MaterialCommand, MaterialEvent, MaterialId, Movement, MovementKind,
    ORDER_RECEIPT_NOTE, ReceiveStock, RegisterMaterial, Transaction, TransactionId,
    WRITE_OFF_NOTE, WriteOff,
};
use stockroom_purchasing::{
    CancelOrder, CompleteOrder, OrderCommand, OrderEvent, OrderId, PlaceOrder,
    ReplenishmentOrder,
};

use crate::projections::Dashboard;
use crate::query::MaterialFilter;

/// Attributes of a material being added to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub name: String,
    pub description: String,
    pub current_stock: i64,
    pub min_stock: i64,
    /// Price per unit, whole currency units.
    pub price: i64,
    pub unit: String,
}

/// Today's date in UTC; the default business date for interactive use.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Handle a command and apply the resulting events to the same aggregate.
fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
{
    let events = aggregate.handle(command)?;
    for event in &events {
        aggregate.apply(event);
    }
    Ok(events)
}

fn apply_all<A: Aggregate>(aggregate: &mut A, events: &[A::Event]) {
    for event in events {
        aggregate.apply(event);
    }
}

fn rejected(operation: &'static str, err: DomainError) -> DomainError {
    warn!(operation, error = %err, "command rejected");
    err
}

#[derive(Debug, Clone, Default)]
pub struct Stockroom {
    materials: Vec<Material>,
    ledger: Ledger,
    // Insertion order; `orders()` lists newest first.
    orders: Vec<ReplenishmentOrder>,
    material_events: Journal<MaterialEvent>,
    order_events: Journal<OrderEvent>,
}

impl Stockroom {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Material registry -------------------------------------------------

    /// Add a material with the next sequential id.
    ///
    /// The opening balance is not written to the ledger.
    pub fn register_material(
        &mut self,
        draft: NewMaterial,
        on: NaiveDate,
    ) -> DomainResult<MaterialId> {
        let material_id = MaterialId::new(SeqId::next_after(self.materials.len()));
        let mut material = Material::empty(material_id);
        let command = MaterialCommand::RegisterMaterial(RegisterMaterial {
            material_id,
            name: draft.name,
            description: draft.description,
            current_stock: draft.current_stock,
            min_stock: draft.min_stock,
            price: draft.price,
            unit: draft.unit,
            occurred_on: on,
        });

        let events =
            execute(&mut material, &command).map_err(|e| rejected("register_material", e))?;

        info!(
            material_id = %material_id,
            name = material.name(),
            stock = material.current_stock(),
            status = %material.status(),
            "material registered"
        );
        self.materials.push(material);
        self.material_events.extend(events);
        Ok(material_id)
    }

    /// Deduct `quantity` from a material outside the order pipeline.
    ///
    /// The quantity is not checked against the available stock; a negative
    /// quantity increases the stock. A blank or missing note falls back to the
    /// default write-off note.
    pub fn write_off(
        &mut self,
        material_id: MaterialId,
        quantity: i64,
        note: Option<&str>,
        on: NaiveDate,
    ) -> DomainResult<TransactionId> {
        let idx = self
            .material_index(material_id)
            .map_err(|e| rejected("write_off", e))?;
        let material = &mut self.materials[idx];

        let events = execute(
            material,
            &MaterialCommand::WriteOff(WriteOff {
                material_id,
                quantity,
                occurred_on: on,
            }),
        )
        .map_err(|e| rejected("write_off", e))?;

        info!(
            material_id = %material_id,
            quantity,
            stock = material.current_stock(),
            status = %material.status(),
            "stock written off"
        );

        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(WRITE_OFF_NOTE);
        let movement = Movement {
            material_id,
            material_name: material.name().to_string(),
            kind: MovementKind::Out,
            quantity,
            date: on,
            note: note.to_string(),
        };
        let transaction_id = self.ledger.record(movement).id_typed();
        self.material_events.extend(events);
        Ok(transaction_id)
    }

    // --- Order queue -------------------------------------------------------

    /// Queue a replenishment order for an existing material.
    pub fn place_order(
        &mut self,
        material_id: MaterialId,
        quantity: i64,
        on: NaiveDate,
    ) -> DomainResult<OrderId> {
        let idx = self
            .material_index(material_id)
            .map_err(|e| rejected("place_order", e))?;
        let material_name = self.materials[idx].name().to_string();

        let order_id = OrderId::new(SeqId::next_after(self.orders.len()));
        let mut order = ReplenishmentOrder::empty(order_id);
        let events = execute(
            &mut order,
            &OrderCommand::PlaceOrder(PlaceOrder {
                order_id,
                material_id,
                material_name,
                quantity,
                occurred_on: on,
            }),
        )
        .map_err(|e| rejected("place_order", e))?;

        info!(order_id = %order_id, material_id = %material_id, quantity, "order placed");
        self.orders.push(order);
        self.order_events.extend(events);
        Ok(order_id)
    }

    /// Receive a pending order: stock goes up by the ordered quantity, an
    /// inbound ledger entry is written and the order becomes completed.
    ///
    /// Completing an order that is no longer pending is a conflict.
    pub fn complete_order(
        &mut self,
        order_id: OrderId,
        on: NaiveDate,
    ) -> DomainResult<TransactionId> {
        let order_idx = self
            .order_index(order_id)
            .map_err(|e| rejected("complete_order", e))?;
        let order_events = self.orders[order_idx]
            .handle(&OrderCommand::CompleteOrder(CompleteOrder {
                order_id,
                occurred_on: on,
            }))
            .map_err(|e| rejected("complete_order", e))?;

        let (material_id, quantity) = order_events
            .iter()
            .find_map(|e| match e {
                OrderEvent::OrderCompleted(c) => Some((c.material_id, c.quantity)),
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant("completion produced no OrderCompleted event"))?;

        let material_idx = self
            .material_index(material_id)
            .map_err(|e| rejected("complete_order", e))?;
        let material_events = self.materials[material_idx]
            .handle(&MaterialCommand::ReceiveStock(ReceiveStock {
                material_id,
                quantity,
                occurred_on: on,
            }))
            .map_err(|e| rejected("complete_order", e))?;

        // Both aggregates accepted; commit.
        let material = &mut self.materials[material_idx];
        apply_all(material, &material_events);
        apply_all(&mut self.orders[order_idx], &order_events);

        info!(
            order_id = %order_id,
            material_id = %material_id,
            quantity,
            stock = material.current_stock(),
            status = %material.status(),
            "order completed"
        );

        let movement = Movement {
            material_id,
            material_name: material.name().to_string(),
            kind: MovementKind::In,
            quantity,
            date: on,
            note: ORDER_RECEIPT_NOTE.to_string(),
        };
        let transaction_id = self.ledger.record(movement).id_typed();
        self.material_events.extend(material_events);
        self.order_events.extend(order_events);
        Ok(transaction_id)
    }

    /// Cancel a pending order. No stock or ledger effect.
    pub fn cancel_order(&mut self, order_id: OrderId, on: NaiveDate) -> DomainResult<()> {
        let idx = self
            .order_index(order_id)
            .map_err(|e| rejected("cancel_order", e))?;
        let events = execute(
            &mut self.orders[idx],
            &OrderCommand::CancelOrder(CancelOrder {
                order_id,
                occurred_on: on,
            }),
        )
        .map_err(|e| rejected("cancel_order", e))?;

        info!(order_id = %order_id, "order cancelled");
        self.order_events.extend(events);
        Ok(())
    }

    // --- Queries -----------------------------------------------------------

    /// Registry order (ascending id).
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, material_id: MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id_typed() == material_id)
    }

    /// Materials at or below their minimum stock.
    pub fn critical_materials(&self) -> Vec<&Material> {
        self.materials.iter().filter(|m| m.is_critical()).collect()
    }

    pub fn search(&self, filter: &MaterialFilter) -> Vec<&Material> {
        filter.apply(&self.materials)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Newest first.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.ledger.iter()
    }

    /// Movements of one material, newest first.
    pub fn material_transactions(
        &self,
        material_id: MaterialId,
    ) -> impl Iterator<Item = &Transaction> {
        self.ledger.for_material(material_id)
    }

    /// Newest first.
    pub fn orders(&self) -> impl Iterator<Item = &ReplenishmentOrder> {
        self.orders.iter().rev()
    }

    pub fn order(&self, order_id: OrderId) -> Option<&ReplenishmentOrder> {
        self.orders.iter().find(|o| o.id_typed() == order_id)
    }

    pub fn pending_orders(&self) -> impl Iterator<Item = &ReplenishmentOrder> {
        self.orders().filter(|o| o.is_pending())
    }

    pub fn material_history(&self) -> &Journal<MaterialEvent> {
        &self.material_events
    }

    pub fn order_history(&self) -> &Journal<OrderEvent> {
        &self.order_events
    }

    /// Recompute every dashboard figure from the current lists.
    pub fn dashboard(&self) -> Dashboard {
        let dashboard = Dashboard::compute(&self.materials, &self.ledger, self.orders());
        debug!(
            materials = dashboard.total_materials,
            critical = dashboard.critical_count,
            total_value = dashboard.total_value,
            "dashboard recomputed"
        );
        dashboard
    }

    /// Append a historical movement without touching stock (used to load the
    /// demo history).
    pub(crate) fn record_history(&mut self, movement: Movement) -> TransactionId {
        self.ledger.record(movement).id_typed()
    }

    fn material_index(&self, material_id: MaterialId) -> DomainResult<usize> {
        self.materials
            .iter()
            .position(|m| m.id_typed() == material_id)
            .ok_or_else(|| DomainError::not_found(format!("material {material_id}")))
    }

    fn order_index(&self, order_id: OrderId) -> DomainResult<usize> {
        self.orders
            .iter()
            .position(|o| o.id_typed() == order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))
    }
}
