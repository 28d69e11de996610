use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, seq_id_newtype};
use stockroom_events::Event;
use stockroom_inventory::MaterialId;

seq_id_newtype!(
    /// Replenishment order identifier (position in the order queue, 1-based).
    OrderId
);

/// Replenishment order lifecycle.
///
/// `Pending` is the only state that accepts transitions; `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "В ожидании",
            OrderStatus::Completed => "Выполнен",
            OrderStatus::Cancelled => "Отменен",
        }
    }
}

/// Aggregate root: ReplenishmentOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplenishmentOrder {
    id: OrderId,
    material_id: MaterialId,
    material_name: String,
    quantity: i64,
    status: OrderStatus,
    date: NaiveDate,
    #[serde(skip)]
    version: u64,
    #[serde(skip)]
    created: bool,
}

impl ReplenishmentOrder {
    /// Create an empty, not-yet-placed instance.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            material_id: MaterialId::from(0),
            material_name: String::new(),
            quantity: 0,
            status: OrderStatus::Pending,
            date: NaiveDate::MIN,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    pub fn material_name(&self) -> &str {
        &self.material_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Date the order was placed.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_pending(&self) -> bool {
        self.created && self.status == OrderStatus::Pending
    }
}

impl AggregateRoot for ReplenishmentOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub material_id: MaterialId,
    pub material_name: String,
    pub quantity: i64,
    pub occurred_on: NaiveDate,
}

/// Command: CompleteOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOrder {
    pub order_id: OrderId,
    pub occurred_on: NaiveDate,
}

/// Command: CancelOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub order_id: OrderId,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    PlaceOrder(PlaceOrder),
    CompleteOrder(CompleteOrder),
    CancelOrder(CancelOrder),
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub material_id: MaterialId,
    pub material_name: String,
    pub quantity: i64,
    pub occurred_on: NaiveDate,
}

/// Event: OrderCompleted.
///
/// Carries the material and quantity so the session can translate it into a
/// stock receipt and an inbound ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: OrderId,
    pub material_id: MaterialId,
    pub material_name: String,
    pub quantity: i64,
    pub occurred_on: NaiveDate,
}

/// Event: OrderCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: OrderId,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    OrderCompleted(OrderCompleted),
    OrderCancelled(OrderCancelled),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "purchasing.order.placed",
            OrderEvent::OrderCompleted(_) => "purchasing.order.completed",
            OrderEvent::OrderCancelled(_) => "purchasing.order.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_on(&self) -> NaiveDate {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_on,
            OrderEvent::OrderCompleted(e) => e.occurred_on,
            OrderEvent::OrderCancelled(e) => e.occurred_on,
        }
    }
}

impl Aggregate for ReplenishmentOrder {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.id = e.order_id;
                self.material_id = e.material_id;
                self.material_name = e.material_name.clone();
                self.quantity = e.quantity;
                self.status = OrderStatus::Pending;
                self.date = e.occurred_on;
                self.created = true;
            }
            OrderEvent::OrderCompleted(_) => {
                self.status = OrderStatus::Completed;
            }
            OrderEvent::OrderCancelled(_) => {
                self.status = OrderStatus::Cancelled;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            OrderCommand::CompleteOrder(cmd) => self.handle_complete(cmd),
            OrderCommand::CancelOrder(cmd) => self.handle_cancel(cmd),
        }
    }
}

impl ReplenishmentOrder {
    fn ensure_pending(&self, order_id: OrderId, action: &str) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found(format!("order {order_id}")));
        }
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        if self.status != OrderStatus::Pending {
            return Err(DomainError::conflict(format!(
                "cannot {action} order {order_id}: already {}",
                self.status.as_str()
            )));
        }
        Ok(())
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("order already placed"));
        }
        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(vec![OrderEvent::OrderPlaced(OrderPlaced {
            order_id: cmd.order_id,
            material_id: cmd.material_id,
            material_name: cmd.material_name.clone(),
            quantity: cmd.quantity,
            occurred_on: cmd.occurred_on,
        })])
    }

    fn handle_complete(&self, cmd: &CompleteOrder) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_pending(cmd.order_id, "complete")?;

        Ok(vec![OrderEvent::OrderCompleted(OrderCompleted {
            order_id: cmd.order_id,
            material_id: self.material_id,
            material_name: self.material_name.clone(),
            quantity: self.quantity,
            occurred_on: cmd.occurred_on,
        })])
    }

    fn handle_cancel(&self, cmd: &CancelOrder) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_pending(cmd.order_id, "cancel")?;

        Ok(vec![OrderEvent::OrderCancelled(OrderCancelled {
            order_id: cmd.order_id,
            occurred_on: cmd.occurred_on,
        })])
    }
}
