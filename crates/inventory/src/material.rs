use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, ValueObject, seq_id_newtype};
use stockroom_events::Event;

seq_id_newtype!(
    /// Material identifier (position in the registry, 1-based).
    MaterialId
);

/// Stock status shown next to every material.
///
/// Never stored independently: it is always `StockStatus::derive` of the
/// material's current and minimum stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    Medium,
    Low,
}

impl StockStatus {
    /// Display order used by histograms and charts.
    pub const ALL: [StockStatus; 3] = [StockStatus::InStock, StockStatus::Medium, StockStatus::Low];

    /// `low` at or below the minimum, `medium` up to 1.5× the minimum,
    /// `in-stock` above that.
    pub fn derive(current: i64, minimum: i64) -> Self {
        if current <= minimum {
            StockStatus::Low
        } else if i128::from(current) * 2 <= i128::from(minimum) * 3 {
            StockStatus::Medium
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::Medium => "medium",
            StockStatus::Low => "low",
        }
    }

    /// Human-facing label used in exports and charts.
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "В наличии",
            StockStatus::Medium => "Средний",
            StockStatus::Low => "Низкий",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in-stock" => Ok(StockStatus::InStock),
            "medium" => Ok(StockStatus::Medium),
            "low" => Ok(StockStatus::Low),
            other => Err(DomainError::validation(format!("unknown stock status: {other}"))),
        }
    }
}

/// Current stock against its replenishment threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub current: i64,
    pub minimum: i64,
}

impl ValueObject for StockLevel {}

impl StockLevel {
    pub fn new(current: i64, minimum: i64) -> Self {
        Self { current, minimum }
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::derive(self.current, self.minimum)
    }

    /// Critical: at or below the minimum threshold.
    pub fn is_critical(&self) -> bool {
        self.current <= self.minimum
    }
}

/// Aggregate root: Material (one row of the registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    id: MaterialId,
    name: String,
    description: String,
    current_stock: i64,
    min_stock: i64,
    price: i64,
    unit: String,
    status: StockStatus,
    #[serde(skip)]
    version: u64,
    #[serde(skip)]
    created: bool,
}

impl Material {
    /// Create an empty, not-yet-registered instance.
    pub fn empty(id: MaterialId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            current_stock: 0,
            min_stock: 0,
            price: 0,
            unit: String::new(),
            status: StockStatus::derive(0, 0),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> MaterialId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn current_stock(&self) -> i64 {
        self.current_stock
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    /// Price per unit, whole currency units.
    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    pub fn level(&self) -> StockLevel {
        StockLevel::new(self.current_stock, self.min_stock)
    }

    pub fn is_critical(&self) -> bool {
        self.level().is_critical()
    }

    /// `current_stock × price`, exact for any pair of `i64` inputs.
    pub fn stock_value(&self) -> i128 {
        i128::from(self.current_stock) * i128::from(self.price)
    }

    pub fn is_registered(&self) -> bool {
        self.created
    }

    fn set_stock(&mut self, current: i64) {
        self.current_stock = current;
        self.status = StockStatus::derive(self.current_stock, self.min_stock);
    }
}

impl AggregateRoot for Material {
    type Id = MaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterMaterial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMaterial {
    pub material_id: MaterialId,
    pub name: String,
    pub description: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub price: i64,
    pub unit: String,
    pub occurred_on: NaiveDate,
}

/// Command: WriteOff.
///
/// The quantity is deliberately unconstrained: negative values increase the
/// stock and the result may drop below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOff {
    pub material_id: MaterialId,
    pub quantity: i64,
    pub occurred_on: NaiveDate,
}

/// Command: ReceiveStock (goods arriving through a replenishment order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveStock {
    pub material_id: MaterialId,
    pub quantity: i64,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCommand {
    RegisterMaterial(RegisterMaterial),
    WriteOff(WriteOff),
    ReceiveStock(ReceiveStock),
}

/// Event: MaterialRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRegistered {
    pub material_id: MaterialId,
    pub name: String,
    pub description: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub price: i64,
    pub unit: String,
    pub occurred_on: NaiveDate,
}

/// Event: StockWrittenOff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockWrittenOff {
    pub material_id: MaterialId,
    pub quantity: i64,
    /// Stock after the write-off.
    pub current_stock: i64,
    pub occurred_on: NaiveDate,
}

/// Event: StockReceived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReceived {
    pub material_id: MaterialId,
    pub quantity: i64,
    /// Stock after the receipt.
    pub current_stock: i64,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialEvent {
    MaterialRegistered(MaterialRegistered),
    StockWrittenOff(StockWrittenOff),
    StockReceived(StockReceived),
}

impl Event for MaterialEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MaterialEvent::MaterialRegistered(_) => "inventory.material.registered",
            MaterialEvent::StockWrittenOff(_) => "inventory.material.written_off",
            MaterialEvent::StockReceived(_) => "inventory.material.stock_received",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_on(&self) -> NaiveDate {
        match self {
            MaterialEvent::MaterialRegistered(e) => e.occurred_on,
            MaterialEvent::StockWrittenOff(e) => e.occurred_on,
            MaterialEvent::StockReceived(e) => e.occurred_on,
        }
    }
}

impl Aggregate for Material {
    type Command = MaterialCommand;
    type Event = MaterialEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            MaterialEvent::MaterialRegistered(e) => {
                self.id = e.material_id;
                self.name = e.name.clone();
                self.description = e.description.clone();
                self.min_stock = e.min_stock;
                self.price = e.price;
                self.unit = e.unit.clone();
                self.set_stock(e.current_stock);
                self.created = true;
            }
            MaterialEvent::StockWrittenOff(e) => self.set_stock(e.current_stock),
            MaterialEvent::StockReceived(e) => self.set_stock(e.current_stock),
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            MaterialCommand::RegisterMaterial(cmd) => self.handle_register(cmd),
            MaterialCommand::WriteOff(cmd) => self.handle_write_off(cmd),
            MaterialCommand::ReceiveStock(cmd) => self.handle_receive(cmd),
        }
    }
}

impl Material {
    fn ensure_registered(&self, material_id: MaterialId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found(format!("material {material_id}")));
        }
        if self.id != material_id {
            return Err(DomainError::invariant("material_id mismatch"));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterMaterial) -> Result<Vec<MaterialEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("material already registered"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.unit.trim().is_empty() {
            return Err(DomainError::validation("unit cannot be empty"));
        }
        if cmd.min_stock < 0 {
            return Err(DomainError::validation("minimum stock cannot be negative"));
        }
        if cmd.price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(vec![MaterialEvent::MaterialRegistered(MaterialRegistered {
            material_id: cmd.material_id,
            name: cmd.name.trim().to_string(),
            description: cmd.description.trim().to_string(),
            current_stock: cmd.current_stock,
            min_stock: cmd.min_stock,
            price: cmd.price,
            unit: cmd.unit.trim().to_string(),
            occurred_on: cmd.occurred_on,
        })])
    }

    fn handle_write_off(&self, cmd: &WriteOff) -> Result<Vec<MaterialEvent>, DomainError> {
        self.ensure_registered(cmd.material_id)?;

        let current_stock = self
            .current_stock
            .checked_sub(cmd.quantity)
            .ok_or_else(|| DomainError::invariant("stock overflow"))?;

        Ok(vec![MaterialEvent::StockWrittenOff(StockWrittenOff {
            material_id: cmd.material_id,
            quantity: cmd.quantity,
            current_stock,
            occurred_on: cmd.occurred_on,
        })])
    }

    fn handle_receive(&self, cmd: &ReceiveStock) -> Result<Vec<MaterialEvent>, DomainError> {
        self.ensure_registered(cmd.material_id)?;

        if cmd.quantity <= 0 {
            return Err(DomainError::validation("received quantity must be positive"));
        }
        let current_stock = self
            .current_stock
            .checked_add(cmd.quantity)
            .ok_or_else(|| DomainError::invariant("stock overflow"))?;

        Ok(vec![MaterialEvent::StockReceived(StockReceived {
            material_id: cmd.material_id,
            quantity: cmd.quantity,
            current_stock,
            occurred_on: cmd.occurred_on,
        })])
    }
}
