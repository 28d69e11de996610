//! Dashboard projection: summary counts and chart-ready series.

use serde::Serialize;

use stockroom_inventory::{Ledger, Material, MovementTotals, StockStatus};
use stockroom_purchasing::{OrderStatus, ReplenishmentOrder};

/// Number of materials per stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    #[serde(rename = "in-stock")]
    pub in_stock: usize,
    pub medium: usize,
    pub low: usize,
}

impl StatusCount {
    pub fn get(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::InStock => self.in_stock,
            StockStatus::Medium => self.medium,
            StockStatus::Low => self.low,
        }
    }

    fn bump(&mut self, status: StockStatus) {
        match status {
            StockStatus::InStock => self.in_stock += 1,
            StockStatus::Medium => self.medium += 1,
            StockStatus::Low => self.low += 1,
        }
    }
}

/// One bucket of the status pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: &'static str,
    pub status: StockStatus,
    pub value: usize,
    pub color: &'static str,
}

fn status_color(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => "#22c55e",
        StockStatus::Medium => "#eab308",
        StockStatus::Low => "#ef4444",
    }
}

/// Current vs minimum stock for one material (bar chart series).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockPoint {
    pub name: String,
    pub current: i64,
    pub minimum: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Everything the dashboard tab shows, derived from the three lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_materials: usize,
    pub critical_count: usize,
    pub status_count: StatusCount,
    pub pie: Vec<PieSlice>,
    pub stock_series: Vec<StockPoint>,
    pub movements: MovementTotals,
    /// Σ current_stock × price.
    pub total_value: i128,
    pub order_stats: OrderStats,
}

impl Dashboard {
    pub fn compute<'a>(
        materials: &[Material],
        ledger: &Ledger,
        orders: impl IntoIterator<Item = &'a ReplenishmentOrder>,
    ) -> Self {
        let mut status_count = StatusCount::default();
        for material in materials {
            status_count.bump(material.status());
        }

        let pie = StockStatus::ALL
            .iter()
            .map(|&status| PieSlice {
                name: status.label(),
                status,
                value: status_count.get(status),
                color: status_color(status),
            })
            .collect();

        let stock_series = materials
            .iter()
            .map(|m| StockPoint {
                name: m.name().to_string(),
                current: m.current_stock(),
                minimum: m.min_stock(),
            })
            .collect();

        let mut order_stats = OrderStats::default();
        for order in orders {
            match order.status() {
                OrderStatus::Pending => order_stats.pending += 1,
                OrderStatus::Completed => order_stats.completed += 1,
                OrderStatus::Cancelled => order_stats.cancelled += 1,
            }
        }

        Self {
            total_materials: materials.len(),
            critical_count: materials.iter().filter(|m| m.is_critical()).count(),
            status_count,
            pie,
            stock_series,
            movements: ledger.totals(),
            total_value: materials
                .iter()
                .map(Material::stock_value)
                .fold(0i128, i128::saturating_add),
            order_stats,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{NewMaterial, Stockroom};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn material(name: &str, current: i64, min: i64, price: i64) -> NewMaterial {
        NewMaterial {
            name: name.to_string(),
            description: String::new(),
            current_stock: current,
            min_stock: min,
            price,
            unit: "кг".to_string(),
        }
    }

    #[test]
    fn empty_session_yields_zeroes() {
        let dashboard = Stockroom::new().dashboard();
        assert_eq!(dashboard.total_materials, 0);
        assert_eq!(dashboard.total_value, 0);
        assert_eq!(dashboard.pie.len(), 3);
        assert!(dashboard.pie.iter().all(|s| s.value == 0));
        assert!(dashboard.stock_series.is_empty());
    }

    #[test]
    fn counts_statuses_movements_and_orders() {
        let mut room = Stockroom::new();
        let flour = room.register_material(material("Мука", 150, 50, 45), day(10)).unwrap();
        let butter = room.register_material(material("Масло", 12, 10, 680), day(10)).unwrap();
        let yeast = room.register_material(material("Дрожжи", 7, 5, 180), day(10)).unwrap();

        room.write_off(flour, 30, None, day(11)).unwrap();
        let first = room.place_order(butter, 20, day(12)).unwrap();
        let second = room.place_order(yeast, 10, day(12)).unwrap();
        room.place_order(yeast, 5, day(13)).unwrap();
        room.complete_order(first, day(14)).unwrap();
        room.cancel_order(second, day(14)).unwrap();

        let d = room.dashboard();
        assert_eq!(d.total_materials, 3);
        // flour 120/50 in stock, butter 32/10 in stock, yeast 7/5 medium
        assert_eq!(d.status_count, StatusCount { in_stock: 2, medium: 1, low: 0 });
        assert_eq!(d.critical_count, 0);
        assert_eq!(d.movements.inbound, 20);
        assert_eq!(d.movements.outbound, 30);
        assert_eq!(d.total_value, 120 * 45 + 32 * 680 + 7 * 180);
        assert_eq!(d.order_stats, OrderStats { pending: 1, completed: 1, cancelled: 1 });
        assert_eq!(
            d.stock_series[1],
            StockPoint { name: "Масло".to_string(), current: 32, minimum: 10 }
        );
        assert_eq!(d.pie[0].name, "В наличии");
        assert_eq!(d.pie[0].value, 2);
        assert_eq!(d.pie[1].value, 1);
    }

    #[test]
    fn serializes_chart_friendly_json() {
        let mut room = Stockroom::new();
        room.register_material(material("Соль", 25, 10, 15), day(10)).unwrap();

        let json = room.dashboard().to_json().unwrap();
        assert_eq!(json["status_count"]["in-stock"], 1);
        assert_eq!(json["pie"][0]["status"], "in-stock");
        assert_eq!(json["pie"][2]["color"], "#ef4444");
        assert_eq!(json["movements"]["in"], 0);
        assert_eq!(json["total_value"], 375);
    }

    #[test]
    fn dashboard_survives_write_offs_at_the_i64_edge() {
        let mut room = Stockroom::new();
        let id = room.register_material(material("Соль", 0, 0, 1), day(1)).unwrap();
        room.write_off(id, i64::MAX, None, day(2)).unwrap();
        // Would take the stock below i64::MIN.
        assert!(room.write_off(id, i64::MAX, None, day(2)).is_err());

        let order = room.place_order(id, i64::MAX, day(3)).unwrap();
        room.complete_order(order, day(3)).unwrap();
        room.write_off(id, i64::MAX, None, day(4)).unwrap();

        let d = room.dashboard();
        assert_eq!(d.movements.outbound, 2 * i128::from(i64::MAX));
        assert_eq!(d.movements.inbound, i128::from(i64::MAX));
        assert_eq!(d.total_value, -i128::from(i64::MAX));
        assert_eq!(d.status_count.low, 1);
        assert_eq!(room.ledger().len(), 3);
    }

    proptest! {
        /// Property: total value always equals Σ current × price, whatever
        /// write-offs were applied.
        #[test]
        fn total_value_is_sum_of_stock_times_price(
            rows in prop::collection::vec((0i64..1_000, 0i64..200, 0i64..1_000), 1..8),
            write_offs in prop::collection::vec((0usize..8, -50i64..50), 0..20)
        ) {
            let mut room = Stockroom::new();
            for (i, (current, min, price)) in rows.iter().enumerate() {
                room.register_material(material(&format!("m{i}"), *current, *min, *price), day(1))
                    .unwrap();
            }
            for (idx, quantity) in write_offs {
                let id = room.materials()[idx % rows.len()].id_typed();
                room.write_off(id, quantity, None, day(2)).unwrap();
            }

            let expected: i128 = room
                .materials()
                .iter()
                .map(|m| i128::from(m.current_stock() * m.price()))
                .sum();
            let d = room.dashboard();
            prop_assert_eq!(d.total_value, expected);
            for m in room.materials() {
                prop_assert_eq!(m.status(), StockStatus::derive(m.current_stock(), m.min_stock()));
            }
        }
    }
}
