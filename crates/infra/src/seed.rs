//! Demo data: a small bakery's materials, recent movements and open orders.

use chrono::NaiveDate;

use stockroom_inventory::{MaterialId, Movement, MovementKind};

use crate::session::{NewMaterial, Stockroom};

const MATERIALS: [(&str, &str, i64, i64, i64, &str); 6] = [
    ("Мука пшеничная", "Высший сорт", 150, 50, 45, "кг"),
    ("Дрожжи", "Сухие активные", 8, 5, 180, "кг"),
    ("Сахар", "Кристаллический", 45, 20, 55, "кг"),
    ("Масло сливочное", "82.5% жирности", 12, 10, 680, "кг"),
    ("Яйца", "Куриные С0", 180, 100, 8, "шт"),
    ("Соль", "Экстра", 25, 10, 15, "кг"),
];

// (material id, kind, quantity, day of November 2025, note)
const HISTORY: [(u32, MovementKind, i64, u32, &str); 3] = [
    (1, MovementKind::In, 100, 10, "Поставка от ООО Зерно"),
    (4, MovementKind::Out, 5, 12, "Списание на производство"),
    (2, MovementKind::Out, 2, 13, "Производство хлеба"),
];

// (material id, quantity, day of November 2025)
const ORDERS: [(u32, i64, u32); 2] = [(4, 20, 15), (2, 10, 16)];

fn november(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).unwrap_or(NaiveDate::MIN)
}

/// Build the demo session.
///
/// Historical movements are loaded as history only: the opening stock already
/// reflects them. Statuses are derived from the stock figures.
pub fn bakery() -> Stockroom {
    let mut room = Stockroom::new();

    for (name, description, current_stock, min_stock, price, unit) in MATERIALS {
        let draft = NewMaterial {
            name: name.to_string(),
            description: description.to_string(),
            current_stock,
            min_stock,
            price,
            unit: unit.to_string(),
        };
        if let Err(err) = room.register_material(draft, november(1)) {
            tracing::error!(name, error = %err, "seed material rejected");
        }
    }

    for (material, kind, quantity, day, note) in HISTORY {
        let material_id = MaterialId::from(material);
        let Some(material_name) = room.material(material_id).map(|m| m.name().to_string()) else {
            continue;
        };
        room.record_history(Movement {
            material_id,
            material_name,
            kind,
            quantity,
            date: november(day),
            note: note.to_string(),
        });
    }

    for (material, quantity, day) in ORDERS {
        if let Err(err) = room.place_order(MaterialId::from(material), quantity, november(day)) {
            tracing::error!(material, error = %err, "seed order rejected");
        }
    }

    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::StockStatus;
    use stockroom_purchasing::OrderStatus;

    #[test]
    fn bakery_has_six_materials_three_movements_two_pending_orders() {
        let room = bakery();

        assert_eq!(room.materials().len(), 6);
        assert_eq!(room.ledger().len(), 3);
        assert_eq!(room.pending_orders().count(), 2);
        assert!(room.orders().all(|o| o.status() == OrderStatus::Pending));
    }

    #[test]
    fn seeded_statuses_are_derived_from_stock() {
        let room = bakery();
        let status = |id: u32| room.material(MaterialId::from(id)).unwrap().status();

        assert_eq!(status(1), StockStatus::InStock);
        // 8 > 5 × 1.5
        assert_eq!(status(2), StockStatus::InStock);
        assert_eq!(status(4), StockStatus::Medium);
        assert!(room.critical_materials().is_empty());
    }

    #[test]
    fn history_does_not_move_stock() {
        let room = bakery();
        let flour = room.material(MaterialId::from(1)).unwrap();
        assert_eq!(flour.current_stock(), 150);

        let newest = room.transactions().next().unwrap();
        assert_eq!(newest.material_name(), "Дрожжи");
        assert_eq!(newest.note(), "Производство хлеба");
    }
}
