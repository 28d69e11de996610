//! Integration tests for the full session pipeline.
//!
//! Tests: Operation → Aggregate → Ledger/Orders → Dashboard → Export
//!
//! Verifies:
//! - Stock status always matches the stock figures
//! - Ledger and order queue stay consistent with stock movements
//! - Rejected operations leave every list untouched

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use stockroom_core::DomainError;
    use stockroom_inventory::{MaterialId, MovementKind, StockStatus};
    use stockroom_purchasing::{OrderId, OrderStatus};

    use crate::export::{ExportCategory, build_sheet};
    use crate::seed;
    use crate::session::{NewMaterial, Stockroom};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn assert_statuses_consistent(room: &Stockroom) {
        for m in room.materials() {
            assert_eq!(
                m.status(),
                StockStatus::derive(m.current_stock(), m.min_stock()),
                "status out of sync for {}",
                m.name()
            );
        }
    }

    #[test]
    fn butter_written_off_to_threshold_becomes_critical() {
        let mut room = seed::bakery();
        let butter = MaterialId::from(4);
        let before = room.ledger().len();

        room.write_off(butter, 2, None, day(17)).unwrap();

        let material = room.material(butter).unwrap();
        assert_eq!(material.current_stock(), 10);
        assert_eq!(material.status(), StockStatus::Low);
        assert_eq!(room.ledger().len(), before + 1);
        let entry = room.transactions().next().unwrap();
        assert_eq!(entry.kind(), MovementKind::Out);
        assert_eq!(entry.quantity(), 2);
        assert_eq!(room.critical_materials().len(), 1);
        assert_eq!(room.dashboard().critical_count, 1);
        assert_statuses_consistent(&room);
    }

    #[test]
    fn sugar_receiving_an_order_stays_in_stock() {
        let mut room = seed::bakery();
        let sugar = MaterialId::from(3);
        let order = room.place_order(sugar, 10, day(17)).unwrap();
        assert_eq!(order, OrderId::from(3));

        room.complete_order(order, day(18)).unwrap();

        let material = room.material(sugar).unwrap();
        assert_eq!(material.current_stock(), 55);
        assert_eq!(material.status(), StockStatus::InStock);
        assert_eq!(room.order(order).unwrap().status(), OrderStatus::Completed);
        assert_statuses_consistent(&room);
    }

    #[test]
    fn repeated_completion_is_rejected_without_side_effects() {
        let mut room = seed::bakery();
        let order = OrderId::from(1);
        room.complete_order(order, day(17)).unwrap();

        let stock = room.material(MaterialId::from(4)).unwrap().current_stock();
        let ledger_len = room.ledger().len();
        let dashboard = room.dashboard();

        let err = room.complete_order(order, day(18)).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(room.material(MaterialId::from(4)).unwrap().current_stock(), stock);
        assert_eq!(room.ledger().len(), ledger_len);
        assert_eq!(room.dashboard(), dashboard);
    }

    #[test]
    fn dashboard_tracks_every_operation() {
        let mut room = seed::bakery();
        let start = room.dashboard();
        assert_eq!(start.total_materials, 6);
        assert_eq!(start.order_stats.pending, 2);
        assert_eq!(start.movements.inbound, 100);
        assert_eq!(start.movements.outbound, 7);
        assert_eq!(
            start.total_value,
            150 * 45 + 8 * 180 + 45 * 55 + 12 * 680 + 180 * 8 + 25 * 15
        );

        room.write_off(MaterialId::from(1), 30, Some("Выпечка"), day(17))
            .unwrap();
        room.complete_order(OrderId::from(2), day(17)).unwrap();
        room.cancel_order(OrderId::from(1), day(17)).unwrap();

        let end = room.dashboard();
        assert_eq!(end.movements.inbound, 110);
        assert_eq!(end.movements.outbound, 37);
        assert_eq!(end.total_value, start.total_value - 30 * 45 + 10 * 180);
        assert_eq!(end.order_stats.pending, 0);
        assert_eq!(end.order_stats.completed, 1);
        assert_eq!(end.order_stats.cancelled, 1);
        let value: i128 = room.materials().iter().map(|m| m.stock_value()).sum();
        assert_eq!(end.total_value, value);
    }

    #[test]
    fn rejected_operations_leave_session_untouched() {
        let mut room = seed::bakery();
        let materials = room.materials().to_vec();
        let ledger_len = room.ledger().len();
        let orders = room.orders().count();

        assert!(room.write_off(MaterialId::from(99), 1, None, day(17)).is_err());
        assert!(room.place_order(MaterialId::from(1), -5, day(17)).is_err());
        assert!(room.place_order(MaterialId::from(99), 5, day(17)).is_err());
        assert!(room.complete_order(OrderId::from(99), day(17)).is_err());
        assert!(room
            .register_material(
                NewMaterial {
                    name: String::new(),
                    description: String::new(),
                    current_stock: 1,
                    min_stock: 1,
                    price: 1,
                    unit: "кг".to_string(),
                },
                day(17),
            )
            .is_err());

        assert_eq!(room.materials(), materials.as_slice());
        assert_eq!(room.ledger().len(), ledger_len);
        assert_eq!(room.orders().count(), orders);
    }

    #[test]
    fn export_reflects_latest_state() {
        let mut room = seed::bakery();
        room.write_off(MaterialId::from(4), 2, None, day(17)).unwrap();

        let materials = build_sheet(ExportCategory::Materials, &room);
        assert_eq!(materials.rows()[3][3].display(), "10 кг");
        assert_eq!(materials.rows()[3][6].display(), "Низкий");

        let transactions = build_sheet(ExportCategory::Transactions, &room);
        assert_eq!(transactions.rows().len(), 4);
        assert_eq!(transactions.rows()[0][5].display(), "Списание");
    }
}
