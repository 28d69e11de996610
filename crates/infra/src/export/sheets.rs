//! Listing → sheet projections with the dashboard's column headers and labels.

use stockroom_inventory::{Material, Transaction};
use stockroom_purchasing::ReplenishmentOrder;

use super::{Cell, ExportCategory, Sheet};

pub fn materials_sheet(materials: &[Material]) -> Sheet {
    let mut sheet = Sheet::new(
        ExportCategory::Materials.title(),
        vec![
            "ID",
            "Название",
            "Описание",
            "Текущий запас",
            "Минимальный запас",
            "Цена",
            "Статус",
        ],
    );
    for m in materials {
        sheet.push_row(vec![
            Cell::Number(i64::from(m.id_typed().get())),
            Cell::text(m.name()),
            Cell::text(m.description()),
            Cell::text(format!("{} {}", m.current_stock(), m.unit())),
            Cell::text(format!("{} {}", m.min_stock(), m.unit())),
            Cell::text(format!("{} ₽", m.price())),
            Cell::text(m.status().label()),
        ]);
    }
    sheet
}

pub fn transactions_sheet<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Sheet {
    let mut sheet = Sheet::new(
        ExportCategory::Transactions.title(),
        vec!["ID", "Материал", "Тип", "Количество", "Дата", "Примечание"],
    );
    for t in transactions {
        sheet.push_row(vec![
            Cell::Number(i64::from(t.id_typed().get())),
            Cell::text(t.material_name()),
            Cell::text(t.kind().label()),
            Cell::Number(t.quantity()),
            Cell::text(t.date().format("%Y-%m-%d").to_string()),
            Cell::text(t.note()),
        ]);
    }
    sheet
}

pub fn orders_sheet<'a>(orders: impl IntoIterator<Item = &'a ReplenishmentOrder>) -> Sheet {
    let mut sheet = Sheet::new(
        ExportCategory::Orders.title(),
        vec!["ID", "Материал", "Количество", "Статус", "Дата"],
    );
    for o in orders {
        sheet.push_row(vec![
            Cell::Number(i64::from(o.id_typed().get())),
            Cell::text(o.material_name()),
            Cell::Number(o.quantity()),
            Cell::text(o.status().label()),
            Cell::text(o.date().format("%Y-%m-%d").to_string()),
        ]);
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn row_text(sheet: &Sheet, row: usize) -> Vec<String> {
        sheet.rows()[row].iter().map(Cell::display).collect()
    }

    #[test]
    fn materials_rows_carry_units_currency_and_status_label() {
        let room = seed::bakery();
        let sheet = materials_sheet(room.materials());

        assert_eq!(sheet.name(), "Материалы");
        assert_eq!(sheet.headers().len(), 7);
        assert_eq!(sheet.rows().len(), 6);
        assert_eq!(
            row_text(&sheet, 3),
            vec![
                "4",
                "Масло сливочное",
                "82.5% жирности",
                "12 кг",
                "10 кг",
                "680 ₽",
                "Средний"
            ]
        );
    }

    #[test]
    fn transactions_are_listed_newest_first_with_direction_labels() {
        let room = seed::bakery();
        let sheet = transactions_sheet(room.transactions());

        assert_eq!(
            row_text(&sheet, 0),
            vec!["3", "Дрожжи", "Расход", "2", "2025-11-13", "Производство хлеба"]
        );
        assert_eq!(row_text(&sheet, 2)[2], "Приход");
        assert_eq!(sheet.rows()[0][3], Cell::Number(2));
    }

    #[test]
    fn orders_show_status_labels() {
        let mut room = seed::bakery();
        let first = stockroom_purchasing::OrderId::from(1);
        room.complete_order(first, chrono::NaiveDate::from_ymd_opt(2025, 11, 17).unwrap())
            .unwrap();

        let sheet = orders_sheet(room.orders());
        assert_eq!(row_text(&sheet, 0), vec!["2", "Дрожжи", "10", "В ожидании", "2025-11-16"]);
        assert_eq!(row_text(&sheet, 1)[3], "Выполнен");
    }
}
