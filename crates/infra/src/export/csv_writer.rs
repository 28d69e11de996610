use super::{Cell, ExportError, Sheet};

/// Render a sheet as UTF-8 CSV (header row first).
pub(super) fn render(sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(sheet.headers())?;
    for row in sheet.rows() {
        writer.write_record(row.iter().map(Cell::display))?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_fields_with_separators() {
        let mut sheet = Sheet::new("Заказы", vec!["ID", "Примечание"]);
        sheet.push_row(vec![Cell::Number(1), Cell::text("мука, сахар")]);

        let text = String::from_utf8(render(&sheet).unwrap()).unwrap();
        assert_eq!(text, "ID,Примечание\n1,\"мука, сахар\"\n");
    }
}
