use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::{Cell, Sheet};

/// Render a sheet as an `.xlsx` workbook with a bold header row.
pub(super) fn render(sheet: &Sheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name())?;

    for (col, title) in sheet.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, row) in sheet.rows().iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => worksheet.write_string(row_num, col as u16, text.as_str())?,
                Cell::Number(n) => worksheet.write_number(row_num, col as u16, *n as f64)?,
            };
        }
    }
    worksheet.autofit();

    workbook.save_to_buffer()
}
