//! Spreadsheet export of the three listings.
//!
//! Each listing is first projected into a [`Sheet`] (fixed headers, formatted
//! cells), then rendered by one of the writers. Export is one-way; there is no
//! import path.

mod csv_writer;
mod sheets;
mod xlsx_writer;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::session::Stockroom;

pub use sheets::{materials_sheet, orders_sheet, transactions_sheet};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("xlsx rendering failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv rendering failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Which listing to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportCategory {
    Materials,
    Transactions,
    Orders,
}

impl ExportCategory {
    pub const ALL: [ExportCategory; 3] = [
        ExportCategory::Materials,
        ExportCategory::Transactions,
        ExportCategory::Orders,
    ];

    /// Sheet name and file name prefix.
    pub fn title(self) -> &'static str {
        match self {
            ExportCategory::Materials => "Материалы",
            ExportCategory::Transactions => "Транзакции",
            ExportCategory::Orders => "Заказы",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown export format: {0} (expected \"xlsx\" or \"csv\")")]
pub struct UnknownExportFormat(pub String);

impl core::str::FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(UnknownExportFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Cell rendered as plain text (CSV output, assertions).
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// One worksheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[&'static str] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// `<Category>_<YYYY-MM-DD>.<ext>`
pub fn file_name(category: ExportCategory, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        category.title(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Project one listing of the session into a sheet.
pub fn build_sheet(category: ExportCategory, room: &Stockroom) -> Sheet {
    match category {
        ExportCategory::Materials => materials_sheet(room.materials()),
        ExportCategory::Transactions => transactions_sheet(room.transactions()),
        ExportCategory::Orders => orders_sheet(room.orders()),
    }
}

/// Writes export files into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
    format: ExportFormat,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Render a sheet in the configured format.
    pub fn render(&self, sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
        match self.format {
            ExportFormat::Xlsx => Ok(xlsx_writer::render(sheet)?),
            ExportFormat::Csv => csv_writer::render(sheet),
        }
    }

    /// Export one listing and return the written path.
    pub fn export(
        &self,
        room: &Stockroom,
        category: ExportCategory,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let sheet = build_sheet(category, room);
        debug!(sheet = sheet.name(), rows = sheet.rows().len(), "rendering export");
        let bytes = self.render(&sheet)?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name(category, date, self.format));
        std::fs::write(&path, &bytes)?;

        info!(path = %path.display(), bytes = bytes.len(), "export written");
        Ok(path)
    }

    pub fn export_all(&self, room: &Stockroom, date: NaiveDate) -> Result<Vec<PathBuf>, ExportError> {
        ExportCategory::ALL
            .iter()
            .map(|&category| self.export(room, category, date))
            .collect()
    }
}
