//! Infrastructure layer: the in-memory session, projections, export and
//! configuration.

pub mod config;
pub mod export;
pub mod projections;
pub mod query;
pub mod seed;
pub mod session;

mod integration_tests;

pub use config::{ConfigError, StockroomConfig};
pub use export::{ExportCategory, ExportError, ExportFormat, Exporter, UnknownExportFormat};
pub use projections::Dashboard;
pub use query::MaterialFilter;
pub use session::{NewMaterial, Stockroom, today};
