//! # excelexport
//!
//! A query-driven, multi-sheet Excel export subsystem.
//!
//! Callers supply query parameters; the service runs every configured query,
//! renders each result set onto its own named sheet with a declared column
//! layout, and streams the finished workbook to any writer.
//!
//! ## Features
//!
//! - **Multi-query composition**: each export definition pairs one query with
//!   one sheet; all sheets land in a single workbook
//! - **Declarative columns**: title, width and row-map lookup key per column,
//!   with an optional pandas-style index column
//! - **Pluggable value resolution**: swap the column-to-value strategy without
//!   touching the render loop
//! - **All-or-nothing output**: the sink receives either a complete workbook
//!   or nothing at all
//! - **Structured logging**: `tracing` events with key-value fields at every
//!   stage
//!
//! ## Quick Start
//!
//! ```rust
//! use excelexport::error::BoxError;
//! use excelexport::service::{ExportDefine, ExportService, RawQuery, TablePrefix};
//! use excelexport::sheet::{Header, SheetExport};
//! use excelexport::types::{row, CellValue, ParamMap, RowMap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Stands in for a real database-backed executor.
//! let db = |_sql: &str, _params: &ParamMap| -> Result<Vec<RowMap>, BoxError> {
//!     Ok(vec![
//!         row([("name", CellValue::from("Ann")), ("age", CellValue::Int(30))]),
//!         row([("name", CellValue::from("Bo")), ("age", CellValue::Int(25))]),
//!     ])
//! };
//!
//! let users = SheetExport::new("Users")
//!     .with_index(true)
//!     .with_columns(vec![
//!         Header::new("Name", "name").with_width(20.0),
//!         Header::new("Age", "age"),
//!     ]);
//!
//! let service = ExportService::new(
//!     db,
//!     vec![ExportDefine::new(
//!         RawQuery::new("SELECT name, age FROM #__users"),
//!         users,
//!     )],
//!     &TablePrefix::new("#__", "app_"),
//! );
//!
//! let mut out = Vec::new();
//! service.run(&ParamMap::new(), &mut out)?;
//! assert!(!out.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod error;
pub mod service;
pub mod sheet;
pub mod types;

pub use cursor::SheetCursor;
pub use error::{BoxError, ExportError, Result};
pub use service::{ExportDefine, ExportService, QueryExecutor, RawQuery, TablePrefix};
pub use sheet::{Header, SheetExport, StyleSpec, ValueResolver};
pub use types::{CellValue, ParamMap, RowMap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _ = std::marker::PhantomData::<ExportError>;
        let _ = std::marker::PhantomData::<SheetExport>;
        let _ = std::marker::PhantomData::<Header>;
        let _ = std::marker::PhantomData::<CellValue>;
    }
}
