//! Export orchestration: runs every configured query and composes one workbook

use std::io::{Cursor, Write};

use tracing::{error, info, warn};

use crate::error::{BoxError, ExportError, Result};
use crate::sheet::SheetExport;
use crate::types::{ParamMap, RowMap};

/// Boundary to the query execution engine. Implementations run one query text
/// with the given parameters and return its rows in order; how parameters are
/// bound and what the failure is stays opaque to this crate.
pub trait QueryExecutor {
    fn execute(&self, sql: &str, params: &ParamMap) -> std::result::Result<Vec<RowMap>, BoxError>;
}

impl<F> QueryExecutor for F
where
    F: Fn(&str, &ParamMap) -> std::result::Result<Vec<RowMap>, BoxError>,
{
    fn execute(&self, sql: &str, params: &ParamMap) -> std::result::Result<Vec<RowMap>, BoxError> {
        self(sql, params)
    }
}

/// One parameterized query text.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawQuery {
    pub sql: String,
}

impl RawQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        RawQuery { sql: sql.into() }
    }
}

/// Rewrites the table-name prefix placeholder in query text, applied once at
/// service construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TablePrefix {
    placeholder: String,
    prefix: String,
}

impl TablePrefix {
    pub fn new(placeholder: impl Into<String>, prefix: impl Into<String>) -> Self {
        TablePrefix {
            placeholder: placeholder.into(),
            prefix: prefix.into(),
        }
    }

    /// Replace every occurrence of the placeholder with the configured prefix.
    pub fn normalize(&self, sql: &str) -> String {
        sql.replace(&self.placeholder, &self.prefix)
    }
}

impl Default for TablePrefix {
    /// `"#__"` placeholder, empty prefix.
    fn default() -> Self {
        TablePrefix::new("#__", "")
    }
}

/// Pairs one query with the sheet export unit that renders its results.
#[derive(Clone)]
pub struct ExportDefine {
    pub query: RawQuery,
    pub output: SheetExport,
}

impl ExportDefine {
    pub fn new(query: RawQuery, output: SheetExport) -> Self {
        ExportDefine { query, output }
    }
}

/// Owns an ordered list of export definitions sharing one query executor.
///
/// Definitions run strictly sequentially within one [`ExportService::run`]
/// call because they share one mutable workbook. Each call builds its own
/// workbook and cursors, so concurrent calls on one service are safe once
/// construction completes.
pub struct ExportService<E> {
    db: E,
    exports: Vec<ExportDefine>,
}

impl<E: QueryExecutor> ExportService<E> {
    /// Construct the service. This is the one-time initialization pass: every
    /// definition's query text has its table references normalized here,
    /// before any export request is accepted.
    pub fn new(db: E, mut exports: Vec<ExportDefine>, prefix: &TablePrefix) -> Self {
        for item in &mut exports {
            item.query.sql = prefix.normalize(&item.query.sql);
        }
        ExportService { db, exports }
    }

    /// Run every definition's query, render each result set onto its sheet,
    /// and serialize the finished workbook to `sink`.
    ///
    /// All-or-nothing: any query, render, or serialization failure aborts the
    /// run before a single byte reaches the sink. A run where no query
    /// returned any row is logged as a warning but succeeds, producing sheets
    /// with headers only.
    pub fn run<W: Write>(&self, params: &ParamMap, sink: &mut W) -> Result<()> {
        // A new workbook always starts with exactly one implicit sheet; it is
        // removed once the real sheets are populated.
        let mut book = umya_spreadsheet::new_file();
        let default_sheet = book
            .get_sheet_collection()
            .first()
            .map(|s| s.get_name().to_string());

        let mut any_data = false;

        for item in &self.exports {
            let sheet_name = item.output.sheet_name();
            let rows = self.db.execute(&item.query.sql, params).map_err(|source| {
                error!(sheet = sheet_name, %source, "query for item failed");
                ExportError::Query {
                    sheet: sheet_name.to_string(),
                    source,
                }
            })?;
            info!(len = rows.len(), "read data done");

            any_data = any_data || !rows.is_empty();

            item.output.render(&mut book, &rows).map_err(|err| {
                error!(sheet = sheet_name, %err, "export to sheet failed");
                err
            })?;
            info!(sheet = sheet_name, "export to sheet done");
        }

        if let Some(name) = default_sheet {
            // A definition named like the implicit sheet has rendered real
            // data onto it; only remove the sheet when it stayed empty.
            let claimed = self.exports.iter().any(|e| e.output.sheet_name() == name);
            if !claimed {
                book.remove_sheet_by_name(&name)
                    .map_err(|e| ExportError::Sheet {
                        sheet: name.clone(),
                        reason: e.to_string(),
                    })?;
            }
        }

        // Serialize to memory first so a failure leaves the sink untouched.
        let mut buf = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf).map_err(|err| {
            error!(%err, "flush to writer failed");
            ExportError::Xlsx(err)
        })?;
        sink.write_all(buf.get_ref())?;

        if !any_data {
            warn!("no data for this export job");
        }
        info!("export done");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_prefix_replaces_all_occurrences() {
        let prefix = TablePrefix::new("#__", "app_");
        let sql = "SELECT * FROM #__users u JOIN #__orders o ON o.user_id = u.id";
        assert_eq!(
            prefix.normalize(sql),
            "SELECT * FROM app_users u JOIN app_orders o ON o.user_id = u.id"
        );
    }

    #[test]
    fn test_default_prefix_strips_placeholder() {
        let sql = "SELECT * FROM #__users";
        assert_eq!(TablePrefix::default().normalize(sql), "SELECT * FROM users");
    }

    #[test]
    fn test_new_normalizes_every_definition() {
        let db = |_: &str, _: &ParamMap| -> std::result::Result<Vec<RowMap>, BoxError> {
            Ok(Vec::new())
        };
        let exports = vec![
            ExportDefine::new(
                RawQuery::new("SELECT * FROM #__users"),
                SheetExport::new("Users"),
            ),
            ExportDefine::new(
                RawQuery::new("SELECT * FROM #__orders"),
                SheetExport::new("Orders"),
            ),
        ];
        let service = ExportService::new(db, exports, &TablePrefix::new("#__", "t_"));
        assert_eq!(service.exports[0].query.sql, "SELECT * FROM t_users");
        assert_eq!(service.exports[1].query.sql, "SELECT * FROM t_orders");
    }
}
