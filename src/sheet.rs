//! Sheet export unit: renders one result set onto one named sheet

use std::sync::Arc;

use tracing::{debug, info};
use umya_spreadsheet::{
    HorizontalAlignmentValues, Spreadsheet, Style, VerticalAlignmentValues,
};

use crate::cursor::SheetCursor;
use crate::error::{ExportError, Result};
use crate::types::{CellValue, RowMap};

/// Declarative spec for one output column.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Display text for the header cell
    pub title: String,
    /// Column width, applied only when greater than zero
    pub width: f64,
    /// Lookup key used by the value resolver against each row map
    pub key: String,
}

impl Header {
    /// Create a header with no explicit column width.
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Header {
            title: title.into(),
            width: 0.0,
            key: key.into(),
        }
    }

    /// Set the column width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// Pluggable strategy computing a cell's value from a row map and a column key.
pub type ValueResolver = Arc<dyn Fn(&str, &RowMap) -> CellValue + Send + Sync>;

/// Default resolver: the mapped value for `key`, or the key string itself when
/// the row has no such entry. The key sentinel makes a misconfigured column
/// visible in the output instead of silently blank.
pub fn resolve_by_key(key: &str, row: &RowMap) -> CellValue {
    match row.get(key) {
        Some(value) => value.clone(),
        None => CellValue::String(key.to_string()),
    }
}

/// Declarative header style: alignment and font weight.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSpec {
    pub horizontal_center: bool,
    pub vertical_center: bool,
    pub bold: bool,
}

impl Default for StyleSpec {
    /// Center-aligned both ways, bold.
    fn default() -> Self {
        StyleSpec {
            horizontal_center: true,
            vertical_center: true,
            bold: true,
        }
    }
}

impl StyleSpec {
    pub(crate) fn build(&self) -> Style {
        let mut style = Style::default();
        if self.horizontal_center {
            style
                .get_alignment_mut()
                .set_horizontal(HorizontalAlignmentValues::Center);
        }
        if self.vertical_center {
            style
                .get_alignment_mut()
                .set_vertical(VerticalAlignmentValues::Center);
        }
        if self.bold {
            style.get_font_mut().set_bold(true);
        }
        style
    }
}

/// Binds a sheet name, an ordered column layout, a header style and a value
/// resolver. Configured once at startup and reused for every export run; all
/// per-run mutable state lives in the transient [`SheetCursor`].
#[derive(Clone)]
pub struct SheetExport {
    sheet_name: String,
    index: bool,
    columns: Vec<Header>,
    style: StyleSpec,
    resolver: ValueResolver,
}

impl SheetExport {
    /// Create a unit for `sheet_name` with the default style and resolver and
    /// no leading index column.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        SheetExport {
            sheet_name: sheet_name.into(),
            index: false,
            columns: Vec::new(),
            style: StyleSpec::default(),
            resolver: Arc::new(resolve_by_key),
        }
    }

    /// Prepend a synthetic 1-based "Index" column, pandas-style.
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    /// Replace the column layout.
    pub fn with_columns(mut self, columns: Vec<Header>) -> Self {
        self.columns = columns;
        self
    }

    /// Append one column.
    pub fn with_column(mut self, column: Header) -> Self {
        self.columns.push(column);
        self
    }

    /// Replace the header style.
    pub fn with_style(mut self, style: StyleSpec) -> Self {
        self.style = style;
        self
    }

    /// Replace the value resolver.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str, &RowMap) -> CellValue + Send + Sync + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Target sheet name.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Render `rows` onto this unit's sheet in `book`.
    ///
    /// The sheet is created on first use and reused on later runs against a
    /// fresh workbook. An empty `rows` still emits the header row and is not
    /// an error.
    pub fn render(&self, book: &mut Spreadsheet, rows: &[RowMap]) -> Result<()> {
        let style = self.style.build();

        if book.get_sheet_by_name(&self.sheet_name).is_none() {
            book.new_sheet(self.sheet_name.as_str()).map_err(|e| {
                ExportError::Sheet {
                    sheet: self.sheet_name.clone(),
                    reason: e.to_string(),
                }
            })?;
            info!(sheet = %self.sheet_name, "created new sheet");
        }
        let sheet = book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| ExportError::Sheet {
                sheet: self.sheet_name.clone(),
                reason: "sheet missing after creation".to_string(),
            })?;

        let mut cursor = SheetCursor::new(sheet, Some(style));

        if self.index {
            cursor.set_header(&Header::new("Index", ""));
        }
        for column in &self.columns {
            cursor.set_header(column);
        }
        debug!(sheet = %self.sheet_name, "headers written");

        for (i, row) in rows.iter().enumerate() {
            cursor.next_row();
            if self.index {
                cursor.set_int(i as i64 + 1);
            }
            for column in &self.columns {
                let value = (self.resolver)(&column.key, row);
                debug!(row = cursor.row(), col = cursor.col(), value = %value, "set cell value");
                cursor.set_value(value);
            }
        }

        info!(sheet = %self.sheet_name, rows = rows.len(), "sheet render done");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::row;

    fn users_unit() -> SheetExport {
        SheetExport::new("Users")
            .with_index(true)
            .with_columns(vec![
                Header::new("Name", "name").with_width(20.0),
                Header::new("Age", "age"),
            ])
    }

    #[test]
    fn test_empty_rows_render_header_only() {
        let mut book = umya_spreadsheet::new_file();
        users_unit().render(&mut book, &[]).unwrap();

        let sheet = book.get_sheet_by_name("Users").unwrap();
        assert_eq!(sheet.get_value("A1"), "Index");
        assert_eq!(sheet.get_value("B1"), "Name");
        assert_eq!(sheet.get_value("C1"), "Age");
        assert_eq!(sheet.get_value("A2"), "");
    }

    #[test]
    fn test_rows_rendered_in_order_with_index() {
        let mut book = umya_spreadsheet::new_file();
        let rows = vec![
            row([("name", CellValue::from("Ann")), ("age", CellValue::Int(30))]),
            row([("name", CellValue::from("Bo")), ("age", CellValue::Int(25))]),
        ];
        users_unit().render(&mut book, &rows).unwrap();

        let sheet = book.get_sheet_by_name("Users").unwrap();
        assert_eq!(sheet.get_value("A2"), "1");
        assert_eq!(sheet.get_value("B2"), "Ann");
        assert_eq!(sheet.get_value("C2"), "30");
        assert_eq!(sheet.get_value("A3"), "2");
        assert_eq!(sheet.get_value("B3"), "Bo");
        assert_eq!(sheet.get_value("C3"), "25");
    }

    #[test]
    fn test_missing_key_falls_back_to_key_string() {
        let mut book = umya_spreadsheet::new_file();
        let rows = vec![row([("name", CellValue::from("Ann"))])];
        users_unit().render(&mut book, &rows).unwrap();

        let sheet = book.get_sheet_by_name("Users").unwrap();
        // Sentinel fallback, not an empty cell.
        assert_eq!(sheet.get_value("C2"), "age");
    }

    #[test]
    fn test_custom_resolver_overrides_fallback() {
        let unit = users_unit().with_resolver(|key, row| {
            row.get(key).cloned().unwrap_or(CellValue::Empty)
        });
        let mut book = umya_spreadsheet::new_file();
        let rows = vec![row([("name", CellValue::from("Ann"))])];
        unit.render(&mut book, &rows).unwrap();

        let sheet = book.get_sheet_by_name("Users").unwrap();
        assert_eq!(sheet.get_value("C2"), "");
    }

    #[test]
    fn test_render_twice_reuses_sheet() {
        let unit = users_unit();
        let mut book = umya_spreadsheet::new_file();
        unit.render(&mut book, &[]).unwrap();
        let rows = vec![row([("name", CellValue::from("Ann")), ("age", CellValue::Int(30))])];
        unit.render(&mut book, &rows).unwrap();

        let sheet = book.get_sheet_by_name("Users").unwrap();
        assert_eq!(sheet.get_value("B2"), "Ann");
    }

    #[test]
    fn test_no_index_column() {
        let unit = SheetExport::new("Plain").with_column(Header::new("Name", "name"));
        let mut book = umya_spreadsheet::new_file();
        let rows = vec![row([("name", CellValue::from("Ann"))])];
        unit.render(&mut book, &rows).unwrap();

        let sheet = book.get_sheet_by_name("Plain").unwrap();
        assert_eq!(sheet.get_value("A1"), "Name");
        assert_eq!(sheet.get_value("A2"), "Ann");
    }

    #[test]
    fn test_default_resolver_sentinel() {
        let r = row([("name", CellValue::from("Ann"))]);
        assert_eq!(resolve_by_key("x", &r), CellValue::String("x".to_string()));
        assert_eq!(resolve_by_key("name", &r), CellValue::from("Ann"));
    }
}
