//! Cell cursor: tracks the current write position within one worksheet
//!
//! The cursor separates address arithmetic from the write-and-advance
//! operations so header emission and data emission share one piece of
//! row/column state.

use umya_spreadsheet::{Style, Worksheet};

use crate::sheet::Header;
use crate::types::CellValue;

/// Highest column an XLSX sheet can address ("XFD").
pub const MAX_COLUMNS: u32 = 16_384;

/// Convert a 1-based column number to its column name (1 -> "A", 27 -> "AA").
///
/// Panics when `col` is 0 or beyond [`MAX_COLUMNS`]. A column number outside
/// those bounds means the sheet layout itself is wrong, which is a programming
/// error, not a runtime condition to recover from.
pub fn column_number_to_name(col: u32) -> String {
    assert!(
        (1..=MAX_COLUMNS).contains(&col),
        "column {} is outside the spreadsheet column bounds",
        col
    );
    let mut name = String::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name
}

/// Write position within one worksheet, created fresh per render run.
///
/// `row` and `col` are 1-based. Write operations advance `col` by one;
/// [`SheetCursor::next_row`] resets `col` to 1 and advances `row`.
pub struct SheetCursor<'a> {
    sheet: &'a mut Worksheet,
    style: Option<Style>,
    row: u32,
    col: u32,
}

impl<'a> SheetCursor<'a> {
    /// Create a cursor at row 1 of `sheet`. `style` is the shared handle
    /// applied to every header cell written through this cursor.
    pub fn new(sheet: &'a mut Worksheet, style: Option<Style>) -> Self {
        SheetCursor {
            sheet,
            style,
            row: 1,
            col: 1,
        }
    }

    /// Cell address for the current position, e.g. "A1".
    ///
    /// A column of 0 (the uninitialized state) is normalized to 1 first;
    /// addressing never happens at row 0 or column 0.
    pub fn address(&mut self) -> String {
        if self.col == 0 {
            self.col = 1;
        }
        format!("{}{}", column_number_to_name(self.col), self.row)
    }

    /// Current 1-based row.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Current 1-based column.
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Write a header cell: set the column width (if the header asks for one),
    /// write the title as a string, apply the shared style, advance.
    pub fn set_header(&mut self, header: &Header) {
        if self.col == 0 {
            self.col = 1;
        }
        let column = column_number_to_name(self.col);
        let axis = format!("{}{}", column, self.row);

        if header.width > 0.0 {
            self.sheet
                .get_column_dimension_mut(&column)
                .set_width(header.width);
        }
        self.sheet
            .get_cell_mut(axis.as_str())
            .set_value_string(header.title.as_str());
        if let Some(style) = &self.style {
            *self.sheet.get_style_mut(axis.as_str()) = style.clone();
        }
        self.col += 1;
    }

    /// Write a dynamically-typed value at the current address and advance.
    ///
    /// [`CellValue::Empty`] writes nothing but still advances, leaving the
    /// cell blank.
    pub fn set_value(&mut self, value: CellValue) {
        let axis = self.address();
        match value {
            CellValue::Empty => {}
            CellValue::String(s) => {
                self.sheet.get_cell_mut(axis.as_str()).set_value_string(s);
            }
            CellValue::Int(i) => {
                self.sheet
                    .get_cell_mut(axis.as_str())
                    .set_value_number(i as f64);
            }
            CellValue::Float(f) => {
                self.sheet.get_cell_mut(axis.as_str()).set_value_number(f);
            }
            CellValue::Bool(b) => {
                self.sheet.get_cell_mut(axis.as_str()).set_value_bool(b);
            }
        }
        self.col += 1;
    }

    /// Write a string at the current address and advance.
    pub fn set_string(&mut self, value: &str) {
        let axis = self.address();
        self.sheet.get_cell_mut(axis.as_str()).set_value_string(value);
        self.col += 1;
    }

    /// Write an integer at the current address and advance.
    pub fn set_int(&mut self, value: i64) {
        let axis = self.address();
        self.sheet
            .get_cell_mut(axis.as_str())
            .set_value_number(value as f64);
        self.col += 1;
    }

    /// Write a float at the current address and advance.
    ///
    /// A negative `precision` keeps the shortest representation; otherwise the
    /// value is written rounded to `precision` decimal places.
    pub fn set_float(&mut self, value: f64, precision: i32) {
        let axis = self.address();
        if precision < 0 {
            self.sheet.get_cell_mut(axis.as_str()).set_value_number(value);
        } else {
            let rounded = format!("{:.*}", precision as usize, value);
            self.sheet.get_cell_mut(axis.as_str()).set_value(rounded);
        }
        self.col += 1;
    }

    /// Move to the first column of the next row.
    pub fn next_row(&mut self) {
        self.col = 1;
        self.row += 1;
    }

    /// Skip the current cell without writing.
    pub fn next_cell(&mut self) {
        self.col += 1;
    }
}
