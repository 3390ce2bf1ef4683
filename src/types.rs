//! Dynamic value and row types shared across the export pipeline

use indexmap::IndexMap;

/// One input record: an ordered mapping from column key to value.
///
/// Keys are expected to intersect the configured [`Header`](crate::sheet::Header)
/// keys but do not have to be exhaustive or exclusive.
pub type RowMap = IndexMap<String, CellValue>;

/// Query parameters passed through to the query executor, opaque to this crate.
pub type ParamMap = IndexMap<String, CellValue>;

/// Represents a single dynamically-typed cell value
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell
    #[default]
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => Some(*f as i64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Int(i) => Some(*i != 0),
            CellValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Build a [`RowMap`] from key/value pairs, preserving order.
///
/// # Examples
///
/// ```
/// use excelexport::types::{row, CellValue};
///
/// let r = row([("name", CellValue::from("Ann")), ("age", CellValue::Int(30))]);
/// assert_eq!(r["age"], CellValue::Int(30));
/// ```
pub fn row<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> RowMap
where
    K: Into<String>,
    V: Into<CellValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from("hello").as_string(), "hello");
        assert_eq!(CellValue::from(42i64).as_i64(), Some(42));
        assert_eq!(CellValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::from(true).as_bool(), Some(true));
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn test_string_coercions() {
        assert_eq!(CellValue::from("30").as_i64(), Some(30));
        assert_eq!(CellValue::from("1.25").as_f64(), Some(1.25));
        assert_eq!(CellValue::from("yes").as_bool(), Some(true));
        assert_eq!(CellValue::from("maybe").as_bool(), None);
    }

    #[test]
    fn test_row_builder_preserves_order() {
        let r = row([("b", 1i64), ("a", 2i64)]);
        let keys: Vec<_> = r.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
