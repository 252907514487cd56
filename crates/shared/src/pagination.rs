use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<&str> for SortDirection {
    /// Anything other than an exact "ASC" sorts descending.
    fn from(dir: &str) -> Self {
        match dir {
            "ASC" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Desc => write!(f, "DESC"),
            SortDirection::Asc => write!(f, "ASC"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortOptions {
    pub direction: SortDirection,
    pub columns: Vec<String>,
}

impl SortOptions {
    pub fn format(&self) -> String {
        format!("{} {}", self.columns.join(","), self.direction)
    }
}

/// Column a caller intends to match on. Carried through to the query layer
/// untouched; predicate construction happens there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub column: String,
}

/// Column names are not validated here. An unknown column surfaces as a
/// query error from the store, not as a local failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub filter: FilterOptions,
    pub sort: SortOptions,
}

impl Pagination {
    pub fn order_by_clause(&self) -> String {
        format!("ORDER BY {}", self.sort.format())
    }
}
