//! `order=` entries.

use crate::operator::{NullPosition, Ordering};

/// One ordering term, optionally scoped to an embedded (foreign) table.
///
/// Multiple orderers are emitted in insertion order and never merged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orderer {
    pub foreign_table: Option<String>,
    pub column: String,
    pub ordering: Ordering,
    pub nulls: NullPosition,
}

impl Orderer {
    pub fn new(column: impl Into<String>, ordering: Ordering, nulls: NullPosition) -> Self {
        Self {
            foreign_table: None,
            column: column.into(),
            ordering,
            nulls,
        }
    }

    pub fn foreign(
        foreign_table: impl Into<String>,
        column: impl Into<String>,
        ordering: Ordering,
        nulls: NullPosition,
    ) -> Self {
        Self {
            foreign_table: Some(foreign_table.into()),
            ..Self::new(column, ordering, nulls)
        }
    }

    /// `order` or `<table>.order`
    pub fn key(&self) -> String {
        match &self.foreign_table {
            Some(table) => format!("{table}.order"),
            None => "order".to_string(),
        }
    }

    /// `<column>.<asc|desc>.<nullsfirst|nullslast>`
    pub fn value(&self) -> String {
        format!("{}.{}.{}", self.column, self.ordering, self.nulls)
    }

    pub fn to_param(&self) -> (String, String) {
        (self.key(), self.value())
    }
}
