//! Mutable per-builder query state.

use crate::core::filter::Filter;
use crate::core::order::Orderer;
use crate::transport::Method;

/// A `limit`/`offset` value, optionally scoped to an embedded table
/// (`<table>.limit`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoped {
    pub value: u64,
    pub foreign_table: Option<String>,
}

impl Scoped {
    pub fn new(value: u64, foreign_table: Option<String>) -> Self {
        Self {
            value,
            foreign_table,
        }
    }

    pub(crate) fn key(&self, name: &str) -> String {
        match &self.foreign_table {
            Some(table) => format!("{table}.{name}"),
            None => name.to_string(),
        }
    }
}

/// Row window sent as `Range: <from>-<to>` or open-ended `<from>-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub from: u64,
    pub to: Option<u64>,
}

impl RowRange {
    pub fn header_value(&self) -> String {
        match self.to {
            Some(to) => format!("{}-{}", self.from, to),
            None => format!("{}-", self.from),
        }
    }
}

/// Everything a builder has accumulated since its last terminal call.
///
/// Owned by exactly one [`Table`](crate::Table) and reset to
/// `QueryState::default()` by every terminal call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    pub filters: Vec<Filter>,
    pub orderers: Vec<Orderer>,
    pub select: Option<String>,
    pub limit: Option<Scoped>,
    pub offset: Option<Scoped>,
    pub range: Option<RowRange>,
    pub on_conflict: Option<String>,
    pub method: Option<Method>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Moves the accumulated state out, leaving a fresh one behind.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
