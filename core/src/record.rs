//! Typed row contract.
//!
//! Table name and primary key are a static descriptor supplied by the type,
//! usually through `#[derive(Record)]`, so nothing is looked up at runtime.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::criterion::Criterion;
use crate::error::{PgrestError, Result};
use crate::filter::Filter;
use crate::operator::Operator;

/// Static table metadata for a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableDescriptor {
    pub table_name: &'static str,
    /// Column name of the single primary-key field
    pub primary_key: &'static str,
}

impl TableDescriptor {
    pub const fn new(table_name: &'static str, primary_key: &'static str) -> Self {
        Self {
            table_name,
            primary_key,
        }
    }
}

/// A row type bound to one table with exactly one primary key.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Record)]
/// #[record(table = "users")]
/// struct User {
///     #[record(primary_key)]
///     username: String,
///     status: Option<String>,
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const DESCRIPTOR: TableDescriptor;

    /// Current value of the primary-key field.
    fn primary_key_value(&self) -> Criterion;

    /// `primary_key=eq.<value>` for this record. Null keys are an error.
    fn primary_key_filter(&self) -> Result<Filter> {
        match self.primary_key_value() {
            Criterion::Null => Err(PgrestError::MissingPrimaryKey {
                table: Self::DESCRIPTOR.table_name,
            }),
            value => Filter::new(Self::DESCRIPTOR.primary_key, Operator::Equals, value),
        }
    }
}
