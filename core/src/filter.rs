//! Filter expression tree.
//!
//! A [`Filter`] is either a leaf predicate (`column op criterion`), a negation,
//! or an AND/OR group. Construction through [`Filter::new`] validates that the
//! criterion shape fits the operator and applies the null rewrites PostgREST
//! requires, so most usage errors surface before a request is ever built.

use core::fmt;

use crate::compile;
use crate::criterion::{Criterion, Scalar};
use crate::error::{PgrestError, Result};
use crate::operator::Operator;

/// Logical connective for a filter group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Logical {
    And,
    Or,
}

impl Logical {
    #[inline]
    pub const fn operator(self) -> Operator {
        match self {
            Self::And => Operator::And,
            Self::Or => Operator::Or,
        }
    }

    #[inline]
    pub const fn wire_token(self) -> &'static str {
        self.operator().wire_token()
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_token())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Leaf {
        column: String,
        operator: Operator,
        criterion: Criterion,
    },
    Not(Box<Filter>),
    Group {
        operator: Logical,
        children: Vec<Filter>,
    },
}

impl Filter {
    /// Builds a leaf filter, failing fast when the criterion does not fit the operator.
    ///
    /// Null criteria are rewritten: `Equals`/`Is` become `is.null`, `Not`/`NotEqual`
    /// become `not.is.null`. Any other operator paired with null is a usage error.
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        criterion: impl Into<Criterion>,
    ) -> Result<Self> {
        let column = column.into();
        let criterion = criterion.into();

        if criterion.is_null() {
            return match operator {
                Operator::Equals | Operator::Is => Ok(Self::is_null(column)),
                Operator::Not | Operator::NotEqual => Ok(Self::not(Self::is_null(column))),
                _ => Err(PgrestError::usage(format!(
                    "null criteria must use the `Equals`, `Is`, `Not` or `NotEqual` operators, got `{operator}` on `{column}`"
                ))),
            };
        }

        check_shape(&column, operator, &criterion)?;
        Ok(Self::Leaf {
            column,
            operator,
            criterion,
        })
    }

    /// `column=is.null`
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::Leaf {
            column: column.into(),
            operator: Operator::Is,
            criterion: Criterion::Null,
        }
    }

    /// Leaf with a scalar criterion. Every scalar operator accepts a scalar, so this cannot fail.
    pub(crate) fn scalar(column: impl Into<String>, operator: Operator, value: Scalar) -> Self {
        Self::Leaf {
            column: column.into(),
            operator,
            criterion: Criterion::Scalar(value),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::Equals, value.into())
    }

    pub fn neq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::NotEqual, value.into())
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::GreaterThan, value.into())
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::GreaterThanOrEqual, value.into())
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::LessThan, value.into())
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(column, Operator::LessThanOrEqual, value.into())
    }

    pub fn not(inner: Filter) -> Self {
        Self::Not(Box::new(inner))
    }

    pub fn and(children: impl IntoIterator<Item = Filter>) -> Self {
        Self::Group {
            operator: Logical::And,
            children: children.into_iter().collect(),
        }
    }

    pub fn or(children: impl IntoIterator<Item = Filter>) -> Self {
        Self::Group {
            operator: Logical::Or,
            children: children.into_iter().collect(),
        }
    }

    /// The column a leaf (or negated leaf) targets.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Leaf { column, .. } => Some(column),
            Self::Not(inner) => inner.column(),
            Self::Group { .. } => None,
        }
    }

    /// Compiles into a single `(query-key, query-value)` pair.
    pub fn compile(&self) -> Result<(String, String)> {
        compile::compile(self)
    }
}

/// Rejects criteria whose shape does not fit `operator`. Null is handled by the caller.
pub(crate) fn check_shape(column: &str, operator: Operator, criterion: &Criterion) -> Result<()> {
    let (ok, expected) = match operator {
        Operator::And | Operator::Or | Operator::Not => {
            return Err(PgrestError::usage(format!(
                "`{operator}` is a logical operator; build it with Filter::and, Filter::or or Filter::not instead of a leaf on `{column}`"
            )));
        }
        Operator::Like | Operator::ILike => (
            matches!(criterion, Criterion::Scalar(Scalar::Text(_))),
            "a text pattern",
        ),
        Operator::In => (
            matches!(criterion, Criterion::List(_) | Criterion::Map(_)),
            "a list or a map",
        ),
        op if op.is_containment() => (
            matches!(
                criterion,
                Criterion::List(_) | Criterion::Map(_) | Criterion::Interval(_)
            ),
            "a list, a map or an interval",
        ),
        op if op.is_range() => (matches!(criterion, Criterion::Interval(_)), "an interval"),
        op if op.is_full_text() => (
            matches!(criterion, Criterion::FullText(_)),
            "a full-text config (query text + language)",
        ),
        _ => (matches!(criterion, Criterion::Scalar(_)), "a scalar"),
    };

    if ok {
        Ok(())
    } else {
        Err(PgrestError::usage(format!(
            "operator `{operator}` on `{column}` expects {expected}, got {}",
            criterion.shape()
        )))
    }
}
