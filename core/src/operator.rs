//! Operator catalog.
//!
//! Every filter operator maps 1:1 onto its PostgREST wire token. Ordering
//! direction and null placement get their own small enums since they are
//! serialized into `order=` entries rather than filter values.

use core::fmt;
use core::str::FromStr;

use crate::error::{PgrestError, Result};

/// Comparison, pattern, set, range, full-text and logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Is,
    Like,
    ILike,
    In,
    Contains,
    ContainedIn,
    Overlap,
    StrictlyLeft,
    StrictlyRight,
    NotRightOf,
    NotLeftOf,
    Adjacent,
    FullTextSearch,
    PlainFullTextSearch,
    PhraseFullTextSearch,
    WebFullTextSearch,
    And,
    Or,
    Not,
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Self::Equals,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Is,
        Self::Like,
        Self::ILike,
        Self::In,
        Self::Contains,
        Self::ContainedIn,
        Self::Overlap,
        Self::StrictlyLeft,
        Self::StrictlyRight,
        Self::NotRightOf,
        Self::NotLeftOf,
        Self::Adjacent,
        Self::FullTextSearch,
        Self::PlainFullTextSearch,
        Self::PhraseFullTextSearch,
        Self::WebFullTextSearch,
        Self::And,
        Self::Or,
        Self::Not,
    ];

    /// The PostgREST token for this operator.
    #[inline]
    pub const fn wire_token(self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEqual => "neq",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqual => "gte",
            Self::LessThan => "lt",
            Self::LessThanOrEqual => "lte",
            Self::Is => "is",
            Self::Like => "like",
            Self::ILike => "ilike",
            Self::In => "in",
            Self::Contains => "cs",
            Self::ContainedIn => "cd",
            Self::Overlap => "ov",
            Self::StrictlyLeft => "sl",
            Self::StrictlyRight => "sr",
            Self::NotRightOf => "nxr",
            Self::NotLeftOf => "nxl",
            Self::Adjacent => "adj",
            Self::FullTextSearch => "fts",
            Self::PlainFullTextSearch => "plfts",
            Self::PhraseFullTextSearch => "phfts",
            Self::WebFullTextSearch => "wfts",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    /// Looks an operator up by its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.wire_token() == token)
    }

    #[inline]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Range-adjacency operators; their criterion must be an interval.
    #[inline]
    pub const fn is_range(self) -> bool {
        matches!(
            self,
            Self::StrictlyLeft
                | Self::StrictlyRight
                | Self::NotRightOf
                | Self::NotLeftOf
                | Self::Adjacent
        )
    }

    #[inline]
    pub const fn is_full_text(self) -> bool {
        matches!(
            self,
            Self::FullTextSearch
                | Self::PlainFullTextSearch
                | Self::PhraseFullTextSearch
                | Self::WebFullTextSearch
        )
    }

    /// `cs`, `cd` and `ov`: array literal, JSON or interval criteria.
    #[inline]
    pub const fn is_containment(self) -> bool {
        matches!(self, Self::Contains | Self::ContainedIn | Self::Overlap)
    }

    #[inline]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::ILike)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_token())
    }
}

impl FromStr for Operator {
    type Err = PgrestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s).ok_or_else(|| PgrestError::usage(format!("unknown operator `{s}`")))
    }
}

/// Sort direction for `order=` entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

impl Ordering {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where NULLs sort relative to other values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NullPosition {
    #[default]
    First,
    Last,
}

impl NullPosition {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "nullsfirst",
            Self::Last => "nullslast",
        }
    }
}

impl fmt::Display for NullPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
