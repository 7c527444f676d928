//! Filter criteria: the right-hand side of a `column=op.value` predicate.

use core::fmt;
use core::ops::{Bound, Range, RangeFrom, RangeInclusive};
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// A single literal value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for Criterion {
                #[inline]
                fn from(value: $ty) -> Self {
                    Criterion::Scalar(value.into())
                }
            }
        )+
    };
}

scalar_from!(Text => String, &str, &String);
scalar_from!(Int => i8, i16, i32, i64, u8, u16, u32);
scalar_from!(Float => f32, f64);
scalar_from!(Bool => bool);

impl From<Scalar> for Criterion {
    #[inline]
    fn from(value: Scalar) -> Self {
        Criterion::Scalar(value)
    }
}

/// A PostgreSQL range literal such as `[2,3]`, `[2,3)` or `[2,)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    lower: Bound<Scalar>,
    upper: Bound<Scalar>,
}

impl Interval {
    pub fn new(lower: Bound<Scalar>, upper: Bound<Scalar>) -> Self {
        Self { lower, upper }
    }

    /// Both bounds inclusive: `[lower,upper]`.
    pub fn closed(lower: impl Into<Scalar>, upper: impl Into<Scalar>) -> Self {
        Self::new(Bound::Included(lower.into()), Bound::Included(upper.into()))
    }

    /// Inclusive lower, exclusive upper: `[lower,upper)`.
    pub fn half_open(lower: impl Into<Scalar>, upper: impl Into<Scalar>) -> Self {
        Self::new(Bound::Included(lower.into()), Bound::Excluded(upper.into()))
    }

    /// Unbounded above: `[lower,)`.
    pub fn starting_at(lower: impl Into<Scalar>) -> Self {
        Self::new(Bound::Included(lower.into()), Bound::Unbounded)
    }

    pub fn lower(&self) -> &Bound<Scalar> {
        &self.lower
    }

    pub fn upper(&self) -> &Bound<Scalar> {
        &self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Bound::Included(v) => write!(f, "[{v}")?,
            Bound::Excluded(v) => write!(f, "({v}")?,
            Bound::Unbounded => f.write_str("(")?,
        }
        f.write_str(",")?;
        match &self.upper {
            Bound::Included(v) => write!(f, "{v}]"),
            Bound::Excluded(v) => write!(f, "{v})"),
            Bound::Unbounded => f.write_str(")"),
        }
    }
}

impl From<RangeInclusive<i64>> for Interval {
    fn from(range: RangeInclusive<i64>) -> Self {
        let (start, end) = range.into_inner();
        Self::closed(start, end)
    }
}

impl From<Range<i64>> for Interval {
    fn from(range: Range<i64>) -> Self {
        Self::half_open(range.start, range.end)
    }
}

impl From<RangeFrom<i64>> for Interval {
    fn from(range: RangeFrom<i64>) -> Self {
        Self::starting_at(range.start)
    }
}

/// Query text plus the text-search configuration (language) it runs under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullTextSearch {
    pub query: String,
    pub language: String,
}

impl FullTextSearch {
    pub fn new(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
        }
    }
}

/// Every shape a filter criterion can take.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
    Null,
    Scalar(Scalar),
    List(Vec<Scalar>),
    Map(BTreeMap<String, Scalar>),
    Interval(Interval),
    FullText(FullTextSearch),
}

impl Criterion {
    /// Short name of this criterion's shape, used in usage errors.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Interval(_) => "interval",
            Self::FullText(_) => "full-text config",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Builds a list criterion from any iterator of scalars.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Criterion>> From<Option<T>> for Criterion {
    fn from(value: Option<T>) -> Self {
        value.map_or(Criterion::Null, Into::into)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Criterion {
    fn from(items: Vec<T>) -> Self {
        Criterion::list(items)
    }
}

impl<K: Into<String>, T: Into<Scalar>> From<BTreeMap<K, T>> for Criterion {
    fn from(map: BTreeMap<K, T>) -> Self {
        Criterion::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, T: Into<Scalar>> From<HashMap<K, T>> for Criterion {
    fn from(map: HashMap<K, T>) -> Self {
        Criterion::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Interval> for Criterion {
    fn from(interval: Interval) -> Self {
        Criterion::Interval(interval)
    }
}

impl From<RangeInclusive<i64>> for Criterion {
    fn from(range: RangeInclusive<i64>) -> Self {
        Criterion::Interval(range.into())
    }
}

impl From<Range<i64>> for Criterion {
    fn from(range: Range<i64>) -> Self {
        Criterion::Interval(range.into())
    }
}

impl From<FullTextSearch> for Criterion {
    fn from(config: FullTextSearch) -> Self {
        Criterion::FullText(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_notation() {
        assert_eq!(Interval::closed(2, 3).to_string(), "[2,3]");
        assert_eq!(Interval::from(2i64..5).to_string(), "[2,5)");
        assert_eq!(Interval::from(7i64..).to_string(), "[7,)");
        let open = Interval::new(Bound::Excluded(Scalar::Int(1)), Bound::Included(Scalar::Int(4)));
        assert_eq!(open.to_string(), "(1,4]");
    }

    #[test]
    fn option_none_is_null() {
        let c: Criterion = Option::<&str>::None.into();
        assert!(c.is_null());
        let c: Criterion = Some(42).into();
        assert_eq!(c, Criterion::Scalar(Scalar::Int(42)));
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from(false).to_string(), "false");
        assert_eq!(Scalar::from("bar").to_string(), "bar");
    }
}
