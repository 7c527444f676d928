//! Parses compiled `(key, value)` query pairs back into [`Filter`] trees.
//!
//! Accepts exactly the grammar [`crate::compile`] emits, which is the subset
//! of PostgREST's horizontal filtering syntax this crate produces.

use core::ops::Bound;
use std::collections::BTreeMap;

use crate::criterion::{Criterion, FullTextSearch, Interval, Scalar};
use crate::error::{PgrestError, Result};
use crate::filter::{Filter, Logical};
use crate::operator::Operator;

impl Filter {
    /// Parses one query pair such as `("age", "gte.18")` or `("or", "(a.eq.1,b.eq.2)")`.
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        match key {
            "and" => parse_group(Logical::And, value),
            "or" => parse_group(Logical::Or, value),
            "not.and" => Ok(Filter::not(parse_group(Logical::And, value)?)),
            "not.or" => Ok(Filter::not(parse_group(Logical::Or, value)?)),
            column if column.is_empty() => Err(malformed(key, value, "empty column")),
            column => parse_leaf(column, value, false),
        }
    }
}

fn malformed(key: &str, value: &str, reason: &str) -> PgrestError {
    PgrestError::Usage(format!("cannot parse filter `{key}={value}`: {reason}"))
}

fn parse_group(operator: Logical, body: &str) -> Result<Filter> {
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| malformed(operator.wire_token(), body, "group body must be parenthesized"))?;

    let children = split_top_level(inner)
        .into_iter()
        .map(parse_child)
        .collect::<Result<Vec<_>>>()?;

    Ok(Filter::Group { operator, children })
}

/// A folded group child: `col.op.value`, `and(...)`, `or(...)` or their `not.` forms.
fn parse_child(child: &str) -> Result<Filter> {
    if let Some(rest) = child.strip_prefix("not.") {
        if rest.starts_with("and(") || rest.starts_with("or(") {
            return Ok(Filter::not(parse_child(rest)?));
        }
    }
    if let Some(body) = child.strip_prefix("and") {
        if body.starts_with('(') {
            return parse_group(Logical::And, body);
        }
    }
    if let Some(body) = child.strip_prefix("or") {
        if body.starts_with('(') {
            return parse_group(Logical::Or, body);
        }
    }

    let (column, value) = child
        .split_once('.')
        .ok_or_else(|| malformed("", child, "expected `column.operator.value`"))?;
    parse_leaf(column, value, true)
}

/// `in_group` leaves may carry double-quoted text.
fn parse_leaf(column: &str, value: &str, in_group: bool) -> Result<Filter> {
    if let Some(rest) = value.strip_prefix("not.") {
        return Ok(Filter::not(parse_leaf(column, rest, in_group)?));
    }

    let split_at = value
        .find(['.', '('])
        .ok_or_else(|| malformed(column, value, "missing operator"))?;
    let operator: Operator = value[..split_at].parse()?;

    if operator.is_full_text() {
        let rest = &value[split_at..];
        let (language, query) = rest
            .strip_prefix('(')
            .and_then(|r| r.split_once(")."))
            .ok_or_else(|| malformed(column, value, "expected `token(language).query`"))?;
        let query = unquote(query, in_group).unwrap_or_else(|| query.to_string());
        return Filter::new(column, operator, FullTextSearch::new(query, language));
    }

    let raw = value[split_at..]
        .strip_prefix('.')
        .ok_or_else(|| malformed(column, value, "expected `.` after operator"))?;

    let quoted = unquote(raw, in_group);
    let criterion = match operator {
        Operator::Is if raw == "null" => Criterion::Null,
        Operator::Like | Operator::ILike => {
            let pattern = quoted.as_deref().unwrap_or(raw);
            Criterion::Scalar(Scalar::Text(pattern.replace('*', "%")))
        }
        Operator::In if raw.starts_with('(') => parse_quoted_list(column, raw)?,
        Operator::In => parse_map(column, raw)?,
        op if op.is_containment() => parse_containment(column, raw)?,
        op if op.is_range() => Criterion::Interval(parse_interval(column, raw)?),
        _ => match quoted {
            Some(text) => Criterion::Scalar(Scalar::Text(text)),
            None => Criterion::Scalar(parse_scalar(raw)),
        },
    };

    Filter::new(column, operator, criterion)
}

fn parse_containment(column: &str, raw: &str) -> Result<Criterion> {
    if raw.starts_with('[') || raw.starts_with('(') {
        return Ok(Criterion::Interval(parse_interval(column, raw)?));
    }
    // `{}` is ambiguous between an empty list and an empty map; read it as a list.
    if raw.starts_with("{\"") {
        return parse_map(column, raw);
    }
    let inner = raw
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .ok_or_else(|| malformed(column, raw, "expected `{a,b}`, JSON or a range"))?;
    Ok(Criterion::List(
        split_top_level(inner).into_iter().map(parse_scalar).collect(),
    ))
}

fn parse_map(column: &str, raw: &str) -> Result<Criterion> {
    let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)
        .map_err(|e| malformed(column, raw, &format!("invalid JSON object: {e}")))?;
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let scalar = match v {
            serde_json::Value::String(s) => Scalar::Text(s),
            serde_json::Value::Bool(b) => Scalar::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or_default()),
            },
            other => {
                return Err(malformed(column, raw, &format!("non-scalar map value {other}")));
            }
        };
        out.insert(k, scalar);
    }
    Ok(Criterion::Map(out))
}

fn parse_quoted_list(column: &str, raw: &str) -> Result<Criterion> {
    let inner = raw
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| malformed(column, raw, "expected `(\"a\",\"b\")`"))?;
    let items = split_top_level(inner)
        .into_iter()
        .map(|item| match unquote(item, true) {
            Some(text) => Scalar::Text(text),
            None => parse_scalar(item),
        })
        .collect();
    Ok(Criterion::List(items))
}

/// Strips the double quotes around `raw` and resolves `\\` escapes.
fn unquote(raw: &str, allowed: bool) -> Option<String> {
    if !allowed {
        return None;
    }
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    Some(out)
}

fn parse_interval(column: &str, raw: &str) -> Result<Interval> {
    let bad = || malformed(column, raw, "expected a range literal like `[2,3]`");
    let mut chars = raw.chars();
    let open = chars.next().ok_or_else(bad)?;
    let close = chars.next_back().ok_or_else(bad)?;
    let (lo, hi) = chars.as_str().split_once(',').ok_or_else(bad)?;

    let lower = match (open, lo) {
        (_, "") => Bound::Unbounded,
        ('[', v) => Bound::Included(parse_scalar(v)),
        ('(', v) => Bound::Excluded(parse_scalar(v)),
        _ => return Err(bad()),
    };
    let upper = match (close, hi) {
        (_, "") => Bound::Unbounded,
        (']', v) => Bound::Included(parse_scalar(v)),
        (')', v) => Bound::Excluded(parse_scalar(v)),
        _ => return Err(bad()),
    };
    Ok(Interval::new(lower, upper))
}

fn parse_scalar(raw: &str) -> Scalar {
    if let Ok(i) = raw.parse::<i64>() {
        Scalar::Int(i)
    } else if let Ok(x) = raw.parse::<f64>()
        && raw.contains('.')
    {
        Scalar::Float(x)
    } else {
        match raw {
            "true" => Scalar::Bool(true),
            "false" => Scalar::Bool(false),
            other => Scalar::Text(other.to_string()),
        }
    }
}

/// Splits on commas that are not nested in brackets or inside double quotes.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' | '[' | '{' if !in_quotes => depth += 1,
            ')' | ']' | '}' if !in_quotes => depth -= 1,
            ',' if !in_quotes && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < input.len() || !parts.is_empty() {
        parts.push(&input[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(filter: Filter) {
        let (key, value) = filter.compile().unwrap();
        let parsed = Filter::parse(&key, &value).unwrap();
        assert_eq!(parsed.compile().unwrap(), (key, value));
    }

    #[test]
    fn every_leaf_operator_round_trips() {
        let mut map = BTreeMap::new();
        map.insert("bar", 100);
        let filters = vec![
            Filter::new("foo", Operator::Equals, "bar").unwrap(),
            Filter::new("foo", Operator::NotEqual, 3).unwrap(),
            Filter::new("foo", Operator::GreaterThan, 1.5).unwrap(),
            Filter::new("foo", Operator::GreaterThanOrEqual, 0).unwrap(),
            Filter::new("foo", Operator::LessThan, 10).unwrap(),
            Filter::new("foo", Operator::LessThanOrEqual, 100).unwrap(),
            Filter::new("foo", Operator::Is, true).unwrap(),
            Filter::new("foo", Operator::Equals, None::<i32>).unwrap(),
            Filter::new("foo", Operator::NotEqual, None::<i32>).unwrap(),
            Filter::new("foo", Operator::Like, "%bar%").unwrap(),
            Filter::new("foo", Operator::ILike, "b%").unwrap(),
            Filter::new("foo", Operator::In, vec!["bar", "b,uzz"]).unwrap(),
            Filter::new("foo", Operator::In, map.clone()).unwrap(),
            Filter::new("foo", Operator::Contains, vec!["a", "b"]).unwrap(),
            Filter::new("foo", Operator::ContainedIn, map).unwrap(),
            Filter::new("foo", Operator::Overlap, Interval::closed(2, 4)).unwrap(),
            Filter::new("foo", Operator::StrictlyLeft, Interval::closed(2, 3)).unwrap(),
            Filter::new("foo", Operator::StrictlyRight, 1i64..4).unwrap(),
            Filter::new("foo", Operator::NotRightOf, Interval::starting_at(2)).unwrap(),
            Filter::new("foo", Operator::NotLeftOf, Interval::closed(2, 4)).unwrap(),
            Filter::new("foo", Operator::Adjacent, Interval::closed(1, 2)).unwrap(),
            Filter::new("foo", Operator::FullTextSearch, FullTextSearch::new("bar", "english")).unwrap(),
            Filter::new("foo", Operator::PlainFullTextSearch, FullTextSearch::new("'fat' & 'cat'", "english")).unwrap(),
            Filter::new("foo", Operator::PhraseFullTextSearch, FullTextSearch::new("cat", "simple")).unwrap(),
            Filter::new("foo", Operator::WebFullTextSearch, FullTextSearch::new("fat cat", "english")).unwrap(),
        ];
        for filter in filters {
            round_trip(filter);
        }
    }

    #[test]
    fn parsing_preserves_operator_and_criterion_shape() {
        let parsed = Filter::parse("foo", "sl.[2,3]").unwrap();
        assert_eq!(
            parsed,
            Filter::new("foo", Operator::StrictlyLeft, Interval::closed(2, 3)).unwrap()
        );

        let parsed = Filter::parse("foo", "fts(english).bar").unwrap();
        assert_eq!(
            parsed,
            Filter::new("foo", Operator::FullTextSearch, FullTextSearch::new("bar", "english")).unwrap()
        );

        let parsed = Filter::parse("foo", "cs.{bar,buzz}").unwrap();
        assert_eq!(
            parsed,
            Filter::new("foo", Operator::Contains, vec!["bar", "buzz"]).unwrap()
        );
    }

    #[test]
    fn groups_round_trip() {
        round_trip(Filter::and([Filter::gte("a", 0), Filter::lte("a", 100)]));
        round_trip(Filter::or([
            Filter::eq("status", "ONLINE"),
            Filter::and([
                Filter::gt("age", 18),
                Filter::new("age", Operator::Adjacent, Interval::closed(1, 2)).unwrap(),
            ]),
            Filter::not(Filter::or([Filter::eq("a", 1)])),
        ]));
        round_trip(Filter::not(Filter::and([Filter::eq("a", 1), Filter::eq("b", 2)])));
        round_trip(Filter::not(Filter::eq("foo", "bar")));
    }

    #[test]
    fn quoted_group_values_round_trip() {
        let filter = Filter::or([Filter::eq("name", "Smith, John"), Filter::eq("age", 3)]);
        let (key, value) = filter.compile().unwrap();
        let parsed = Filter::parse(&key, &value).unwrap();
        assert_eq!(parsed, filter);

        let hostile = Filter::and([
            Filter::eq("role", "x,role.eq.admin"),
            Filter::not(Filter::eq("note", r#"say "hi" (\o/)"#)),
            Filter::new("name", Operator::ILike, "%a.b%").unwrap(),
            Filter::new("body", Operator::WebFullTextSearch, FullTextSearch::new("a, b", "english"))
                .unwrap(),
        ]);
        let (key, value) = hostile.compile().unwrap();
        let parsed = Filter::parse(&key, &value).unwrap();
        assert_eq!(parsed, hostile);
        round_trip(hostile);
    }

    #[test]
    fn empty_containment_list_round_trips() {
        let filter = Filter::new("tags", Operator::Contains, Vec::<String>::new()).unwrap();
        let (key, value) = filter.compile().unwrap();
        assert_eq!(value, "cs.{}");
        assert_eq!(Filter::parse(&key, &value).unwrap(), filter);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Filter::parse("foo", "bogus.1").is_err());
        assert!(Filter::parse("foo", "eq").is_err());
        assert!(Filter::parse("and", "a.eq.1").is_err());
        assert!(Filter::parse("foo", "sl.2").is_err());
        assert!(Filter::parse("foo", "fts.bar").is_err());
    }
}
