//! Filter compiler: [`Filter`] tree to PostgREST query parameters.
//!
//! Leaves become `column=<token>.<criterion>`. Negation keeps the key and
//! prefixes the value with `not.`. AND/OR groups become `and=(...)` / `or=(...)`
//! with each child folded in as `column.<token>.<criterion>`; nested groups use
//! the `and(...)` form PostgREST expects inside a group body. Text inside a
//! group body is double-quoted when it contains `,.:()"\`, so a value can
//! never split or extend the group.

use std::borrow::Cow;

use crate::criterion::{Criterion, Scalar};
use crate::error::{PgrestError, Result};
use crate::filter::{Filter, Logical, check_shape};
use crate::operator::Operator;

/// Characters PostgREST reserves inside `and=(...)` / `or=(...)` bodies.
const GROUP_RESERVED: [char; 7] = [',', '.', ':', '(', ')', '"', '\\'];

/// Compiles one filter into a `(key, value)` query pair.
pub fn compile(filter: &Filter) -> Result<(String, String)> {
    compile_with(filter, false)
}

fn compile_with(filter: &Filter, in_group: bool) -> Result<(String, String)> {
    match filter {
        Filter::Leaf {
            column,
            operator,
            criterion,
        } => compile_leaf(column, *operator, criterion, in_group),
        Filter::Not(inner) => match inner.as_ref() {
            Filter::Group { operator, children } => Ok((
                format!("not.{}", operator.wire_token()),
                group_body(*operator, children)?,
            )),
            other => {
                let (key, value) = compile_with(other, in_group)?;
                Ok((key, format!("not.{value}")))
            }
        },
        Filter::Group { operator, children } => Ok((
            operator.wire_token().to_string(),
            group_body(*operator, children)?,
        )),
    }
}

fn group_body(operator: Logical, children: &[Filter]) -> Result<String> {
    if children.is_empty() {
        return Err(PgrestError::usage(format!(
            "`{operator}` group needs at least one child filter"
        )));
    }

    let parts = children
        .iter()
        .map(fold_child)
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("({})", parts.join(",")))
}

/// A child inside a group body: `key.value`, or `and(...)` for nested groups.
fn fold_child(child: &Filter) -> Result<String> {
    match child {
        Filter::Group { operator, children } => Ok(format!(
            "{}{}",
            operator.wire_token(),
            group_body(*operator, children)?
        )),
        Filter::Not(inner) if matches!(inner.as_ref(), Filter::Group { .. }) => {
            let nested = fold_child(inner)?;
            Ok(format!("not.{nested}"))
        }
        _ => {
            let (key, value) = compile_with(child, true)?;
            Ok(format!("{key}.{value}"))
        }
    }
}

fn compile_leaf(
    column: &str,
    operator: Operator,
    criterion: &Criterion,
    in_group: bool,
) -> Result<(String, String)> {
    if criterion.is_null() {
        let value = match operator {
            Operator::Equals | Operator::Is => "is.null",
            Operator::Not | Operator::NotEqual => "not.is.null",
            _ => {
                return Err(PgrestError::usage(format!(
                    "null criteria must use the `Equals`, `Is`, `Not` or `NotEqual` operators, got `{operator}` on `{column}`"
                )));
            }
        };
        return Ok((column.to_string(), value.to_string()));
    }

    check_shape(column, operator, criterion)?;

    let token = operator.wire_token();
    let value = match criterion {
        Criterion::Scalar(Scalar::Text(pattern)) if operator.is_pattern() => {
            let pattern = pattern.replace('%', "*");
            format!("{token}.{}", group_text(&pattern, in_group))
        }
        Criterion::Scalar(Scalar::Text(text)) => format!("{token}.{}", group_text(text, in_group)),
        Criterion::Scalar(scalar) => format!("{token}.{scalar}"),
        Criterion::List(items) if operator == Operator::In => {
            let quoted: Vec<String> = items.iter().map(quote_item).collect();
            format!("{token}.({})", quoted.join(","))
        }
        Criterion::List(items) => {
            let bare: Vec<String> = items.iter().map(ToString::to_string).collect();
            format!("{token}.{{{}}}", bare.join(","))
        }
        Criterion::Map(map) => format!("{token}.{}", serde_json::to_string(map)?),
        Criterion::Interval(interval) => format!("{token}.{interval}"),
        Criterion::FullText(search) => {
            let query = group_text(&search.query, in_group);
            format!("{token}({}).{query}", search.language)
        }
        Criterion::Null => unreachable!("null criteria are handled above"),
    };

    Ok((column.to_string(), value))
}

/// Double-quotes an `in.(...)` item.
fn quote_item(item: &Scalar) -> String {
    quote(&item.to_string())
}

fn group_text(raw: &str, in_group: bool) -> Cow<'_, str> {
    if in_group && raw.contains(GROUP_RESERVED) {
        Cow::Owned(quote(raw))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Wraps `raw` in double quotes, escaping backslashes and quotes.
fn quote(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
