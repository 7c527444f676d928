//! URL and header assembly.
//!
//! Query params come out in a fixed order: static params, `apikey`, filters,
//! orderers, `select`, `on_conflict`, `limit`, `offset`.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::config::ClientOptions;
use crate::core::error::Result;
use crate::core::headers::{self, Headers};
use crate::state::QueryState;
use crate::transport::{HttpRequest, Method};

/// Characters escaped in query keys and values. PostgREST punctuation
/// (`.`, `,`, `(`, `)`, `*`, `:`, `[`, `]`) stays readable.
const QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Value of the `X-Client-Info` header.
pub const CLIENT_INFO: &str = concat!("pgrest-rs/", env!("CARGO_PKG_VERSION"));

/// Ordered `(key, value)` params for `state`, unencoded.
pub fn query_params(options: &ClientOptions, state: &QueryState) -> Result<Vec<(String, String)>> {
    let mut params = options.query_params.clone();

    if let Some(key) = options.api_key() {
        params.push((headers::APIKEY.to_string(), key.to_string()));
    }

    for filter in &state.filters {
        params.push(filter.compile()?);
    }

    let mut orders: Vec<(String, String)> = Vec::with_capacity(state.orderers.len());
    for orderer in &state.orderers {
        let (key, value) = orderer.to_param();
        match orders.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => orders.push((key, value)),
        }
    }
    params.extend(orders);

    if let Some(select) = &state.select {
        let stripped: String = select.chars().filter(|c| !c.is_whitespace()).collect();
        if !stripped.is_empty() {
            params.push(("select".to_string(), stripped));
        }
    }
    if let Some(column) = &state.on_conflict {
        params.push(("on_conflict".to_string(), column.clone()));
    }
    if let Some(limit) = &state.limit {
        params.push((limit.key("limit"), limit.value.to_string()));
    }
    if let Some(offset) = &state.offset {
        params.push((offset.key("offset"), offset.value.to_string()));
    }

    Ok(params)
}

/// `<base>/<path>?<params>`; the `?` is omitted when there are no params.
pub fn build_url(
    base_url: &str,
    path: &str,
    options: &ClientOptions,
    state: &QueryState,
) -> Result<String> {
    let mut url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    let params = query_params(options, state)?;

    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.extend(utf8_percent_encode(key, QUERY));
        url.push('=');
        url.extend(utf8_percent_encode(value, QUERY));
    }

    Ok(url)
}

/// Base headers, client info, schema profile, range and content type, with
/// `overrides` (per-call options) winning on conflicts.
pub fn build_headers(
    options: &ClientOptions,
    method: Method,
    state: &QueryState,
    has_body: bool,
    overrides: Headers,
) -> Headers {
    let mut out: Headers = options.headers.clone();

    if headers::get(&out, headers::CLIENT_INFO).is_none() {
        out.insert(headers::CLIENT_INFO.to_string(), CLIENT_INFO.to_string());
    }

    if !options.schema.is_empty() {
        let profile = if method.is_read() {
            headers::ACCEPT_PROFILE
        } else {
            headers::CONTENT_PROFILE
        };
        out.insert(profile.to_string(), options.schema.clone());
    }

    if let Some(range) = &state.range {
        out.insert(headers::RANGE_UNIT.to_string(), "items".to_string());
        out.insert(headers::RANGE.to_string(), range.header_value());
    }

    if has_body {
        out.insert(headers::CONTENT_TYPE.to_string(), headers::JSON.to_string());
    }

    headers::merge(&mut out, overrides);
    out
}

/// Compiles `state` into a complete request.
pub fn assemble(
    base_url: &str,
    path: &str,
    options: &ClientOptions,
    method: Method,
    state: &QueryState,
    body: Option<String>,
    overrides: Headers,
) -> Result<HttpRequest> {
    let url = build_url(base_url, path, options, state)?;
    let headers = build_headers(options, method, state, body.is_some(), overrides);
    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}
