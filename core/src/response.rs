//! Response modeling: raw body to typed collections.
//!
//! Parsing never looks at the status code; non-2xx responses are turned into
//! [`PgrestError::Rejected`] before they get here.

use serde::de::DeserializeOwned;

use crate::error::{PgrestError, Result};
use crate::headers::{self, Headers};

/// Parses a body that is empty, a JSON array, or a single JSON object.
pub fn parse_models<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let trimmed = body.trim_start();
    match trimmed.chars().next() {
        None => Ok(Vec::new()),
        Some('[') => serde_json::from_str(trimmed).map_err(decode),
        Some('{') => serde_json::from_str(trimmed)
            .map(|model| vec![model])
            .map_err(decode),
        Some(other) => Err(PgrestError::Decode(format!(
            "expected a JSON array, object or empty body, found `{other}`"
        ))),
    }
}

fn decode(err: serde_json::Error) -> PgrestError {
    PgrestError::Decode(err.to_string())
}

/// Total row count from `Content-Range: <from>-<to>/<total>` (or `*/<total>`).
pub fn parse_content_range(value: &str) -> Result<u64> {
    let invalid = || PgrestError::InvalidContentRange(value.to_string());
    let (range, total) = value.trim().split_once('/').ok_or_else(invalid)?;

    let range_ok = range == "*"
        || range
            .split_once('-')
            .is_some_and(|(from, to)| from.parse::<u64>().is_ok() && to.parse::<u64>().is_ok());
    if !range_ok {
        return Err(invalid());
    }

    total.parse().map_err(|_| invalid())
}

/// Status, headers and raw body of a completed request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseResponse {
    pub status: u16,
    /// Lowercased header names
    pub headers: Headers,
    pub content: String,
}

impl BaseResponse {
    pub fn new(status: u16, headers: Headers, content: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            content: content.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        headers::get(&self.headers, name)
    }

    /// Deserializes the body as an arbitrary JSON shape (RPC results).
    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        serde_json::from_str(&self.content).map_err(decode)
    }

    /// Row total from the `Content-Range` header.
    pub fn content_range_total(&self) -> Result<u64> {
        let value = self.header(headers::CONTENT_RANGE).ok_or_else(|| {
            PgrestError::InvalidContentRange("missing Content-Range header".to_string())
        })?;
        parse_content_range(value)
    }
}

/// A response whose body has been decoded into records.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeledResponse<T> {
    pub status: u16,
    pub headers: Headers,
    pub content: String,
    pub models: Vec<T>,
}

impl<T: DeserializeOwned> ModeledResponse<T> {
    pub fn from_base(base: BaseResponse) -> Result<Self> {
        let models = parse_models(&base.content)?;
        Ok(Self {
            status: base.status,
            headers: base.headers,
            content: base.content,
            models,
        })
    }
}

impl<T> ModeledResponse<T> {
    pub fn model(&self) -> Option<&T> {
        self.models.first()
    }

    pub fn into_models(self) -> Vec<T> {
        self.models
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        headers::get(&self.headers, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn body_shapes() {
        assert!(parse_models::<Row>("").unwrap().is_empty());
        assert!(parse_models::<Row>("  \n").unwrap().is_empty());
        assert!(parse_models::<Row>("[]").unwrap().is_empty());
        assert_eq!(parse_models::<Row>("{\"id\":1}").unwrap(), vec![Row { id: 1 }]);
        assert_eq!(
            parse_models::<Row>(" [{\"id\":1},{\"id\":2}]").unwrap(),
            vec![Row { id: 1 }, Row { id: 2 }]
        );
    }

    #[test]
    fn unexpected_leading_character_is_decode_error() {
        for body in ["null", "\"x\"", "42", "<html>"] {
            assert!(
                matches!(parse_models::<Row>(body), Err(PgrestError::Decode(_))),
                "{body}"
            );
        }
        assert!(matches!(
            parse_models::<Row>("{\"id\":\"nope\"}"),
            Err(PgrestError::Decode(_))
        ));
    }

    #[test]
    fn content_range() {
        assert_eq!(parse_content_range("0-3/4").unwrap(), 4);
        assert_eq!(parse_content_range("*/0").unwrap(), 0);
        assert!(parse_content_range("0-3/*").is_err());
        assert!(parse_content_range("0-3").is_err());
        assert!(parse_content_range("garbage/4").is_err());
        assert!(parse_content_range("1-/4").is_err());
        assert!(parse_content_range("-3/4").is_err());
        assert!(parse_content_range("/4").is_err());

        let response = BaseResponse::default();
        assert!(matches!(
            response.content_range_total(),
            Err(PgrestError::InvalidContentRange(_))
        ));
    }

    #[test]
    fn modeled_response_keeps_raw_parts() {
        let mut h = Headers::new();
        h.insert("content-range".into(), "0-0/1".into());
        let base = BaseResponse::new(200, h, "[{\"id\":9}]");
        let modeled = ModeledResponse::<Row>::from_base(base).unwrap();
        assert_eq!(modeled.model(), Some(&Row { id: 9 }));
        assert_eq!(modeled.header("Content-Range"), Some("0-0/1"));
        assert_eq!(modeled.content, "[{\"id\":9}]");
    }
}
