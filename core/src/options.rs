//! Per-call mutation options and their `Prefer` header encoding.

use core::fmt;

use crate::headers::{self, Headers};

/// Whether a mutation echoes the affected rows back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Minimal,
    #[default]
    Representation,
}

impl ReturnType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Representation => "representation",
        }
    }
}

/// Conflict handling for upserts. Ignored unless upsert is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DuplicateResolution {
    #[default]
    MergeDuplicates,
    IgnoreDuplicates,
}

impl DuplicateResolution {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MergeDuplicates => "merge-duplicates",
            Self::IgnoreDuplicates => "ignore-duplicates",
        }
    }
}

/// Row-count algorithm requested through `Prefer: count=...`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CountType {
    #[default]
    None,
    Exact,
    Planned,
    Estimated,
}

impl CountType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Exact => "exact",
            Self::Planned => "planned",
            Self::Estimated => "estimated",
        }
    }
}

impl fmt::Display for CountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single terminal call. Never stored on the builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub returning: ReturnType,
    pub duplicate_resolution: DuplicateResolution,
    pub count: CountType,
    pub upsert: bool,
    /// Unique column an upsert resolves conflicts on (`on_conflict=`)
    pub on_conflict: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, returning: ReturnType) -> Self {
        self.returning = returning;
        self
    }

    pub fn minimal(self) -> Self {
        self.returning(ReturnType::Minimal)
    }

    pub fn duplicate_resolution(mut self, resolution: DuplicateResolution) -> Self {
        self.duplicate_resolution = resolution;
        self
    }

    pub fn count(mut self, count: CountType) -> Self {
        self.count = count;
        self
    }

    pub fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }

    pub fn on_conflict(mut self, column: impl Into<String>) -> Self {
        self.on_conflict = Some(column.into());
        self
    }

    /// `Prefer` segments in order: resolution (upsert only), return, count (non-none only).
    pub fn prefer(&self) -> String {
        let mut segments = Vec::with_capacity(3);
        if self.upsert {
            segments.push(format!("resolution={}", self.duplicate_resolution.as_str()));
        }
        segments.push(format!("return={}", self.returning.as_str()));
        if self.count != CountType::None {
            segments.push(format!("count={}", self.count));
        }
        segments.join(",")
    }

    /// Always carries `Prefer`; minimal returns also send `Accept: */*`.
    pub fn to_headers(&self) -> Headers {
        let mut out = Headers::new();
        out.insert(headers::PREFER.to_string(), self.prefer());
        if self.returning == ReturnType::Minimal {
            out.insert(headers::ACCEPT.to_string(), "*/*".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefer(options: &QueryOptions) -> String {
        options.to_headers()[headers::PREFER].clone()
    }

    #[test]
    fn prefer_header_sequence() {
        let mut options = QueryOptions::new();
        assert_eq!(prefer(&options), "return=representation");
        assert!(!options.to_headers().contains_key(headers::ACCEPT));

        options.returning = ReturnType::Minimal;
        assert_eq!(prefer(&options), "return=minimal");
        assert_eq!(options.to_headers()[headers::ACCEPT], "*/*");

        options.upsert = true;
        assert_eq!(prefer(&options), "resolution=merge-duplicates,return=minimal");

        options.duplicate_resolution = DuplicateResolution::IgnoreDuplicates;
        assert_eq!(prefer(&options), "resolution=ignore-duplicates,return=minimal");

        options.upsert = false;
        options.count = CountType::Exact;
        assert_eq!(prefer(&options), "return=minimal,count=exact");
    }

    #[test]
    fn upsert_ignore_with_representation() {
        let options = QueryOptions::new()
            .upsert(true)
            .duplicate_resolution(DuplicateResolution::IgnoreDuplicates);
        assert_eq!(prefer(&options), "resolution=ignore-duplicates,return=representation");
    }
}
