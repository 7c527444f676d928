//! Header names and the header map type shared by the assembler and transports.

use std::collections::BTreeMap;

/// Request or response headers. Sorted so assembled requests are deterministic.
pub type Headers = BTreeMap<String, String>;

pub const PREFER: &str = "Prefer";
pub const ACCEPT: &str = "Accept";
pub const RANGE: &str = "Range";
pub const RANGE_UNIT: &str = "Range-Unit";
pub const CONTENT_RANGE: &str = "Content-Range";
pub const ACCEPT_PROFILE: &str = "Accept-Profile";
pub const CONTENT_PROFILE: &str = "Content-Profile";
pub const CLIENT_INFO: &str = "X-Client-Info";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const APIKEY: &str = "apikey";

/// `Accept` value that asks PostgREST for a bare object instead of an array.
pub const OBJECT_JSON: &str = "application/vnd.pgrst.object+json";
pub const JSON: &str = "application/json";

/// Overlays `overrides` onto `base`. Keys compare case-insensitively and the
/// override's spelling wins.
pub fn merge(base: &mut Headers, overrides: Headers) {
    for (key, value) in overrides {
        base.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        base.insert(key, value);
    }
}

/// Case-insensitive lookup.
pub fn get<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
