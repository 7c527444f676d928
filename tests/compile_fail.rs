//! Compile-fail tests for `#[derive(Record)]`.
//!
//! Key and attribute mistakes must be caught at compile time.

#[test]
fn record_derive_ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/record/*.rs");
}
