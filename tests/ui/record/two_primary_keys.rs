//! Composite keys are not supported; only one field may be the key.

use pgrest::prelude::*;

#[derive(Record)]
struct Item {
    #[record(primary_key)] id: i64,
    #[record(primary_key)] slug: String,
}

fn main() {}
