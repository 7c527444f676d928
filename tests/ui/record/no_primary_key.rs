//! A record without a `#[record(primary_key)]` field is rejected.

use pgrest::prelude::*;

#[derive(Record)]
struct Item {
    id: i64,
}

fn main() {}
