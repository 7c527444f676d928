//! The struct-level attribute only accepts `table`.

use pgrest::prelude::*;

#[derive(Record)]
#[record(name = "items")]
struct Item {
    #[record(primary_key)]
    id: i64,
}

fn main() {}
