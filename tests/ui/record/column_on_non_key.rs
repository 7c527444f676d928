//! `column` renames the key column, so it is rejected on other fields.

use pgrest::prelude::*;

#[derive(Record)]
struct Item {
    #[record(column = "label")]
    name: String,
    #[record(primary_key)]
    id: i64,
}

fn main() {}
