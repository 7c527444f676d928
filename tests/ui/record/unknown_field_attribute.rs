//! Misspelled field options are reported at the offending key.

use pgrest::prelude::*;

#[derive(Record)]
struct Item {
    #[record(primary_key, colum = "id")]
    id: i64,
}

fn main() {}
