pub mod compile;
pub mod criterion;
pub mod error;
pub mod filter;
pub mod headers;
pub mod operator;
pub mod options;
pub mod order;
pub mod parse;
pub mod record;
pub mod response;
mod tracing;

// Re-export key types and traits
pub use criterion::{Criterion, FullTextSearch, Interval, Scalar};
pub use error::{PgrestError, Result};
pub use filter::{Filter, Logical};
pub use headers::Headers;
pub use operator::{NullPosition, Operator, Ordering};
pub use options::{CountType, DuplicateResolution, QueryOptions, ReturnType};
pub use order::Orderer;
pub use record::{Record, TableDescriptor};
pub use response::{BaseResponse, ModeledResponse};
