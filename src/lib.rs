//! # pgrest
//!
//! A typed query builder for PostgREST-style HTTP APIs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgrest::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, Record)]
//! #[record(table = "users")]
//! struct User {
//!     #[record(primary_key)]
//!     username: String,
//!     status: Option<String>,
//!     age_range: Option<String>,
//! }
//!
//! # async fn run() -> pgrest::Result<()> {
//! let client = Client::with_options(
//!     "http://localhost:3000",
//!     ClientOptions::default().with_api_key("anon-key"),
//! );
//!
//! let online = client
//!     .table::<User>()
//!     .eq("status", "ONLINE")
//!     .order("username", Ordering::Ascending, NullPosition::First)
//!     .limit(10)
//!     .get()
//!     .await?;
//!
//! for user in &online.models {
//!     println!("{}", user.username);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature   | Default | Enables                                        |
//! |-----------|---------|------------------------------------------------|
//! | `reqwest` | yes     | `ReqwestTransport` and `Client::new`           |
//! | `tracing` | yes     | `tracing` events for requests and state resets |

mod client;
pub mod config;
pub mod request;
pub mod state;
mod table;
pub mod transport;

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for pgrest operations
pub use pgrest_core::error::Result;

/// `#[derive(Record)]`
pub use pgrest_macros::Record;

pub use client::Client;
pub use config::{ClientConfig, ClientOptions};
pub use table::{Payload, Table};

/// Error types
pub mod error {
    pub use pgrest_core::error::PgrestError;
}

// =============================================================================
// Core module - pure query representation
// =============================================================================

/// Operators, criteria, filters, the filter compiler and parser, query options,
/// the record contract and the response modeler.
///
/// Generated code refers to `pgrest::core::Record`, `pgrest::core::TableDescriptor`
/// and `pgrest::core::Criterion`.
pub mod core {
    pub use pgrest_core::*;
}

/// Everything needed to declare records and run queries.
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{ClientConfig, ClientOptions};
    pub use crate::table::{Payload, Table};
    pub use crate::transport::Transport;
    pub use pgrest_core::{
        CountType, Criterion, DuplicateResolution, Filter, FullTextSearch, Interval, ModeledResponse,
        NullPosition, Operator, Ordering, PgrestError, QueryOptions, Record, ReturnType,
    };
    pub use pgrest_macros::Record;
}
