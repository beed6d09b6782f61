//! Order Data
//!
//! Loading of the order line-item table from a CSV file or an HTTP URL.
//!
//! # Pipeline
//!
//! ```text
//! DataSource → fetch bytes → parse CSV → coerce timestamps → OrderTable
//! ```
//!
//! Loading is fail-fast: a missing column, an unparseable price or a bad
//! timestamp aborts the whole load. There is no partial result.

pub mod error;
pub mod loader;
pub mod source;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{load_orders, parse_orders, parse_timestamp};
pub use source::{DataSource, FileSource, HttpSource, OrderSource};
pub use types::{OrderRecord, OrderTable};
