//! Store access and the pure passes over the yearly table.

pub mod filter;
pub mod normalize;
pub mod store;

pub use filter::{filter_range, resolve_range, YearRange};
pub use normalize::{denormalize, normalize, parse_raw};
pub use store::{ColumnMapping, InMemorySource, SqliteStore, StoreError, YearlySource};
