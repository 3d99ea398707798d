//! Catalog data model.
//!
//! - [`header`]: ordered keyword cards, density scaling
//! - [`schema`]: fixed record layout
//! - [`table`]: in-memory [`Catalog`] of packed records

pub mod header;
pub mod schema;
pub mod table;

pub use header::{DensityScaling, Header, HeaderCard, HeaderValue, DENSITY_KEY};
pub use schema::{Column, ColumnType, Schema};
pub use table::Catalog;
