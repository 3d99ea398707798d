//! Random point catalogs for survey statistics.
//!
//! Generates uniform random catalogs over a sky region and splits large
//! random catalogs into smaller ones with a deterministic shuffle, scaling
//! the `DENSITY` header card so each piece still describes its own point
//! density.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`Catalog`](catalog::Catalog), [`Header`](catalog::Header), [`Schema`](catalog::Schema) |
//! | [`io`] | Memory-mapped [`CatalogFile`](io::CatalogFile) reader, atomic [`write_catalog`](io::write_catalog) |
//! | [`partition`] | Seeded shuffle-and-split: [`PartitionPlan`](partition::PartitionPlan), [`partition`](partition::partition) |
//! | [`split`] | File-level split into `-1`, `-2`, … chunk files |
//! | [`generate`] | Uniform randoms in an RA/Dec box |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_randoms::generate::{generate_randoms, RandomsConfig};
//! use celestial_randoms::io::write_catalog;
//! use celestial_randoms::partition::{ChunkCount, DEFAULT_SEED};
//! use celestial_randoms::split::split_file;
//!
//! let randoms = generate_randoms(&RandomsConfig::default())?;
//! write_catalog("randoms.rcat", &randoms)?;
//! let summary = split_file("randoms.rcat".as_ref(), ChunkCount::new(10)?, DEFAULT_SEED)?;
//! ```
//!
//! # Features
//!
//! - **`cli`** (default): builds the `randoms` binary.

pub mod catalog;
pub mod error;
pub mod generate;
pub mod io;
pub mod partition;
pub mod split;

pub use error::{Error, Result};
