//! Catalog file I/O.
//!
//! A catalog file has three contiguous sections:
//!
//! 1. **Preamble** (32 bytes): magic, version, record count, record size,
//!    metadata length
//! 2. **Metadata**: JSON object holding the header cards and the column
//!    schema, zero-padded to an 8-byte boundary
//! 3. **Record data** (`count × record_size` bytes): packed little-endian
//!    records
//!
//! Read with [`CatalogFile::open`] (memory-mapped, header only) or
//! [`read_catalog`] (fully materialized); write with [`write_catalog`].

pub mod reader;
pub mod writer;

pub use reader::{read_catalog, CatalogFile};
pub use writer::{encode_catalog, write_catalog};

use crate::catalog::{Header, Schema};
use serde::{Deserialize, Serialize};

pub(crate) const CATALOG_MAGIC: &[u8; 4] = b"RCAT";
pub(crate) const CATALOG_VERSION: u32 = 1;
pub(crate) const PREAMBLE_SIZE: usize = 32;
pub(crate) const DATA_ALIGN: usize = 8;

/// JSON block between the preamble and the record data.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Metadata {
    pub header: Header,
    pub columns: Schema,
}

/// Byte offset of the record data for a metadata block of `meta_len` bytes.
pub(crate) fn data_offset(meta_len: usize) -> usize {
    (PREAMBLE_SIZE + meta_len).next_multiple_of(DATA_ALIGN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_offset_alignment() {
        assert_eq!(data_offset(0), 32);
        assert_eq!(data_offset(1), 40);
        assert_eq!(data_offset(8), 40);
        assert_eq!(data_offset(9), 48);
    }
}
