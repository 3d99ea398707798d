//! In-memory catalog: header, schema and packed record bytes.

use super::header::Header;
use super::schema::{ColumnType, Schema};
use crate::error::{Error, Result};
use std::slice::ChunksExact;

/// A fully materialized catalog.
///
/// Records are stored back to back in one buffer, `schema.record_size()`
/// bytes each. The catalog never interprets record contents except through
/// the typed column accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    header: Header,
    schema: Schema,
    data: Vec<u8>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new(header: Header, schema: Schema) -> Self {
        Self {
            header,
            schema,
            data: Vec::new(),
        }
    }

    /// Creates an empty catalog with room for `records` records.
    ///
    /// # Errors
    /// [`Error::CatalogTooLarge`] if the buffer size overflows or cannot be
    /// allocated.
    pub fn with_capacity(header: Header, schema: Schema, records: usize) -> Result<Self> {
        let bytes = records
            .checked_mul(schema.record_size())
            .ok_or(Error::CatalogTooLarge(records))?;
        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| Error::CatalogTooLarge(records))?;
        Ok(Self {
            header,
            schema,
            data,
        })
    }

    /// Wraps an existing record buffer.
    ///
    /// # Errors
    /// Returns [`Error::SchemaMismatch`] if the buffer length is not a
    /// whole number of records.
    pub fn from_bytes(header: Header, schema: Schema, data: Vec<u8>) -> Result<Self> {
        let size = schema.record_size();
        if data.len() % size != 0 {
            return Err(Error::SchemaMismatch(format!(
                "{} data bytes is not a multiple of the {}-byte record size",
                data.len(),
                size
            )));
        }
        Ok(Self {
            header,
            schema,
            data,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.schema.record_size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn record(&self, index: usize) -> Option<&[u8]> {
        let size = self.schema.record_size();
        let start = index.checked_mul(size)?;
        self.data.get(start..start.checked_add(size)?)
    }

    pub fn records(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.schema.record_size())
    }

    /// Appends one packed record.
    pub fn push(&mut self, record: &[u8]) -> Result<()> {
        let size = self.schema.record_size();
        if record.len() != size {
            return Err(Error::SchemaMismatch(format!(
                "record is {} bytes, schema expects {}",
                record.len(),
                size
            )));
        }
        self.data.extend_from_slice(record);
        Ok(())
    }

    /// Gathers the records at `indices`, in that order, into a new catalog
    /// carrying `header` and a copy of this schema.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn gather(&self, indices: &[usize], header: Header) -> Catalog {
        let size = self.schema.record_size();
        let mut data = Vec::with_capacity(indices.len() * size);
        for &i in indices {
            data.extend_from_slice(&self.data[i * size..(i + 1) * size]);
        }
        Catalog {
            header,
            schema: self.schema.clone(),
            data,
        }
    }

    /// Reads a float column of one record. Integer and `f32` columns are
    /// widened; returns `None` for an unknown column or index.
    pub fn value_f64(&self, index: usize, column: &str) -> Option<f64> {
        let (offset, dtype) = self.schema.offset_of(column)?;
        let record = self.record(index)?;
        let bytes = &record[offset..offset + dtype.size()];
        let value = match dtype {
            ColumnType::U8 => bytes[0] as f64,
            ColumnType::I16 => i16::from_le_bytes(bytes.try_into().ok()?) as f64,
            ColumnType::I32 => i32::from_le_bytes(bytes.try_into().ok()?) as f64,
            ColumnType::I64 => i64::from_le_bytes(bytes.try_into().ok()?) as f64,
            ColumnType::F32 => f32::from_le_bytes(bytes.try_into().ok()?) as f64,
            ColumnType::F64 => f64::from_le_bytes(bytes.try_into().ok()?),
        };
        Some(value)
    }

    /// Reads an `i64` column of one record.
    pub fn value_i64(&self, index: usize, column: &str) -> Option<i64> {
        let (offset, dtype) = self.schema.offset_of(column)?;
        if dtype != ColumnType::I64 {
            return None;
        }
        let record = self.record(index)?;
        Some(i64::from_le_bytes(record[offset..offset + 8].try_into().ok()?))
    }
}
