//! Memory-mapped catalog reader.

use super::{data_offset, Metadata, CATALOG_MAGIC, CATALOG_VERSION, PREAMBLE_SIZE};
use crate::catalog::{Catalog, Header, Schema};
use crate::error::{Error, Result};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Memory-mapped handle to a catalog file.
///
/// Opening validates the preamble and parses the metadata block; record
/// bytes are not touched until [`CatalogFile::record`] or
/// [`CatalogFile::to_catalog`] is called.
pub struct CatalogFile {
    path: PathBuf,
    mmap: Mmap,
    header: Header,
    schema: Schema,
    record_count: usize,
    data_offset: usize,
}

impl CatalogFile {
    /// Open and memory-map a catalog file.
    ///
    /// # Errors
    /// [`Error::InputNotFound`] if the path does not exist,
    /// [`Error::InvalidCatalog`] if the file is truncated, has the wrong
    /// magic or version, or its metadata disagrees with the preamble.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let file_len = file.metadata()?.len() as usize;
        if file_len < PREAMBLE_SIZE {
            return Err(invalid(path, format!("file too small: {} bytes", file_len)));
        }

        let mmap = unsafe { Mmap::map(&file) }?;
        let preamble = parse_preamble(path, &mmap)?;

        let meta_end = PREAMBLE_SIZE + preamble.meta_len;
        if mmap.len() < meta_end {
            return Err(invalid(
                path,
                format!(
                    "file too small for metadata: {} bytes, expected at least {}",
                    mmap.len(),
                    meta_end
                ),
            ));
        }
        let metadata: Metadata = serde_json::from_slice(&mmap[PREAMBLE_SIZE..meta_end])
            .map_err(|e| invalid(path, format!("unreadable metadata: {}", e)))?;

        if metadata.columns.record_size() != preamble.record_size {
            return Err(invalid(
                path,
                format!(
                    "schema describes {}-byte records, preamble says {}",
                    metadata.columns.record_size(),
                    preamble.record_size
                ),
            ));
        }

        let data_offset = data_offset(preamble.meta_len);
        let expected = (preamble.record_count as u128) * (preamble.record_size as u128)
            + data_offset as u128;
        if (mmap.len() as u128) < expected {
            return Err(invalid(
                path,
                format!(
                    "file too small for {} records: {} bytes, expected {}",
                    preamble.record_count,
                    mmap.len(),
                    expected
                ),
            ));
        }

        log::debug!(
            "Opened {:?}: {} records of {} bytes",
            path,
            preamble.record_count,
            preamble.record_size
        );

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            header: metadata.header,
            schema: metadata.columns,
            record_count: preamble.record_count as usize,
            data_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Total size of the mapped file in bytes.
    pub fn file_size(&self) -> usize {
        self.mmap.len()
    }

    /// Zero-copy view of one record. `None` if `index` is out of range.
    pub fn record(&self, index: usize) -> Option<&[u8]> {
        if index >= self.record_count {
            return None;
        }
        let size = self.schema.record_size();
        let start = self.data_offset + index * size;
        self.mmap.get(start..start + size)
    }

    fn data(&self) -> &[u8] {
        let end = self.data_offset + self.record_count * self.schema.record_size();
        &self.mmap[self.data_offset..end]
    }

    /// Copies every record into an owned [`Catalog`].
    pub fn to_catalog(&self) -> Result<Catalog> {
        Catalog::from_bytes(
            self.header.clone(),
            self.schema.clone(),
            self.data().to_vec(),
        )
    }
}

impl fmt::Display for CatalogFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;
        writeln!(f, "Records: {}", self.record_count)?;
        writeln!(f, "Record size: {} bytes", self.schema.record_size())?;
        writeln!(f, "File size: {} bytes", self.file_size())?;
        writeln!(f)?;
        writeln!(f, "Header:")?;
        if self.header.is_empty() {
            writeln!(f, "  (empty)")?;
        }
        for line in self.header.to_string().lines() {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "Columns:")?;
        for line in self.schema.to_string().lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Reads a catalog file fully into memory.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    CatalogFile::open(path)?.to_catalog()
}

struct Preamble {
    record_count: u64,
    record_size: usize,
    meta_len: usize,
}

fn parse_preamble(path: &Path, bytes: &[u8]) -> Result<Preamble> {
    let preamble = &bytes[0..PREAMBLE_SIZE];

    let magic = &preamble[0..4];
    if magic != CATALOG_MAGIC {
        return Err(invalid(
            path,
            format!("bad magic: expected {:?}, got {:?}", CATALOG_MAGIC, magic),
        ));
    }

    let version = read_u32(preamble, 4);
    if version != CATALOG_VERSION {
        return Err(invalid(
            path,
            format!(
                "unsupported version: expected {}, got {}",
                CATALOG_VERSION, version
            ),
        ));
    }

    let record_count = read_u64(preamble, 8);
    let record_size = read_u32(preamble, 16) as usize;
    let meta_len = read_u32(preamble, 20) as usize;

    if record_size == 0 {
        return Err(invalid(path, "record size is zero".to_string()));
    }

    Ok(Preamble {
        record_count,
        record_size,
        meta_len,
    })
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}

fn invalid(path: &Path, reason: String) -> Error {
    Error::InvalidCatalog {
        path: path.to_path_buf(),
        reason,
    }
}
