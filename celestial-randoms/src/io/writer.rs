//! Catalog writer.
//!
//! Files are written to a sibling `*.tmp` path and renamed into place once
//! complete, so an interrupted write never leaves a partial catalog under
//! the final name. Existing files are overwritten.

use super::{data_offset, Metadata, CATALOG_MAGIC, CATALOG_VERSION, PREAMBLE_SIZE};
use crate::catalog::Catalog;
use crate::error::Result;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serializes a catalog into `writer`. Returns the number of bytes written.
pub fn encode_catalog<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<u64> {
    let metadata = serde_json::to_vec(&Metadata {
        header: catalog.header().clone(),
        columns: catalog.schema().clone(),
    })?;
    let record_size = catalog.schema().record_size() as u32;
    let padding = data_offset(metadata.len()) - PREAMBLE_SIZE - metadata.len();

    writer.write_all(CATALOG_MAGIC)?;
    writer.write_all(&CATALOG_VERSION.to_le_bytes())?;
    writer.write_all(&(catalog.len() as u64).to_le_bytes())?;
    writer.write_all(&record_size.to_le_bytes())?;
    writer.write_all(&(metadata.len() as u32).to_le_bytes())?;
    writer.write_all(&[0u8; 8])?;
    writer.write_all(&metadata)?;
    writer.write_all(&[0u8; 8][..padding])?;
    writer.write_all(catalog.as_bytes())?;

    Ok((data_offset(metadata.len()) + catalog.as_bytes().len()) as u64)
}

/// Writes a catalog to `path`, replacing any existing file.
///
/// Returns the size of the written file in bytes.
pub fn write_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> Result<u64> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);
    match write_to(&temp_path, catalog) {
        Ok(size) => {
            fs::rename(&temp_path, path)?;
            log::debug!("Wrote {} records ({} bytes) to {:?}", catalog.len(), size, path);
            Ok(size)
        }
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

fn write_to(path: &Path, catalog: &Catalog) -> Result<u64> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let size = encode_catalog(&mut writer, catalog)?;
    writer.flush()?;
    Ok(size)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("catalog"));
    name.push(".tmp");
    path.with_file_name(name)
}
