//! Split a catalog file into `n` chunk files.
//!
//! Chunk `i` (1-indexed) of `randoms.rcat` is written to `randoms-i.rcat`
//! next to the input. Chunks are gathered and written one at a time, so
//! only the input catalog and a single chunk are resident at once.

use crate::catalog::HeaderValue;
use crate::error::{Error, Result};
use crate::io::{read_catalog, write_catalog};
use crate::partition::{prepare_chunks, ChunkCount, PartitionPlan};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What a split produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub input: PathBuf,
    pub input_records: usize,
    pub chunk_size: usize,
    /// Records left out because `input_records` is not a multiple of the
    /// chunk count.
    pub excluded: usize,
    /// `DENSITY` card of the chunk headers, if the input has one.
    pub chunk_density: Option<HeaderValue>,
    pub outputs: Vec<PathBuf>,
    pub bytes_written: u64,
}

/// Output path of chunk `index` (1-indexed): `-{index}` is appended to the
/// file stem, ahead of the extension.
pub fn chunk_path(input: &Path, index: usize) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!("-{}", index));
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Splits the catalog at `input` into `n_chunks` files.
///
/// # Errors
/// [`Error::InputNotFound`] if `input` does not exist; nothing is written in
/// that case. Read and write failures are propagated as they occur.
pub fn split_file(input: &Path, n_chunks: ChunkCount, seed: u64) -> Result<SplitSummary> {
    split_file_with(input, n_chunks, seed, |_, _| {})
}

/// Like [`split_file`], calling `on_chunk(index, path)` after each chunk
/// file is written.
pub fn split_file_with<F>(
    input: &Path,
    n_chunks: ChunkCount,
    seed: u64,
    mut on_chunk: F,
) -> Result<SplitSummary>
where
    F: FnMut(usize, &Path),
{
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }

    let catalog = read_catalog(input)?;
    log::info!("Read {} records from {:?}", catalog.len(), input);

    let plan = PartitionPlan::seeded(catalog.len(), n_chunks, seed);
    let header = prepare_chunks(&plan, catalog.header(), n_chunks);

    let mut outputs = Vec::with_capacity(plan.n_chunks());
    let mut bytes_written = 0;
    for (i, indices) in plan.chunks().enumerate() {
        let path = chunk_path(input, i + 1);
        let chunk = catalog.gather(indices, header.clone());
        bytes_written += write_catalog(&path, &chunk)?;
        on_chunk(i + 1, &path);
        outputs.push(path);
    }

    Ok(SplitSummary {
        input: input.to_path_buf(),
        input_records: catalog.len(),
        chunk_size: plan.chunk_size(),
        excluded: plan.excluded().len(),
        chunk_density: header.density().cloned(),
        outputs,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Column, ColumnType, Header, Schema};
    use crate::partition::{partition_seeded, DEFAULT_SEED};

    fn write_indexed(path: &Path, n: i64, density: i64) -> Catalog {
        let schema = Schema::new(vec![Column::new("IDX", ColumnType::I64)]).unwrap();
        let mut header = Header::new();
        header.set("DENSITY", density);
        let mut catalog = Catalog::new(header, schema);
        for i in 0..n {
            catalog.push(&i.to_le_bytes()).unwrap();
        }
        write_catalog(path, &catalog).unwrap();
        catalog
    }

    #[test]
    fn test_chunk_path_with_extension() {
        assert_eq!(
            chunk_path(Path::new("/data/randoms-allsky-1-0.rcat"), 3),
            PathBuf::from("/data/randoms-allsky-1-0-3.rcat")
        );
    }

    #[test]
    fn test_chunk_path_without_extension() {
        assert_eq!(
            chunk_path(Path::new("randoms"), 10),
            PathBuf::from("randoms-10")
        );
    }

    #[test]
    fn test_chunk_path_only_last_extension() {
        assert_eq!(
            chunk_path(Path::new("out/randoms.v2.rcat"), 1),
            PathBuf::from("out/randoms.v2-1.rcat")
        );
    }

    #[test]
    fn test_split_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.rcat");
        let result = split_file(&input, ChunkCount::new(4).unwrap(), DEFAULT_SEED);
        assert!(matches!(result, Err(Error::InputNotFound(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_split_writes_numbered_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("randoms.rcat");
        write_indexed(&input, 105, 1000);

        let summary = split_file(&input, ChunkCount::new(10).unwrap(), DEFAULT_SEED).unwrap();
        assert_eq!(summary.input_records, 105);
        assert_eq!(summary.chunk_size, 10);
        assert_eq!(summary.excluded, 5);
        assert_eq!(summary.chunk_density, Some(HeaderValue::Int(100)));
        assert_eq!(summary.outputs.len(), 10);
        for (i, path) in summary.outputs.iter().enumerate() {
            assert_eq!(path, &dir.path().join(format!("randoms-{}.rcat", i + 1)));
            let chunk = read_catalog(path).unwrap();
            assert_eq!(chunk.len(), 10);
            assert_eq!(chunk.header().density(), Some(&HeaderValue::Int(100)));
        }
    }

    #[test]
    fn test_split_matches_in_memory_partition() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("randoms.rcat");
        let catalog = write_indexed(&input, 64, 640);

        let count = ChunkCount::new(4).unwrap();
        let summary = split_file(&input, count, 99).unwrap();
        let expected = partition_seeded(&catalog, count, 99);
        for (path, chunk) in summary.outputs.iter().zip(&expected) {
            assert_eq!(&read_catalog(path).unwrap(), chunk);
        }
    }

    #[test]
    fn test_split_reports_each_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("randoms.rcat");
        write_indexed(&input, 12, 10);

        let mut seen = Vec::new();
        split_file_with(&input, ChunkCount::new(3).unwrap(), 1, |i, path| {
            assert!(path.exists());
            seen.push(i);
        })
        .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
