//! Deterministic shuffle-and-split of a catalog into equally sized chunks.
//!
//! A [`PartitionPlan`] permutes the record indices `[0, n)` with a seeded
//! generator and cuts the permuted sequence into `k` contiguous runs of
//! `n / k` indices each. The trailing `n % k` permuted indices belong to no
//! chunk; [`PartitionPlan::excluded`] reports them. With `k > n` every chunk
//! is empty and every record is excluded.
//!
//! Each chunk catalog carries the source header with its `DENSITY` card
//! floor-divided by `k`: the same sky area now holds `1/k` of the points.
//!
//! ```ignore
//! use celestial_randoms::partition::{partition_seeded, ChunkCount, DEFAULT_SEED};
//!
//! let chunks = partition_seeded(&catalog, ChunkCount::new(10)?, DEFAULT_SEED);
//! assert_eq!(chunks.len(), 10);
//! ```

use crate::catalog::{Catalog, DensityScaling, Header};
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Seed used when none is given on the command line.
pub const DEFAULT_SEED: u64 = 626;

/// Number of chunks used when none is given on the command line.
pub const DEFAULT_CHUNK_COUNT: i64 = 10;

/// A validated, strictly positive number of output chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkCount(NonZeroUsize);

impl ChunkCount {
    /// # Errors
    /// Returns [`Error::InvalidChunkCount`] for zero or negative counts.
    pub fn new(n: i64) -> Result<Self> {
        usize::try_from(n)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(Error::InvalidChunkCount(n))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for ChunkCount {
    type Error = Error;

    fn try_from(n: i64) -> Result<Self> {
        Self::new(n)
    }
}

impl fmt::Display for ChunkCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the portable generator used for partitioning from a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Chunk membership for a catalog of `n_records` records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    permutation: Vec<usize>,
    n_chunks: usize,
    chunk_size: usize,
}

impl PartitionPlan {
    /// Permutes `[0, n_records)` with `rng` and sizes the chunks.
    pub fn new<R: Rng + ?Sized>(n_records: usize, n_chunks: ChunkCount, rng: &mut R) -> Self {
        let mut permutation: Vec<usize> = (0..n_records).collect();
        permutation.shuffle(rng);
        let n_chunks = n_chunks.get();
        Self {
            permutation,
            n_chunks,
            chunk_size: n_records / n_chunks,
        }
    }

    /// Same as [`PartitionPlan::new`] with a [`seeded_rng`].
    pub fn seeded(n_records: usize, n_chunks: ChunkCount, seed: u64) -> Self {
        Self::new(n_records, n_chunks, &mut seeded_rng(seed))
    }

    pub fn n_records(&self) -> usize {
        self.permutation.len()
    }

    pub fn n_chunks(&self) -> usize {
        self.n_chunks
    }

    /// Records per chunk, `n_records / n_chunks`.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The full permutation, including the excluded tail.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    fn chunk_range(&self, i: usize) -> Range<usize> {
        i * self.chunk_size..(i + 1) * self.chunk_size
    }

    /// Source record indices of chunk `i` (0-based), in permuted order.
    pub fn chunk(&self, i: usize) -> Option<&[usize]> {
        if i >= self.n_chunks {
            return None;
        }
        Some(&self.permutation[self.chunk_range(i)])
    }

    pub fn chunks(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        (0..self.n_chunks).map(move |i| &self.permutation[self.chunk_range(i)])
    }

    /// Number of records assigned to some chunk.
    pub fn included(&self) -> usize {
        self.n_chunks * self.chunk_size
    }

    /// Source indices left over after the last full chunk.
    pub fn excluded(&self) -> &[usize] {
        &self.permutation[self.included()..]
    }
}

/// Copy of `header` with the density card divided among `n_chunks` catalogs.
pub fn chunk_header(header: &Header, n_chunks: ChunkCount) -> Header {
    let mut header = header.clone();
    match header.divide_density(n_chunks.get() as u64) {
        DensityScaling::Scaled { from, to } => {
            log::debug!("Scaled DENSITY from {} to {} for {} chunks", from, to, n_chunks);
        }
        DensityScaling::Missing => {
            log::info!("No DENSITY card in header; chunk headers are copied unchanged");
        }
        DensityScaling::NotNumeric(value) => {
            log::warn!("DENSITY card is not numeric ({}); left unscaled", value);
        }
    }
    header
}

/// Reports records the plan leaves out and returns the header every chunk
/// carries.
pub(crate) fn prepare_chunks(
    plan: &PartitionPlan,
    header: &Header,
    n_chunks: ChunkCount,
) -> Header {
    if !plan.excluded().is_empty() {
        log::warn!(
            "{} records do not fit evenly into {} chunks and are excluded",
            plan.excluded().len(),
            n_chunks
        );
    }
    chunk_header(header, n_chunks)
}

/// Splits `catalog` into `n_chunks` catalogs using `rng` for the shuffle.
pub fn partition<R: Rng + ?Sized>(
    catalog: &Catalog,
    n_chunks: ChunkCount,
    rng: &mut R,
) -> Vec<Catalog> {
    let plan = PartitionPlan::new(catalog.len(), n_chunks, rng);
    let header = prepare_chunks(&plan, catalog.header(), n_chunks);
    plan.chunks()
        .map(|indices| catalog.gather(indices, header.clone()))
        .collect()
}

/// Splits `catalog` with the generator seeded from `seed`.
pub fn partition_seeded(catalog: &Catalog, n_chunks: ChunkCount, seed: u64) -> Vec<Catalog> {
    partition(catalog, n_chunks, &mut seeded_rng(seed))
}
