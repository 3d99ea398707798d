//! Uniform random points on the sphere within a right-ascension/declination box.
//!
//! RA is drawn uniformly in `[ra_min, ra_max)`. Declination is drawn as
//! `asin(u)` with `u` uniform in `[sin(dec_min), sin(dec_max))`, which gives
//! constant surface density. The number of points is
//! `floor(area × density)` with the box area in square degrees.

use crate::catalog::{Catalog, Column, ColumnType, Header, HeaderValue, Schema, DENSITY_KEY};
use crate::error::{Error, Result};
use crate::partition::{seeded_rng, DEFAULT_SEED};
use rand::Rng;
use std::f64::consts::PI;

/// Square degrees per steradian.
const SQ_DEG_PER_SR: f64 = (180.0 / PI) * (180.0 / PI);

/// Largest catalog [`generate_randoms`] will build, in points.
pub const MAX_POINTS: usize = 1 << 30;

/// Parameters for a random catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomsConfig {
    /// Points per square degree.
    pub density: u64,
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
    pub seed: u64,
}

impl Default for RandomsConfig {
    fn default() -> Self {
        Self {
            density: 2500,
            ra_min: 0.0,
            ra_max: 360.0,
            dec_min: -90.0,
            dec_max: 90.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl RandomsConfig {
    /// Checks the density and box bounds.
    ///
    /// # Errors
    /// [`Error::InvalidRegion`] for a zero or out-of-range density,
    /// non-finite bounds, RA outside `[0, 360]`, Dec outside `[-90, 90]`, an
    /// empty box, or more than [`MAX_POINTS`] points.
    pub fn validate(&self) -> Result<()> {
        if self.density == 0 {
            return Err(Error::InvalidRegion("density must be positive".to_string()));
        }
        if i64::try_from(self.density).is_err() {
            return Err(Error::InvalidRegion(format!(
                "density {} exceeds {}",
                self.density,
                i64::MAX
            )));
        }
        let bounds = [self.ra_min, self.ra_max, self.dec_min, self.dec_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidRegion("bounds must be finite".to_string()));
        }
        if self.ra_min < 0.0 || self.ra_max > 360.0 || self.ra_min >= self.ra_max {
            return Err(Error::InvalidRegion(format!(
                "RA range [{}, {}) must satisfy 0 <= min < max <= 360",
                self.ra_min, self.ra_max
            )));
        }
        if self.dec_min < -90.0 || self.dec_max > 90.0 || self.dec_min >= self.dec_max {
            return Err(Error::InvalidRegion(format!(
                "Dec range [{}, {}) must satisfy -90 <= min < max <= 90",
                self.dec_min, self.dec_max
            )));
        }
        self.point_count().map(|_| ())
    }

    /// Box area in square degrees.
    pub fn area_sq_deg(&self) -> f64 {
        let sin_span = self.dec_max.to_radians().sin() - self.dec_min.to_radians().sin();
        (self.ra_max - self.ra_min).to_radians() * sin_span * SQ_DEG_PER_SR
    }

    /// Number of points the box receives.
    ///
    /// # Errors
    /// [`Error::InvalidRegion`] if the count is not finite or exceeds
    /// [`MAX_POINTS`].
    pub fn point_count(&self) -> Result<usize> {
        let count = (self.area_sq_deg() * self.density as f64).floor();
        if !count.is_finite() || count < 0.0 || count > MAX_POINTS as f64 {
            return Err(Error::InvalidRegion(format!(
                "{} points at density {} exceeds the limit of {}",
                count, self.density, MAX_POINTS
            )));
        }
        Ok(count as usize)
    }
}

/// Schema of a random catalog: `RA` and `DEC` in degrees.
pub fn randoms_schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("RA", ColumnType::F64),
        Column::new("DEC", ColumnType::F64),
    ])
}

/// Draws one point uniformly within the box.
pub fn random_point<R: Rng + ?Sized>(config: &RandomsConfig, rng: &mut R) -> (f64, f64) {
    let sin_min = config.dec_min.to_radians().sin();
    let sin_max = config.dec_max.to_radians().sin();
    let ra = rng.gen_range(config.ra_min..config.ra_max);
    let dec = rng.gen_range(sin_min..sin_max).asin().to_degrees();
    (ra, dec)
}

/// Generates a random catalog with the generator seeded from `config.seed`.
pub fn generate_randoms(config: &RandomsConfig) -> Result<Catalog> {
    generate_randoms_with(config, &mut seeded_rng(config.seed))
}

/// Generates a random catalog drawing from `rng`.
pub fn generate_randoms_with<R: Rng + ?Sized>(
    config: &RandomsConfig,
    rng: &mut R,
) -> Result<Catalog> {
    config.validate()?;
    let count = config.point_count()?;
    log::info!(
        "Generating {} randoms over {:.3} sq. deg. at density {}",
        count,
        config.area_sq_deg(),
        config.density
    );

    let mut catalog = Catalog::with_capacity(randoms_header(config), randoms_schema()?, count)?;
    let mut record = [0u8; 16];
    for _ in 0..count {
        let (ra, dec) = random_point(config, rng);
        record[0..8].copy_from_slice(&ra.to_le_bytes());
        record[8..16].copy_from_slice(&dec.to_le_bytes());
        catalog.push(&record)?;
    }
    Ok(catalog)
}

fn randoms_header(config: &RandomsConfig) -> Header {
    let mut header = Header::new();
    header.set("EXTNAME", "RANDOMS");
    header.set(DENSITY_KEY, unsigned_card(config.density));
    header.set("SEED", unsigned_card(config.seed));
    header.set("RAMIN", config.ra_min);
    header.set("RAMAX", config.ra_max);
    header.set("DECMIN", config.dec_min);
    header.set("DECMAX", config.dec_max);
    header.set("AREA", config.area_sq_deg());
    header
}

/// Values above `i64::MAX` are recorded as text so the card stays exact.
fn unsigned_card(value: u64) -> HeaderValue {
    i64::try_from(value).map_or_else(|_| HeaderValue::Text(value.to_string()), HeaderValue::Int)
}
