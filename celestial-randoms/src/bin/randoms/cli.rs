//! CLI argument definitions for randoms

use celestial_randoms::partition::{DEFAULT_CHUNK_COUNT, DEFAULT_SEED};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "randoms")]
#[command(about = "Generate and split random point catalogs")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a random catalog into smaller catalogs with a seeded shuffle
    Split(SplitArgs),

    /// Generate uniform randoms over an RA/Dec box
    Generate(GenerateArgs),

    /// Print the header and columns of a catalog file
    Info(InfoArgs),
}

#[derive(Parser)]
pub struct SplitArgs {
    /// Random catalog to split. Chunks are written alongside it as
    /// NAME-1.EXT, NAME-2.EXT, ...
    pub input_path: PathBuf,

    /// Number of smaller catalogs to split the input into
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_COUNT, allow_negative_numbers = true)]
    pub nchunks: i64,

    /// Seed for the shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Output catalog file
    #[arg(long)]
    pub output: PathBuf,

    /// Points per square degree
    #[arg(long, default_value = "2500")]
    pub density: u64,

    /// Minimum right ascension (degrees)
    #[arg(long, default_value = "0.0")]
    pub ra_min: f64,

    /// Maximum right ascension (degrees)
    #[arg(long, default_value = "360.0")]
    pub ra_max: f64,

    /// Minimum declination (degrees)
    #[arg(long, default_value = "-90.0", allow_negative_numbers = true)]
    pub dec_min: f64,

    /// Maximum declination (degrees)
    #[arg(long, default_value = "90.0", allow_negative_numbers = true)]
    pub dec_max: f64,

    /// Seed for the generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[derive(Parser)]
pub struct InfoArgs {
    /// Catalog file to describe
    pub path: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["randoms", "split", "randoms.rcat"]).unwrap();
        let Commands::Split(args) = cli.command else {
            panic!("expected split");
        };
        assert_eq!(args.input_path, PathBuf::from("randoms.rcat"));
        assert_eq!(args.nchunks, 10);
        assert_eq!(args.seed, 626);
    }

    #[test]
    fn test_split_negative_nchunks_parses() {
        let cli =
            Cli::try_parse_from(["randoms", "split", "r.rcat", "--nchunks", "-2"]).unwrap();
        let Commands::Split(args) = cli.command else {
            panic!("expected split");
        };
        assert_eq!(args.nchunks, -2);
    }

    #[test]
    fn test_split_requires_input() {
        assert!(Cli::try_parse_from(["randoms", "split"]).is_err());
    }

    #[test]
    fn test_generate_negative_dec() {
        let cli = Cli::try_parse_from([
            "randoms",
            "generate",
            "--output",
            "r.rcat",
            "--dec-min",
            "-10",
            "--dec-max",
            "-5",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.dec_min, -10.0);
        assert_eq!(args.dec_max, -5.0);
        assert_eq!(args.density, 2500);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
