//! Uniform random catalog generation

use crate::cli::{Cli, GenerateArgs};
use anyhow::Context;
use celestial_randoms::generate::{generate_randoms, RandomsConfig};
use celestial_randoms::io::write_catalog;
use std::fs;
use std::time::Instant;

pub fn run(args: &GenerateArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = to_config(args);
    config.validate()?;
    let expected = config.point_count()?;
    prepare_output_dir(args)?;
    print_plan(args, &config, expected, cli);

    let start = Instant::now();
    let catalog = generate_randoms(&config)?;
    let bytes = write_catalog(&args.output, &catalog)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    println!();
    println!("=== Generation Statistics ===");
    println!("Points: {}", catalog.len());
    println!("Written: {:?} ({} bytes)", args.output, bytes);
    println!("Elapsed: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn to_config(args: &GenerateArgs) -> RandomsConfig {
    RandomsConfig {
        density: args.density,
        ra_min: args.ra_min,
        ra_max: args.ra_max,
        dec_min: args.dec_min,
        dec_max: args.dec_max,
        seed: args.seed,
    }
}

fn prepare_output_dir(args: &GenerateArgs) -> anyhow::Result<()> {
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn print_plan(args: &GenerateArgs, config: &RandomsConfig, expected: usize, cli: &Cli) {
    println!("=== Generate Randoms ===");
    println!("RA range: [{}, {})", config.ra_min, config.ra_max);
    println!("Dec range: [{}, {})", config.dec_min, config.dec_max);
    println!("Area: {:.3} sq. deg.", config.area_sq_deg());
    println!("Density: {} per sq. deg.", config.density);
    println!("Expected points: {}", expected);
    println!("Seed: {}", config.seed);
    println!("Output: {:?}", args.output);
    println!("Verbose: {}", cli.verbose);
}
