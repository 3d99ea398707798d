//! Split a random catalog into N smaller catalogs

use crate::cli::{Cli, SplitArgs};
use anyhow::Context;
use celestial_randoms::partition::ChunkCount;
use celestial_randoms::split::{split_file_with, SplitSummary};
use celestial_randoms::Error;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

pub fn run(args: &SplitArgs, cli: &Cli) -> anyhow::Result<()> {
    validate_args(args)?;
    let n_chunks = ChunkCount::new(args.nchunks)?;
    print_plan(args, cli);

    let start = Instant::now();
    let pb = create_progress_bar(n_chunks.get() as u64);
    let summary = split_file_with(&args.input_path, n_chunks, args.seed, |i, path| {
        if cli.verbose {
            pb.println(format!("Wrote chunk {} to {:?}", i, path));
        }
        pb.inc(1);
    })
    .with_context(|| format!("Failed to split {:?}", args.input_path))?;
    pb.finish_with_message("Done");

    print_stats(&summary, start.elapsed().as_secs_f64());
    Ok(())
}

fn validate_args(args: &SplitArgs) -> anyhow::Result<()> {
    if !args.input_path.exists() {
        return Err(Error::InputNotFound(args.input_path.clone()).into());
    }
    Ok(())
}

fn print_plan(args: &SplitArgs, cli: &Cli) {
    println!("=== Split Random Catalog ===");
    println!("Input: {:?}", args.input_path);
    println!("Chunks: {}", args.nchunks);
    println!("Seed: {}", args.seed);
    println!("Verbose: {}", cli.verbose);
    println!();
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

fn print_stats(summary: &SplitSummary, elapsed_secs: f64) {
    println!();
    println!("=== Split Statistics ===");
    println!("Input records: {}", summary.input_records);
    println!("Records per chunk: {}", summary.chunk_size);
    println!("Excluded (remainder): {}", summary.excluded);
    match &summary.chunk_density {
        Some(density) => println!("Chunk DENSITY: {}", density),
        None => println!("Chunk DENSITY: (not present)"),
    }
    println!("Files written: {}", summary.outputs.len());
    if let (Some(first), Some(last)) = (summary.outputs.first(), summary.outputs.last()) {
        println!("  {:?} ... {:?}", first, last);
    }
    println!("Bytes written: {}", summary.bytes_written);
    println!("Elapsed: {:.2}s", elapsed_secs);
}
