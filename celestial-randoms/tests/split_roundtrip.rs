use celestial_randoms::catalog::{Catalog, Column, ColumnType, Header, HeaderValue, Schema};
use celestial_randoms::generate::{generate_randoms, RandomsConfig};
use celestial_randoms::io::{read_catalog, write_catalog, CatalogFile};
use celestial_randoms::partition::{ChunkCount, PartitionPlan, DEFAULT_SEED};
use celestial_randoms::split::{chunk_path, split_file};
use std::collections::HashSet;

fn indexed_catalog(n: i64, density: i64) -> Catalog {
    let schema = Schema::new(vec![
        Column::new("IDX", ColumnType::I64),
        Column::new("RA", ColumnType::F64),
    ])
    .unwrap();
    let mut header = Header::new();
    header.set("EXTNAME", "RANDOMS");
    header.set("DENSITY", density);
    let mut catalog = Catalog::new(header, schema);
    for i in 0..n {
        let mut rec = i.to_le_bytes().to_vec();
        rec.extend_from_slice(&((i as f64) * 0.25).to_le_bytes());
        catalog.push(&rec).unwrap();
    }
    catalog
}

fn ids(catalog: &Catalog) -> Vec<i64> {
    (0..catalog.len())
        .map(|i| catalog.value_i64(i, "IDX").unwrap())
        .collect()
}

#[test]
fn hundred_records_split_into_ten_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("randoms.rcat");
    write_catalog(&input, &indexed_catalog(100, 1000)).unwrap();

    let summary = split_file(&input, ChunkCount::new(10).unwrap(), DEFAULT_SEED).unwrap();
    assert_eq!(summary.excluded, 0);

    let mut all = Vec::new();
    for i in 1..=10 {
        let chunk = read_catalog(chunk_path(&input, i)).unwrap();
        assert_eq!(chunk.len(), 10);
        assert_eq!(chunk.header().density(), Some(&HeaderValue::Int(100)));
        all.extend(ids(&chunk));
    }
    all.sort_unstable();
    assert_eq!(all, (0..100).collect::<Vec<i64>>());
}

#[test]
fn split_is_reproducible_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("randoms.rcat");
    write_catalog(&input, &indexed_catalog(250, 500)).unwrap();
    let count = ChunkCount::new(6).unwrap();

    split_file(&input, count, 11).unwrap();
    let first: Vec<Vec<u8>> = (1..=6)
        .map(|i| std::fs::read(chunk_path(&input, i)).unwrap())
        .collect();

    split_file(&input, count, 11).unwrap();
    let second: Vec<Vec<u8>> = (1..=6)
        .map(|i| std::fs::read(chunk_path(&input, i)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn records_survive_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("randoms.rcat");
    let catalog = indexed_catalog(37, 370);
    write_catalog(&input, &catalog).unwrap();

    let summary = split_file(&input, ChunkCount::new(4).unwrap(), DEFAULT_SEED).unwrap();
    assert_eq!(summary.excluded, 1);

    let mut seen = HashSet::new();
    for path in &summary.outputs {
        let chunk = CatalogFile::open(path).unwrap();
        assert_eq!(chunk.len(), 9);
        for i in 0..chunk.len() {
            let record = chunk.record(i).unwrap();
            let idx = i64::from_le_bytes(record[0..8].try_into().unwrap());
            assert_eq!(Some(record), catalog.record(idx as usize));
            assert!(seen.insert(idx));
        }
    }
    assert_eq!(seen.len(), 36);
}

#[test]
fn more_chunks_than_records_writes_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.rcat");
    write_catalog(&input, &indexed_catalog(3, 30)).unwrap();

    let summary = split_file(&input, ChunkCount::new(5).unwrap(), DEFAULT_SEED).unwrap();
    assert_eq!(summary.chunk_size, 0);
    assert_eq!(summary.excluded, 3);
    assert_eq!(summary.outputs.len(), 5);
    for path in &summary.outputs {
        let chunk = read_catalog(path).unwrap();
        assert!(chunk.is_empty());
        assert_eq!(chunk.header().density(), Some(&HeaderValue::Int(6)));
    }
}

#[test]
fn generated_randoms_split_evenly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("randoms-box.rcat");
    let config = RandomsConfig {
        density: 2500,
        ra_min: 10.0,
        ra_max: 12.0,
        dec_min: -1.0,
        dec_max: 1.0,
        seed: 5,
    };
    let randoms = generate_randoms(&config).unwrap();
    write_catalog(&input, &randoms).unwrap();

    let count = ChunkCount::new(8).unwrap();
    let summary = split_file(&input, count, DEFAULT_SEED).unwrap();
    let plan = PartitionPlan::seeded(randoms.len(), count, DEFAULT_SEED);
    assert_eq!(summary.chunk_size, randoms.len() / 8);
    assert_eq!(summary.excluded, plan.excluded().len());
    assert_eq!(summary.chunk_density, Some(HeaderValue::Int(312)));

    let chunk = read_catalog(&summary.outputs[0]).unwrap();
    assert_eq!(chunk.schema(), randoms.schema());
    assert_eq!(chunk.header().get("SEED"), Some(&HeaderValue::Int(5)));
}
