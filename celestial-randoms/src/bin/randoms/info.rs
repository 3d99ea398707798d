//! Catalog header and schema listing

use crate::cli::InfoArgs;
use celestial_randoms::catalog::{Column, HeaderCard};
use celestial_randoms::io::CatalogFile;

#[derive(serde::Serialize)]
struct JsonInfo<'a> {
    path: String,
    records: usize,
    record_size: usize,
    file_size: usize,
    header: Vec<&'a HeaderCard>,
    columns: &'a [Column],
}

pub fn run(args: &InfoArgs) -> anyhow::Result<()> {
    let file = CatalogFile::open(&args.path)?;

    if args.json {
        let info = JsonInfo {
            path: args.path.display().to_string(),
            records: file.len(),
            record_size: file.schema().record_size(),
            file_size: file.file_size(),
            header: file.header().iter().collect(),
            columns: file.schema().columns(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", file);
    }
    Ok(())
}
