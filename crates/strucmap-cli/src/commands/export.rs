use super::load_entry;
use crate::cli::ExportArgs;
use crate::config::{ExportOptions, PartialAppConfig};
use crate::error::Result;
use crate::report::residue_rows;
use std::io::Write;
use strucmap::core::models::structure::Structure;
use tracing::info;

pub fn run(args: ExportArgs, app_config: &PartialAppConfig) -> Result<()> {
    let options = app_config.export_options(args.delimiter)?;
    let structure = load_entry(&args.source, &args.stages, app_config)?;

    info!("Writing residue table to {:?}", &args.output);
    let file = std::fs::File::create(&args.output)?;
    let written = write_table(&structure, &options, file)?;

    println!("✓ {} residue(s) written to: {}", written, args.output.display());
    Ok(())
}

/// Writes one row per residue and returns the number of rows.
fn write_table<W: Write>(structure: &Structure, options: &ExportOptions, sink: W) -> Result<usize> {
    let rows = residue_rows(structure, options.precision, options.include_unmapped);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(sink);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}
