use crate::cli::BatchArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::report::EntrySummary;
use crate::utils::progress::CliProgressHandler;
use std::path::{Path, PathBuf};
use strucmap::engine::progress::ProgressReporter;
use strucmap::workflows::load::{self, StructureInput};
use tracing::{info, warn};

/// The files of one entry found in a batch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryFiles {
    id: String,
    pdb: PathBuf,
    cif: PathBuf,
    sifts: Option<PathBuf>,
}

pub fn run(args: BatchArgs, app_config: &PartialAppConfig) -> Result<()> {
    let entries = discover(&args.dir)?;
    if entries.is_empty() {
        return Err(CliError::NoEntries { dir: args.dir });
    }
    info!("Found {} entries in {:?}", entries.len(), &args.dir);

    let mut inputs = Vec::with_capacity(entries.len());
    for entry in &entries {
        match StructureInput::from_paths(&entry.pdb, &entry.cif, entry.sifts.as_deref(), Some(&entry.id)) {
            Ok(input) => inputs.push(input),
            Err(e) => {
                warn!(entry = %entry.id, error = %e, "Could not read entry sources.");
                println!("{}\terror={}", entry.id, e);
            }
        }
    }

    let config = app_config.load_config(&args.stages, None);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let ids: Vec<String> = inputs.iter().map(|i| i.id.clone().unwrap_or_default()).collect();
    let results = load::run_many(inputs, &config, &reporter);

    let mut loaded = 0;
    for (id, result) in ids.iter().zip(&results) {
        match result {
            Ok(structure) => {
                loaded += 1;
                let summary = EntrySummary::from_structure(structure);
                if args.json {
                    println!("{}", serde_json::to_string(&summary)?);
                } else {
                    println!("{}", summary.to_line());
                }
            }
            Err(e) => println!("{id}\terror={e}"),
        }
    }

    println!("✓ Loaded {} of {} entries.", loaded, entries.len());
    Ok(())
}

/// Pairs every `<id>.pdb` in `dir` with `<id>.cif` and, when present, `<id>.json`.
/// Entries are returned in file name order; a PDB file without its CIF partner is skipped.
fn discover(dir: &Path) -> Result<Vec<EntryFiles>> {
    let mut pdb_files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdb")))
        .collect();
    pdb_files.sort();

    let mut entries = Vec::new();
    for pdb in pdb_files {
        let cif = pdb.with_extension("cif");
        if !cif.is_file() {
            warn!("Skipping {:?}: no matching CIF file.", &pdb);
            continue;
        }
        let sifts = Some(pdb.with_extension("json")).filter(|p| p.is_file());
        let id = pdb
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        entries.push(EntryFiles { id, pdb, cif, sifts });
    }
    Ok(entries)
}
