use crate::core::io::cif::{CifFile, MetadataError};
use crate::core::io::pdb::{PdbError, PdbFile, PdbRecords, SiteDescription};
use crate::core::io::records::SiteRecord;
use crate::core::io::sifts::SiftsFile;
use crate::core::io::traits::{SourceFile, read_text_from_path};
use crate::core::models::builder::StructureBuilder;
use crate::core::models::mapping::ReferenceMappings;
use crate::core::models::structure::Structure;
use crate::engine::config::LoadConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter, Stage};
use crate::engine::{alignment, resolver, sites, stats};
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, instrument, warn};

/// The in-memory sources of one entry.
#[derive(Debug, Clone, Default)]
pub struct StructureInput {
    pub id: Option<String>,
    /// Fixed-column atom record text.
    pub pdb: String,
    /// mmCIF metadata text.
    pub cif: String,
    /// Reference range mappings, if any.
    pub mappings: Option<ReferenceMappings>,
}

impl StructureInput {
    pub fn new(pdb: String, cif: String) -> Self {
        Self {
            pdb,
            cif,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_mappings(mut self, mappings: ReferenceMappings) -> Self {
        self.mappings = Some(mappings);
        self
    }

    /// Reads an entry's sources from disk.
    ///
    /// The entry id defaults to the uppercased file stem of `pdb`. When a SIFTS document is
    /// given, the entry is looked up by `entry` if supplied, otherwise the document must hold
    /// exactly one entry.
    pub fn from_paths(
        pdb: &Path,
        cif: &Path,
        sifts: Option<&Path>,
        entry: Option<&str>,
    ) -> Result<Self, EngineError> {
        let pdb_text = read_text_from_path(pdb).map_err(PdbError::Io)?;
        let cif_text = read_text_from_path(cif).map_err(MetadataError::Io)?;

        let mappings = match sifts {
            Some(path) => {
                let document = SiftsFile::read_from_path(path)?;
                Some(match entry {
                    Some(id) => document.entry(id)?,
                    None => document.single_entry()?,
                })
            }
            None => None,
        };

        let id = entry.map(str::to_string).or_else(|| {
            pdb.file_stem()
                .map(|stem| stem.to_string_lossy().to_uppercase())
        });

        Ok(Self {
            id,
            pdb: pdb_text,
            cif: cif_text,
            mappings,
        })
    }
}

/// Loads one entry through the full pipeline.
///
/// Metadata is parsed alongside the atom pipeline when `config.concurrent_metadata` is set.
/// Either side failing fails the whole load; no partial structure is returned.
#[instrument(skip_all, name = "load_workflow")]
pub fn run(
    input: StructureInput,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Result<Structure, EngineError> {
    let StructureInput {
        id,
        pdb,
        cif,
        mappings,
    } = input;
    let id = config.entry_id.clone().or(id);
    info!(entry = id.as_deref().unwrap_or("-"), "Loading structure.");

    let atom_pipeline = || assemble(&pdb, id.as_deref(), mappings.as_ref(), config, reporter);

    // Stage events never overlap: a concurrent metadata parse is reported once both sides join.
    let (structure, metadata) = if config.concurrent_metadata {
        let (structure, metadata) = rayon::join(atom_pipeline, || CifFile::parse(&cif));
        (structure, reporter.stage(Stage::Metadata, || metadata))
    } else {
        let structure = atom_pipeline();
        (structure, reporter.stage(Stage::Metadata, || CifFile::parse(&cif)))
    };
    let mut structure = structure?;
    structure.metadata = Some(metadata?);
    structure.raw_pdb = pdb;
    structure.raw_cif = Some(cif);

    info!(
        chains = structure.chains.len(),
        residues = structure.total_length(),
        sites = structure.sites.len(),
        "Structure loaded."
    );
    Ok(structure)
}

/// Builds a structure from `ATOM`/`HETATM` records alone.
///
/// No canonical sequence, metadata, alignment, reference positions or sites; canonical and
/// reference lookups on the result always miss.
#[instrument(skip_all, name = "atoms_only_workflow")]
pub fn atoms_only(text: &str) -> Result<Structure, EngineError> {
    let records = PdbFile::parse(text)?;
    let mut structure = build(records, None, true).0;
    stats::assign_b_factor_statistics(&mut structure);
    structure.raw_pdb = text.to_string();
    Ok(structure)
}

/// Loads independent entries in parallel. Results keep the order of `inputs`.
#[instrument(skip_all, name = "batch_load_workflow")]
pub fn run_many(
    inputs: Vec<StructureInput>,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<Structure, EngineError>> {
    reporter.report(Progress::BatchStart {
        total: inputs.len() as u64,
    });
    let silent = ProgressReporter::new();

    let results: Vec<_> = inputs
        .into_par_iter()
        .map(|input| {
            let id = input.id.clone().unwrap_or_default();
            let result = run(input, config, &silent);
            if let Err(e) = &result {
                warn!(entry = %id, error = %e, "Entry failed to load.");
            }
            reporter.report(Progress::EntryFinished {
                id,
                ok: result.is_ok(),
            });
            result
        })
        .collect();

    reporter.report(Progress::BatchFinish);
    info!(
        loaded = results.iter().filter(|r| r.is_ok()).count(),
        total = results.len(),
        "Batch finished."
    );
    results
}

fn assemble(
    pdb: &str,
    id: Option<&str>,
    mappings: Option<&ReferenceMappings>,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Result<Structure, EngineError> {
    let records = reporter.stage(Stage::Scan, || PdbFile::parse(pdb))?;
    if records.field_failures > 0 {
        reporter.report(Progress::Message(format!(
            "{} undecodable numeric field(s) in atom records were read as zero",
            records.field_failures
        )));
    }
    records.require_canonical_sequences()?;

    let (mut structure, site_records, site_descriptions) =
        reporter.stage(Stage::Build, || build(records, id, config.scan_hetero_atoms));
    reporter.stage(Stage::Statistics, || {
        stats::assign_b_factor_statistics(&mut structure)
    });
    reporter.stage(Stage::Alignment, || alignment::align(&mut structure))?;

    match mappings {
        Some(mappings) if config.resolve_reference_positions => {
            reporter.stage(Stage::References, || {
                resolver::resolve(&mut structure, mappings)
            });
        }
        _ => {}
    }
    if config.extract_sites {
        reporter.stage(Stage::Sites, || {
            sites::extract(&mut structure, &site_records, &site_descriptions)
        });
    }
    Ok(structure)
}

fn build(
    records: PdbRecords,
    id: Option<&str>,
    scan_hetero_atoms: bool,
) -> (Structure, Vec<SiteRecord>, Vec<SiteDescription>) {
    let PdbRecords {
        atoms,
        hetero_atoms,
        canonical_sequences,
        sites,
        site_descriptions,
        ..
    } = records;

    let mut builder = StructureBuilder::new();
    if let Some(id) = id {
        builder.id(id);
    }
    for atom in atoms {
        builder.add_atom(atom);
    }
    if scan_hetero_atoms {
        for atom in hetero_atoms {
            builder.add_atom(atom);
        }
    }
    for (chain_id, sequence) in &canonical_sequences {
        for token in &sequence.residues {
            builder.add_canonical_residue(*chain_id, token);
        }
    }
    (builder.build(), sites, site_descriptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fixtures;
    use crate::engine::config::LoadConfigBuilder;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn entry_input() -> StructureInput {
        let mappings = SiftsFile::parse(&fixtures::entry_sifts_json())
            .unwrap()
            .entry(fixtures::ENTRY_ID)
            .unwrap();
        StructureInput::new(fixtures::entry_pdb(), fixtures::entry_cif())
            .with_id(fixtures::ENTRY_ID)
            .with_mappings(mappings)
    }

    fn load(config: &LoadConfig) -> Structure {
        run(entry_input(), config, &ProgressReporter::new()).unwrap()
    }

    #[test]
    fn full_entry_is_cross_referenced() {
        let structure = load(&LoadConfig::default());

        assert_eq!(structure.id(), Some(fixtures::ENTRY_ID));
        assert_eq!(structure.total_length(), 10);
        let metadata = structure.metadata().unwrap();
        assert_eq!(metadata.method, "X-RAY DIFFRACTION");
        assert_eq!(metadata.resolution, 1.2);
        assert_eq!(metadata.deposition_date, NaiveDate::from_ymd_opt(2002, 9, 19).unwrap());

        assert_eq!(structure.offset('A'), Some(0));
        assert_eq!(structure.offset('B'), Some(2));
        let b = structure.bounds('B').unwrap();
        assert_eq!((b.start, b.end), (101, 105));
        assert_eq!(structure.residue_at('B', 103).unwrap().position, Some(5));
        assert_eq!(structure.residue_at_canonical('A', 4).unwrap().code1(), 'E');

        let glu = structure.residues_at_reference("P01308", 93).unwrap();
        assert_eq!(glu.len(), 1);
        assert_eq!((glu[0].chain_id, glu[0].struct_position), ('A', 4));
        let his = structure.residues_at_reference("P01308", 29).unwrap();
        assert_eq!((his[0].chain_id, his[0].struct_position), ('B', 103));
        assert_eq!(structure.reference_coverage("P01308"), Some(10));

        let site: Vec<char> = structure
            .site_residues("AC1")
            .unwrap()
            .iter()
            .map(|r| r.code1())
            .collect();
        assert_eq!(site, vec!['H', 'E']);
        assert_eq!(
            structure.site_description("AC1"),
            Some("BINDING SITE FOR RESIDUE ZN B 201")
        );

        assert_eq!(structure.hetero_groups(), &["ZN".to_string(), "HOH".to_string()]);
        assert_eq!(structure.canonical_sequence_string('A').unwrap().len(), 21);
        assert_eq!(structure.chain_sequence_string('B').as_deref(), Some("NQHLC"));
        assert!(structure.raw_pdb().contains("SEQRES"));
        assert!(structure.raw_cif().unwrap().contains("_struct.title"));
    }

    #[test]
    fn sequential_metadata_matches_concurrent() {
        let concurrent = load(&LoadConfig::default());
        let sequential = load(&LoadConfigBuilder::new().concurrent_metadata(false).build());
        assert_eq!(concurrent.metadata(), sequential.metadata());
        assert_eq!(concurrent.total_length(), sequential.total_length());
        assert_eq!(concurrent.offset('B'), sequential.offset('B'));
    }

    #[test]
    fn disabled_stages_leave_views_empty() {
        let config = LoadConfigBuilder::new()
            .extract_sites(false)
            .scan_hetero_atoms(false)
            .resolve_reference_positions(false)
            .build();
        let structure = load(&config);
        assert!(structure.site_names().is_empty());
        assert!(structure.hetero_atoms().is_empty());
        assert_eq!(structure.reference_accessions().count(), 0);
        assert!(structure.residue_at_canonical('A', 1).is_some());
    }

    #[test]
    fn missing_resolution_returns_no_structure() {
        let mut input = entry_input();
        input.cif = input.cif.replace("_refine.ls_d_res_high", "_refine.ls_d_res_mid");
        let result = run(input, &LoadConfig::default(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Metadata(MetadataError::MissingField { field: "resolution", .. }))
        ));
    }

    #[test]
    fn missing_seqres_fails_the_full_pipeline() {
        let pdb: String = fixtures::entry_pdb()
            .lines()
            .filter(|line| !line.starts_with("SEQRES"))
            .collect::<Vec<_>>()
            .join("\n");
        let input = StructureInput::new(pdb, fixtures::entry_cif());
        let result = run(input, &LoadConfig::default(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Records(PdbError::RecordsNotFound { record: "SEQRES" }))
        ));
    }

    #[test]
    fn stages_are_reported_in_pipeline_order() {
        let stages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::StageFinish { stage } = event {
                stages.lock().unwrap().push(stage);
            }
        }));
        let config = LoadConfigBuilder::new().concurrent_metadata(false).build();
        run(entry_input(), &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            stages.into_inner().unwrap(),
            vec![
                Stage::Scan,
                Stage::Build,
                Stage::Statistics,
                Stage::Alignment,
                Stage::References,
                Stage::Sites,
                Stage::Metadata,
            ]
        );
    }

    #[test]
    fn concurrent_metadata_never_overlaps_other_stages() {
        let open = Mutex::new(None);
        let overlaps = Mutex::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::StageStart { stage } => {
                if open.lock().unwrap().replace(stage).is_some() {
                    *overlaps.lock().unwrap() += 1;
                }
            }
            Progress::StageFinish { stage } => {
                assert_eq!(open.lock().unwrap().take(), Some(stage));
            }
            _ => {}
        }));
        let config = LoadConfigBuilder::new().concurrent_metadata(true).build();
        for _ in 0..8 {
            run(entry_input(), &config, &reporter).unwrap();
        }
        drop(reporter);

        assert_eq!(overlaps.into_inner().unwrap(), 0);
        assert_eq!(open.into_inner().unwrap(), None);
    }

    #[test]
    fn undecodable_fields_are_announced_as_a_message() {
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        let mut input = entry_input();
        run(input.clone(), &LoadConfig::default(), &reporter).unwrap();
        assert!(messages.lock().unwrap().is_empty());

        let mut lines: Vec<String> = input.pdb.lines().map(str::to_string).collect();
        let atom = lines.iter_mut().find(|line| line.starts_with("ATOM")).unwrap();
        atom.replace_range(54..60, "  n/a ");
        input.pdb = lines.join("\n");
        run(input, &LoadConfig::default(), &reporter).unwrap();
        drop(reporter);

        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("1 undecodable numeric field(s)"));
    }

    #[test]
    fn atoms_only_skips_sequence_dependent_stages() {
        let pdb = fixtures::residue_atoms('A', 1, &["MET", "LYS", "TRP"], 1).join("\n");
        let structure = atoms_only(&pdb).unwrap();

        assert_eq!(structure.total_length(), 3);
        assert_eq!(structure.chain_sequence_string('A').as_deref(), Some("MKW"));
        assert!(structure.metadata().is_none());
        assert!(structure.residue_at_canonical('A', 1).is_none());
        assert!(structure.residue_at('A', 3).unwrap().norm_mean_b_factor > 0.0);
    }

    #[test]
    fn run_many_keeps_results_independent() {
        let mut broken = entry_input().with_id("BROKEN");
        broken.cif.clear();
        let finished = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::EntryFinished { id, ok } = event {
                finished.lock().unwrap().push((id, ok));
            }
        }));

        let results = run_many(vec![entry_input(), broken], &LoadConfig::default(), &reporter);
        drop(reporter);

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(EngineError::Metadata(_))));
        let mut finished = finished.into_inner().unwrap();
        finished.sort();
        assert_eq!(
            finished,
            vec![("1ZNI".to_string(), true), ("BROKEN".to_string(), false)]
        );
    }

    #[test]
    fn from_paths_reads_all_sources() {
        let dir = tempfile::tempdir().unwrap();
        let pdb = dir.path().join("1zni.pdb");
        let cif = dir.path().join("1zni.cif");
        let sifts = dir.path().join("1zni.json");
        std::fs::write(&pdb, fixtures::entry_pdb()).unwrap();
        std::fs::write(&cif, fixtures::entry_cif()).unwrap();
        std::fs::write(&sifts, fixtures::entry_sifts_json()).unwrap();

        let input = StructureInput::from_paths(&pdb, &cif, Some(&sifts), None).unwrap();
        assert_eq!(input.id.as_deref(), Some("1ZNI"));
        assert_eq!(input.mappings.as_ref().map(ReferenceMappings::len), Some(1));

        let missing = StructureInput::from_paths(&dir.path().join("none.pdb"), &cif, None, None);
        assert!(matches!(missing, Err(EngineError::Records(PdbError::Io(_)))));
    }
}
