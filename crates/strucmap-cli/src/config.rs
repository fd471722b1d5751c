use crate::cli::StageArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use strucmap::engine::config::{LoadConfig, LoadConfigBuilder};
use tracing::debug;

const DEFAULT_DELIMITER: char = ',';
const DEFAULT_PRECISION: usize = 3;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialParsingConfig {
    extract_sites: Option<bool>,
    hetero_atoms: Option<bool>,
    concurrent_metadata: Option<bool>,
    resolve_references: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialExportConfig {
    delimiter: Option<char>,
    precision: Option<usize>,
    include_unmapped: Option<bool>,
}

/// The optional TOML configuration file, before merging with command-line flags.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    parsing: Option<PartialParsingConfig>,
    export: Option<PartialExportConfig>,
}

/// How residue tables are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
    /// Decimal places kept for B-factor columns.
    pub precision: usize,
    /// Keep residues with no reference position.
    pub include_unmapped: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
            precision: DEFAULT_PRECISION,
            include_unmapped: true,
        }
    }
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the file when a path is given, otherwise starts from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Pipeline options. Command-line switches win over the file; the file wins over defaults.
    pub fn load_config(&self, stages: &StageArgs, entry_id: Option<&str>) -> LoadConfig {
        let parsing = self.parsing.clone().unwrap_or_default();
        let defaults = LoadConfig::default();

        let mut builder = LoadConfigBuilder::new()
            .extract_sites(
                !stages.no_sites && parsing.extract_sites.unwrap_or(defaults.extract_sites),
            )
            .scan_hetero_atoms(
                !stages.no_hetero && parsing.hetero_atoms.unwrap_or(defaults.scan_hetero_atoms),
            )
            .concurrent_metadata(
                !stages.sequential
                    && parsing
                        .concurrent_metadata
                        .unwrap_or(defaults.concurrent_metadata),
            )
            .resolve_reference_positions(
                parsing
                    .resolve_references
                    .unwrap_or(defaults.resolve_reference_positions),
            );
        if let Some(id) = entry_id {
            builder = builder.entry_id(id);
        }
        builder.build()
    }

    /// Table options. `delimiter` from the command line wins over the file.
    pub fn export_options(&self, delimiter: Option<char>) -> Result<ExportOptions> {
        let export = self.export.clone().unwrap_or_default();
        let defaults = ExportOptions::default();

        let delimiter = delimiter.or(export.delimiter).unwrap_or(DEFAULT_DELIMITER);
        if !delimiter.is_ascii() {
            return Err(CliError::Config(format!(
                "`export.delimiter` must be a single ASCII character, got '{delimiter}'."
            )));
        }

        Ok(ExportOptions {
            delimiter: delimiter as u8,
            precision: export.precision.unwrap_or(defaults.precision),
            include_unmapped: export.include_unmapped.unwrap_or(defaults.include_unmapped),
        })
    }
}
