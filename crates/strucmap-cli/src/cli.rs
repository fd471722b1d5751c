use crate::utils::parser::{self, ReferenceLocator, ResidueLocator};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "strucmap - parse macromolecular structure entries and map residues between atom, SEQRES and UniProt numbering.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel loading.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load one entry and print a summary of chains, offsets, references and sites.
    Inspect(InspectArgs),
    /// Load one entry and write a per-residue table.
    Export(ExportArgs),
    /// Load one entry and look up residues by one coordinate system.
    Query(QueryArgs),
    /// Load every entry in a directory in parallel.
    Batch(BatchArgs),
}

/// The source files of a single entry.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to the PDB format atom record file.
    #[arg(long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Path to the mmCIF metadata file.
    #[arg(long, required = true, value_name = "PATH")]
    pub cif: PathBuf,

    /// Path to a PDBe SIFTS mappings JSON file.
    #[arg(long, value_name = "PATH")]
    pub sifts: Option<PathBuf>,

    /// Entry identifier. Defaults to the PDB file stem.
    #[arg(long, value_name = "ID")]
    pub entry: Option<String>,
}

/// Switches that turn off optional pipeline stages, overriding the config file.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StageArgs {
    /// Skip SITE and REMARK 800 extraction.
    #[arg(long)]
    pub no_sites: bool,

    /// Ignore HETATM records.
    #[arg(long)]
    pub no_hetero: bool,

    /// Parse metadata after the atom pipeline instead of alongside it.
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub stages: StageArgs,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub stages: StageArgs,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Field delimiter, overriding `export.delimiter` from the config file.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,
}

/// Arguments for the `query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub target: QueryTarget,
}

/// Exactly one lookup to run.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct QueryTarget {
    /// Residue by atom record numbering, e.g. `A:42`.
    #[arg(long, value_name = "CHAIN:POS", value_parser = parser::parse_residue_locator)]
    pub residue: Option<ResidueLocator>,

    /// Residue by canonical (SEQRES) numbering, e.g. `A:45`.
    #[arg(long, value_name = "CHAIN:POS", value_parser = parser::parse_residue_locator)]
    pub canonical: Option<ResidueLocator>,

    /// Residues by reference sequence numbering, e.g. `P01308:93`.
    #[arg(long, value_name = "ACC:POS", value_parser = parser::parse_reference_locator)]
    pub reference: Option<ReferenceLocator>,

    /// Residues of a named site, e.g. `AC1`.
    #[arg(long, value_name = "NAME")]
    pub site: Option<String>,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory holding `<id>.pdb`, `<id>.cif` and optional `<id>.json` files.
    #[arg(long, required = true, value_name = "DIR")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub stages: StageArgs,

    /// Print one JSON object per entry.
    #[arg(long)]
    pub json: bool,
}
