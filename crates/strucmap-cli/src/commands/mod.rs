pub mod batch;
pub mod export;
pub mod inspect;
pub mod query;

use crate::cli::{SourceArgs, StageArgs};
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use strucmap::core::models::structure::Structure;
use strucmap::engine::progress::ProgressReporter;
use strucmap::workflows::load::{self, StructureInput};
use tracing::info;

/// Reads and loads the single entry named by `source`, rendering stage progress on stderr.
pub(crate) fn load_entry(
    source: &SourceArgs,
    stages: &StageArgs,
    app_config: &PartialAppConfig,
) -> Result<Structure> {
    info!("Reading entry sources from {:?} and {:?}", &source.pdb, &source.cif);
    let input = StructureInput::from_paths(
        &source.pdb,
        &source.cif,
        source.sifts.as_deref(),
        source.entry.as_deref(),
    )?;
    let config = app_config.load_config(stages, source.entry.as_deref());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core load workflow...");
    Ok(load::run(input, &config, &reporter)?)
}
