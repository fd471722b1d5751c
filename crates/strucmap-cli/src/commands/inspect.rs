use super::load_entry;
use crate::cli::InspectArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::report::EntrySummary;
use strucmap::core::models::structure::Structure;
use tracing::info;

pub fn run(args: InspectArgs, app_config: &PartialAppConfig) -> Result<()> {
    let structure = load_entry(&args.source, &args.stages, app_config)?;
    println!("{}", render(&structure, args.json)?);
    Ok(())
}

fn render(structure: &Structure, json: bool) -> Result<String> {
    let summary = EntrySummary::from_structure(structure);
    info!(
        chains = summary.chains.len(),
        sites = summary.sites.len(),
        "Rendering entry summary."
    );
    if json {
        Ok(serde_json::to_string_pretty(&summary)?)
    } else {
        Ok(summary.to_string())
    }
}
