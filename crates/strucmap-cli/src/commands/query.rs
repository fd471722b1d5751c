use super::load_entry;
use crate::cli::{QueryArgs, QueryTarget};
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::report::residue_detail;
use strucmap::core::models::residue::Residue;
use strucmap::core::models::structure::Structure;
use tracing::{info, warn};

pub fn run(args: QueryArgs, app_config: &PartialAppConfig) -> Result<()> {
    let structure = load_entry(&args.source, &Default::default(), app_config)?;
    match lookup(&structure, &args.target)? {
        Some(lines) => lines.iter().for_each(|line| println!("{line}")),
        None => {
            warn!("Query matched nothing.");
            println!("not found");
        }
    }
    Ok(())
}

/// Runs one lookup. `None` means the coordinate is not covered by the structure.
fn lookup(structure: &Structure, target: &QueryTarget) -> Result<Option<Vec<String>>> {
    let details = |residues: Vec<&Residue>| -> Vec<String> {
        residues.into_iter().map(residue_detail).collect()
    };

    if let Some(locator) = &target.residue {
        info!(chain = %locator.chain_id, position = locator.position, "Looking up source position.");
        return Ok(structure
            .residue_at(locator.chain_id, locator.position)
            .map(|residue| vec![residue_detail(residue)]));
    }
    if let Some(locator) = &target.canonical {
        info!(chain = %locator.chain_id, position = locator.position, "Looking up canonical position.");
        return Ok(structure
            .residue_at_canonical(locator.chain_id, locator.position)
            .map(|residue| vec![residue_detail(residue)]));
    }
    if let Some(locator) = &target.reference {
        info!(accession = %locator.accession, position = locator.position, "Looking up reference position.");
        return Ok(structure
            .residues_at_reference(&locator.accession, locator.position)
            .map(details));
    }
    if let Some(name) = &target.site {
        info!(site = %name, "Looking up site.");
        let residues = structure.site_residues(name);
        let description = structure.site_description(name);
        if residues.is_none() && description.is_none() {
            return Ok(None);
        }
        let mut lines: Vec<String> = description
            .map(|d| format!("{name}: {d}"))
            .into_iter()
            .collect();
        lines.extend(residues.map(details).unwrap_or_default());
        return Ok(Some(lines));
    }
    Err(CliError::Argument("no query target given".to_string()))
}
