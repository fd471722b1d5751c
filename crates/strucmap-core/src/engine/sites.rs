use crate::core::io::pdb::SiteDescription;
use crate::core::io::records::SiteRecord;
use crate::core::models::structure::Structure;
use tracing::debug;

/// Resolves site records against the atom numbering and attaches site descriptions.
///
/// A declared residue is kept only if the chain has a residue at that position and the
/// residue's three-letter code, uppercased, equals the declared type. Records sharing a name
/// are merged. For repeated descriptions of one site the last one wins.
pub fn extract(structure: &mut Structure, sites: &[SiteRecord], descriptions: &[SiteDescription]) {
    for record in sites {
        for declared in &record.residues {
            let Some(id) = structure.residue_id_at(declared.chain_id, declared.position) else {
                continue;
            };
            if structure.residues[id].code3().to_uppercase() != declared.residue_name {
                debug!(
                    site = %record.name,
                    declared = %declared.residue_name,
                    found = structure.residues[id].code3(),
                    "Site residue type mismatch."
                );
                continue;
            }
            structure
                .sites
                .entry(record.name.clone())
                .or_default()
                .push(id);
        }
    }

    for description in descriptions {
        structure
            .site_descriptions
            .insert(description.name.clone(), description.description.clone());
    }
    debug!(
        sites = structure.sites.len(),
        descriptions = structure.site_descriptions.len(),
        "Extracted sites."
    );
}
