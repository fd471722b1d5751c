use crate::core::models::mapping::ReferenceMappings;
use crate::core::models::residue::ReferencePosition;
use crate::core::models::structure::Structure;
use tracing::debug;

/// Projects reference sequence positions onto aligned residues.
///
/// Accessions are processed in lexicographic order and ranges in listed order. Every residue
/// covering a reference position is appended to that position's list, while the residue's own
/// scalar reference fields are overwritten by each range that reaches it, so the last one wins.
/// Every accession gets an entry, even when none of its positions resolve.
///
/// Returns the number of (position, residue) pairs recorded.
pub fn resolve(structure: &mut Structure, mappings: &ReferenceMappings) -> usize {
    let Structure {
        residues,
        aligned_chains,
        reference_positions,
        ..
    } = structure;

    let mut resolved = 0;
    for (accession, mapping) in mappings.iter() {
        let positions = reference_positions.entry(accession.to_string()).or_default();
        for range in &mapping.ranges {
            let Some(chain) = aligned_chains.get(&range.chain_id) else {
                debug!(accession, chain = %range.chain_id, "Mapped chain is not in the structure.");
                continue;
            };
            for reference_position in range.reference_positions() {
                let Some(&id) = chain.get(&range.structure_position(reference_position)) else {
                    continue;
                };
                positions.entry(reference_position).or_default().push(id);
                residues[id].reference = Some(ReferencePosition {
                    accession: accession.to_string(),
                    position: reference_position,
                });
                resolved += 1;
            }
        }
        debug!(accession, covered = positions.len(), "Resolved reference positions.");
    }
    resolved
}
