//! Offset alignment between atom record numbering and canonical sequence numbering.
//!
//! Atom records often number residues from something other than 1 and omit unresolved
//! stretches. For each chain a single integer offset is chosen so that as many observed
//! residues as possible agree, by one-letter code, with the canonical sequence.

use super::error::EngineError;
use crate::core::models::structure::Structure;
use std::collections::BTreeMap;
use tracing::debug;

/// Number of observed residues whose one-letter code matches the canonical residue at
/// `position + offset - start`.
pub fn score_offset(observed: &[(isize, char)], canonical: &[char], start: isize, offset: isize) -> usize {
    observed
        .iter()
        .filter(|&&(position, code)| {
            let index = position + offset - start;
            usize::try_from(index)
                .ok()
                .and_then(|i| canonical.get(i))
                .is_some_and(|&expected| expected == code)
        })
        .count()
}

/// The offset in `[0, steps)` with the strictly highest score. Ties keep the lowest offset,
/// so an all-zero scoring chain gets offset 0.
pub fn best_offset(observed: &[(isize, char)], canonical: &[char], start: isize, steps: isize) -> (isize, usize) {
    let mut best = (0, 0);
    for offset in 0..steps {
        let score = score_offset(observed, canonical, start, offset);
        if score > best.1 {
            best = (offset, score);
        }
    }
    best
}

/// Aligns every chain, setting each residue's canonical position and building the aligned view.
///
/// # Errors
///
/// Returns [`EngineError::Alignment`] when a chain's canonical sequence is not longer than its
/// numbering span (including a chain without any canonical sequence).
pub fn align(structure: &mut Structure) -> Result<(), EngineError> {
    let mut aligned_chains = BTreeMap::new();
    let mut offsets = BTreeMap::new();

    for (&chain_id, residues) in &structure.chains {
        let bounds = structure.bounds.get(&chain_id).copied().ok_or_else(|| {
            EngineError::Internal(format!("chain {chain_id} has residues but no bounds"))
        })?;
        let canonical: Vec<char> = structure
            .canonical_chains
            .get(&chain_id)
            .map(|seq| seq.iter().map(|kind| kind.code1()).collect())
            .unwrap_or_default();

        let steps = canonical.len() as isize - bounds.span();
        if steps <= 0 {
            return Err(EngineError::Alignment {
                chain: chain_id,
                canonical_length: canonical.len(),
                span: bounds.span(),
            });
        }

        let observed: Vec<(isize, char)> = residues
            .iter()
            .map(|(&position, &id)| (position, structure.residues[id].code1()))
            .collect();
        let (offset, score) = best_offset(&observed, &canonical, bounds.start, steps);
        debug!(chain = %chain_id, offset, score, observed = observed.len(), "Aligned chain.");

        let view: BTreeMap<isize, _> = residues
            .iter()
            .map(|(&position, &id)| (position - bounds.start + offset + 1, id))
            .collect();
        aligned_chains.insert(chain_id, view);
        offsets.insert(chain_id, offset);
    }

    for view in aligned_chains.values() {
        for (&position, &id) in view {
            structure.residues[id].position = Some(position);
        }
    }
    structure.aligned_chains = aligned_chains;
    structure.offsets = offsets;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::StructureBuilder;
    use crate::core::models::residue::ResidueKind;
    use nalgebra::Point3;

    const CORE: [&str; 30] = [
        "PHE", "VAL", "ASN", "GLN", "HIS", "LEU", "CYS", "ALA", "SER", "HIS", "LEU", "VAL", "GLU",
        "ALA", "LEU", "TYR", "LEU", "VAL", "CYS", "SER", "GLU", "ARG", "ASP", "PHE", "PHE", "TYR",
        "THR", "PRO", "LYS", "THR",
    ];

    fn structure(chain: char, first: isize, observed: &[&str], canonical: &[&str]) -> Structure {
        let mut builder = StructureBuilder::new();
        for (k, residue) in observed.iter().enumerate() {
            let position = first + k as isize;
            builder.add_atom(Atom::new(k + 1, "CA", residue, chain, position, Point3::origin()));
        }
        for residue in canonical {
            builder.add_canonical_residue(chain, residue);
        }
        builder.build()
    }

    #[test]
    fn chain_b_aligns_with_offset_24() {
        let canonical: Vec<&str> = std::iter::repeat_n("GLY", 24).chain(CORE).collect();
        let mut structure = structure('B', 1, &CORE, &canonical);
        align(&mut structure).unwrap();

        assert_eq!(structure.offset('B'), Some(24));
        assert_eq!(structure.residue_at('B', 1).unwrap().position, Some(25));
        assert_eq!(structure.residue_at_canonical('B', 25).unwrap().struct_position, 1);
        assert_eq!(structure.residue_at_canonical('B', 54).unwrap().struct_position, 30);
    }

    #[test]
    fn chosen_offset_is_never_beaten() {
        let canonical: Vec<&str> = std::iter::repeat_n("GLY", 24).chain(CORE).collect();
        let structure = structure('B', 1, &CORE, &canonical);
        let observed: Vec<(isize, char)> = structure
            .chain_residues('B')
            .unwrap()
            .map(|r| (r.struct_position, r.code1()))
            .collect();
        let codes: Vec<char> = canonical
            .iter()
            .map(|token| ResidueKind::classify(token).code1())
            .collect();

        let (offset, score) = best_offset(&observed, &codes, 1, 25);
        assert_eq!(offset, 24);
        for other in 0..25 {
            assert!(score_offset(&observed, &codes, 1, other) <= score);
        }
    }

    #[test]
    fn ties_keep_the_lowest_offset() {
        let mut structure = structure('A', 1, &["ALA"; 3], &["ALA"; 5]);
        align(&mut structure).unwrap();
        assert_eq!(structure.offset('A'), Some(0));
        assert_eq!(structure.residue_at('A', 1).unwrap().position, Some(1));
    }

    #[test]
    fn zero_score_falls_back_to_offset_zero() {
        let mut structure = structure('A', 10, &["TRP", "TRP"], &["GLY", "GLY", "GLY", "GLY"]);
        align(&mut structure).unwrap();
        assert_eq!(structure.offset('A'), Some(0));
        assert_eq!(structure.residue_at('A', 11).unwrap().position, Some(2));
    }

    #[test]
    fn source_numbering_shift_is_absorbed() {
        let mut structure = structure('A', 101, &["HIS", "LEU"], &["PHE", "VAL", "HIS", "LEU", "CYS"]);
        align(&mut structure).unwrap();
        assert_eq!(structure.offset('A'), Some(2));
        assert_eq!(structure.residue_at('A', 101).unwrap().position, Some(3));
    }

    #[test]
    fn short_canonical_sequence_is_an_error() {
        let mut structure = structure('A', 1, &["ALA"; 3], &["ALA"; 2]);
        match align(&mut structure) {
            Err(EngineError::Alignment { chain, canonical_length, span }) => {
                assert_eq!((chain, canonical_length, span), ('A', 2, 2));
            }
            other => panic!("expected alignment error, got {other:?}"),
        }
    }

    #[test]
    fn missing_canonical_sequence_is_an_error() {
        let mut structure = structure('A', 1, &["ALA"], &[]);
        structure.canonical_chains.clear();
        assert!(matches!(align(&mut structure), Err(EngineError::Alignment { chain: 'A', .. })));
    }
}
