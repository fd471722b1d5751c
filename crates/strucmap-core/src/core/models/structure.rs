use super::atom::Atom;
use super::ids::{AtomId, ResidueId};
use super::metadata::EntryMetadata;
use super::residue::{Residue, ResidueKind};
use crate::core::utils::geometry;
use serde::Serialize;
use slotmap::SlotMap;
use std::collections::{BTreeMap, BTreeSet};

/// Lowest and highest residue number observed on a chain in the atom record numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChainBounds {
    pub start: isize,
    pub end: isize,
}

impl ChainBounds {
    /// Distance between the first and last residue number.
    pub fn span(&self) -> isize {
        self.end - self.start
    }
}

/// A parsed structure entry: the aggregate root owning every atom and residue.
///
/// Atoms and residues live in slot-map arenas. Every secondary view (the chain map, the aligned
/// canonical view, the reference position table and the site table) stores [`ResidueId`]s into
/// the residue arena rather than owning data, so one residue can appear in several views at once.
///
/// Once a loading workflow returns a `Structure`, all access is through `&self`; the pipeline
/// stages that fill in alignment, reference and site data are crate-internal.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Entry identifier, when known (e.g. "1MSO").
    pub(crate) id: Option<String>,
    /// Raw text of the atom record file.
    pub(crate) raw_pdb: String,
    /// Raw text of the metadata companion file.
    pub(crate) raw_cif: Option<String>,
    /// Scalar entry metadata.
    pub(crate) metadata: Option<EntryMetadata>,
    /// Arena of `ATOM` record atoms.
    pub(crate) atoms: SlotMap<AtomId, Atom>,
    /// Arena of residues built from `ATOM` records.
    pub(crate) residues: SlotMap<ResidueId, Residue>,
    /// `HETATM` record atoms, kept outside the chain model.
    pub(crate) hetero_atoms: Vec<Atom>,
    /// Distinct hetero group names in order of first appearance.
    pub(crate) hetero_groups: Vec<String>,
    /// Chain → atom record position → residue.
    pub(crate) chains: BTreeMap<char, BTreeMap<isize, ResidueId>>,
    /// Chain → canonical (SEQRES) sequence, indexed from zero.
    pub(crate) canonical_chains: BTreeMap<char, Vec<ResidueKind>>,
    /// Chain → canonical position → residue, filled by the offset aligner.
    pub(crate) aligned_chains: BTreeMap<char, BTreeMap<isize, ResidueId>>,
    /// Chain → alignment offset.
    pub(crate) offsets: BTreeMap<char, isize>,
    /// Chain → atom record numbering bounds.
    pub(crate) bounds: BTreeMap<char, ChainBounds>,
    /// Accession → reference position → residues (one per covering chain).
    pub(crate) reference_positions: BTreeMap<String, BTreeMap<isize, Vec<ResidueId>>>,
    /// Site name → member residues.
    pub(crate) sites: BTreeMap<String, Vec<ResidueId>>,
    /// Site name → free-text description.
    pub(crate) site_descriptions: BTreeMap<String, String>,
}

impl Structure {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn raw_pdb(&self) -> &str {
        &self.raw_pdb
    }

    pub fn raw_cif(&self) -> Option<&str> {
        self.raw_cif.as_deref()
    }

    /// Scalar metadata. `None` for structures loaded from atom records only.
    pub fn metadata(&self) -> Option<&EntryMetadata> {
        self.metadata.as_ref()
    }

    /// Total residue count, summed over every chain.
    pub fn total_length(&self) -> usize {
        self.chains.values().map(BTreeMap::len).sum()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Every residue built from atom records, in arena order.
    pub fn residues(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// The atoms owned by a residue, in file order.
    pub fn residue_atoms(&self, id: ResidueId) -> impl Iterator<Item = &Atom> {
        self.residues
            .get(id)
            .into_iter()
            .flat_map(|residue| residue.atoms.iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id))
    }

    /// Chain identifiers present in the atom records, in ascending order.
    pub fn chain_ids(&self) -> impl Iterator<Item = char> + '_ {
        self.chains.keys().copied()
    }

    /// Residues of a chain ordered by atom record position.
    pub fn chain_residues(&self, chain_id: char) -> Option<impl Iterator<Item = &Residue> + '_> {
        let chain = self.chains.get(&chain_id)?;
        Some(chain.values().filter_map(|&id| self.residues.get(id)))
    }

    /// Looks up a residue by chain and atom record position.
    pub fn residue_id_at(&self, chain_id: char, struct_position: isize) -> Option<ResidueId> {
        self.chains.get(&chain_id)?.get(&struct_position).copied()
    }

    /// Looks up a residue by chain and atom record position.
    pub fn residue_at(&self, chain_id: char, struct_position: isize) -> Option<&Residue> {
        self.residue_id_at(chain_id, struct_position)
            .and_then(|id| self.residues.get(id))
    }

    /// Looks up a residue by chain and canonical (SEQRES) position.
    pub fn canonical_residue_id(&self, chain_id: char, position: isize) -> Option<ResidueId> {
        self.aligned_chains.get(&chain_id)?.get(&position).copied()
    }

    /// Looks up a residue by chain and canonical (SEQRES) position.
    pub fn residue_at_canonical(&self, chain_id: char, position: isize) -> Option<&Residue> {
        self.canonical_residue_id(chain_id, position)
            .and_then(|id| self.residues.get(id))
    }

    /// Residues covering a reference sequence position.
    ///
    /// More than one residue is returned when several chains carry the same sequence. A position
    /// with no structural coverage returns `None`; sparse coverage is the normal case.
    pub fn residues_at_reference(&self, accession: &str, position: isize) -> Option<Vec<&Residue>> {
        let ids = self.reference_positions.get(accession)?.get(&position)?;
        Some(ids.iter().filter_map(|&id| self.residues.get(id)).collect())
    }

    /// Accessions that went through reference position resolution.
    pub fn reference_accessions(&self) -> impl Iterator<Item = &str> {
        self.reference_positions.keys().map(String::as_str)
    }

    /// Number of reference positions of `accession` covered by at least one residue.
    pub fn reference_coverage(&self, accession: &str) -> Option<usize> {
        self.reference_positions.get(accession).map(BTreeMap::len)
    }

    /// Every site name known from either site records or site descriptions.
    pub fn site_names(&self) -> Vec<&str> {
        self.sites
            .keys()
            .chain(self.site_descriptions.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Residues that make up a named site.
    pub fn site_residues(&self, name: &str) -> Option<Vec<&Residue>> {
        let ids = self.sites.get(name)?;
        Some(ids.iter().filter_map(|&id| self.residues.get(id)).collect())
    }

    pub fn site_description(&self, name: &str) -> Option<&str> {
        self.site_descriptions.get(name).map(String::as_str)
    }

    /// The SEQRES alignment offset chosen for a chain.
    pub fn offset(&self, chain_id: char) -> Option<isize> {
        self.offsets.get(&chain_id).copied()
    }

    pub fn bounds(&self, chain_id: char) -> Option<ChainBounds> {
        self.bounds.get(&chain_id).copied()
    }

    /// The canonical sequence of a chain, indexed from zero.
    pub fn canonical_sequence(&self, chain_id: char) -> Option<&[ResidueKind]> {
        self.canonical_chains.get(&chain_id).map(Vec::as_slice)
    }

    /// One-letter rendering of a chain's canonical sequence.
    pub fn canonical_sequence_string(&self, chain_id: char) -> Option<String> {
        self.canonical_sequence(chain_id)
            .map(|seq| seq.iter().map(ResidueKind::code1).collect())
    }

    /// One-letter rendering of the residues observed in the atom records of a chain.
    pub fn chain_sequence_string(&self, chain_id: char) -> Option<String> {
        self.chain_residues(chain_id)
            .map(|residues| residues.map(Residue::code1).collect())
    }

    pub fn hetero_atoms(&self) -> &[Atom] {
        &self.hetero_atoms
    }

    pub fn hetero_groups(&self) -> &[String] {
        &self.hetero_groups
    }

    /// Minimum atom pair distance between two residues, in Angstroms.
    pub fn residue_distance(&self, first: ResidueId, second: ResidueId) -> Option<f64> {
        if !self.residues.contains_key(first) || !self.residues.contains_key(second) {
            return None;
        }
        let second: Vec<&Atom> = self.residue_atoms(second).collect();
        geometry::min_pair_distance(self.residue_atoms(first), second.iter().copied())
    }
}
