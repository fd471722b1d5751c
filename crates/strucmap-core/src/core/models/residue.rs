use super::ids::AtomId;
use crate::core::utils::identifiers::classify_amino_acid;
use serde::Serialize;
use std::fmt;

/// Three-letter code reported for anything outside the standard table.
pub const UNKNOWN_CODE3: &str = "Unk";
/// One-letter code reported for anything outside the standard table. Callers treat it as the
/// definitive "not a standard amino acid" marker.
pub const UNKNOWN_CODE1: char = 'X';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AminoAcid {
    Alanine,       // Alanine (ALA)
    Arginine,      // Arginine (ARG)
    Asparagine,    // Asparagine (ASN)
    AsparticAcid,  // Aspartic Acid (ASP)
    Cysteine,      // Cysteine (CYS)
    GlutamicAcid,  // Glutamic Acid (GLU)
    Glutamine,     // Glutamine (GLN)
    Glycine,       // Glycine (GLY)
    Histidine,     // Histidine (HIS)
    Isoleucine,    // Isoleucine (ILE)
    Leucine,       // Leucine (LEU)
    Lysine,        // Lysine (LYS)
    Methionine,    // Methionine (MET)
    Phenylalanine, // Phenylalanine (PHE)
    Proline,       // Proline (PRO)
    Serine,        // Serine (SER)
    Threonine,     // Threonine (THR)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)
    Valine,        // Valine (VAL)
}

impl AminoAcid {
    pub const fn name(self) -> &'static str {
        match self {
            AminoAcid::Alanine => "Alanine",
            AminoAcid::Arginine => "Arginine",
            AminoAcid::Asparagine => "Asparagine",
            AminoAcid::AsparticAcid => "Aspartic acid",
            AminoAcid::Cysteine => "Cysteine",
            AminoAcid::GlutamicAcid => "Glutamic acid",
            AminoAcid::Glutamine => "Glutamine",
            AminoAcid::Glycine => "Glycine",
            AminoAcid::Histidine => "Histidine",
            AminoAcid::Isoleucine => "Isoleucine",
            AminoAcid::Leucine => "Leucine",
            AminoAcid::Lysine => "Lysine",
            AminoAcid::Methionine => "Methionine",
            AminoAcid::Phenylalanine => "Phenylalanine",
            AminoAcid::Proline => "Proline",
            AminoAcid::Serine => "Serine",
            AminoAcid::Threonine => "Threonine",
            AminoAcid::Tryptophan => "Tryptophan",
            AminoAcid::Tyrosine => "Tyrosine",
            AminoAcid::Valine => "Valine",
        }
    }

    pub const fn code3(self) -> &'static str {
        match self {
            AminoAcid::Alanine => "Ala",
            AminoAcid::Arginine => "Arg",
            AminoAcid::Asparagine => "Asn",
            AminoAcid::AsparticAcid => "Asp",
            AminoAcid::Cysteine => "Cys",
            AminoAcid::GlutamicAcid => "Glu",
            AminoAcid::Glutamine => "Gln",
            AminoAcid::Glycine => "Gly",
            AminoAcid::Histidine => "His",
            AminoAcid::Isoleucine => "Ile",
            AminoAcid::Leucine => "Leu",
            AminoAcid::Lysine => "Lys",
            AminoAcid::Methionine => "Met",
            AminoAcid::Phenylalanine => "Phe",
            AminoAcid::Proline => "Pro",
            AminoAcid::Serine => "Ser",
            AminoAcid::Threonine => "Thr",
            AminoAcid::Tryptophan => "Trp",
            AminoAcid::Tyrosine => "Tyr",
            AminoAcid::Valine => "Val",
        }
    }

    pub const fn code1(self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Arginine => 'R',
            AminoAcid::Asparagine => 'N',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::Cysteine => 'C',
            AminoAcid::GlutamicAcid => 'E',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Glycine => 'G',
            AminoAcid::Histidine => 'H',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Leucine => 'L',
            AminoAcid::Lysine => 'K',
            AminoAcid::Methionine => 'M',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Proline => 'P',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
            AminoAcid::Valine => 'V',
        }
    }
}

/// The canonical name triple of a residue.
///
/// Standard residues resolve through the amino acid table; everything else keeps the raw token
/// as its full name and reports `Unk`/`X` codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResidueKind {
    Standard(AminoAcid),
    Unknown(String),
}

impl ResidueKind {
    /// Classifies a full name, three-letter or one-letter token. Never fails.
    pub fn classify(token: &str) -> Self {
        match classify_amino_acid(token) {
            Some(aa) => ResidueKind::Standard(aa),
            None => ResidueKind::Unknown(token.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResidueKind::Standard(aa) => aa.name(),
            ResidueKind::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn code3(&self) -> &str {
        match self {
            ResidueKind::Standard(aa) => aa.code3(),
            ResidueKind::Unknown(_) => UNKNOWN_CODE3,
        }
    }

    pub fn code1(&self) -> char {
        match self {
            ResidueKind::Standard(aa) => aa.code1(),
            ResidueKind::Unknown(_) => UNKNOWN_CODE1,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, ResidueKind::Standard(_))
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A residue's coordinate in an external reference sequence (e.g. a UniProt entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReferencePosition {
    pub accession: String,
    pub position: isize,
}

/// A residue observed in the atom records of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub chain_id: char,                        // Chain identifier
    pub struct_position: isize,                // Residue number as written in the atom records
    pub position: Option<isize>,               // Canonical (SEQRES) position, set by the aligner
    pub reference: Option<ReferencePosition>,  // Reference sequence position, set by the resolver
    pub kind: ResidueKind,                     // Canonical name triple
    pub mean_b_factor: f64,                    // Mean B-factor over the residue's atoms
    pub norm_mean_b_factor: f64,               // Population z-score of `mean_b_factor`
    pub(crate) atoms: Vec<AtomId>,             // Owned atoms, in file order
}

impl Residue {
    pub(crate) fn new(chain_id: char, struct_position: isize, residue_name: &str) -> Self {
        Self {
            chain_id,
            struct_position,
            position: None,
            reference: None,
            kind: ResidueKind::classify(residue_name),
            mean_b_factor: 0.0,
            norm_mean_b_factor: 0.0,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn code3(&self) -> &str {
        self.kind.code3()
    }

    pub fn code1(&self) -> char {
        self.kind.code1()
    }

    pub fn reference_accession(&self) -> Option<&str> {
        self.reference.as_ref().map(|r| r.accession.as_str())
    }

    pub fn reference_position(&self) -> Option<isize> {
        self.reference.as_ref().map(|r| r.position)
    }
}
