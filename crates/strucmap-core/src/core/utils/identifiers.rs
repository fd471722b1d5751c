use crate::core::models::residue::AminoAcid;
use phf::{Map, phf_map};

/// The twenty standard amino acids in their canonical table order.
pub static AMINO_ACIDS: [AminoAcid; 20] = [
    AminoAcid::Alanine,
    AminoAcid::Arginine,
    AminoAcid::Asparagine,
    AminoAcid::AsparticAcid,
    AminoAcid::Cysteine,
    AminoAcid::GlutamicAcid,
    AminoAcid::Glutamine,
    AminoAcid::Glycine,
    AminoAcid::Histidine,
    AminoAcid::Isoleucine,
    AminoAcid::Leucine,
    AminoAcid::Lysine,
    AminoAcid::Methionine,
    AminoAcid::Phenylalanine,
    AminoAcid::Proline,
    AminoAcid::Serine,
    AminoAcid::Threonine,
    AminoAcid::Tryptophan,
    AminoAcid::Tyrosine,
    AminoAcid::Valine,
];

// Keys are upper-cased; lookups upper-case their input first.
#[rustfmt::skip]
static AMINO_ACID_TOKENS: Map<&'static str, AminoAcid> = phf_map! {
    "ALANINE" => AminoAcid::Alanine,             "ALA" => AminoAcid::Alanine,       "A" => AminoAcid::Alanine,
    "ARGININE" => AminoAcid::Arginine,           "ARG" => AminoAcid::Arginine,      "R" => AminoAcid::Arginine,
    "ASPARAGINE" => AminoAcid::Asparagine,       "ASN" => AminoAcid::Asparagine,    "N" => AminoAcid::Asparagine,
    "ASPARTIC ACID" => AminoAcid::AsparticAcid,  "ASP" => AminoAcid::AsparticAcid,  "D" => AminoAcid::AsparticAcid,
    "CYSTEINE" => AminoAcid::Cysteine,           "CYS" => AminoAcid::Cysteine,      "C" => AminoAcid::Cysteine,
    "GLUTAMIC ACID" => AminoAcid::GlutamicAcid,  "GLU" => AminoAcid::GlutamicAcid,  "E" => AminoAcid::GlutamicAcid,
    "GLUTAMINE" => AminoAcid::Glutamine,         "GLN" => AminoAcid::Glutamine,     "Q" => AminoAcid::Glutamine,
    "GLYCINE" => AminoAcid::Glycine,             "GLY" => AminoAcid::Glycine,       "G" => AminoAcid::Glycine,
    "HISTIDINE" => AminoAcid::Histidine,         "HIS" => AminoAcid::Histidine,     "H" => AminoAcid::Histidine,
    "ISOLEUCINE" => AminoAcid::Isoleucine,       "ILE" => AminoAcid::Isoleucine,    "I" => AminoAcid::Isoleucine,
    "LEUCINE" => AminoAcid::Leucine,             "LEU" => AminoAcid::Leucine,       "L" => AminoAcid::Leucine,
    "LYSINE" => AminoAcid::Lysine,               "LYS" => AminoAcid::Lysine,        "K" => AminoAcid::Lysine,
    "METHIONINE" => AminoAcid::Methionine,       "MET" => AminoAcid::Methionine,    "M" => AminoAcid::Methionine,
    "PHENYLALANINE" => AminoAcid::Phenylalanine, "PHE" => AminoAcid::Phenylalanine, "F" => AminoAcid::Phenylalanine,
    "PROLINE" => AminoAcid::Proline,             "PRO" => AminoAcid::Proline,       "P" => AminoAcid::Proline,
    "SERINE" => AminoAcid::Serine,               "SER" => AminoAcid::Serine,        "S" => AminoAcid::Serine,
    "THREONINE" => AminoAcid::Threonine,         "THR" => AminoAcid::Threonine,     "T" => AminoAcid::Threonine,
    "TRYPTOPHAN" => AminoAcid::Tryptophan,       "TRP" => AminoAcid::Tryptophan,    "W" => AminoAcid::Tryptophan,
    "TYROSINE" => AminoAcid::Tyrosine,           "TYR" => AminoAcid::Tyrosine,      "Y" => AminoAcid::Tyrosine,
    "VALINE" => AminoAcid::Valine,               "VAL" => AminoAcid::Valine,        "V" => AminoAcid::Valine,
};

/// Resolves a full name, three-letter or one-letter code to a standard amino acid.
///
/// Matching ignores case and surrounding whitespace. Anything outside the twenty-entry table
/// (modified residues, water, ligands, nucleotides) returns `None`.
pub fn classify_amino_acid(token: &str) -> Option<AminoAcid> {
    AMINO_ACID_TOKENS
        .get(token.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Returns `true` when `code` is the one-letter code of a standard amino acid.
///
/// Unlike [`classify_amino_acid`] this check is case-sensitive: one-letter codes are upper case.
pub fn is_amino_acid(code: char) -> bool {
    AMINO_ACIDS.iter().any(|aa| aa.code1() == code)
}
