//! Source file decoding.
//!
//! Each format implements [`traits::SourceFile`] over text that is already in memory:
//! fixed-column PDB records ([`pdb`]), mmCIF entry metadata ([`cif`]) and PDBe SIFTS
//! reference mappings ([`sifts`]).

pub mod cif;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod pdb;
pub mod records;
pub mod sifts;
pub mod traits;
