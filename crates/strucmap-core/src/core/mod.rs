//! # Core Module
//!
//! Fundamental building blocks for representing a parsed structure entry.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, the `Structure` aggregate,
//!   reference range mappings and entry metadata
//! - **File I/O** ([`io`]) - Fixed-column PDB record scanning, mmCIF metadata extraction and
//!   SIFTS mapping decoding
//! - **Utilities** ([`utils`]) - Amino acid classification tables and geometric helpers
//!
//! Nothing in this module performs network access; every reader works on text that is already
//! resident in memory, with path-based helpers layered on top.

pub mod io;
pub mod models;
pub mod utils;
