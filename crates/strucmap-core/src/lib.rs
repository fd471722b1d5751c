//! # strucmap Core Library
//!
//! Parses macromolecular structure entries (PDB atom records plus an mmCIF metadata companion)
//! and reconciles the three residue numbering schemes that describe the same protein: the atom
//! record numbering, the SEQRES canonical-sequence numbering and an external UniProt reference
//! numbering.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Arena-backed data models (`Structure`, `Residue`, `Atom`),
//!   the fixed-column record scanner, the metadata and SIFTS readers, and the residue
//!   classification tables.
//!
//! - **[`engine`]: The Logic Core.** The stages that turn a freshly built structure into a
//!   mapped one: B-factor statistics, SEQRES offset alignment, reference position resolution and
//!   site extraction, together with configuration, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** End-to-end loading of one entry or many entries in
//!   parallel, returning immutable `Structure` values ready to be shared with consumers.

pub mod core;
pub mod engine;
pub mod workflows;
