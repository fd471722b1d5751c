//! # Engine Module
//!
//! Pipeline stages that turn scanned records into a cross-referenced [`Structure`].
//!
//! Stages run in a fixed order over a structure assembled by
//! [`StructureBuilder`](crate::core::models::builder::StructureBuilder):
//!
//! - **Statistics** ([`stats`]) - per-residue mean B-factors and their population z-scores
//! - **Alignment** ([`alignment`]) - per-chain offset from atom numbering to canonical numbering
//! - **References** ([`resolver`]) - reference sequence positions projected onto aligned residues
//! - **Sites** ([`sites`]) - functional sites and their descriptions
//!
//! [`config`] selects which stages run, [`progress`] reports them, and [`error`] collects the
//! failures of every layer.
//!
//! [`Structure`]: crate::core::models::structure::Structure

pub mod alignment;
pub mod config;
pub mod error;
pub mod progress;
pub mod resolver;
pub mod sites;
pub mod stats;
