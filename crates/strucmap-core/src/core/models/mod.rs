//! Domain model of a parsed structure entry.
//!
//! [`structure::Structure`] is the aggregate root; atoms and residues are stored in slot-map
//! arenas and every other view refers to them by id.

pub mod atom;
pub mod builder;
pub mod ids;
pub mod mapping;
pub mod metadata;
pub mod residue;
pub mod structure;
