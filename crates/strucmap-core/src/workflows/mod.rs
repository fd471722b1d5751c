//! # Workflows Module
//!
//! High-level entry points that run the full loading pipeline.
//!
//! - **Load Workflow** ([`load`]) - scan records, build chains, compute statistics, align
//!   canonical sequences, resolve reference positions and sites, and parse metadata, returning
//!   one finished [`Structure`](crate::core::models::structure::Structure) or an error.

pub mod load;
