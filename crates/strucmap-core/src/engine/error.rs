use crate::core::io::cif::MetadataError;
use crate::core::io::pdb::PdbError;
use crate::core::io::sifts::SiftsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Record scan failed: {0}")]
    Records(#[from] PdbError),

    #[error("Metadata parse failed: {0}")]
    Metadata(#[from] MetadataError),

    #[error(
        "Cannot align chain {chain}: canonical sequence has {canonical_length} residues but atom numbering spans {span}"
    )]
    Alignment {
        chain: char,
        canonical_length: usize,
        span: isize,
    },

    #[error("Reference mapping failed: {0}")]
    Sifts(#[from] SiftsError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
