use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid locator '{0}'. Expected '<key>:<position>' (e.g., 'A:42' or 'P01308:93').")]
    MissingSeparator(String),

    #[error("Chain identifier in '{0}' must be exactly one character.")]
    InvalidChain(String),

    #[error("Position in '{0}' is not an integer.")]
    InvalidPosition(String),

    #[error("Accession in '{0}' cannot be empty.")]
    EmptyAccession(String),
}

/// A residue addressed by chain and a position in one numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueLocator {
    pub chain_id: char,
    pub position: isize,
}

/// A reference sequence position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLocator {
    pub accession: String,
    pub position: isize,
}

fn split_locator(s: &str) -> Result<(&str, isize), ParseError> {
    let (key, position) = s
        .rsplit_once(':')
        .ok_or_else(|| ParseError::MissingSeparator(s.to_string()))?;
    let position = position
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidPosition(s.to_string()))?;
    Ok((key.trim(), position))
}

/// Parses `CHAIN:POS`, e.g. `A:42` or `B:-3`.
pub fn parse_residue_locator(s: &str) -> Result<ResidueLocator, ParseError> {
    let (chain, position) = split_locator(s)?;
    let mut chars = chain.chars();
    match (chars.next(), chars.next()) {
        (Some(chain_id), None) => Ok(ResidueLocator { chain_id, position }),
        _ => Err(ParseError::InvalidChain(s.to_string())),
    }
}

/// Parses `ACCESSION:POS`, e.g. `P01308:93`.
pub fn parse_reference_locator(s: &str) -> Result<ReferenceLocator, ParseError> {
    let (accession, position) = split_locator(s)?;
    if accession.is_empty() {
        return Err(ParseError::EmptyAccession(s.to_string()));
    }
    Ok(ReferenceLocator {
        accession: accession.to_string(),
        position,
    })
}
