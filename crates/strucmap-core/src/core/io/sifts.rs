use super::traits::SourceFile;
use crate::core::models::mapping::{AccessionMapping, RangeMapping, ReferenceMappings};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SiftsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid SIFTS JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Entry '{entry}' not found in SIFTS document")]
    EntryNotFound { entry: String },
}

#[derive(Debug, Clone, Deserialize)]
struct SiftsResidue {
    residue_number: isize,
}

#[derive(Debug, Clone, Deserialize)]
struct SiftsSegment {
    chain_id: String,
    start: SiftsResidue,
    end: SiftsResidue,
    unp_start: isize,
    unp_end: isize,
}

#[derive(Debug, Clone, Deserialize)]
struct SiftsAccession {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mappings: Vec<SiftsSegment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SiftsEntry {
    #[serde(rename = "UniProt", default)]
    uniprot: BTreeMap<String, SiftsAccession>,
}

/// A decoded PDBe SIFTS mappings document, keyed by entry id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SiftsDocument {
    entries: BTreeMap<String, SiftsEntry>,
}

impl SiftsDocument {
    pub fn entry_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// UniProt range mappings of one entry. The entry id is matched case-insensitively.
    pub fn entry(&self, entry_id: &str) -> Result<ReferenceMappings, SiftsError> {
        let entry = self
            .entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(entry_id))
            .map(|(_, entry)| entry)
            .ok_or_else(|| SiftsError::EntryNotFound {
                entry: entry_id.to_string(),
            })?;

        let mut mappings = ReferenceMappings::new();
        for (accession, record) in &entry.uniprot {
            let ranges = record
                .mappings
                .iter()
                .filter_map(|segment| {
                    let Some(chain_id) = segment.chain_id.chars().next() else {
                        warn!(accession = %accession, "Skipping SIFTS segment without chain id.");
                        return None;
                    };
                    Some(RangeMapping::new(
                        chain_id,
                        segment.start.residue_number..=segment.end.residue_number,
                        segment.unp_start..=segment.unp_end,
                    ))
                })
                .collect();
            mappings.insert(
                accession,
                AccessionMapping {
                    identifier: record.identifier.clone(),
                    name: record.name.clone(),
                    ranges,
                },
            );
        }
        Ok(mappings)
    }

    /// The only entry of a single-entry document, which is what the PDBe API returns per request.
    pub fn single_entry(&self) -> Result<ReferenceMappings, SiftsError> {
        match self.entries.keys().next() {
            Some(id) if self.entries.len() == 1 => self.entry(id),
            _ => Err(SiftsError::EntryNotFound {
                entry: String::from("<single entry>"),
            }),
        }
    }
}

/// Decoder for SIFTS mappings JSON.
pub struct SiftsFile;

impl SourceFile for SiftsFile {
    type Output = SiftsDocument;
    type Error = SiftsError;

    fn parse(text: &str) -> Result<SiftsDocument, SiftsError> {
        Ok(serde_json::from_str(text)?)
    }
}
