use super::records::{
    FieldDecoder, SiteRecord, column, decode_atom, decode_seqres, decode_site, decode_site_remark,
};
use super::traits::SourceFile;
use crate::core::models::atom::{Atom, RecordKind};
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{record} records not found")]
    RecordsNotFound { record: &'static str },
}

/// The canonical sequence of one chain as collected from its `SEQRES` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalSequence {
    /// Residue count declared on the `SEQRES` lines.
    pub declared_length: usize,
    /// Residue tokens in order.
    pub residues: Vec<String>,
}

/// A `REMARK 800` identifier/description pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDescription {
    pub name: String,
    pub description: String,
}

/// Every record of an atom record file that the model needs, in file order.
#[derive(Debug, Clone, Default)]
pub struct PdbRecords {
    pub atoms: Vec<Atom>,
    pub hetero_atoms: Vec<Atom>,
    pub canonical_sequences: BTreeMap<char, CanonicalSequence>,
    pub sites: Vec<SiteRecord>,
    pub site_descriptions: Vec<SiteDescription>,
    /// Numeric fields that could not be decoded and were read as zero.
    pub field_failures: usize,
}

impl PdbRecords {
    /// Fails unless at least one `SEQRES` line was found.
    pub fn require_canonical_sequences(&self) -> Result<(), PdbError> {
        if self.canonical_sequences.is_empty() {
            return Err(PdbError::RecordsNotFound { record: "SEQRES" });
        }
        Ok(())
    }
}

/// Scanner for fixed-column PDB text.
///
/// `ATOM` lines are required. `HETATM`, `SEQRES`, `SITE` and `REMARK 800` lines are collected
/// when present; everything else is ignored.
pub struct PdbFile;

impl SourceFile for PdbFile {
    type Output = PdbRecords;
    type Error = PdbError;

    fn parse(text: &str) -> Result<PdbRecords, PdbError> {
        let mut records = PdbRecords::default();
        let mut decoder = FieldDecoder::default();
        let mut current_site: Option<String> = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let tag = column(line, 0, 6);
            if let Ok(kind) = tag.parse::<RecordKind>() {
                let atom = decode_atom(line, line_no, kind, &mut decoder);
                match kind {
                    RecordKind::Atom => records.atoms.push(atom),
                    RecordKind::Hetero => records.hetero_atoms.push(atom),
                }
                continue;
            }
            match tag {
                "SEQRES" => {
                    let seqres = decode_seqres(line, line_no, &mut decoder);
                    let sequence = records.canonical_sequences.entry(seqres.chain_id).or_default();
                    sequence.declared_length = seqres.declared_length;
                    sequence.residues.extend(seqres.residues);
                }
                "SITE" => records
                    .sites
                    .push(decode_site(line, line_no, &mut decoder)),
                "REMARK" => match decode_site_remark(line) {
                    Some(("SITE_IDENTIFIER", name)) => current_site = Some(name.to_string()),
                    Some(("SITE_DESCRIPTION", description)) => match &current_site {
                        Some(name) => records.site_descriptions.push(SiteDescription {
                            name: name.clone(),
                            description: description.to_string(),
                        }),
                        None => debug!(line = line_no, "Site description without identifier skipped."),
                    },
                    _ => {}
                },
                _ => {}
            }
        }

        if records.atoms.is_empty() {
            return Err(PdbError::RecordsNotFound { record: "ATOM" });
        }

        for (chain_id, sequence) in &records.canonical_sequences {
            if sequence.declared_length != sequence.residues.len() {
                warn!(
                    chain = %chain_id,
                    declared = sequence.declared_length,
                    found = sequence.residues.len(),
                    "SEQRES residue count disagrees with declared length."
                );
            }
        }

        decoder.report("pdb");
        records.field_failures = decoder.failures();

        debug!(
            atoms = records.atoms.len(),
            hetero_atoms = records.hetero_atoms.len(),
            chains = records.canonical_sequences.len(),
            sites = records.sites.len(),
            "Scanned atom records."
        );
        Ok(records)
    }
}
