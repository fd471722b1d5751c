//! Fixed-column record decoding shared by the atom record scanner.

use crate::core::models::atom::{Atom, RecordKind};
use nalgebra::Point3;
use std::str::FromStr;
use tracing::warn;

/// Returns the trimmed text in the half-open byte range `[start, end)`.
///
/// Lines shorter than `end` are truncated rather than rejected, so a short line yields a blank
/// field.
pub(crate) fn column(line: &str, start: usize, end: usize) -> &str {
    raw_column(line, start, end).trim()
}

/// Like [`column`], without trimming.
pub(crate) fn raw_column(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("")
}

/// The single character at byte `index`, or a blank when the line is too short.
pub(crate) fn column_char(line: &str, index: usize) -> char {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

/// Tolerant numeric field decoding.
///
/// Undecodable values become zero. Failures are counted so a scan can report them once instead
/// of once per line.
#[derive(Debug, Default)]
pub(crate) struct FieldDecoder {
    failures: usize,
    first_failure: Option<(usize, &'static str, String)>,
}

impl FieldDecoder {
    pub fn decode<T: FromStr + Default>(&mut self, line_no: usize, field: &'static str, raw: &str) -> T {
        if raw.is_empty() {
            return T::default();
        }
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.failures += 1;
                if self.first_failure.is_none() {
                    self.first_failure = Some((line_no, field, raw.to_string()));
                }
                T::default()
            }
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Emits one warning summarizing every failure seen so far.
    pub fn report(&self, source: &str) {
        if let Some((line, field, value)) = &self.first_failure {
            warn!(
                source,
                failures = self.failures,
                "Replaced undecodable numeric fields with zero (first: {} = '{}' on line {}).",
                field,
                value,
                line
            );
        }
    }
}

/// Decodes an `ATOM` or `HETATM` line.
pub(crate) fn decode_atom(
    line: &str,
    line_no: usize,
    record: RecordKind,
    decoder: &mut FieldDecoder,
) -> Atom {
    let x = decoder.decode(line_no, "x", column(line, 30, 38));
    let y = decoder.decode(line_no, "y", column(line, 38, 46));
    let z = decoder.decode(line_no, "z", column(line, 46, 54));

    Atom {
        serial: decoder.decode(line_no, "serial", column(line, 6, 11)),
        name: column(line, 12, 16).to_string(),
        residue_name: column(line, 17, 20).to_string(),
        chain_id: column_char(line, 21),
        residue_number: decoder.decode(line_no, "residue number", column(line, 22, 26)),
        position: Point3::new(x, y, z),
        occupancy: decoder.decode(line_no, "occupancy", column(line, 54, 60)),
        b_factor: decoder.decode(line_no, "b-factor", column(line, 60, 66)),
        element: column(line, 76, 78).to_string(),
        charge: column(line, 78, 80).to_string(),
        record,
    }
}

/// One `SEQRES` line: a chain, its declared total length and a run of residue tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeqResLine {
    pub chain_id: char,
    pub declared_length: usize,
    pub residues: Vec<String>,
}

pub(crate) fn decode_seqres(line: &str, line_no: usize, decoder: &mut FieldDecoder) -> SeqResLine {
    SeqResLine {
        chain_id: column_char(line, 11),
        declared_length: decoder.decode(line_no, "residue count", column(line, 13, 17)),
        residues: line
            .get(19..)
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    }
}

/// A residue reference declared by a `SITE` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteResidue {
    pub residue_name: String,
    pub chain_id: char,
    pub position: isize,
}

/// One `SITE` line: a site name and up to four residue references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub name: String,
    pub residues: Vec<SiteResidue>,
}

const SITE_BLOCK_STARTS: [usize; 4] = [18, 29, 40, 51];

pub(crate) fn decode_site(line: &str, line_no: usize, decoder: &mut FieldDecoder) -> SiteRecord {
    let residues = SITE_BLOCK_STARTS
        .iter()
        .filter_map(|&start| {
            let residue_name = column(line, start, start + 3);
            if residue_name.is_empty() {
                return None;
            }
            Some(SiteResidue {
                residue_name: residue_name.to_string(),
                chain_id: column_char(line, start + 4),
                position: decoder.decode(line_no, "site residue number", column(line, start + 5, start + 10)),
            })
        })
        .collect();

    SiteRecord {
        name: column(line, 11, 14).to_string(),
        residues,
    }
}

/// A `REMARK 800` key/value line, e.g. `SITE_IDENTIFIER: AC1`.
pub(crate) fn decode_site_remark(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix("REMARK 800")?.trim();
    let (key, value) = body.split_once(':')?;
    Some((key.trim(), value.trim()))
}
