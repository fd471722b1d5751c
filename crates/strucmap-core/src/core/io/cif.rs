use super::traits::SourceFile;
use crate::core::models::metadata::EntryMetadata;
use chrono::NaiveDate;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Metadata field '{field}' not found (tag {tag})")]
    MissingField {
        field: &'static str,
        tag: &'static str,
    },
    #[error("Metadata field '{field}' has an invalid value: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

const TITLE_TAG: &str = "_struct.title";
const METHOD_TAGS: [&str; 2] = ["_exptl.method", "_refine.pdbx_refine_id"];
const RESOLUTION_TAGS: [&str; 2] = ["_refine.ls_d_res_high", "_em_3d_reconstruction.resolution"];
const DEPOSITION_DATE_TAG: &str = "_pdbx_database_status.recvd_initial_deposition_date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tagged-line reader for the mmCIF companion file.
///
/// Only the scalar entry metadata is read. Every field is required.
pub struct CifFile;

impl SourceFile for CifFile {
    type Output = EntryMetadata;
    type Error = MetadataError;

    fn parse(text: &str) -> Result<EntryMetadata, MetadataError> {
        let lines: Vec<&str> = text.lines().collect();

        let title = required(&lines, "title", &[TITLE_TAG])?;
        let method = required(&lines, "method", &METHOD_TAGS)?;

        let raw_resolution = required(&lines, "resolution", &RESOLUTION_TAGS)?;
        let resolution = raw_resolution
            .parse::<f64>()
            .map_err(|_| MetadataError::InvalidValue {
                field: "resolution",
                value: raw_resolution.clone(),
            })?;

        let raw_date = required(&lines, "deposition date", &[DEPOSITION_DATE_TAG])?;
        let deposition_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|_| {
            MetadataError::InvalidValue {
                field: "deposition date",
                value: raw_date.clone(),
            }
        })?;

        Ok(EntryMetadata {
            title,
            method,
            resolution,
            deposition_date,
        })
    }
}

/// The value of the first tag in `tags` that is present, or `MissingField` naming the first tag.
fn required(lines: &[&str], field: &'static str, tags: &[&'static str]) -> Result<String, MetadataError> {
    tags.iter()
        .find_map(|tag| tag_value(lines, tag))
        .ok_or(MetadataError::MissingField { field, tag: tags[0] })
}

/// Finds a tag and returns its value.
///
/// A scalar value may sit on the tag line, on the following line, or in a `;` delimited text
/// block. A tag that is a `loop_` column header yields its column in the first data row.
/// `?` and `.` mark a missing value.
fn tag_value(lines: &[&str], tag: &str) -> Option<String> {
    let index = lines
        .iter()
        .position(|line| line.split_whitespace().next() == Some(tag))?;

    let value = if let Some(header_start) = loop_header_start(lines, index) {
        loop_value(lines, header_start, index - header_start)?
    } else {
        let inline = lines[index].trim_start()[tag.len()..].trim();
        if !inline.is_empty() {
            unquote(inline).to_string()
        } else {
            let next = lines.get(index + 1)?;
            if let Some(first) = next.strip_prefix(';') {
                text_block(first, &lines[index + 2..])
            } else {
                let next = next.trim();
                if next.is_empty() || is_block_boundary(next) {
                    return None;
                }
                unquote(next).to_string()
            }
        }
    };

    match value.as_str() {
        "" | "?" | "." => None,
        _ => Some(value),
    }
}

fn is_block_boundary(line: &str) -> bool {
    line.starts_with('_') || line.starts_with('#') || line.starts_with("loop_") || line.starts_with("data_")
}

/// A bare `_category.item` line, as found in a loop header.
fn is_header_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(tokens.next(), Some(tag) if tag.starts_with('_')) && tokens.next().is_none()
}

/// Index of the first header line of the `loop_` that `index` is a column of, if any.
fn loop_header_start(lines: &[&str], index: usize) -> Option<usize> {
    if !is_header_line(lines[index]) {
        return None;
    }
    let mut start = index;
    while start > 0 && is_header_line(lines[start - 1]) {
        start -= 1;
    }
    let keyword = lines.get(start.checked_sub(1)?)?;
    (keyword.trim() == "loop_").then_some(start)
}

/// Column `column` of the first data row of the loop whose header starts at `header_start`.
///
/// Rows may wrap over several lines; `;` text blocks count as one value.
fn loop_value(lines: &[&str], header_start: usize, column: usize) -> Option<String> {
    let width = lines[header_start..]
        .iter()
        .take_while(|line| is_header_line(line))
        .count();

    let mut row: Vec<String> = Vec::with_capacity(width);
    let mut cursor = header_start + width;
    while row.len() < width {
        let line = lines.get(cursor)?;
        cursor += 1;
        if let Some(first) = line.strip_prefix(';') {
            let block_len = lines[cursor..]
                .iter()
                .position(|l| l.starts_with(';'))
                .unwrap_or(lines.len() - cursor);
            row.push(text_block(first, &lines[cursor..cursor + block_len]));
            cursor += block_len + 1;
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_block_boundary(trimmed) {
            return None;
        }
        row.extend(tokenize(trimmed).into_iter().map(str::to_string));
    }
    row.into_iter().nth(column)
}

/// Splits a data line into values. A quote opens a value at a token start and closes only when
/// followed by whitespace or the end of the line; the quotes are not part of the value.
fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let quote = bytes[i];
        if quote == b'\'' || quote == b'"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && !(bytes[end] == quote
                    && bytes.get(end + 1).is_none_or(|b| b.is_ascii_whitespace()))
            {
                end += 1;
            }
            tokens.push(&line[start..end.min(bytes.len())]);
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(&line[start..i]);
        }
    }
    tokens
}

/// Joins the lines of a `;` text block with single spaces.
fn text_block(first: &str, rest: &[&str]) -> String {
    let mut parts = vec![first.trim()];
    for line in rest {
        if line.starts_with(';') {
            break;
        }
        parts.push(line.trim());
    }
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips one pair of enclosing quotes.
fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
