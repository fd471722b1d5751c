use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Defines the interface for decoding one kind of source file.
///
/// Decoding works on text that is already in memory; the provided `read_from*` methods only
/// load the text and hand it to [`parse`](SourceFile::parse).
pub trait SourceFile {
    /// The decoded representation of the file.
    type Output;

    /// The error type for decoding and I/O.
    type Error: Error + From<io::Error>;

    /// Decodes the full text of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part of the file is absent or malformed.
    fn parse(text: &str) -> Result<Self::Output, Self::Error>;

    /// Reads everything from `reader` and decodes it.
    fn read_from(reader: &mut impl Read) -> Result<Self::Output, Self::Error> {
        let text = read_text(reader)?;
        Self::parse(&text)
    }

    /// Reads a file from disk and decodes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Reads a whole source into memory.
pub fn read_text(reader: &mut impl Read) -> io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Reads a whole file into memory.
pub fn read_text_from_path<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(path)?;
    read_text(&mut BufReader::new(file))
}
