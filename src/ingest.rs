//! Sources of raw posts.
//!
//! An [`IngestionSource`] is any iterator of `Result<RawPost>`. An `Err` item
//! is a single bad input (e.g. one malformed line) and does not end the
//! stream.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{Result, SentigeoError};
use crate::record::RawPost;

/// A stream of posts awaiting analysis.
pub trait IngestionSource: Iterator<Item = Result<RawPost>> {}

impl<T> IngestionSource for T where T: Iterator<Item = Result<RawPost>> {}

/// Reads one JSON-encoded [`RawPost`] per line.
///
/// Blank lines are skipped. A line that fails to parse yields an error
/// naming its line number.
#[derive(Debug)]
pub struct JsonlSource<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R) -> Self {
        JsonlSource {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl JsonlSource<BufReader<File>> {
    /// Open a JSONL file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for JsonlSource<R> {
    type Item = Result<RawPost>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(error) => return Some(Err(error.into())),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|error| {
                SentigeoError::invalid_argument(format!(
                    "malformed post on line {}: {error}",
                    self.line_number
                ))
            }));
        }
    }
}
