//! Log Scanner
//!
//! Walks the log forward from a starting offset, accumulating each record's
//! meta line and payload lines, and hands the triple
//! `(meta, data, record_start_offset)` to a caller-supplied visitor.
//!
//! The visitor decides whether to keep going; point reads stop at the first
//! record boundary after the seek position.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use super::reader::LineReader;
use super::SENTINEL;
use crate::error::Result;

/// Visitor verdict after each record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    /// Keep scanning
    Continue,
    /// Halt immediately (used for point reads)
    Stop,
}

/// Scan the log from `start_offset`, invoking `visit` once per record.
///
/// The visitor receives the raw meta line, the payload lines concatenated
/// without separators, and the byte offset at which the record's opening
/// sentinel began.
///
/// A missing file is a valid empty log and scans as a no-op. A trailing
/// record with no closing sentinel is still delivered.
pub fn scan<F>(path: &Path, start_offset: u64, mut visit: F) -> Result<()>
where
    F: FnMut(&str, &str, u64) -> Result<ScanControl>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    let mut reader = LineReader::with_offset(file, start_offset)?;

    let mut meta = String::new();
    let mut data = String::new();
    let mut record_start = start_offset;

    loop {
        let line_start = reader.position();
        let line = match reader.next_line()? {
            Some(line) => line,
            None => break,
        };

        if line == SENTINEL {
            // Close out the record accumulated so far, if any
            if !meta.is_empty() || !data.is_empty() {
                if visit(&meta, &data, record_start)? == ScanControl::Stop {
                    return Ok(());
                }
                meta.clear();
                data.clear();
            }
            // The sentinel just read opens the next record
            record_start = line_start;
        } else if meta.is_empty() {
            meta = line;
        } else {
            data.push_str(&line);
        }
    }

    // The format does not require a trailing sentinel
    if !meta.is_empty() || !data.is_empty() {
        visit(&meta, &data, record_start)?;
    }
    Ok(())
}
