//! Framed Line Reader
//!
//! Reads lines from a seekable byte stream starting at an arbitrary offset,
//! tracking cumulative bytes consumed so callers can record the positions at
//! which lines (and therefore records) begin.

use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::error::Result;

/// Line-oriented reader with byte-offset tracking
pub struct LineReader<R> {
    inner: BufReader<R>,
    position: u64,
}

impl<R: Read + Seek> LineReader<R> {
    /// Wrap a seekable source, starting at `offset`
    pub fn with_offset(mut source: R, offset: u64) -> Result<Self> {
        source.seek(SeekFrom::Start(offset))?;
        Ok(Self {
            inner: BufReader::new(source),
            position: offset,
        })
    }

    /// Byte offset at which the next unread line begins
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read the next line, stripped of its trailing newline.
    ///
    /// Returns `None` at end of stream. The tracked position advances by the
    /// raw byte count consumed, newline included, so `position()` before the
    /// call is the offset at which the returned line started.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let consumed = self.inner.read_line(&mut line)?;
        if consumed == 0 {
            return Ok(None);
        }
        self.position += consumed as u64;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
