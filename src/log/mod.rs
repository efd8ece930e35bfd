//! Append-Only Log Module
//!
//! The on-disk log format and the machinery that reads it.
//!
//! ## Responsibilities
//! - Frame records between sentinel lines
//! - Read lines while tracking byte offsets
//! - Walk the log forward, handing decoded blocks to a visitor
//!
//! ## File Format (UTF-8 text)
//! ```text
//! ┌──────────────────────────────┐
//! │ <sentinel line>              │
//! │ <identifier, hyphenated hex> │
//! │ <payload JSON line 1>        │
//! │ <payload JSON line 2...>     │
//! ├──────────────────────────────┤
//! │ <sentinel line>              │
//! │ <identifier, hyphenated hex> │
//! │ <payload JSON...>            │
//! └──────────────────────────────┘
//! ```
//!
//! A trailing record with no closing sentinel is valid. A record's offset is
//! the offset of its opening sentinel line.

mod reader;
mod record;
mod scanner;

pub use reader::LineReader;
pub use record::{decode, encode, encode_entity, parse_id};
pub use scanner::{scan, ScanControl};

/// Separator line between records.
///
/// A fixed UUID-derived token so it never collides with identifier lines or
/// realistic payload text. `encode` rejects payloads containing this exact
/// line, making the no-collision assumption an enforced invariant rather
/// than a hope.
pub const SENTINEL: &str = "4f9c6a1e-70d2-4b8f-9b3a-5e2c8d14a7f6";
