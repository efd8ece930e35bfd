//! # newslog
//!
//! A single-file, append-only record store with:
//! - Sentinel-framed text/JSON records
//! - Tombstone-based soft deletion
//! - An in-memory id -> byte-offset index, rebuilt by full scan at startup
//! - Last-writer-wins versioning (updating = appending under the same id)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      Store                          │
//! │   get_by_id / find / list_distinct_years            │
//! │   create / delete_by_id / initialize                │
//! └──────────┬─────────────────────────┬────────────────┘
//!            │                         │
//!            ▼                         ▼
//!     ┌─────────────┐          ┌──────────────┐
//!     │ OffsetIndex │          │ Log Scanner  │
//!     │ (id→offset) │          │  (visitor)   │
//!     └─────────────┘          └──────┬───────┘
//!                                     │
//!                        ┌────────────┴───────────┐
//!                        ▼                        ▼
//!                 ┌──────────────┐        ┌──────────────┐
//!                 │ Record Codec │        │  LineReader  │
//!                 │ (frame/JSON) │        │ (pos-tracked)│
//!                 └──────────────┘        └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entity;
pub mod log;
pub mod index;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NewslogError, Result};
pub use config::Config;
pub use entity::{Article, Entity};
pub use index::OffsetIndex;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of newslog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
