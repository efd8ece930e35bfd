//! Record Codec
//!
//! Encodes an (identifier, payload) pair into a framed text block and decodes
//! the (meta, data) buffers the scanner accumulates back into a typed entity.
//!
//! Decoding cross-checks the identifier embedded in the payload against the
//! meta line: a mismatch means the log is corrupt or an offset points at the
//! wrong record, and is reported as `DataIntegrity` rather than papered over.

use uuid::Uuid;

use super::SENTINEL;
use crate::entity::Entity;
use crate::error::{NewslogError, Result};

/// Encode one record: sentinel line, identifier line, payload lines.
///
/// Rejects payloads containing a line equal to the sentinel, since such a
/// record could never be read back correctly.
pub fn encode(id: Uuid, payload: &str) -> Result<String> {
    if payload.lines().any(|line| line == SENTINEL) {
        return Err(NewslogError::InvalidArgument(
            "payload contains the record sentinel".to_string(),
        ));
    }
    Ok(format!("{SENTINEL}\n{id}\n{payload}\n"))
}

/// Serialize an entity to JSON and encode it under its own id
pub fn encode_entity<E: Entity>(entity: &E) -> Result<String> {
    let payload =
        serde_json::to_string(entity).map_err(|e| NewslogError::Format(e.to_string()))?;
    encode(entity.id(), &payload)
}

/// Parse an identifier line into a `Uuid`
pub fn parse_id(meta: &str) -> Result<Uuid> {
    Uuid::parse_str(meta.trim())
        .map_err(|e| NewslogError::Format(format!("bad identifier line {meta:?}: {e}")))
}

/// Decode a scanned (meta, data) pair into the record's id and entity.
///
/// `data` is the payload lines concatenated without separators, as the
/// scanner accumulates them.
pub fn decode<E: Entity>(meta: &str, data: &str) -> Result<(Uuid, E)> {
    let id = parse_id(meta)?;
    let entity: E =
        serde_json::from_str(data).map_err(|e| NewslogError::Format(e.to_string()))?;

    if entity.id() != id {
        return Err(NewslogError::DataIntegrity(format!(
            "payload id {} does not match record id {}",
            entity.id(),
            id
        )));
    }
    Ok((id, entity))
}
