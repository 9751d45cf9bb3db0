//! Versioned serialized form of a [`CardLayout`].
//!
//! The export collaborator consumes layouts out of process; this module
//! gives it a compact binary form (postcard) and a readable JSON form, both
//! wrapped in a version-checked envelope so stale payloads fail decode
//! instead of misrendering.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::render_ir::CardLayout;

/// Current envelope version. Bump on any breaking IR change.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum SnapshotError {
    /// Envelope carried a version this build does not understand.
    UnsupportedVersion(u32),
    Postcard(postcard::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported snapshot version {version}")
            }
            Self::Postcard(err) => write!(f, "postcard: {err}"),
            Self::Json(err) => write!(f, "json: {err}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion(_) => None,
            Self::Postcard(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<postcard::Error> for SnapshotError {
    fn from(err: postcard::Error) -> Self {
        Self::Postcard(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    layout: &'a CardLayout,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    layout: CardLayout,
}

/// Encode a layout into the compact binary envelope.
pub fn encode(layout: &CardLayout) -> Result<Vec<u8>, SnapshotError> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        layout,
    };
    Ok(postcard::to_allocvec(&envelope)?)
}

/// Decode a layout from the compact binary envelope.
pub fn decode(bytes: &[u8]) -> Result<CardLayout, SnapshotError> {
    let envelope: Envelope = postcard::from_bytes(bytes)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.layout)
}

/// Encode a layout as a readable JSON envelope.
pub fn encode_json(layout: &CardLayout) -> Result<Vec<u8>, SnapshotError> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        layout,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode a layout from the JSON envelope.
pub fn decode_json(bytes: &[u8]) -> Result<CardLayout, SnapshotError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.layout)
}
