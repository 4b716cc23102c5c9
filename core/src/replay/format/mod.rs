//! Text recording format
//!
//! Recordings are stored as a schema-versioned JSON object:
//!
//! ```text
//! {
//!   "schemaVersion": 1,
//!   "frames": [
//!     {
//!       "time": 0.016,
//!       "inputManagerStates": [
//!         { "inputId": "Jump", "buttonState": true, "axisValue": 0.0 }
//!       ],
//!       "syncedProperties": [
//!         { "name": "door", "value": "open" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading checks the version, runs the document through [`upgrade`], then
//! validates the timeline invariants before a [`Recording`] is built.

mod reader;
mod writer;

pub use reader::TextReader;
pub use writer::TextWriter;

use super::recording::{Recording, RecordingError};
use super::types::Frame;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Schema version written by this crate
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Why a serialized recording could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("schema version {0} is not a non-negative integer")]
    InvalidSchemaVersion(String),

    #[error("schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { found: u64, expected: u32 },

    #[error("frame {index} at {time}s does not come after the previous frame at {previous}s")]
    NonMonotonicTime { index: usize, time: f32, previous: f32 },

    #[error("frame {index} has a non-finite time")]
    NonFiniteTime { index: usize },

    #[error("frame {frame} records input `{input_id}` more than once")]
    DuplicateInput { frame: usize, input_id: String },

    #[error("frame {frame} records property `{name}` more than once")]
    DuplicateProperty { frame: usize, name: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    schema_version: u32,
    frames: &'a [Frame],
}

/// Bring a document of schema `version` up to [`CURRENT_SCHEMA_VERSION`]
///
/// Only the current version exists so far; older or newer documents are
/// reported instead of being guessed at.
pub fn upgrade(version: u64, document: Value) -> Result<Value, PayloadError> {
    match version {
        v if v == u64::from(CURRENT_SCHEMA_VERSION) => Ok(document),
        found => Err(PayloadError::SchemaMismatch {
            found,
            expected: CURRENT_SCHEMA_VERSION,
        }),
    }
}

/// Read the schema version of a parsed document
///
/// `_schemaVersion` is accepted as an alias.
pub fn schema_version(document: &Value) -> Result<u64, PayloadError> {
    let value = document
        .get("schemaVersion")
        .or_else(|| document.get("_schemaVersion"))
        .ok_or(PayloadError::MissingField("schemaVersion"))?;
    value
        .as_u64()
        .ok_or_else(|| PayloadError::InvalidSchemaVersion(value.to_string()))
}

/// Check frame ordering and per-frame key uniqueness
fn validate_frames(frames: &[Frame]) -> Result<(), PayloadError> {
    for (index, frame) in frames.iter().enumerate() {
        if !frame.time.is_finite() {
            return Err(PayloadError::NonFiniteTime { index });
        }
        if index > 0 {
            let previous = frames[index - 1].time;
            if frame.time <= previous {
                return Err(PayloadError::NonMonotonicTime {
                    index,
                    time: frame.time,
                    previous,
                });
            }
        }
        if let Some(input_id) = frame.duplicate_input() {
            return Err(PayloadError::DuplicateInput {
                frame: index,
                input_id: input_id.to_string(),
            });
        }
        if let Some(name) = frame.duplicate_property() {
            return Err(PayloadError::DuplicateProperty {
                frame: index,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse and validate a recording document
pub(crate) fn parse(text: &str) -> Result<Recording, PayloadError> {
    let document: Value = serde_json::from_str(text)?;
    let version = schema_version(&document)?;
    if version != u64::from(CURRENT_SCHEMA_VERSION) {
        tracing::warn!(
            "Recording uses schema version {} (current is {})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    let mut document = upgrade(version, document)?;
    let frames = document
        .get_mut("frames")
        .map(Value::take)
        .ok_or(PayloadError::MissingField("frames"))?;
    let frames: Vec<Frame> = serde_json::from_value(frames)?;

    validate_frames(&frames)?;
    Ok(Recording::from_validated_frames(frames))
}

impl Recording {
    /// Serialize to the current text format
    pub fn to_json(&self, pretty: bool) -> Result<String, RecordingError> {
        let document = DocumentRef {
            schema_version: CURRENT_SCHEMA_VERSION,
            frames: self.frames(),
        };
        let text = if pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        text.map_err(|e| RecordingError::MalformedPayload(e.into()))
    }

    /// Parse a recording from text
    pub fn from_json(text: &str) -> Result<Self, RecordingError> {
        Ok(parse(text)?)
    }
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json(false).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Recording {
    type Err = RecordingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}
