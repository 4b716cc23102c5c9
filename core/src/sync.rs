//! Transform syncing
//!
//! Records an object's local transform into the recording as a frame
//! property and puts it back during playback, so replays stay in step even
//! where gameplay is not fully deterministic.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::LiveInput;
use crate::replay::format::PayloadError;
use crate::replay::runtime::{Recorder, RecorderMode};

/// Suffix appended to a syncer's tag to form its property name
pub const TRANSFORM_PROPERTY_SUFFIX: &str = "_transform";

/// Local position, rotation and scale of one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// What a [`TransformSyncer::sync`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Recorder is passing input through, or every channel is disabled
    Skipped,
    /// The transform was queued for the next recorded frame
    Saved,
    /// The transform was overwritten from the latched recording
    Applied,
    /// Playing back, but the recording holds no state for this tag yet
    Missing,
}

/// Keeps one transform in step with a [`Recorder`]
#[derive(Debug, Clone)]
pub struct TransformSyncer {
    tag: String,
    pub sync_position: bool,
    pub sync_rotation: bool,
    pub sync_scale: bool,
}

impl TransformSyncer {
    /// Syncer storing its state under `"<tag>_transform"`, all channels enabled
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            sync_position: true,
            sync_rotation: true,
            sync_scale: true,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Frame property the transform is stored under
    pub fn property_name(&self) -> String {
        format!("{}{}", self.tag, TRANSFORM_PROPERTY_SUFFIX)
    }

    /// Save or restore `transform`, depending on the recorder's mode
    ///
    /// Call once per host tick, after [`Recorder::tick`]. When playing back,
    /// only the enabled channels are written.
    pub fn sync<I: LiveInput>(
        &self,
        recorder: &mut Recorder<I>,
        transform: &mut TransformState,
    ) -> Result<SyncOutcome, PayloadError> {
        if !self.sync_position && !self.sync_rotation && !self.sync_scale {
            return Ok(SyncOutcome::Skipped);
        }

        match recorder.mode() {
            RecorderMode::Passthrough => Ok(SyncOutcome::Skipped),
            RecorderMode::Record => {
                let encoded = serde_json::to_string(transform)?;
                recorder.save_property(self.property_name(), encoded);
                Ok(SyncOutcome::Saved)
            }
            RecorderMode::Playback => {
                let Some(encoded) = recorder.try_property(&self.property_name()) else {
                    return Ok(SyncOutcome::Missing);
                };
                let recorded: TransformState = serde_json::from_str(encoded)?;
                self.apply(&recorded, transform);
                Ok(SyncOutcome::Applied)
            }
        }
    }

    fn apply(&self, recorded: &TransformState, transform: &mut TransformState) {
        if self.sync_position {
            transform.position = recorded.position;
        }
        if self.sync_rotation {
            transform.rotation = recorded.rotation;
        }
        if self.sync_scale {
            transform.scale = recorded.scale;
        }
    }
}
