//! Mix configuration and pipeline roles
//!
//! Every level and window the pipeline uses lives here as an explicit,
//! overridable default. Nothing is a hidden global: concurrent runs each
//! carry their own config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A buffer's place in the pipeline
///
/// Selects wiring only — which gain offset applies, how the step is
/// labelled in logs — never the buffer representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Intro,
    Speech,
    BackgroundBed,
    Outro,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Intro => "intro",
            Role::Speech => "speech",
            Role::BackgroundBed => "bed",
            Role::Outro => "outro",
        }
    }
}

/// Levels and windows for one composition run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    /// Gain offset applied to the background bed
    pub bed_gain_db: f32,
    /// Gain offset applied to the intro and outro stingers
    pub stinger_gain_db: f32,
    /// Overlap window masking each loop seam
    pub crossfade_secs: f64,
    /// Bed fade-in at the start of the clip
    pub bed_fade_in_secs: f64,
    /// Cap on the trailing bed fade-out (whole clip if shorter)
    pub tail_fade_cap_secs: f64,
    /// Silence inserted between stitched speech segments
    pub speech_gap_secs: f64,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            bed_gain_db: -20.0,
            stinger_gain_db: -10.0,
            crossfade_secs: 1.5,
            bed_fade_in_secs: 1.0,
            tail_fade_cap_secs: 10.0,
            speech_gap_secs: 0.6,
        }
    }
}

impl MixConfig {
    /// Gain offset for a buffer in the given role
    ///
    /// Speech is the loudness reference and passes through at unity.
    pub fn gain_for(&self, role: Role) -> f32 {
        match role {
            Role::BackgroundBed => self.bed_gain_db,
            Role::Intro | Role::Outro => self.stinger_gain_db,
            Role::Speech => 0.0,
        }
    }

    /// Load overrides from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
