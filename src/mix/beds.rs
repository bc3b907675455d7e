//! Background bed selection strategies
//!
//! When no bed path is given, one is chosen from a fixed bundled set. The
//! choice is a capability injected into the pipeline so tests can pin it
//! without touching the filesystem.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::error::{MixdownError, Result};

/// Chooses a background bed when the caller did not name one
pub trait BedSelector {
    fn select(&self) -> Result<PathBuf>;
}

/// Uniform random choice over a fixed list of bed files
#[derive(Debug, Clone)]
pub struct UniformBedPicker {
    beds: Vec<PathBuf>,
}

impl UniformBedPicker {
    pub fn new(beds: Vec<PathBuf>) -> Self {
        Self { beds }
    }

    /// The conventional bundled beds under an asset directory
    pub fn bundled(asset_dir: &Path) -> Self {
        Self::new(
            (1..=3)
                .map(|n| asset_dir.join(format!("background-bed_{}.mp3", n)))
                .collect(),
        )
    }
}

impl BedSelector for UniformBedPicker {
    fn select(&self) -> Result<PathBuf> {
        self.beds
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(MixdownError::NoBedAvailable)
    }
}

/// Always selects the same bed; the deterministic stub for tests and for
/// callers that passed an explicit path
#[derive(Debug, Clone)]
pub struct FixedBed(pub PathBuf);

impl BedSelector for FixedBed {
    fn select(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
