//! Clip composition pipeline
//!
//! One run: load the four sources, stage their gains, stretch the bed to the
//! narration, overlay, sequence, export. Every intermediate is a fresh
//! buffer; runs share nothing but the output directory.

pub mod beds;
pub mod config;

pub use beds::{BedSelector, FixedBed, UniformBedPicker};
pub use config::{MixConfig, Role};

use std::path::{Path, PathBuf};

use log::info;

use crate::dsp::{apply_gain, concat, fade_in, overlay, synthesize_loop};
use crate::engine::buffer::AudioBuffer;
use crate::engine::io::{export_flac, load_audio, ExportTarget};
use crate::error::Result;
use crate::naming::sanitize;

/// File paths for one clip
///
/// A missing bed means the injected [`BedSelector`] chooses one.
#[derive(Debug, Clone)]
pub struct ClipSources {
    pub narration: PathBuf,
    pub intro: PathBuf,
    pub outro: PathBuf,
    pub bed: Option<PathBuf>,
}

/// Compose the finished clip from four loaded buffers
///
/// All four must be format-compatible; the result is
/// intro + (narration over bed loop) + outro.
pub fn compose(
    intro: &AudioBuffer,
    speech: &AudioBuffer,
    bed: &AudioBuffer,
    outro: &AudioBuffer,
    config: &MixConfig,
) -> Result<AudioBuffer> {
    let intro = apply_gain(intro, config.gain_for(Role::Intro));
    let outro = apply_gain(outro, config.gain_for(Role::Outro));
    let speech = apply_gain(speech, config.gain_for(Role::Speech));
    let bed = apply_gain(
        &fade_in(bed, config.bed_fade_in_secs),
        config.gain_for(Role::BackgroundBed),
    );

    let bed_loop = synthesize_loop(
        &bed,
        speech.frames(),
        config.crossfade_secs,
        config.tail_fade_cap_secs,
    )?;

    let mixed = overlay(&speech, &bed_loop)?;
    concat(&[intro, mixed, outro])
}

/// Assemble one clip end to end and return the exported file's path
///
/// The two I/O boundaries (decode, encode) bracket a pure in-memory
/// pipeline; nothing partial is written on failure.
pub fn render_clip(
    sources: &ClipSources,
    title: &str,
    output_dir: &Path,
    config: &MixConfig,
    beds: &dyn BedSelector,
) -> Result<PathBuf> {
    let bed_path = match &sources.bed {
        Some(path) => path.clone(),
        None => beds.select()?,
    };

    info!("loading sources (bed: {})", bed_path.display());
    let intro = load_audio(&sources.intro)?;
    let speech = load_audio(&sources.narration)?;
    let bed = load_audio(&bed_path)?;
    let outro = load_audio(&sources.outro)?;

    info!(
        "composing {:.2}s narration over {:.2}s bed",
        speech.duration_secs(),
        bed.duration_secs()
    );
    let clip = compose(&intro, &speech, &bed, &outro, config)?;

    let target = ExportTarget::new(output_dir.to_path_buf(), sanitize(title));
    target.prepare()?;
    let path = target.resolved_path();
    export_flac(&clip, &path)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MixdownError;

    const RATE: u32 = 1000;

    fn constant(value: f32, secs: f64) -> AudioBuffer {
        let frames = (secs * RATE as f64).round() as usize;
        AudioBuffer::from_interleaved(vec![value; frames], 1, RATE).unwrap()
    }

    #[test]
    fn test_compose_duration_is_sum_of_parts() {
        let intro = constant(0.5, 3.0);
        let speech = constant(0.5, 47.3);
        let bed = constant(0.5, 12.0);
        let outro = constant(0.5, 2.5);

        let clip = compose(&intro, &speech, &bed, &outro, &MixConfig::default()).unwrap();
        assert_eq!(clip.frames(), (52.8 * RATE as f64).round() as usize);
    }

    #[test]
    fn test_compose_stays_within_headroom() {
        // Full-scale inputs: staging gains keep the sum below clipping
        let intro = constant(1.0, 3.0);
        let speech = constant(0.9, 20.0);
        let bed = constant(1.0, 12.0);
        let outro = constant(1.0, 2.5);

        let clip = compose(&intro, &speech, &bed, &outro, &MixConfig::default()).unwrap();
        assert!(clip.peak() <= 1.0);
        assert!(clip.is_finite());
    }

    #[test]
    fn test_compose_empty_narration() {
        let intro = constant(0.5, 3.0);
        let speech = constant(0.5, 0.0);
        let bed = constant(0.5, 12.0);
        let outro = constant(0.5, 2.5);

        let clip = compose(&intro, &speech, &bed, &outro, &MixConfig::default()).unwrap();
        assert_eq!(clip.frames(), (5.5 * RATE as f64).round() as usize);
    }

    #[test]
    fn test_compose_rejects_mixed_formats() {
        let intro = constant(0.5, 3.0);
        let speech = constant(0.5, 10.0);
        let bed = AudioBuffer::from_interleaved(vec![0.5; 24000], 2, 12000).unwrap();
        let outro = constant(0.5, 2.5);

        let result = compose(&intro, &speech, &bed, &outro, &MixConfig::default());
        assert!(matches!(result, Err(MixdownError::FormatMismatch { .. })));
    }

    #[test]
    fn test_compose_degenerate_bed() {
        let intro = constant(0.5, 3.0);
        let speech = constant(0.5, 10.0);
        let bed = constant(0.5, 1.0); // shorter than the crossfade window
        let outro = constant(0.5, 2.5);

        let result = compose(&intro, &speech, &bed, &outro, &MixConfig::default());
        assert!(matches!(result, Err(MixdownError::DegenerateLoop { .. })));
    }
}
