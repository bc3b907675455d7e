//! Loop synthesis for the background bed
//!
//! Stretches a short bed to an arbitrary target length by repeating a
//! leading slice of it with faded edges, so every seam between repetitions
//! is masked. The output length is frame-exact: the accumulator is truncated,
//! never padded, even when truncation lands mid-fade.

use log::debug;

use crate::dsp::fade::{fade_in, fade_out};
use crate::engine::buffer::AudioBuffer;
use crate::error::{MixdownError, Result};

/// Build a bed loop of exactly `target_frames` frames
///
/// Each appended segment is `bed.duration - crossfade_secs` long with a
/// `crossfade_secs` fade at both edges. After truncation a trailing fade-out
/// of at most `tail_fade_cap_secs` is applied so the bed recedes before the
/// outro enters, wherever truncation landed.
///
/// # Errors
/// * `DegenerateLoop` - if the bed is no longer than the crossfade window
pub fn synthesize_loop(
    bed: &AudioBuffer,
    target_frames: usize,
    crossfade_secs: f64,
    tail_fade_cap_secs: f64,
) -> Result<AudioBuffer> {
    // A bed no longer than the window cannot loop, whatever the target
    let crossfade_frames = bed.secs_to_frames(crossfade_secs);
    if bed.frames() <= crossfade_frames {
        return Err(MixdownError::DegenerateLoop {
            bed_secs: bed.duration_secs(),
            window_secs: crossfade_secs,
        });
    }

    if target_frames == 0 {
        return Ok(bed.empty_like());
    }

    let segment_frames = bed.frames() - crossfade_frames;
    let segment = fade_in(&fade_out(&bed.head(segment_frames), crossfade_secs), crossfade_secs);

    let channels = bed.channels();
    let mut samples = Vec::with_capacity(target_frames * channels);
    let mut iterations = 0_usize;
    while samples.len() < target_frames * channels {
        samples.extend_from_slice(segment.samples());
        iterations += 1;
    }
    samples.truncate(target_frames * channels);

    debug!(
        "looped {:.2}s bed into {:.2}s in {} segments",
        bed.duration_secs(),
        target_frames as f64 / bed.sample_rate() as f64,
        iterations
    );

    Ok(fade_out(&bed.with_samples(samples), tail_fade_cap_secs))
}
