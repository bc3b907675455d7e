//! Ordered concatenation of buffers
//!
//! Hard cuts only: the fades belonging to each transition are applied
//! beforehand by whoever produced the segment, so the cut itself is silent.

use crate::engine::buffer::AudioBuffer;
use crate::error::{MixdownError, Result};

/// Concatenate an ordered list of format-compatible buffers
///
/// Result length is the sum of the inputs. An empty list is a caller bug:
/// there is no format to give an empty result.
///
/// # Errors
/// * `FormatMismatch` - empty input list, or any buffer whose sample rate or
///   channel count differs from the first
pub fn concat(buffers: &[AudioBuffer]) -> Result<AudioBuffer> {
    let first = buffers.first().ok_or_else(|| MixdownError::FormatMismatch {
        details: "nothing to concatenate".to_string(),
    })?;

    let mut samples = Vec::with_capacity(buffers.iter().map(|b| b.samples().len()).sum());
    for buffer in buffers {
        first.ensure_compatible(buffer)?;
        samples.extend_from_slice(buffer.samples());
    }

    Ok(first.with_samples(samples))
}

/// Join speech segments with a fixed silence gap after each one
///
/// Empty segments are skipped. The gap length follows the first segment's
/// sample rate; compatibility rules are the same as [`concat`].
pub fn stitch(segments: &[AudioBuffer], gap_secs: f64) -> Result<AudioBuffer> {
    let first = segments.first().ok_or_else(|| MixdownError::FormatMismatch {
        details: "nothing to stitch".to_string(),
    })?;

    let gap = AudioBuffer::silence(
        first.secs_to_frames(gap_secs),
        first.channels(),
        first.sample_rate(),
    );

    let mut parts: Vec<AudioBuffer> = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        parts.push(segment.clone());
        parts.push(gap.clone());
    }

    if parts.is_empty() {
        return Ok(first.empty_like());
    }
    concat(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f32, frames: usize, rate: u32) -> AudioBuffer {
        AudioBuffer::from_interleaved(vec![value; frames], 1, rate).unwrap()
    }

    #[test]
    fn test_concat_durations_add() {
        let a = constant(0.1, 300, 44100);
        let b = constant(0.2, 4730, 44100);
        let c = constant(0.3, 250, 44100);

        let joined = concat(&[a, b, c]).unwrap();
        assert_eq!(joined.frames(), 300 + 4730 + 250);
        assert!((joined.samples()[0] - 0.1).abs() < 1e-6);
        assert!((joined.samples()[300] - 0.2).abs() < 1e-6);
        assert!((joined.samples()[5030] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_concat_rejects_mismatch() {
        let a = constant(0.1, 100, 44100);
        let b = constant(0.2, 100, 48000);
        assert!(matches!(
            concat(&[a, b]),
            Err(MixdownError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_concat_empty_list() {
        assert!(matches!(
            concat(&[]),
            Err(MixdownError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_stitch_inserts_gaps() {
        let a = constant(0.5, 1000, 1000);
        let b = constant(0.5, 500, 1000);

        // 0.6s gap at 1000 Hz = 600 frames, after each segment
        let joined = stitch(&[a, b], 0.6).unwrap();
        assert_eq!(joined.frames(), 1000 + 600 + 500 + 600);
        assert_eq!(joined.samples()[1000], 0.0);
        assert!((joined.samples()[1600] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_stitch_skips_empty_segments() {
        let a = constant(0.5, 1000, 1000);
        let empty = a.empty_like();
        let joined = stitch(&[empty.clone(), a, empty], 0.6).unwrap();
        assert_eq!(joined.frames(), 1600);
    }

    #[test]
    fn test_stitch_all_empty() {
        let empty = constant(0.0, 0, 1000);
        let joined = stitch(&[empty.clone(), empty], 0.6).unwrap();
        assert!(joined.is_empty());
    }
}
