//! Constant gain adjustment
//!
//! Volume control with a dB-based interface. The offset is converted to a
//! linear multiplier once, then applied uniformly to every sample.

use crate::engine::buffer::{db_to_linear, AudioBuffer};

/// Apply a constant gain offset, returning a new buffer
///
/// A 0 dB offset returns an unchanged copy.
pub fn apply_gain(buffer: &AudioBuffer, gain_db: f32) -> AudioBuffer {
    let gain_linear = db_to_linear(gain_db);

    // Unity gain optimization
    if (gain_linear - 1.0).abs() < f32::EPSILON {
        return buffer.clone();
    }

    let samples = buffer.samples().iter().map(|s| s * gain_linear).collect();
    buffer.with_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn constant_buffer(value: f32, frames: usize) -> AudioBuffer {
        AudioBuffer::from_interleaved(vec![value; frames * 2], 2, 44100).unwrap()
    }

    #[test]
    fn test_attenuation() {
        let buffer = constant_buffer(1.0, 100);
        let out = apply_gain(&buffer, -6.0);

        // -6 dB ~= 0.501187
        for &s in out.samples() {
            assert_relative_eq!(s, 0.501187, epsilon = 0.001);
        }
        // Input untouched
        assert_eq!(buffer.samples()[0], 1.0);
    }

    #[test]
    fn test_bed_staging_level() {
        let buffer = constant_buffer(1.0, 100);
        let out = apply_gain(&buffer, -20.0);
        for &s in out.samples() {
            assert_relative_eq!(s, 0.1, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_unity() {
        let buffer = constant_buffer(0.5, 100);
        let out = apply_gain(&buffer, 0.0);
        assert_eq!(out.samples(), buffer.samples());
    }

    #[test]
    fn test_boost() {
        let buffer = constant_buffer(0.1, 10);
        let out = apply_gain(&buffer, 20.0);
        for &s in out.samples() {
            assert_relative_eq!(s, 1.0, epsilon = 1e-4);
        }
    }
}
