//! Audio file I/O for mixdown
//!
//! Decoding goes through symphonia so narration, stingers, and beds may
//! arrive as MP3, WAV, FLAC, OGG, or AAC. The finished clip is encoded to
//! FLAC. Both boundaries materialize whole buffers; nothing streams.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use log::{debug, info};
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::engine::buffer::AudioBuffer;
use crate::error::{MixdownError, Result};

/// Bit depth used for the FLAC output
const EXPORT_BITS_PER_SAMPLE: usize = 16;

/// Timestamp layout appended to every exported file name
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

// ============================================================================
// Import
// ============================================================================

/// Decode an audio file into an in-memory buffer
///
/// # Errors
/// * `FileNotFound` - if the file does not exist
/// * `Decode` - if the container or codec cannot be read
/// * `UnsupportedFormat` - if no decodable audio track is present
pub fn load_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(MixdownError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MixdownError::Decode {
            path: path.display().to_string(),
            reason: format!("failed to probe container: {}", e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MixdownError::UnsupportedFormat {
            format: format!("{}: no decodable audio track", path.display()),
        })?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| MixdownError::Decode {
        path: path.display().to_string(),
        reason: "unknown sample rate".to_string(),
    })?;
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| MixdownError::Decode {
            path: path.display().to_string(),
            reason: "unknown channel count".to_string(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| MixdownError::Decode {
            path: path.display().to_string(),
            reason: format!("failed to create decoder: {}", e),
        })?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => {
                return Err(MixdownError::Decode {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_as_f32(&decoded, &mut samples)?,
            // A corrupt packet mid-stream is skipped, not fatal
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => {
                return Err(MixdownError::Decode {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    debug!(
        "decoded {}: {} frames, {} Hz, {}ch",
        path.display(),
        samples.len() / channels,
        sample_rate,
        channels
    );

    AudioBuffer::from_interleaved(samples, channels, sample_rate)
}

/// Append one decoded packet's samples to `out`, converted to interleaved f32
fn append_as_f32(decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) -> Result<()> {
    macro_rules! interleave {
        ($buf:expr, $convert:expr) => {{
            let channels = $buf.spec().channels.count();
            let frames = $buf.frames();
            out.reserve(frames * channels);
            for frame in 0..frames {
                for ch in 0..channels {
                    let s = $buf.chan(ch)[frame];
                    out.push($convert(s));
                }
            }
        }};
    }

    match decoded {
        AudioBufferRef::F32(buf) => interleave!(buf, |s: f32| s),
        AudioBufferRef::F64(buf) => interleave!(buf, |s: f64| s as f32),
        AudioBufferRef::S32(buf) => interleave!(buf, |s: i32| s as f32 / 2147483648.0),
        AudioBufferRef::S24(buf) => {
            interleave!(buf, |s: symphonia::core::sample::i24| s.inner() as f32 / 8388608.0)
        }
        AudioBufferRef::S16(buf) => interleave!(buf, |s: i16| s as f32 / 32768.0),
        AudioBufferRef::S8(buf) => interleave!(buf, |s: i8| s as f32 / 128.0),
        AudioBufferRef::U8(buf) => interleave!(buf, |s: u8| (s as f32 - 128.0) / 128.0),
        _ => {
            return Err(MixdownError::UnsupportedFormat {
                format: "unhandled decoded sample format".to_string(),
            })
        }
    }
    Ok(())
}

// ============================================================================
// Export
// ============================================================================

/// Where a finished clip lands on disk
///
/// Every field is computed, not user-supplied: the stem comes from the
/// title sanitizer, the timestamp from the clock at render time. The
/// timestamp, not the stem, is what keeps concurrent runs from colliding.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub directory: PathBuf,
    pub base_name: String,
    pub extension: String,
    pub timestamp: DateTime<Local>,
}

impl ExportTarget {
    /// Target for a FLAC clip stamped with the current local time
    pub fn new(directory: PathBuf, base_name: String) -> Self {
        Self {
            directory,
            base_name,
            extension: "flac".to_string(),
            timestamp: Local::now(),
        }
    }

    /// Replace the timestamp (deterministic paths in tests)
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Full output path: `{directory}/{base_name}_{timestamp}.{extension}`
    pub fn resolved_path(&self) -> PathBuf {
        self.directory.join(format!(
            "{}_{}.{}",
            self.base_name,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.extension
        ))
    }

    /// Create the output directory if absent; never an error when it exists
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        Ok(())
    }
}

/// Encode a finished buffer to a FLAC file
///
/// The buffer is quantized to 16-bit and written in one shot. On failure a
/// partially written file is removed best-effort; the error still surfaces.
pub fn export_flac(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    if buffer.is_empty() {
        return Err(MixdownError::Encode {
            path: path.display().to_string(),
            reason: "refusing to export an empty buffer".to_string(),
        });
    }

    let quantized: Vec<i32> = buffer
        .samples()
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * 32767.0) as i32)
        .collect();

    let config = flacenc::config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| MixdownError::Encode {
            path: path.display().to_string(),
            reason: format!("invalid encoder config: {:?}", e),
        })?;

    let source = MemSource::from_samples(
        &quantized,
        buffer.channels(),
        EXPORT_BITS_PER_SAMPLE,
        buffer.sample_rate() as usize,
    );

    let stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| MixdownError::Encode {
            path: path.display().to_string(),
            reason: format!("{:?}", e),
        })?;

    let mut sink = ByteSink::new();
    stream.write(&mut sink).map_err(|e| MixdownError::Encode {
        path: path.display().to_string(),
        reason: format!("{:?}", e),
    })?;

    if let Err(e) = fs::write(path, sink.as_slice()) {
        // A half-written file must never pass for a finished clip
        let _ = fs::remove_file(path);
        return Err(MixdownError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        });
    }

    info!(
        "exported {:.2}s clip to {}",
        buffer.duration_secs(),
        path.display()
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
