//! RIFF/WAVE PCM-16 serialization.
//!
//! Output layout is the canonical 44-byte header followed by interleaved
//! little-endian i16 samples, readable by any standard WAV tool.

use std::io::{self, Write};

use crate::models::sample_buffer::SampleBuffer;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bits per sample of every file this crate writes.
pub const PCM16_BIT_DEPTH: u16 = 16;

const BYTES_PER_SAMPLE: u16 = PCM16_BIT_DEPTH / 8;

/// Largest sample count whose PCM-16 encoding still fits the u32 RIFF size fields.
pub const MAX_PCM16_SAMPLES: usize = ((u32::MAX as usize) - 36) / 2;

/// The `fmt ` chunk fields of a PCM-16 stream.
///
/// Only constructible for formats whose derived rates fit the header, so
/// building a header from it cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcm16Format {
    pub sample_rate: u32,
    pub channels: u16,
    pub byte_rate: u32,
    pub block_align: u16,
}

impl Pcm16Format {
    /// `None` when `channels * 2` overflows u16 or `sample_rate * channels * 2` overflows u32.
    pub fn new(sample_rate: u32, channels: u16) -> Option<Self> {
        let block_align = channels.checked_mul(BYTES_PER_SAMPLE)?;
        let byte_rate = sample_rate.checked_mul(block_align as u32)?;
        Some(Self {
            sample_rate,
            channels,
            byte_rate,
            block_align,
        })
    }

    /// Like `new`, with a message fit for `ConfigurationFailed`.
    pub fn checked(sample_rate: u32, channels: u16) -> Result<Self, String> {
        Self::new(sample_rate, channels).ok_or_else(|| {
            format!(
                "{} Hz x {} ch does not fit a PCM-16 WAV header",
                sample_rate, channels
            )
        })
    }
}

/// Build the 44-byte RIFF header for `data_size` bytes of PCM-16 samples.
///
/// Field order: `RIFF` size `WAVE`, then `fmt ` with size 16, format 1,
/// channels, rate, byte rate, block align and bit depth, then `data` size.
/// Integers are little-endian.
pub fn generate_wav_header(format: &Pcm16Format, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let riff_size = (36 + data_size).to_le_bytes();
    let fmt_size = 16u32.to_le_bytes();
    let pcm_tag = 1u16.to_le_bytes();
    let channels = format.channels.to_le_bytes();
    let sample_rate = format.sample_rate.to_le_bytes();
    let byte_rate = format.byte_rate.to_le_bytes();
    let block_align = format.block_align.to_le_bytes();
    let bit_depth = PCM16_BIT_DEPTH.to_le_bytes();
    let data_len = data_size.to_le_bytes();

    let fields: [&[u8]; 13] = [
        b"RIFF", &riff_size, b"WAVE",
        b"fmt ", &fmt_size, &pcm_tag, &channels, &sample_rate, &byte_rate, &block_align, &bit_depth,
        b"data", &data_len,
    ];

    let mut header = [0u8; WAV_HEADER_SIZE];
    let mut offset = 0;
    for field in fields {
        header[offset..offset + field.len()].copy_from_slice(field);
        offset += field.len();
    }
    header
}

/// Convert an f32 sample to 16-bit PCM.
///
/// Input is clamped to [-1.0, 1.0] and then scaled by 32767, truncating
/// toward zero. Out-of-range samples saturate instead of wrapping; NaN maps to 0.
pub fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Serialize `buffer` as a complete WAV file into `writer`.
///
/// Fails with `InvalidInput` when the buffer holds more than
/// `MAX_PCM16_SAMPLES` or its format has no valid `Pcm16Format`;
/// otherwise only the writer can fail.
pub fn write_wav<W: Write>(writer: &mut W, buffer: &SampleBuffer) -> io::Result<()> {
    let format = Pcm16Format::checked(buffer.sample_rate(), buffer.channels())
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    if buffer.len() > MAX_PCM16_SAMPLES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} samples exceed the WAV size limit", buffer.len()),
        ));
    }
    let data_size = (buffer.len() * 2) as u32;
    let header = generate_wav_header(&format, data_size);
    writer.write_all(&header)?;

    let mut data = Vec::with_capacity(data_size as usize);
    for &sample in buffer.samples() {
        data.extend_from_slice(&quantize(sample).to_le_bytes());
    }
    writer.write_all(&data)
}

/// Encode `buffer` into an in-memory WAV file.
///
/// Deterministic: the same buffer always yields the same bytes.
///
/// # Panics
///
/// If `write_wav` would reject the buffer. Buffers produced by
/// `CaptureSession` never are.
pub fn encode(buffer: &SampleBuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + buffer.len() * 2);
    if let Err(e) = write_wav(&mut bytes, buffer) {
        panic!("cannot encode clip as WAV: {}", e);
    }
    bytes
}
