//! Timeline export: WAV bytes, raw PCM, and file output.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::error::{MorseError, MorseResult};

use super::timeline::Timeline;

/// Container format for exported audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 16-bit mono PCM WAV.
    Wav,
    /// Headerless little-endian 16-bit mono PCM.
    Raw,
}

impl ExportFormat {
    /// Infer the format from a path's extension. No extension means WAV.
    pub fn from_path(path: &Path) -> MorseResult<Self> {
        let Some(ext) = path.extension() else {
            return Ok(ExportFormat::Wav);
        };
        match ext.to_string_lossy().to_ascii_lowercase().as_str() {
            "wav" | "wave" => Ok(ExportFormat::Wav),
            "raw" | "pcm" => Ok(ExportFormat::Raw),
            other => Err(MorseError::export(
                path.display().to_string(),
                format!("unsupported audio format '{other}' (expected wav or raw)"),
            )),
        }
    }
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Render a timeline to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(timeline: &Timeline) -> MorseResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + timeline.len() * 2));
    write_wav(timeline, &mut cursor).map_err(|e| MorseError::export("<memory>", e))?;
    Ok(cursor.into_inner())
}

fn write_wav<W: std::io::Write + std::io::Seek>(
    timeline: &Timeline,
    out: W,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::new(out, wav_spec(timeline.sample_rate()))?;
    for sample in timeline.render_pcm_i16() {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

/// Render a timeline to headerless little-endian PCM bytes.
pub fn render_raw(timeline: &Timeline) -> Vec<u8> {
    timeline
        .render_pcm_i16()
        .into_iter()
        .flat_map(i16::to_le_bytes)
        .collect()
}

/// Write a timeline to `path`, choosing the format from its extension.
pub fn export(timeline: &Timeline, path: &Path) -> MorseResult<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    let bytes = match format {
        ExportFormat::Wav => render_wav(timeline)?,
        ExportFormat::Raw => render_raw(timeline),
    };
    fs::write(path, &bytes).map_err(|e| MorseError::export(path.display().to_string(), e))?;

    info!(
        "saved {:.2}s of audio to {} ({format:?}, {} bytes)",
        timeline.duration_secs(),
        path.display(),
        bytes.len()
    );
    Ok(format)
}
