//! Append-only audio timeline.
//!
//! A timeline is built from pre-rendered tone blocks and silence runs. It is
//! only flattened into a sample buffer by [`Timeline::render`], which keeps
//! construction cheap and independent of any output device.

use std::sync::Arc;

/// One fixed-length piece of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A shared, pre-rendered tone block.
    Tone(Arc<[f64]>),
    /// A run of silent samples.
    Silence(usize),
}

impl Segment {
    pub fn len(&self) -> usize {
        match self {
            Segment::Tone(samples) => samples.len(),
            Segment::Silence(len) => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_tone(&self) -> bool {
        matches!(self, Segment::Tone(_))
    }
}

/// Ordered sequence of segments at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    sample_rate: u32,
    segments: Vec<Segment>,
    len: usize,
}

impl Timeline {
    pub fn new(sample_rate: u32) -> Self {
        Timeline {
            sample_rate,
            segments: Vec::new(),
            len: 0,
        }
    }

    /// Append a shared tone block.
    pub fn push_tone(&mut self, block: &Arc<[f64]>) {
        self.len += block.len();
        self.segments.push(Segment::Tone(Arc::clone(block)));
    }

    /// Append `len` samples of silence. Zero-length runs are dropped.
    pub fn push_silence(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.len += len;
        self.segments.push(Segment::Silence(len));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total length in samples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len as f64 / self.sample_rate as f64
    }

    /// Flatten into a mono sample buffer.
    pub fn render(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len);
        for segment in &self.segments {
            match segment {
                Segment::Tone(samples) => out.extend_from_slice(samples),
                Segment::Silence(len) => out.resize(out.len() + len, 0.0),
            }
        }
        out
    }

    /// Flatten into 16-bit PCM.
    pub fn render_pcm_i16(&self) -> Vec<i16> {
        self.render()
            .into_iter()
            .map(|s| (s * 32767.0).round().clamp(-32768.0, 32767.0) as i16)
            .collect()
    }
}
