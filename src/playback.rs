//! Playback of a finished timeline, once or in a cancellable loop.
//!
//! Output devices sit behind [`AudioSink`]; the loop logic here never
//! re-synthesizes, it replays the same rendered buffer.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::dsp::timeline::Timeline;
use crate::error::MorseResult;

/// Cooperative cancellation flag shared between the player and its caller.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Something that can play a mono buffer to completion.
pub trait AudioSink {
    /// Play `samples` and block until done. Implementations may return early
    /// once `stop` is tripped.
    fn play(&mut self, samples: &[f64], sample_rate: u32, stop: &StopToken) -> MorseResult<()>;
}

/// How many times to play the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Once,
    /// Repeat with a gap between repetitions, forever or up to a cap.
    Loop { max_repetitions: Option<NonZeroUsize> },
}

impl PlaybackMode {
    fn limit(self) -> Option<usize> {
        match self {
            PlaybackMode::Once => Some(1),
            PlaybackMode::Loop { max_repetitions } => max_repetitions.map(NonZeroUsize::get),
        }
    }
}

/// Play `message`, separated by `gap` between repetitions.
///
/// The stop token is checked before every repetition and every gap. Returns
/// the number of repetitions started.
pub fn play<S: AudioSink + ?Sized>(
    sink: &mut S,
    message: &Timeline,
    gap: &Timeline,
    mode: PlaybackMode,
    stop: &StopToken,
) -> MorseResult<usize> {
    let sample_rate = message.sample_rate();
    let samples = message.render();
    let silence = gap.render();
    let limit = mode.limit();

    let mut played = 0;
    while limit.is_none_or(|max| played < max) {
        if stop.is_stopped() {
            break;
        }
        if played > 0 {
            sink.play(&silence, sample_rate, stop)?;
            if stop.is_stopped() {
                break;
            }
        }
        debug!("playing repetition {}", played + 1);
        sink.play(&samples, sample_rate, stop)?;
        played += 1;
    }

    info!("playback finished after {played} repetition(s)");
    Ok(played)
}

#[cfg(feature = "playback")]
pub use self::device::RodioSink;

#[cfg(feature = "playback")]
mod device {
    use std::time::Duration;

    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioSink, StopToken};
    use crate::error::{MorseError, MorseResult};

    const POLL_INTERVAL: Duration = Duration::from_millis(20);

    /// Plays through the default output device.
    pub struct RodioSink {
        // Dropping the stream closes the device.
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioSink {
        pub fn open_default() -> MorseResult<Self> {
            let (stream, handle) = OutputStream::try_default().map_err(MorseError::playback)?;
            Ok(RodioSink {
                _stream: stream,
                handle,
            })
        }
    }

    impl AudioSink for RodioSink {
        fn play(&mut self, samples: &[f64], sample_rate: u32, stop: &StopToken) -> MorseResult<()> {
            if samples.is_empty() {
                return Ok(());
            }
            let sink = Sink::try_new(&self.handle).map_err(MorseError::playback)?;
            let data: Vec<f32> = samples.iter().map(|&s| s as f32).collect();
            sink.append(SamplesBuffer::new(1, sample_rate, data));

            while !sink.empty() {
                if stop.is_stopped() {
                    sink.stop();
                    break;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Ok(())
        }
    }
}
