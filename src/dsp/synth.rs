//! Morse synthesizer: renders a token sequence into a [`Timeline`].
//!
//! Timing follows the PARIS convention: one word is 50 units, so a unit
//! lasts `60 / (50 * wpm)` seconds. Every duration is an integer number of
//! units, and the unit itself is rounded to whole samples once, so rendered
//! lengths are exact multiples of the unit.

use std::sync::Arc;

use log::debug;

use crate::error::{MorseError, MorseResult};
use crate::token::Token;

use super::oscillator::{Oscillator, Waveform};
use super::timeline::Timeline;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_FREQUENCY: f64 = 550.0;
pub const DEFAULT_WPM: u32 = 20;
pub const DEFAULT_AMPLITUDE: f64 = 0.8;

/// Units per word at the reference word length.
const UNITS_PER_WORD: f64 = 50.0;

pub const DOT_UNITS: usize = 1;
pub const DASH_UNITS: usize = 3;
pub const MARK_GAP_UNITS: usize = 1;
pub const LETTER_GAP_UNITS: usize = 3;
pub const WORD_GAP_UNITS: usize = 7;

/// Synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Speed in words per minute.
    pub wpm: u32,
    /// Tone frequency in Hz.
    pub frequency: f64,
    pub waveform: Waveform,
    pub sample_rate: u32,
    /// Peak level in (0, 1].
    pub amplitude: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        SynthParams {
            wpm: DEFAULT_WPM,
            frequency: DEFAULT_FREQUENCY,
            waveform: Waveform::Sine,
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl SynthParams {
    pub fn new(wpm: u32, frequency: f64, waveform: Waveform) -> Self {
        SynthParams {
            wpm,
            frequency,
            waveform,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> MorseResult<()> {
        if self.wpm == 0 {
            return Err(MorseError::invalid_param("wpm", "must be a positive integer"));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(MorseError::invalid_param(
                "frequency",
                format!("must be a positive number of Hz, got {}", self.frequency),
            ));
        }
        if self.sample_rate == 0 {
            return Err(MorseError::invalid_param("sample_rate", "must be positive"));
        }
        if self.unit_samples() == 0 {
            return Err(MorseError::invalid_param(
                "wpm",
                format!(
                    "{} wpm is too fast for {} Hz: a unit would be shorter than one sample",
                    self.wpm, self.sample_rate
                ),
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(MorseError::invalid_param(
                "amplitude",
                format!("must be in (0, 1], got {}", self.amplitude),
            ));
        }
        Ok(())
    }

    /// Length of one unit in seconds.
    pub fn unit_secs(&self) -> f64 {
        60.0 / (UNITS_PER_WORD * self.wpm as f64)
    }

    /// Length of one unit in samples, rounded once.
    pub fn unit_samples(&self) -> usize {
        (self.unit_secs() * self.sample_rate as f64).round() as usize
    }
}

/// Gap state threaded through the token walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapState {
    /// Start of input, or just after a letter/word gap.
    Idle,
    /// A mark was just emitted; the next mark needs a one-unit gap first.
    PendingMarkGap,
}

/// Renders token sequences with fixed, pre-rendered building blocks.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    params: SynthParams,
    unit: usize,
    dot: Arc<[f64]>,
    dash: Arc<[f64]>,
}

impl Synthesizer {
    pub fn new(params: SynthParams) -> MorseResult<Self> {
        params.validate()?;

        let unit = params.unit_samples();
        let mut osc = Oscillator::new(params.waveform, params.frequency, params.sample_rate as f64)
            .with_amplitude(params.amplitude);
        let dot: Arc<[f64]> = osc.render(unit * DOT_UNITS).into();
        let dash: Arc<[f64]> = osc.render(unit * DASH_UNITS).into();

        debug!(
            "synthesizer: {} wpm, {} Hz {}, unit {:.4}s ({unit} samples @ {} Hz)",
            params.wpm,
            params.frequency,
            params.waveform,
            params.unit_secs(),
            params.sample_rate,
        );

        Ok(Synthesizer {
            params,
            unit,
            dot,
            dash,
        })
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    /// Length of one unit in samples.
    pub fn unit_samples(&self) -> usize {
        self.unit
    }

    /// Render tokens into a timeline.
    ///
    /// The gap between two marks is decided by what separates them: nothing
    /// gives one unit, a letter gap gives three, a word gap gives seven. Gap
    /// tokens replace the one-unit mark gap rather than adding to it.
    pub fn synthesize(&self, tokens: &[Token]) -> Timeline {
        let mut timeline = Timeline::new(self.params.sample_rate);
        let mut state = GapState::Idle;

        for &token in tokens {
            match token {
                Token::Dot | Token::Dash => {
                    if state == GapState::PendingMarkGap {
                        timeline.push_silence(self.unit * MARK_GAP_UNITS);
                    }
                    let block = if token == Token::Dot { &self.dot } else { &self.dash };
                    timeline.push_tone(block);
                    state = GapState::PendingMarkGap;
                }
                Token::LetterGap => {
                    timeline.push_silence(self.unit * LETTER_GAP_UNITS);
                    state = GapState::Idle;
                }
                Token::WordGap => {
                    timeline.push_silence(self.unit * WORD_GAP_UNITS);
                    state = GapState::Idle;
                }
            }
        }

        debug!(
            "synthesized {} tokens into {:.3}s of audio",
            tokens.len(),
            timeline.duration_secs()
        );
        timeline
    }

    /// Silence inserted between repetitions when looping.
    pub fn loop_gap(&self) -> Timeline {
        let mut gap = Timeline::new(self.params.sample_rate);
        gap.push_silence(self.unit * WORD_GAP_UNITS);
        gap
    }
}

/// Validate parameters and render `tokens` at the default sample rate.
pub fn synthesize(
    tokens: &[Token],
    wpm: u32,
    frequency: f64,
    waveform: Waveform,
) -> MorseResult<Timeline> {
    let synth = Synthesizer::new(SynthParams::new(wpm, frequency, waveform))?;
    Ok(synth.synthesize(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::timeline::Segment;
    use crate::encoder::encode;
    use crate::token::TokenCounts;

    fn synth(wpm: u32) -> Synthesizer {
        Synthesizer::new(SynthParams {
            sample_rate: 8000,
            ..SynthParams::new(wpm, 600.0, Waveform::Sine)
        })
        .unwrap()
    }

    #[test]
    fn unit_duration_at_20_wpm() {
        let params = SynthParams::new(20, 550.0, Waveform::Sine);
        assert!((params.unit_secs() - 0.06).abs() < 1e-12);
        assert_eq!(params.unit_samples(), 2646);
    }

    #[test]
    fn empty_tokens_render_nothing() {
        let tl = synth(20).synthesize(&[]);
        assert!(tl.is_empty());
        assert!(tl.segments().is_empty());
    }

    #[test]
    fn letter_e_is_dot_then_letter_gap() {
        let s = synth(20);
        let unit = s.unit_samples();
        let tl = s.synthesize(&encode("e", false).unwrap());
        assert_eq!(tl.segments().len(), 2);
        assert_eq!(tl.segments()[0].len(), unit);
        assert_eq!(tl.segments()[1], Segment::Silence(3 * unit));
    }

    #[test]
    fn marks_inside_letter_get_one_unit_gap() {
        let s = synth(20);
        let unit = s.unit_samples();
        // 'a' = .-
        let tl = s.synthesize(&encode("a", false).unwrap());
        let lens: Vec<(bool, usize)> = tl.segments().iter().map(|seg| (seg.is_tone(), seg.len())).collect();
        assert_eq!(
            lens,
            vec![(true, unit), (false, unit), (true, 3 * unit), (false, 3 * unit)]
        );
    }

    #[test]
    fn letter_gap_replaces_mark_gap() {
        let s = synth(20);
        let unit = s.unit_samples();
        // "ee": . gap3 . gap3, with no extra unit after each letter gap
        let tl = s.synthesize(&encode("ee", false).unwrap());
        assert_eq!(tl.len(), unit * (1 + 3 + 1 + 3));
    }

    #[test]
    fn word_gap_follows_letter_gap() {
        let s = synth(20);
        let unit = s.unit_samples();
        let tl = s.synthesize(&encode("e e", false).unwrap());
        // . 3 7 . 3
        assert_eq!(tl.len(), unit * (1 + 3 + 7 + 1 + 3));
        assert_eq!(tl.segments()[1], Segment::Silence(3 * unit));
        assert_eq!(tl.segments()[2], Segment::Silence(7 * unit));
    }

    #[test]
    fn duration_is_linear_in_token_counts() {
        for wpm in [5, 13, 20, 35] {
            let s = synth(wpm);
            for text in ["sos", "hi there", "the quick brown fox  0123456789", "$ @ ?"] {
                let tokens = encode(text, false).unwrap();
                let counts = TokenCounts::of(&tokens);
                let tl = s.synthesize(&tokens);
                assert_eq!(tl.len(), counts.units() * s.unit_samples(), "{text:?} @ {wpm} wpm");
            }
        }
    }

    #[test]
    fn repeated_marks_are_bit_identical() {
        let s = synth(20);
        let tl = s.synthesize(&encode("ss", false).unwrap());
        let tones: Vec<&Segment> = tl.segments().iter().filter(|seg| seg.is_tone()).collect();
        assert_eq!(tones.len(), 6);
        assert!(tones.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn sos_at_20_wpm() {
        let tl = synthesize(&encode("sos", false).unwrap(), 20, 550.0, Waveform::Sine).unwrap();
        // s: 1+1+1+1+1 +3, o: 3+1+3+1+3 +3, s: 5 + 3 = 8 + 14 + 8
        assert_eq!(tl.len(), 30 * 2646);
        assert!((tl.duration_secs() - 1.8).abs() < 1e-3);
    }

    #[test]
    fn loop_gap_is_seven_units() {
        let s = synth(20);
        assert_eq!(s.loop_gap().len(), 7 * s.unit_samples());
    }

    #[test]
    fn sub_sample_unit_is_rejected() {
        let tokens = encode("sos", false).unwrap();
        let err = synthesize(&tokens, 200_000, 550.0, Waveform::Sine).unwrap_err();
        assert!(matches!(err, MorseError::InvalidParameter { ref name, .. } if name == "wpm"));

        // 100_000 wpm still rounds to one sample per unit at 44.1 kHz
        let tl = synthesize(&tokens, 100_000, 550.0, Waveform::Sine).unwrap();
        assert_eq!(tl.len(), 30);
    }

    #[test]
    fn invalid_parameters() {
        let tokens = encode("e", false).unwrap();
        let err = synthesize(&tokens, 0, 550.0, Waveform::Sine).unwrap_err();
        assert!(matches!(err, MorseError::InvalidParameter { ref name, .. } if name == "wpm"));

        let err = synthesize(&tokens, 20, -1.0, Waveform::Sine).unwrap_err();
        assert!(matches!(err, MorseError::InvalidParameter { ref name, .. } if name == "frequency"));

        let err = synthesize(&tokens, 20, f64::NAN, Waveform::Sine).unwrap_err();
        assert!(matches!(err, MorseError::InvalidParameter { .. }));

        let params = SynthParams {
            amplitude: 1.5,
            ..Default::default()
        };
        assert!(Synthesizer::new(params).is_err());
    }
}
