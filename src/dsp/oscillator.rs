//! Tone generators for the keyed carrier, anti-aliased with PolyBLEP.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MorseError;

/// Supported waveform shapes.
///
/// Serde goes through [`FromStr`], so config files accept the same names as
/// the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Square, Waveform::Sawtooth];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Waveform {
    type Error = MorseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Waveform> for String {
    fn from(waveform: Waveform) -> Self {
        waveform.name().to_string()
    }
}

impl FromStr for Waveform {
    type Err = MorseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            other => Err(MorseError::invalid_param(
                "waveform",
                format!("unsupported waveform '{other}' (expected sine, square or sawtooth)"),
            )),
        }
    }
}

/// A band-limited oscillator with anti-aliasing (PolyBLEP).
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f64,
    /// Peak level in (0, 1].
    pub amplitude: f64,
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Oscillator {
            waveform,
            frequency,
            amplitude: 1.0,
            phase: 0.0,
            sample_rate,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Phase increment per sample.
    fn phase_inc(&self) -> f64 {
        self.frequency / self.sample_rate
    }

    /// Generate the next sample.
    pub fn next_sample(&mut self) -> f64 {
        let inc = self.phase_inc();
        let sample = match self.waveform {
            Waveform::Sine => self.sine(),
            Waveform::Sawtooth => self.sawtooth(inc),
            Waveform::Square => self.square(inc),
        };

        self.phase += inc;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        sample * self.amplitude
    }

    /// Render `len` samples starting from phase zero.
    pub fn render(&mut self, len: usize) -> Vec<f64> {
        self.reset();
        (0..len).map(|_| self.next_sample()).collect()
    }

    fn sine(&self) -> f64 {
        (2.0 * PI * self.phase).sin()
    }

    /// Naive sawtooth: rises from -1 to +1, then drops.
    /// PolyBLEP corrects the discontinuity at the wrap.
    fn sawtooth(&self, inc: f64) -> f64 {
        let naive = 2.0 * self.phase - 1.0;
        naive - poly_blep(self.phase, inc)
    }

    /// 50% duty square with PolyBLEP on both edges.
    fn square(&self, inc: f64) -> f64 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, inc);
        value
    }

    /// Reset oscillator phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// PolyBLEP (Polynomial Band-Limited Step) anti-aliasing correction.
///
/// `t` is the phase [0, 1), `dt` is the phase increment per sample.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_zero_at_start() {
        let mut osc = Oscillator::new(Waveform::Sine, 550.0, 44100.0);
        let sample = osc.next_sample();
        assert!(sample.abs() < 1e-10, "Sine should start near 0, got {sample}");
    }

    #[test]
    fn waveforms_stay_in_range() {
        for waveform in Waveform::ALL {
            let mut osc = Oscillator::new(waveform, 550.0, 44100.0);
            for _ in 0..44100 {
                let s = osc.next_sample();
                assert!((-1.0..=1.0).contains(&s), "{waveform} out of range: {s}");
            }
        }
    }

    #[test]
    fn amplitude_scales_peak() {
        let mut osc = Oscillator::new(Waveform::Sine, 550.0, 44100.0).with_amplitude(0.5);
        let peak = osc.render(44100).into_iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!(peak <= 0.5 + 1e-9 && peak > 0.49, "peak {peak}");
    }

    #[test]
    fn render_restarts_phase() {
        let mut osc = Oscillator::new(Waveform::Square, 550.0, 44100.0);
        let a = osc.render(300);
        let b = osc.render(300);
        assert_eq!(a, b);
    }

    #[test]
    fn parse_names() {
        assert_eq!("sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("sin".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("Square".parse::<Waveform>().unwrap(), Waveform::Square);
        assert_eq!("sawtooth".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
    }

    #[test]
    fn unsupported_waveform_is_invalid_parameter() {
        let err = "triangle".parse::<Waveform>().unwrap_err();
        assert!(matches!(err, MorseError::InvalidParameter { ref name, .. } if name == "waveform"));
    }
}
