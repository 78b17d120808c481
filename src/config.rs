//! Synthesis defaults, optionally loaded from a TOML file.
//!
//! ```toml
//! frequency = 700.0
//! wpm = 25
//! waveform = "square"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Waveform;
use crate::dsp::synth::{
    DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE, DEFAULT_WPM, SynthParams,
};
use crate::error::{MorseError, MorseResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Speed in words per minute.
    pub wpm: u32,
    pub waveform: Waveform,
    pub sample_rate: u32,
    pub amplitude: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            frequency: DEFAULT_FREQUENCY,
            wpm: DEFAULT_WPM,
            waveform: Waveform::Sine,
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl Settings {
    pub fn from_toml(source: &str) -> MorseResult<Self> {
        toml::from_str(source).map_err(|e| MorseError::invalid_param("config", e.message()))
    }

    /// Validated synthesis parameters.
    pub fn params(&self) -> MorseResult<SynthParams> {
        let params = SynthParams {
            wpm: self.wpm,
            frequency: self.frequency,
            waveform: self.waveform,
            sample_rate: self.sample_rate,
            amplitude: self.amplitude,
        };
        params.validate()?;
        Ok(params)
    }
}

pub fn load(path: &Path) -> MorseResult<Settings> {
    let source = fs::read_to_string(path).map_err(|e| {
        MorseError::invalid_param("config", format!("cannot read {}: {e}", path.display()))
    })?;
    Settings::from_toml(&source)
}
