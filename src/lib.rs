pub mod base32;
pub mod config;
pub mod dsp;
pub mod encoder;
pub mod error;
pub mod playback;
pub mod table;
pub mod token;

use crate::dsp::oscillator::Waveform;
use crate::dsp::synth::{SynthParams, Synthesizer};
use crate::dsp::timeline::Timeline;
use crate::error::MorseResult;
use wasm_bindgen::prelude::*;

pub use crate::encoder::encode;
pub use crate::error::MorseError;
pub use crate::token::Token;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text used when no input is given.
pub const TEST_STRING: &str = "the quick brown fox jumps over the lazy dog 0123456789";

/// Encode `text` and render it with `params`.
pub fn render(text: &str, ignore_illegal: bool, params: SynthParams) -> MorseResult<Timeline> {
    let synth = Synthesizer::new(params)?;
    let tokens = encode(text, ignore_illegal)?;
    Ok(synth.synthesize(&tokens))
}

fn to_js_error(e: MorseError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn wasm_params(wpm: u32, frequency: f64, waveform: &str, sample_rate: u32) -> Result<SynthParams, JsValue> {
    let waveform: Waveform = waveform.parse().map_err(to_js_error)?;
    Ok(SynthParams {
        sample_rate,
        ..SynthParams::new(wpm, frequency, waveform)
    })
}

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: encode text to its printed Morse form (`.`, `-`, ` `, `/`).
#[wasm_bindgen]
pub fn encode_morse(text: &str, ignore_illegal: bool) -> Result<String, JsValue> {
    let tokens = encode(text, ignore_illegal).map_err(to_js_error)?;
    Ok(token::to_morse_string(&tokens))
}

/// WASM-exposed: encode text to a token list (`"dot"`, `"dash"`, `"letterGap"`, `"wordGap"`).
#[wasm_bindgen]
pub fn encode_tokens(text: &str, ignore_illegal: bool) -> Result<JsValue, JsValue> {
    let tokens = encode(text, ignore_illegal).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&tokens).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: encode and render text to a WAV byte array.
#[wasm_bindgen]
pub fn render_morse_wav(
    text: &str,
    wpm: u32,
    frequency: f64,
    waveform: &str,
    sample_rate: u32,
) -> Result<Vec<u8>, JsValue> {
    let params = wasm_params(wpm, frequency, waveform, sample_rate)?;
    let timeline = render(text, false, params).map_err(to_js_error)?;
    dsp::renderer::render_wav(&timeline).map_err(to_js_error)
}

/// WASM-exposed: encode and render text to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_morse_samples(
    text: &str,
    wpm: u32,
    frequency: f64,
    waveform: &str,
    sample_rate: u32,
) -> Result<Vec<f32>, JsValue> {
    let params = wasm_params(wpm, frequency, waveform, sample_rate)?;
    let timeline = render(text, false, params).map_err(to_js_error)?;
    Ok(timeline.render().iter().map(|&s| s as f32).collect())
}
