//! DSP: tone generation, timeline assembly and export.
//!
//! Everything here is deterministic and in-memory. The same code renders
//! audio for the CLI, for WAV export and for the WASM bindings.

pub mod oscillator;
pub mod renderer;
pub mod synth;
pub mod timeline;
