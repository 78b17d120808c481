//! End-to-end: text -> tokens -> timeline -> file.

use std::path::Path;

use morse_beeper::dsp::oscillator::Waveform;
use morse_beeper::dsp::renderer::{self, ExportFormat};
use morse_beeper::dsp::synth::{SynthParams, Synthesizer};
use morse_beeper::token::{TokenCounts, to_morse_string};
use morse_beeper::{MorseError, TEST_STRING, base32, encode, render};
use pretty_assertions::assert_eq;

fn params(waveform: Waveform) -> SynthParams {
    SynthParams {
        sample_rate: 8000,
        ..SynthParams::new(20, 550.0, waveform)
    }
}

#[test]
fn sos_round_trip_through_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sos.wav");

    let timeline = render("SOS", false, params(Waveform::Sine)).unwrap();
    let format = renderer::export(&timeline, &path).unwrap();
    assert_eq!(format, ExportFormat::Wav);

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 8000);
    // 30 units of 480 samples
    assert_eq!(reader.len() as usize, 30 * 480);
}

#[test]
fn file_without_extension_is_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message");

    let timeline = render("e", false, params(Waveform::Square)).unwrap();
    renderer::export(&timeline, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
}

#[test]
fn raw_export_has_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message.raw");

    let timeline = render("t", false, params(Waveform::Sawtooth)).unwrap();
    renderer::export(&timeline, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), timeline.len() * 2);
}

#[test]
fn unsupported_extension_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message.ogg");

    let timeline = render("e", false, params(Waveform::Sine)).unwrap();
    let err = renderer::export(&timeline, &path).unwrap_err();
    assert!(matches!(err, MorseError::Export { .. }));
    assert!(!path.exists());
}

#[test]
fn unwritable_path_is_export_error() {
    let timeline = render("e", false, params(Waveform::Sine)).unwrap();
    let err = renderer::export(&timeline, Path::new("/nonexistent-dir/x/y.wav")).unwrap_err();
    assert!(matches!(err, MorseError::Export { .. }));
}

#[test]
fn every_waveform_gives_identical_duration() {
    let tokens = encode(TEST_STRING, false).unwrap();
    let lens: Vec<usize> = [Waveform::Sine, Waveform::Square, Waveform::Sawtooth]
        .into_iter()
        .map(|w| Synthesizer::new(params(w)).unwrap().synthesize(&tokens).len())
        .collect();
    assert_eq!(lens[0], lens[1]);
    assert_eq!(lens[1], lens[2]);
    assert_eq!(lens[0], TokenCounts::of(&tokens).units() * 480);
}

#[test]
fn hi_there_has_one_word_gap() {
    let printed = to_morse_string(&encode("hi there", false).unwrap());
    assert_eq!(printed, ".... .. /- .... . .-. . ");
    assert_eq!(printed.matches('/').count(), 1);
}

#[test]
fn illegal_character_aborts_before_audio() {
    let err = render("caf\u{00e9}", false, params(Waveform::Sine)).unwrap_err();
    assert_eq!(err, MorseError::IllegalCharacter { ch: '\u{00e9}', pos: 3 });

    let timeline = render("caf\u{00e9}", true, params(Waveform::Sine)).unwrap();
    let expected = render("caf", false, params(Waveform::Sine)).unwrap();
    assert_eq!(timeline.len(), expected.len());
}

#[test]
fn base32_makes_any_text_encodable() {
    let text = base32::encode_text("caf\u{00e9} #1");
    let tokens = encode(&text, false).unwrap();
    assert!(!tokens.is_empty());
}
