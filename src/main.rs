//! morse-beeper - play text as Morse code
//!
//! Thin front end over the library: parse flags, encode, synthesize, then
//! print, save and/or play the result.

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use morse_beeper::config::{self, Settings};
use morse_beeper::dsp::oscillator::Waveform;
use morse_beeper::dsp::renderer;
use morse_beeper::dsp::synth::Synthesizer;
use morse_beeper::dsp::timeline::Timeline;
use morse_beeper::error::report_illegal;
use morse_beeper::playback::{self, PlaybackMode, RodioSink, StopToken};
use morse_beeper::{MorseError, TEST_STRING, base32, encode, token};

/// Play beep sound in Morse code.
#[derive(Debug, Parser)]
#[command(name = "morse-beeper")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The text to be converted. Defaults to a pangram with all digits.
    #[arg(short, long)]
    text: Option<String>,

    /// Read the text from stdin instead of using --text or the default.
    #[arg(long, default_value_t = false, conflicts_with = "text")]
    prompt: bool,

    /// Tone frequency in Hz.
    #[arg(short, long)]
    freq: Option<f64>,

    /// Speed in words per minute (a word is 50 units).
    #[arg(long)]
    wpm: Option<u32>,

    /// Tone waveform: sine, square or sawtooth.
    #[arg(long)]
    wave: Option<String>,

    /// Output sample rate in Hz.
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Play the sound until interrupted.
    #[arg(long = "loop", default_value_t = false)]
    looped: bool,

    /// Stop looping after this many repetitions.
    #[arg(long, requires = "looped")]
    repeat: Option<NonZeroUsize>,

    /// Print the Morse representation of the text.
    #[arg(long, default_value_t = false)]
    decode: bool,

    /// Do not play the sound.
    #[arg(long, default_value_t = false)]
    no_sound: bool,

    /// Skip unsupported characters instead of exiting.
    #[arg(long, default_value_t = false)]
    ignore_illegal: bool,

    /// Save the audio to a file. Format follows the extension (wav, raw); WAV if none.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Encode the text in base32 before converting to Morse code.
    #[arg(long, default_value_t = false)]
    base32: bool,

    /// TOML file with default frequency, wpm, waveform, sample_rate and amplitude.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Config file values, overridden by any flags given.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => config::load(path)?,
            None => Settings::default(),
        };
        if let Some(freq) = self.freq {
            settings.frequency = freq;
        }
        if let Some(wpm) = self.wpm {
            settings.wpm = wpm;
        }
        if let Some(wave) = &self.wave {
            settings.waveform = wave.parse::<Waveform>()?;
        }
        if let Some(rate) = self.sample_rate {
            settings.sample_rate = rate;
        }
        Ok(settings)
    }

    fn input_text(&self) -> Result<String> {
        if self.prompt {
            print!("Enter text: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).context("read text from stdin")?;
            return Ok(line.trim_end_matches(['\r', '\n']).to_string());
        }
        Ok(self.text.clone().unwrap_or_else(|| TEST_STRING.to_string()))
    }

    fn playback_mode(&self) -> PlaybackMode {
        if self.looped {
            PlaybackMode::Loop {
                max_repetitions: self.repeat,
            }
        } else {
            PlaybackMode::Once
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Everything needed to start playback.
struct Prepared {
    synth: Synthesizer,
    timeline: Timeline,
}

/// Encode and synthesize the input, printing and saving as requested.
fn prepare(args: &Args) -> Result<Prepared> {
    let params = args.settings()?.params()?;
    let synth = Synthesizer::new(params)?;

    let mut text = args.input_text()?;
    if args.base32 {
        text = base32::encode_text(&text);
    }

    let tokens = match encode(&text, args.ignore_illegal) {
        Ok(tokens) => tokens,
        Err(err @ MorseError::IllegalCharacter { .. }) => {
            if let Some(report) = report_illegal(&text, &err) {
                eprint!("{report}");
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if args.decode {
        println!("{}", token::to_morse_string(&tokens));
    }

    let timeline = synth.synthesize(&tokens);
    info!(
        "rendered {} tokens, {:.2}s at {} wpm",
        tokens.len(),
        timeline.duration_secs(),
        params.wpm
    );

    if let Some(path) = &args.save {
        renderer::export(&timeline, path)?;
    }

    Ok(Prepared { synth, timeline })
}

async fn run(args: Args) -> Result<()> {
    let Prepared { synth, timeline } = prepare(&args)?;

    if args.no_sound {
        return Ok(());
    }

    let mode = args.playback_mode();
    let stop = StopToken::new();
    let gap = synth.loop_gap();
    let player_stop = stop.clone();
    let mut player = tokio::task::spawn_blocking(move || -> Result<usize> {
        let mut sink = RodioSink::open_default()?;
        Ok(playback::play(&mut sink, &timeline, &gap, mode, &player_stop)?)
    });

    tokio::select! {
        joined = &mut player => {
            joined.context("playback task panicked")??;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, stopping playback");
            stop.stop();
            player.await.context("playback task panicked")??;
        }
    }
    Ok(())
}
