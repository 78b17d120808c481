//! Error types shared by the encoder, synthesizer, export and playback layers.

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Result type for Morse operations.
pub type MorseResult<T> = Result<T, MorseError>;

/// Errors that can occur while encoding, synthesizing or emitting Morse audio.
#[derive(Debug, Error, PartialEq)]
pub enum MorseError {
    /// A character that is neither whitespace nor in the symbol table.
    #[error("illegal character '{ch}' at pos {pos}")]
    IllegalCharacter {
        /// The offending character, as it appeared in the input.
        ch: char,
        /// Byte offset of the character in the input.
        pos: usize,
    },

    /// A synthesis parameter outside its valid range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The rendered audio could not be written.
    #[error("failed to export '{path}': {message}")]
    Export {
        /// Destination path.
        path: String,
        /// Error message.
        message: String,
    },

    /// The audio device refused or failed playback.
    #[error("playback failed: {message}")]
    Playback {
        /// Error message.
        message: String,
    },
}

impl MorseError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an export error.
    pub fn export(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Export {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Creates a playback error.
    pub fn playback(message: impl ToString) -> Self {
        Self::Playback {
            message: message.to_string(),
        }
    }
}

/// Render an illegal-character error as an annotated source report.
///
/// Returns `None` for every other error kind; those carry no span.
pub fn report_illegal(source: &str, err: &MorseError) -> Option<String> {
    let MorseError::IllegalCharacter { ch, pos } = err else {
        return None;
    };
    // ariadne spans are char indices, the error carries a byte offset.
    let start = source.get(..*pos).map_or(0, |prefix| prefix.chars().count());
    let span = start..start + 1;

    let mut out = Vec::new();
    Report::build(ReportKind::Error, ("input", span.clone()))
        .with_message(format!("illegal character '{ch}'"))
        .with_label(
            Label::new(("input", span))
                .with_message("not in the Morse table")
                .with_color(Color::Red),
        )
        .with_help("pass --ignore-illegal to skip unsupported characters")
        .finish()
        .write(("input", Source::from(source)), &mut out)
        .ok()?;
    String::from_utf8(out).ok()
}
