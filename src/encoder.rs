use log::debug;

use crate::error::MorseError;
use crate::table;
use crate::token::Token;

/// Turns text into a flat Morse token sequence.
///
/// Characters are lower-cased before lookup. Whitespace emits a word gap,
/// every legal character emits its marks followed by a letter gap.
pub struct Encoder<'a> {
    input: &'a str,
    ignore_illegal: bool,
}

impl<'a> Encoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Encoder {
            input,
            ignore_illegal: false,
        }
    }

    /// Skip characters outside the table instead of failing.
    pub fn ignore_illegal(mut self, ignore: bool) -> Self {
        self.ignore_illegal = ignore;
        self
    }

    pub fn encode(&self) -> Result<Vec<Token>, MorseError> {
        let mut tokens = Vec::with_capacity(self.input.len() * 4);
        for (pos, ch) in self.input.char_indices() {
            if ch.is_whitespace() {
                tokens.push(Token::WordGap);
                continue;
            }

            match normalize(ch).and_then(table::lookup) {
                Some(marks) => {
                    tokens.extend(marks.iter().copied().map(Token::from));
                    tokens.push(Token::LetterGap);
                }
                None if self.ignore_illegal => {
                    debug!("skipping illegal character {ch:?} at pos {pos}");
                }
                None => return Err(MorseError::IllegalCharacter { ch, pos }),
            }
        }
        Ok(tokens)
    }
}

/// Lower-case a character, rejecting ones whose lower-case form is not a
/// single char (those can never be in the table).
fn normalize(ch: char) -> Option<char> {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Encode `text` into Morse tokens.
pub fn encode(text: &str, ignore_illegal: bool) -> Result<Vec<Token>, MorseError> {
    Encoder::new(text).ignore_illegal(ignore_illegal).encode()
}
