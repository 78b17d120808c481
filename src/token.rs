use std::fmt;

use serde::{Deserialize, Serialize};

/// An elemental mark of a Morse letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Dot,
    Dash,
}

/// One element of the encoder's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Token {
    Dot,       // .
    Dash,      // -
    LetterGap, // ' '
    WordGap,   // /
}

impl From<Mark> for Token {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Dot => Token::Dot,
            Mark::Dash => Token::Dash,
        }
    }
}

impl Token {
    /// The character used for this token in the printed representation.
    pub fn symbol(self) -> char {
        match self {
            Token::Dot => '.',
            Token::Dash => '-',
            Token::LetterGap => ' ',
            Token::WordGap => '/',
        }
    }

    pub fn is_mark(self) -> bool {
        matches!(self, Token::Dot | Token::Dash)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a token sequence as human-readable Morse text.
///
/// Marks are concatenated, each letter is followed by a single space and each
/// word gap becomes `/`. This is a display format only; nothing parses it back.
pub fn to_morse_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.symbol()).collect()
}

/// Token counts used for duration accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    pub dots: usize,
    pub dashes: usize,
    pub letter_gaps: usize,
    pub word_gaps: usize,
    /// Mark-to-mark transitions inside a letter, each realised as one unit of silence.
    pub mark_gaps: usize,
}

impl TokenCounts {
    pub fn of(tokens: &[Token]) -> Self {
        let mut counts = TokenCounts::default();
        let mut prev_mark = false;
        for &token in tokens {
            match token {
                Token::Dot => counts.dots += 1,
                Token::Dash => counts.dashes += 1,
                Token::LetterGap => counts.letter_gaps += 1,
                Token::WordGap => counts.word_gaps += 1,
            }
            if token.is_mark() && prev_mark {
                counts.mark_gaps += 1;
            }
            prev_mark = token.is_mark();
        }
        counts
    }

    /// Total length of the rendered sequence in timing units.
    pub fn units(&self) -> usize {
        self.dots + 3 * self.dashes + 3 * self.letter_gaps + 7 * self.word_gaps + self.mark_gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morse_string_symbols() {
        let tokens = [
            Token::Dot,
            Token::Dash,
            Token::LetterGap,
            Token::WordGap,
            Token::Dash,
            Token::LetterGap,
        ];
        assert_eq!(to_morse_string(&tokens), ".- /- ");
    }

    #[test]
    fn counts_mark_gaps_inside_letters_only() {
        // "a b": .- ' ' / -... ' '
        let tokens = [
            Token::Dot,
            Token::Dash,
            Token::LetterGap,
            Token::WordGap,
            Token::Dash,
            Token::Dot,
            Token::Dot,
            Token::Dot,
            Token::LetterGap,
        ];
        let counts = TokenCounts::of(&tokens);
        assert_eq!(counts.dots, 4);
        assert_eq!(counts.dashes, 2);
        assert_eq!(counts.letter_gaps, 2);
        assert_eq!(counts.word_gaps, 1);
        assert_eq!(counts.mark_gaps, 4);
        assert_eq!(counts.units(), 4 + 6 + 6 + 7 + 4);
    }
}
