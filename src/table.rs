//! The fixed Morse symbol table.
//!
//! Keys are lower-case; callers normalise before lookup. Whitespace is never
//! stored here, it is handled by the encoder as a word separator.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::token::Mark;
use crate::token::Mark::{Dash as H, Dot as D};

/// Every supported character with its mark sequence.
pub static SYMBOLS: &[(char, &[Mark])] = &[
    ('a', &[D, H]),
    ('b', &[H, D, D, D]),
    ('c', &[H, D, H, D]),
    ('d', &[H, D, D]),
    ('e', &[D]),
    ('f', &[D, D, H, D]),
    ('g', &[H, H, D]),
    ('h', &[D, D, D, D]),
    ('i', &[D, D]),
    ('j', &[D, H, H, H]),
    ('k', &[H, D, H]),
    ('l', &[D, H, D, D]),
    ('m', &[H, H]),
    ('n', &[H, D]),
    ('o', &[H, H, H]),
    ('p', &[D, H, H, D]),
    ('q', &[H, H, D, H]),
    ('r', &[D, H, D]),
    ('s', &[D, D, D]),
    ('t', &[H]),
    ('u', &[D, D, H]),
    ('v', &[D, D, D, H]),
    ('w', &[D, H, H]),
    ('x', &[H, D, D, H]),
    ('y', &[H, D, H, H]),
    ('z', &[H, H, D, D]),
    ('0', &[H, H, H, H, H]),
    ('1', &[D, H, H, H, H]),
    ('2', &[D, D, H, H, H]),
    ('3', &[D, D, D, H, H]),
    ('4', &[D, D, D, D, H]),
    ('5', &[D, D, D, D, D]),
    ('6', &[H, D, D, D, D]),
    ('7', &[H, H, D, D, D]),
    ('8', &[H, H, H, D, D]),
    ('9', &[H, H, H, H, D]),
    ('.', &[D, H, D, H, D, H]),
    (',', &[H, H, D, D, H, H]),
    ('?', &[D, D, H, H, D, D]),
    ('!', &[H, D, H, D, H, H]),
    (':', &[H, H, H, D, D, D]),
    (';', &[H, D, H, D, H, D]),
    ('(', &[H, D, H, H, D]),
    (')', &[H, D, H, H, D, H]),
    ('=', &[H, D, D, D, H]),
    ('+', &[D, H, D, H, D]),
    ('-', &[H, D, D, D, D, H]),
    ('_', &[D, D, H, H, D, H]),
    ('"', &[D, H, D, D, H, D]),
    ('$', &[D, D, D, H, D, D, H]),
    ('@', &[D, H, H, D, H, D]),
    ('&', &[D, H, D, D, D]),
    ('/', &[H, D, D, H, D]),
    ('\\', &[H, D, D, H, D, H]),
    ('\'', &[D, H, H, H, H, D]),
];

static LOOKUP: LazyLock<HashMap<char, &'static [Mark]>> =
    LazyLock::new(|| SYMBOLS.iter().copied().collect());

/// Mark sequence for an already lower-cased character.
pub fn lookup(ch: char) -> Option<&'static [Mark]> {
    LOOKUP.get(&ch).copied()
}

/// Whether `ch` has a table entry. Does not normalise case.
pub fn is_legal(ch: char) -> bool {
    LOOKUP.contains_key(&ch)
}

/// The legal character set, in sorted order.
pub fn legal_characters() -> BTreeSet<char> {
    LOOKUP.keys().copied().collect()
}
