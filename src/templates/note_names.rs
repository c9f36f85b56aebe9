//! Note-name spelling to pitch-class lookup
//!
//! Corpus filenames spell tonics in many ways: flats, sharps, unicode
//! accidental glyphs, the words "flat"/"sharp", or an "s" suffix. Spellings
//! are canonicalized into an uppercase letter plus "#"/"B" accidental, then
//! resolved through a fixed table that encodes enharmonic equivalence.

use crate::error::KeyError;

/// Every accepted canonical spelling and its pitch-class index
///
/// Enharmonic equivalents map to the same index (Db ≡ C#, Cb ≡ B, E# ≡ F).
const SPELLING_TABLE: [(&str, usize); 21] = [
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("DB", 1),
    ("D", 2),
    ("D#", 3),
    ("EB", 3),
    ("E", 4),
    ("FB", 4),
    ("F", 5),
    ("E#", 5),
    ("F#", 6),
    ("GB", 6),
    ("G", 7),
    ("G#", 8),
    ("AB", 8),
    ("A", 9),
    ("A#", 10),
    ("BB", 10),
    ("B", 11),
    ("CB", 11),
];

/// Reduce a raw tonic token to its canonical spelling
///
/// Uppercases, rewrites the words FLAT/SHARP and the unicode glyphs ♭/♯ to
/// "B"/"#", treats a trailing "S" as sharp ("Cs" -> "C#"), and strips hyphens
/// and whitespace. The replacement order matters: FLAT/SHARP are rewritten
/// before the bare "S" rule so "CSHARP" does not degrade into "C##".
fn canonicalize(token: &str) -> String {
    token
        .trim()
        .to_uppercase()
        .replace("FLAT", "B")
        .replace("SHARP", "#")
        .replace('S', "#")
        .replace('-', "")
        .replace('♭', "B")
        .replace('♯', "#")
        .replace(' ', "")
}

/// Map a tonic note-name token to its pitch-class index 0..11
///
/// # Errors
///
/// `KeyError::UnknownTonicName` when the canonicalized spelling is not in
/// the accepted table.
pub fn tonic_pitch_class(token: &str) -> Result<usize, KeyError> {
    let canonical = canonicalize(token);
    SPELLING_TABLE
        .iter()
        .find(|(spelling, _)| *spelling == canonical)
        .map(|(_, index)| *index)
        .ok_or_else(|| KeyError::UnknownTonicName(token.to_string()))
}
