use crate::settings::{Alphabet, CharsetMode};
use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

/// Symbols used by scramble in its special mode.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/~`";

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";

/// Colors sparkles pick from when random colors are enabled.
pub const SPARKLE_COLORS: &[&str] = &[
    "#fbbf24", // amber
    "#f472b6", // pink
    "#60a5fa", // blue
    "#34d399", // green
    "#a78bfa", // purple
    "#fb7185", // rose
    "#fcd34d", // yellow
];

static SPECIAL: Lazy<Vec<&'static str>> = Lazy::new(|| glyphs(&[SPECIAL_CHARS]));
static ALPHANUMERIC_SPECIAL: Lazy<Vec<&'static str>> =
    Lazy::new(|| glyphs(&[UPPERCASE, LOWERCASE, NUMBERS, SPECIAL_CHARS]));

static ALPHABET_UPPERCASE: Lazy<Vec<&'static str>> = Lazy::new(|| glyphs(&[UPPERCASE]));
static ALPHABET_LOWERCASE: Lazy<Vec<&'static str>> = Lazy::new(|| glyphs(&[LOWERCASE]));
static ALPHABET_NUMBERS: Lazy<Vec<&'static str>> = Lazy::new(|| glyphs(&[NUMBERS]));
static ALPHABET_FULL: Lazy<Vec<&'static str>> = Lazy::new(|| glyphs(&[UPPERCASE, LOWERCASE, NUMBERS]));

fn glyphs(parts: &[&'static str]) -> Vec<&'static str> {
    parts.iter().copied().flat_map(|part| part.graphemes(true)).collect()
}

/// The glyphs a scrambling character draws from.
pub(crate) fn charset(mode: CharsetMode) -> &'static [&'static str] {
    match mode {
        CharsetMode::Special => SPECIAL.as_slice(),
        CharsetMode::Alphanumeric => ALPHANUMERIC_SPECIAL.as_slice(),
    }
}

/// The glyphs roller and flipboard columns cycle through.
pub(crate) fn alphabet(alphabet: Alphabet) -> &'static [&'static str] {
    match alphabet {
        Alphabet::Uppercase => ALPHABET_UPPERCASE.as_slice(),
        Alphabet::Lowercase => ALPHABET_LOWERCASE.as_slice(),
        Alphabet::Numbers => ALPHABET_NUMBERS.as_slice(),
        Alphabet::Full => ALPHABET_FULL.as_slice(),
    }
}
