//! Text/binary classification for content scanning

/// Number of leading bytes inspected
pub const SNIFF_LEN: usize = 4096;

/// Fraction of printable bytes above which a buffer counts as text
const PRINTABLE_RATIO: f64 = 0.8;

/// Guess whether `bytes` holds text.
///
/// Looks at the first [`SNIFF_LEN`] bytes and counts tab, newline, carriage
/// return and visible ASCII as printable. More than 80% printable means text.
/// This is a heuristic; UTF-8 heavy files may be classified as binary.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    if sample.is_empty() {
        return false;
    }

    let printable = sample.iter().filter(|&&b| is_printable(b)).count();
    printable as f64 / sample.len() as f64 > PRINTABLE_RATIO
}

fn is_printable(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r' | 32..=126)
}
