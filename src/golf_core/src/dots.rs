use crate::constants::{DOT, DOTS_OVERFLOW};

/// Display glyphs for the handicap strokes received on a hole.
///
/// Capped visually at two dots; three or more shows an overflow marker.
pub fn dots_for_strokes(strokes: u32) -> &'static str {
    match strokes {
        0 => "",
        1 => DOT,
        2 => "••",
        _ => DOTS_OVERFLOW,
    }
}

pub fn dots_row(strokes: &[u32]) -> Vec<&'static str> {
    strokes.iter().map(|&s| dots_for_strokes(s)).collect()
}
