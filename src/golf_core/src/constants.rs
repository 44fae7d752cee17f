/// Holes on a full course
pub const HOLE_COUNT: usize = 18;

/// Holes per nine
pub const NINE: usize = 9;

/// Par used when a course entry is missing or invalid
pub const DEFAULT_PAR: u32 = 4;

/// Smallest par a course hole may carry
pub const MIN_PAR: u32 = 3;

/// Largest par a course hole may carry
pub const MAX_PAR: u32 = 6;

/// Bounds for the number of player scores counted toward a team score
pub const MIN_TOP_X: u32 = 1;
pub const MAX_TOP_X: u32 = 4;

/// Top-X used when a round does not configure one
pub const DEFAULT_TOP_X: u32 = 4;

/// Highest score accepted from the entry form for a single hole
pub const MAX_HOLE_SCORE: u32 = 20;

/// Glyphs used for handicap stroke dots
pub const DOT: &str = "•";
pub const DOTS_OVERFLOW: &str = "••+";

/// Front nine hole range (inclusive, zero based)
pub const FRONT_NINE: (usize, usize) = (0, NINE - 1);

/// Back nine hole range (inclusive, zero based)
pub const BACK_NINE: (usize, usize) = (NINE, HOLE_COUNT - 1);

/// Stroke index 1..=18 in hole order, the fallback course layout
pub fn default_stroke_index() -> [u32; HOLE_COUNT] {
    let mut si = [0; HOLE_COUNT];
    for (i, v) in si.iter_mut().enumerate() {
        *v = i as u32 + 1;
    }
    si
}
