pub const DEFAULT_POINTS: u32 = 1;

/// Adds `points` to `current` when the guess was correct, otherwise leaves it alone.
pub fn score(current: u32, correct: bool, points: u32) -> u32 {
    if correct {
        current.saturating_add(points)
    } else {
        current
    }
}
