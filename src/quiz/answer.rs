/// How strictly a guess is compared against the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    /// Accept any prefix of the answer, anchored at its start.
    pub allow_partial: bool,
}

impl MatchOptions {
    pub fn new(case_sensitive: bool, allow_partial: bool) -> Self {
        Self {
            case_sensitive,
            allow_partial,
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::new(false, true)
    }
}

/// Compares a player's guess against the correct answer.
///
/// The guess is always trimmed, the answer never is. Case-insensitive mode
/// lower-cases both sides before comparing. Partial mode accepts any prefix,
/// including the empty string.
pub fn check_answer(correct: &str, guess: &str, options: MatchOptions) -> bool {
    let guess = guess.trim();

    if options.case_sensitive {
        return matches(correct, guess, options.allow_partial);
    }

    matches(
        &correct.to_lowercase(),
        &guess.to_lowercase(),
        options.allow_partial,
    )
}

fn matches(correct: &str, guess: &str, allow_partial: bool) -> bool {
    if allow_partial {
        correct.starts_with(guess)
    } else {
        correct == guess
    }
}
