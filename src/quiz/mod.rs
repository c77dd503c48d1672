pub mod answer;
pub mod bank;
pub mod score;
pub mod session;

use rand::Rng;

use bank::ThemeBank;

/// One round's question. Built fresh per round and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizItem {
    pub clue: String,
    pub answer: String,
    pub theme: String,
}

impl QuizItem {
    pub fn new(clue: String, answer: String, theme: String) -> Self {
        Self {
            clue,
            answer,
            theme,
        }
    }
}

/// Draws one pair for `theme` and labels it with the theme that was asked for,
/// even when the bank fell back to its default theme.
pub fn make_quiz_item<R: Rng + ?Sized>(bank: &ThemeBank, theme: &str, rng: &mut R) -> QuizItem {
    let pair = bank.get_theme_item(theme, rng);
    QuizItem::new(pair.clue.clone(), pair.answer.clone(), theme.to_string())
}
