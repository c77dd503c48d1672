use rand::Rng;

use super::answer::{check_answer, MatchOptions};
use super::bank::ThemeBank;
use super::score::{score, DEFAULT_POINTS};
use super::make_quiz_item;

pub const GUESS_PROMPT: &str = "Your guess: ";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    pub num_questions: usize,
    pub theme: String,
    pub match_options: MatchOptions,
    pub max_attempts: usize,
}

impl SessionConfig {
    pub fn new(
        num_questions: usize,
        theme: String,
        match_options: MatchOptions,
        max_attempts: usize,
    ) -> Self {
        Self {
            num_questions,
            theme,
            match_options,
            max_attempts,
        }
    }
}

/// Where a single round stands after each guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingGuess { attempts_remaining: usize },
    Won,
    Lost,
}

impl RoundState {
    pub fn start(max_attempts: usize) -> Self {
        if max_attempts == 0 {
            return RoundState::Lost;
        }
        RoundState::AwaitingGuess {
            attempts_remaining: max_attempts,
        }
    }

    pub fn after_guess(self, correct: bool) -> Self {
        match self {
            RoundState::AwaitingGuess { .. } if correct => RoundState::Won,
            RoundState::AwaitingGuess { attempts_remaining } if attempts_remaining > 1 => {
                RoundState::AwaitingGuess {
                    attempts_remaining: attempts_remaining - 1,
                }
            }
            RoundState::AwaitingGuess { .. } => RoundState::Lost,
            finished => finished,
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, RoundState::AwaitingGuess { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundOutcome {
    pub clue: String,
    pub answer: String,
    pub won: bool,
    pub attempts_used: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionReport {
    pub score: u32,
    pub num_questions: usize,
    pub rounds: Vec<RoundOutcome>,
}

impl SessionReport {
    pub fn final_score(&self) -> String {
        format!("{}/{}", self.score, self.num_questions)
    }
}

/// Plays `num_questions` rounds, reading guesses from `input` and reporting
/// through `output`.
///
/// Scoring runs once per attempt: a wrong guess scores nothing, the winning
/// guess scores one point.
pub fn run_quiz<R, I, O>(
    bank: &ThemeBank,
    config: &SessionConfig,
    rng: &mut R,
    mut input: I,
    mut output: O,
) -> SessionReport
where
    R: Rng + ?Sized,
    I: FnMut(&str) -> String,
    O: FnMut(&str),
{
    let mut report = SessionReport {
        num_questions: config.num_questions,
        ..Default::default()
    };

    for question_number in 1..=config.num_questions {
        let item = make_quiz_item(bank, &config.theme, rng);

        output(&format!("\nQuestion {}/{}", question_number, config.num_questions));
        output(&format!("Theme: {}", item.theme));
        output(&format!("Emoji: {}", item.clue));

        let mut state = RoundState::start(config.max_attempts);
        let mut attempts_used = 0;

        while !state.is_over() {
            let guess = input(GUESS_PROMPT);
            attempts_used += 1;

            let is_right = check_answer(&item.answer, &guess, config.match_options);
            report.score = score(report.score, is_right, DEFAULT_POINTS);
            state = state.after_guess(is_right);

            match state {
                RoundState::Won => output("✅ Correct!"),
                RoundState::AwaitingGuess { attempts_remaining } => {
                    output(&format!("❌ Wrong! {} attempts left.", attempts_remaining))
                }
                RoundState::Lost => output(&format!("❌ Nope — it was: {}", item.answer)),
            }
        }

        log::debug!(
            "Round {}: answer '{}', {:?} after {} attempt(s)",
            question_number,
            item.answer,
            state,
            attempts_used
        );

        report.rounds.push(RoundOutcome {
            clue: item.clue,
            answer: item.answer,
            won: state == RoundState::Won,
            attempts_used,
        });
    }

    output(&format!("\nFinal score: {}", report.final_score()));
    report
}

pub fn list_themes<O: FnMut(&str)>(bank: &ThemeBank, mut output: O) {
    output("Available themes:");
    for theme in bank.theme_names() {
        output(&format!("  - {}", theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::bank::ThemePair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::collections::VecDeque;

    // A bank with a single pair per theme so every round is predictable.
    fn fixed_bank() -> ThemeBank {
        let mut themes = BTreeMap::new();
        themes.insert("food".to_string(), vec![ThemePair::new("🍔", "burger")]);
        themes.insert(
            "movies".to_string(),
            vec![ThemePair::new("🦖🏞️", "jurassic park")],
        );
        ThemeBank::new("food".to_string(), themes).unwrap()
    }

    fn config(num_questions: usize, theme: &str, max_attempts: usize) -> SessionConfig {
        SessionConfig::new(
            num_questions,
            theme.to_string(),
            MatchOptions::default(),
            max_attempts,
        )
    }

    fn play(
        bank: &ThemeBank,
        config: &SessionConfig,
        guesses: &[&str],
    ) -> (SessionReport, Vec<String>, Vec<String>) {
        let mut guesses: VecDeque<String> = guesses.iter().map(|g| g.to_string()).collect();
        let mut prompts = Vec::new();
        let mut outputs = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);

        let report = run_quiz(
            bank,
            config,
            &mut rng,
            |prompt| {
                prompts.push(prompt.to_string());
                guesses.pop_front().unwrap_or_default()
            },
            |line| outputs.push(line.to_string()),
        );
        (report, prompts, outputs)
    }

    #[test]
    fn test_round_state_transitions() {
        let state = RoundState::start(2);
        assert_eq!(state, RoundState::AwaitingGuess { attempts_remaining: 2 });
        assert_eq!(state.after_guess(true), RoundState::Won);

        let state = state.after_guess(false);
        assert_eq!(state, RoundState::AwaitingGuess { attempts_remaining: 1 });
        assert_eq!(state.after_guess(false), RoundState::Lost);
        assert_eq!(state.after_guess(true), RoundState::Won);

        assert_eq!(RoundState::Won.after_guess(false), RoundState::Won);
        assert_eq!(RoundState::Lost.after_guess(true), RoundState::Lost);
        assert!(RoundState::start(0).is_over());
    }

    #[test]
    fn test_correct_answer() {
        let (report, prompts, outputs) = play(&fixed_bank(), &config(1, "food", 1), &["burger"]);

        assert_eq!(prompts, vec![GUESS_PROMPT]);
        assert!(outputs.iter().any(|m| m == "✅ Correct!"));
        assert!(outputs.iter().any(|m| m.contains("Final score: 1/1")));
        assert_eq!(report.final_score(), "1/1");
    }

    #[test]
    fn test_wrong_answer_reveals() {
        let (report, _, outputs) = play(&fixed_bank(), &config(1, "food", 1), &["pizza"]);

        assert!(outputs.iter().any(|m| m == "❌ Nope — it was: burger"));
        assert!(!outputs.iter().any(|m| m.contains("attempts left")));
        assert_eq!(outputs.last().unwrap(), "\nFinal score: 0/1");
        assert_eq!(report.score, 0);
        assert!(!report.rounds[0].won);
    }

    #[test]
    fn test_second_attempt_wins() {
        let (report, prompts, outputs) =
            play(&fixed_bank(), &config(1, "food", 2), &["sushi", "burger"]);

        assert_eq!(prompts.len(), 2);
        let wrong = outputs
            .iter()
            .position(|m| m == "❌ Wrong! 1 attempts left.")
            .unwrap();
        let correct = outputs.iter().position(|m| m == "✅ Correct!").unwrap();
        assert!(wrong < correct);
        assert_eq!(
            outputs.iter().filter(|m| m.contains("attempts left")).count(),
            1
        );
        assert_eq!(report.final_score(), "1/1");
        assert_eq!(report.rounds[0].attempts_used, 2);
    }

    #[test]
    fn test_two_questions_first_try() {
        let (report, prompts, outputs) =
            play(&fixed_bank(), &config(2, "food", 3), &["burger", "BURG"]);

        assert_eq!(prompts.len(), 2);
        assert_eq!(outputs.iter().filter(|m| *m == "✅ Correct!").count(), 2);
        assert!(outputs.iter().any(|m| m == "\nQuestion 2/2"));
        assert_eq!(report.final_score(), "2/2");
    }

    #[test]
    fn test_exhausting_attempts() {
        let (report, prompts, outputs) =
            play(&fixed_bank(), &config(1, "food", 3), &["x", "y", "z", "burger"]);

        // The fourth guess is never asked for.
        assert_eq!(prompts.len(), 3);
        assert_eq!(
            &outputs[3..6],
            &[
                "❌ Wrong! 2 attempts left.".to_string(),
                "❌ Wrong! 1 attempts left.".to_string(),
                "❌ Nope — it was: burger".to_string(),
            ]
        );
        assert_eq!(report.final_score(), "0/1");
    }

    #[test]
    fn test_round_header_uses_requested_theme() {
        let (_, _, outputs) = play(&fixed_bank(), &config(1, "unknown", 1), &["burger"]);

        assert_eq!(
            &outputs[..3],
            &[
                "\nQuestion 1/1".to_string(),
                "Theme: unknown".to_string(),
                "Emoji: 🍔".to_string(),
            ]
        );
        assert!(outputs.iter().any(|m| m == "✅ Correct!"));
    }

    #[test]
    fn test_match_options_are_honoured() {
        let bank = fixed_bank();
        let mut strict = config(1, "movies", 1);
        strict.match_options = MatchOptions::new(true, false);

        let (report, _, _) = play(&bank, &strict, &["jurassic"]);
        assert_eq!(report.score, 0);
        let (report, _, _) = play(&bank, &strict, &["Jurassic Park"]);
        assert_eq!(report.score, 0);
        let (report, _, _) = play(&bank, &strict, &[" jurassic park "]);
        assert_eq!(report.score, 1);

        let (report, _, _) = play(&bank, &config(1, "movies", 1), &["park"]);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_zero_attempts_asks_nothing() {
        let (report, prompts, outputs) = play(&fixed_bank(), &config(2, "food", 0), &["burger"]);

        assert!(prompts.is_empty());
        assert!(!outputs.iter().any(|m| m.starts_with('✅') || m.starts_with('❌')));
        assert_eq!(report.final_score(), "0/2");
    }

    #[test]
    fn test_zero_questions() {
        let (report, prompts, outputs) = play(&fixed_bank(), &config(0, "food", 1), &[]);

        assert!(prompts.is_empty());
        assert_eq!(outputs, vec!["\nFinal score: 0/0"]);
        assert!(report.rounds.is_empty());
    }

    #[test]
    fn test_builtin_bank_session_with_seeded_rng() {
        let bank = ThemeBank::builtin();
        let mut rng = StdRng::seed_from_u64(21);
        let mut outputs = Vec::new();

        // Empty guesses always match in partial mode.
        let report = run_quiz(
            &bank,
            &config(5, "animals", 1),
            &mut rng,
            |_| String::new(),
            |line| outputs.push(line.to_string()),
        );

        assert_eq!(report.final_score(), "5/5");
        let animals = bank.pairs("animals").unwrap();
        for round in &report.rounds {
            assert!(animals.iter().any(|p| p.answer == round.answer));
        }
    }

    #[test]
    fn test_list_themes() {
        let mut outputs = Vec::new();
        list_themes(&fixed_bank(), |line| outputs.push(line.to_string()));
        assert_eq!(
            outputs,
            vec!["Available themes:", "  - food", "  - movies"]
        );
    }
}
