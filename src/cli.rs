use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::quiz::answer::MatchOptions;
use crate::quiz::bank::ThemeBank;
use crate::quiz::session::SessionConfig;

/// Every option can also be set through the environment (or a `.env` file).
#[derive(Debug, Parser)]
#[command(
    name = "emojiguessr",
    about = "Play a quick emoji guessing game in your terminal."
)]
pub struct Args {
    /// Number of questions to ask
    #[arg(short = 'n', long, default_value_t = 3, env = "EMOJIGUESSR_NUM_QUESTIONS")]
    pub num_questions: usize,

    /// Emoji theme to use (defaults to the bank's default theme). Use --list-themes to see options.
    #[arg(short, long, env = "EMOJIGUESSR_THEME")]
    pub theme: Option<String>,

    /// Make answers case-sensitive
    #[arg(long)]
    pub case_sensitive: bool,

    /// Disable partial matches (so 'jurassic' won't match 'jurassic park')
    #[arg(long)]
    pub no_partial: bool,

    /// Maximum number of attempts per question
    #[arg(short = 'a', long, default_value_t = 1, env = "EMOJIGUESSR_MAX_ATTEMPTS")]
    pub max_attempts: usize,

    /// List available themes and exit
    #[arg(long)]
    pub list_themes: bool,

    /// List available commands and exit
    #[arg(long)]
    pub list_commands: bool,

    /// Load themes from a JSON file instead of the built-in table
    #[arg(long, value_name = "PATH", env = "EMOJIGUESSR_BANK")]
    pub bank: Option<PathBuf>,

    /// Print COUNT random clues for the theme and exit
    #[arg(long, value_name = "COUNT")]
    pub sample: Option<usize>,

    /// Seed for the random source, for repeatable games
    #[arg(long, env = "EMOJIGUESSR_SEED")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn theme_or_default<'a>(&'a self, bank: &'a ThemeBank) -> &'a str {
        self.theme.as_deref().unwrap_or(bank.default_theme())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions::new(self.case_sensitive, !self.no_partial)
    }

    pub fn session_config(&self, bank: &ThemeBank) -> SessionConfig {
        SessionConfig::new(
            self.num_questions,
            self.theme_or_default(bank).to_string(),
            self.match_options(),
            self.max_attempts,
        )
    }
}

pub fn list_commands<O: FnMut(&str)>(mut output: O) {
    output("Available commands:");
    let help = Args::command().render_help().to_string();
    for line in help.lines() {
        output(line);
    }
}
