use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_THEME: &str = "food";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemePair {
    pub clue: String,
    pub answer: String,
}

impl ThemePair {
    pub fn new(clue: &str, answer: &str) -> Self {
        Self {
            clue: clue.to_string(),
            answer: answer.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("failed to read theme bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("default theme '{0}' is missing or has no entries")]
    MissingDefault(String),
}

fn default_theme_name() -> String {
    DEFAULT_THEME.to_string()
}

// On-disk shape, validated into a ThemeBank.
#[derive(serde::Deserialize)]
struct RawBank {
    #[serde(default = "default_theme_name")]
    default_theme: String,
    themes: BTreeMap<String, Vec<ThemePair>>,
}

/// Read-only table of themes, each an ordered list of (clue, answer) pairs.
///
/// The default theme is guaranteed to be present and non-empty, so lookups
/// that fall back to it always yield a pair.
#[derive(Debug, Clone)]
pub struct ThemeBank {
    default_theme: String,
    themes: BTreeMap<String, Vec<ThemePair>>,
}

impl ThemeBank {
    pub fn new(
        default_theme: String,
        themes: BTreeMap<String, Vec<ThemePair>>,
    ) -> Result<Self, BankError> {
        match themes.get(&default_theme) {
            Some(pairs) if !pairs.is_empty() => Ok(Self {
                default_theme,
                themes,
            }),
            _ => Err(BankError::MissingDefault(default_theme)),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let raw: RawBank = serde_json::from_reader(reader)?;
        Self::new(raw.default_theme, raw.themes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The bundled emoji table.
    pub fn builtin() -> Self {
        let themes = BUILTIN_THEMES
            .iter()
            .map(|(name, pairs)| {
                let pairs = pairs
                    .iter()
                    .map(|(clue, answer)| ThemePair::new(clue, answer))
                    .collect();
                (name.to_string(), pairs)
            })
            .collect();

        Self {
            default_theme: default_theme_name(),
            themes,
        }
    }

    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    /// Theme names in sorted order.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn pairs(&self, theme: &str) -> Option<&[ThemePair]> {
        self.themes.get(theme).map(Vec::as_slice)
    }

    // An empty list counts as an unknown theme.
    fn known_pairs(&self, theme: &str) -> Option<&[ThemePair]> {
        self.pairs(theme).filter(|pairs| !pairs.is_empty())
    }

    /// Picks one pair uniformly from `theme`, or from the default theme when
    /// `theme` is unknown.
    pub fn get_theme_item<R: Rng + ?Sized>(&self, theme: &str, rng: &mut R) -> &ThemePair {
        let pairs = match self.known_pairs(theme) {
            Some(pairs) => pairs,
            None => {
                log::debug!(
                    "Unknown theme '{}', drawing from '{}'",
                    theme,
                    self.default_theme
                );
                &self.themes[&self.default_theme]
            }
        };
        &pairs[rng.gen_range(0..pairs.len())]
    }

    /// Up to `count` distinct clues from `theme`, shuffled. An unknown theme
    /// pools the clues of every theme instead.
    pub fn random_clues<R: Rng + ?Sized>(
        &self,
        count: usize,
        theme: &str,
        rng: &mut R,
    ) -> Vec<String> {
        let mut clues: Vec<&str> = match self.known_pairs(theme) {
            Some(pairs) => pairs.iter().map(|p| p.clue.as_str()).collect(),
            None => self
                .themes
                .values()
                .flatten()
                .map(|p| p.clue.as_str())
                .collect(),
        };
        clues.shuffle(rng);
        clues.truncate(count);
        clues.into_iter().map(str::to_string).collect()
    }
}

impl Default for ThemeBank {
    fn default() -> Self {
        Self::builtin()
    }
}

type ThemeTable = &'static [(&'static str, &'static [(&'static str, &'static str)])];

const BUILTIN_THEMES: ThemeTable = &[
    (
        "food",
        &[
            ("🍕", "pizza"),
            ("🍣", "sushi"),
            ("🍔", "burger"),
            ("🍟", "fries"),
            ("🌮", "taco"),
            ("🍜", "ramen"),
            ("🥐", "croissant"),
            ("🍩", "donut"),
            ("🍎", "apple"),
            ("🍰", "cake"),
        ],
    ),
    (
        "animals",
        &[
            ("🐶", "dog"),
            ("🐱", "cat"),
            ("🐼", "panda"),
            ("🦁", "lion"),
            ("🐸", "frog"),
            ("🐧", "penguin"),
            ("🦊", "fox"),
            ("🐘", "elephant"),
            ("🐢", "turtle"),
            ("🦄", "unicorn"),
        ],
    ),
    (
        "movies",
        &[
            ("🧙‍♂️💍", "lord of the rings"),
            ("🚢🧊", "titanic"),
            ("🦖🏞️", "jurassic park"),
            ("👸🏼❄️", "frozen"),
            ("🧔⚡", "harry potter"),
            ("👨‍🚀🌕", "space movie"),
            ("🦸‍♂️", "superman"),
            ("🚗💨", "fast and furious"),
        ],
    ),
    (
        "games",
        &[
            ("🎮", "video game"),
            ("♟️", "chess"),
            ("🃏", "card game"),
            ("🎯", "darts"),
            ("🕹️", "arcade"),
            ("🎲", "board game"),
        ],
    ),
    (
        "cities",
        &[
            ("🇺🇸🗽", "new york"),
            ("🇫🇷🗼", "paris"),
            ("🇬🇧🎡", "london"),
            ("⛩️🌸", "kyoto"),
            ("🇯🇵🗼", "tokyo"),
            ("🇦🇺🌉", "sydney"),
            ("🇮🇹🏛️", "rome"),
            ("🇪🇬🕌", "cairo"),
            ("🇧🇷🎭", "rio de janeiro"),
            ("🇨🇳🐼", "chengdu"),
        ],
    ),
    (
        "feelings",
        &[
            ("😀", "happy"),
            ("😢", "sad"),
            ("😡", "angry"),
            ("🤔", "thinking"),
            ("🥱", "tired"),
            ("🤒", "sick"),
            ("😎", "cool"),
            ("🥳", "celebrating"),
        ],
    ),
    (
        "dev",
        &[
            ("💻☕", "coding"),
            ("🐍📦", "python package"),
            ("🐛🔍", "debugging"),
            ("📦⬆️", "deploy"),
            ("🧪✅", "tests passing"),
            ("⚠️🐛", "bug"),
        ],
    ),
];
