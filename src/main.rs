mod cli;
mod quiz;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Args;
use quiz::bank::ThemeBank;
use quiz::session::{list_themes, run_quiz};

fn main() -> anyhow::Result<()> {
    // A .env file is optional here; the flags have defaults.
    dotenv().ok();

    pretty_env_logger::init();
    let args = Args::parse();

    let bank = match &args.bank {
        Some(path) => {
            log::info!("Loading theme bank from {}", path.display());
            ThemeBank::from_path(path)
                .with_context(|| format!("Failed to load theme bank '{}'", path.display()))?
        }
        None => ThemeBank::builtin(),
    };
    log::debug!(
        "Theme bank ready: {} themes, default '{}'",
        bank.theme_names().len(),
        bank.default_theme()
    );

    if args.list_themes {
        list_themes(&bank, print_line);
        return Ok(());
    }

    if args.list_commands {
        cli::list_commands(print_line);
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    if let Some(count) = args.sample {
        let clues = bank.random_clues(count, args.theme_or_default(&bank), &mut rng);
        print_line(&clues.join(" "));
        return Ok(());
    }

    let config = args.session_config(&bank);
    log::info!("Starting quiz: {:?}", config);

    let report = run_quiz(&bank, &config, &mut rng, read_guess, print_line);
    log::info!("Quiz finished with {}", report.final_score());
    Ok(())
}

fn print_line(line: &str) {
    println!("{}", line);
}

// Blocks until a line arrives. Closing stdin ends the game.
fn read_guess(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    match next_guess(&mut io::stdin().lock()) {
        Ok(Some(guess)) => guess,
        Ok(None) => {
            println!("\nGoodbye!");
            std::process::exit(0);
        }
        Err(err) => {
            log::error!("Failed to read guess: {}", err);
            std::process::exit(1);
        }
    }
}

/// Reads one line as a guess, `None` at end of input. Bytes that are not
/// UTF-8 are replaced rather than rejected, so they just make a wrong guess.
fn next_guess<B: BufRead>(reader: &mut B) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
