use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use flashcards_app::export::json::{export_json_to_path, import_json_from_path};
use flashcards_app::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "flashcards", about = "Spaced repetition flashcards", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this RFC 3339 instant as the current time
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a card
    Add {
        front: String,
        back: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// List every card with its schedule
    List,
    /// Show the next study batch, or review it interactively
    Study {
        #[arg(long)]
        count: Option<usize>,
        #[arg(long, short)]
        interactive: bool,
    },
    /// Rate a card as easy, medium or hard
    Rate { id: CardId, difficulty: Difficulty },
    /// Delete a card
    Delete { id: CardId },
    /// Import cards from an exported JSON file
    Import { file: PathBuf },
    /// Export all cards to a JSON file
    Export { file: PathBuf },
}

fn parse_instant(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp: {}", e))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let now = cli.now.unwrap_or_else(Utc::now);
    let mut service = FlashcardService::new(config.open_repository()?, config.scheduler()?);

    match cli.command {
        Command::Add {
            front,
            back,
            category,
        } => {
            let card = service.add_card(
                NewCard {
                    category,
                    ..NewCard::new(front, back)
                },
                now,
            )?;
            println!("Added {}", card.id);
        }
        Command::List => {
            let cards = service.cards()?;
            println!("{} cards", cards.len());
            for card in &cards {
                print_card(card, now);
            }
        }
        Command::Study { count, interactive } => {
            let count = count.unwrap_or(config.study_batch_size);
            if interactive {
                let mut session = service.start_session(count, now)?;
                run_session(&mut service, &mut session, now)?;
            } else {
                for card in service.cards_for_study(count, now)? {
                    print_card(&card, now);
                }
            }
        }
        Command::Rate { id, difficulty } => {
            let card = service.rate_card(&id, difficulty, now)?;
            if let Some(next) = card.next_review_date {
                println!("Next review of '{}' on {}", card.front, format_date(next));
            }
        }
        Command::Delete { id } => {
            service.delete_card(&id)?;
            println!("Deleted {}", id);
        }
        Command::Import { file } => {
            let new_cards = import_json_from_path(&file)?;
            let added = service.add_cards(new_cards, now)?;
            println!("Imported {} flashcards", added.len());
        }
        Command::Export { file } => {
            let cards = service.cards()?;
            export_json_to_path(&cards, &file)?;
            println!("Exported {} flashcards to {}", cards.len(), file.display());
        }
    }

    Ok(())
}

fn format_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

fn print_card(card: &Card, now: DateTime<Utc>) {
    let schedule = match card.next_review_date {
        None => "new".to_string(),
        Some(_) if models::is_due(card, now) => "due".to_string(),
        Some(next) => format!("next {}", format_date(next)),
    };
    let category = card
        .category
        .as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default();
    println!(
        "{}  [{}] {} -> {}{}",
        card.id, schedule, card.front, card.back, category
    );
}

/// Terminal review loop: show the front, reveal the back on Enter, read a rating.
fn run_session<R: CardRepository>(
    service: &mut FlashcardService<R>,
    session: &mut StudySession,
    now: DateTime<Utc>,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(card) = session.current_card() {
        println!("\n{}", session.progress_message());
        println!("Front: {}", card.front);
        prompt("Press Enter to show the back (q to quit): ")?;
        match lines.next().transpose()? {
            None => break,
            Some(line) if line.trim() == "q" => break,
            Some(_) => {}
        }

        session.toggle_back();
        if let Some(card) = session.current_card() {
            println!("Back:  {}", card.back);
        }

        loop {
            prompt("Rate [e]asy, [m]edium, [h]ard or [s]kip: ")?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            let difficulty = match line.trim() {
                "e" => Difficulty::Easy,
                "m" => Difficulty::Medium,
                "h" => Difficulty::Hard,
                "s" => {
                    session.skip();
                    break;
                }
                other => match other.parse::<Difficulty>() {
                    Ok(difficulty) => difficulty,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                },
            };
            service.rate_in_session(session, difficulty, now)?;
            break;
        }
    }

    println!("\n{}", session.progress_message());
    Ok(())
}

fn prompt(message: &str) -> io::Result<()> {
    print!("{}", message);
    io::stdout().flush()
}
