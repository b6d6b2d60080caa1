mod render;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};

use anima_core::{recommend, AdviceRules, AnimaConfig, EventDraft, MonthGrid, ProfileStore};

use crate::render::{render_advice, Render};

#[derive(Parser)]
#[command(name = "anima")]
#[command(about = "Inspect a student's ANIMA calendar: month grid, events and advice")]
struct Cli {
    /// Student email the data file belongs to
    #[arg(short, long)]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the month grid (defaults to the current month)
    Month {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<u32>,
    },
    /// List events with their positions
    Events,
    /// Add an event
    New {
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Time of day, e.g. "10:30"
        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Display color; defaults to the profile preference
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Print the advisory lines for the upcoming days
    Advice,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = AnimaConfig::load()?;
    let store = ProfileStore::new(config.data_path());

    match cli.command {
        Commands::Month { year, month } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());

            let profile = store.load(&cli.user);
            let grid = MonthGrid::build(&profile.events, year, month)?;
            println!("{}", grid.render());
        }
        Commands::Events => {
            let profile = store.load(&cli.user);

            if profile.events.is_empty() {
                println!("Sin eventos guardados para {}.", cli.user);
                return Ok(());
            }

            for (i, event) in profile.events.iter().enumerate() {
                let time = event.time.as_deref().unwrap_or("--:--");
                println!("{:3}  {}  {}  {}", i, event.date, time, event.title);
            }
        }
        Commands::New {
            title,
            date,
            time,
            description,
            color,
        } => {
            let mut profile = store.load(&cli.user);

            let event = EventDraft {
                title,
                date,
                time,
                description,
                color,
            }
            .into_event(&profile.prefs)?;

            println!("Agregado: {} ({})", event.title, event.date);
            profile.events.push(event);
            store.save(&cli.user, &profile)?;
        }
        Commands::Advice => {
            let profile = store.load(&cli.user);
            let today = Local::now().date_naive();
            let lines = recommend(&profile.events, None, today, &AdviceRules::default());
            println!("{}", render_advice(&lines));
        }
    }

    Ok(())
}
