mod commands;
mod dates;
mod render;
mod terminal;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use giftlist_core::GiftId;
use giftlist_core::GiftList;
use giftlist_core::clock::SystemClock;
use giftlist_core::config::GiftlistConfig;
use giftlist_core::sort::SortKey;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalSink;

#[derive(Parser)]
#[command(name = "giftlist")]
#[command(about = "Keep track of gift ideas and get reminded before the big day")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a gift (prompts for anything required that is missing)
    Add {
        /// What the gift is
        name: Option<String>,

        /// Who the gift is for
        #[arg(short, long)]
        recipient: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// birthday, anniversary, holiday, or anything else
        #[arg(short, long = "event")]
        event_type: Option<String>,

        /// Reminder date (e.g. "2025-03-20" or "next friday")
        #[arg(long)]
        remind: Option<String>,
    },
    /// List gifts
    List {
        /// name, recipient, date, or reminder
        #[arg(short, long)]
        sort: Option<SortKey>,

        /// Only show gifts containing this text
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Change a gift; fields not given keep their current value
    Edit {
        id: GiftId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        recipient: Option<String>,

        /// New description ("" to clear)
        #[arg(short, long)]
        description: Option<String>,

        /// New event type ("" to clear)
        #[arg(short, long = "event")]
        event_type: Option<String>,

        /// New reminder date ("" to clear)
        #[arg(long)]
        remind: Option<String>,
    },
    /// Delete a gift
    Remove { id: GiftId },
    /// Replace the gift list with the contents of a JSON export
    Import { file: PathBuf },
    /// Write the gift list as JSON (to stdout if no file is given)
    Export { file: Option<PathBuf> },
    /// Show reminders that are due
    Remind {
        /// Check as if today were this date
        #[arg(long)]
        on: Option<String>,
    },
    /// Keep running and show due reminders every check interval
    Watch,
    /// Show configuration paths and values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Unattended `watch` reports through the log, so let its reminders through.
    let default_level = if matches!(cli.command, Commands::Watch) && !std::io::stdout().is_terminal() {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GiftlistConfig::load()?;

    match cli.command {
        Commands::Add {
            name,
            recipient,
            description,
            event_type,
            remind,
        } => {
            let mut list = open_list(&config);
            commands::add::run(&mut list, name, recipient, description, event_type, remind)
        }
        Commands::List { sort, search } => {
            let list = open_list(&config);
            commands::list::run(&list, sort, search.as_deref())
        }
        Commands::Edit {
            id,
            name,
            recipient,
            description,
            event_type,
            remind,
        } => {
            let mut list = open_list(&config);
            let changes = commands::edit::Changes {
                name,
                recipient,
                description,
                event_type,
                remind,
            };
            commands::edit::run(&mut list, id, changes)
        }
        Commands::Remove { id } => {
            let mut list = open_list(&config);
            commands::remove::run(&mut list, id)
        }
        Commands::Import { file } => {
            let mut list = open_list(&config);
            commands::import::run(&mut list, &file)
        }
        Commands::Export { file } => {
            let list = open_list(&config);
            commands::export::run(&list, file.as_deref())
        }
        Commands::Remind { on } => {
            let list = open_list(&config);
            commands::remind::run(&list, on.as_deref())
        }
        Commands::Watch => commands::watch::run(&config).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn open_list(config: &GiftlistConfig) -> GiftList {
    GiftList::open(
        config.store(),
        Arc::new(TerminalSink::new()),
        Arc::new(SystemClock),
    )
}
