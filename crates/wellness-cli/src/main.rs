use clap::{Parser, Subcommand};
use wellness_core::{Locale, ReminderKind};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "wellness-cli", version, about = "Office wellness reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Host the reminder tick loop and present notifications
    Run {
        /// Demo mode: water and standup run on 30-second cycles
        #[arg(long)]
        demo: bool,
        /// Locale for messages and easter-egg gating
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Print track and easter-egg status as JSON
    Status {
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Easter-egg unlock state (debug harness)
    Egg {
        #[command(subcommand)]
        action: commands::egg::EggAction,
    },
    /// Fire one reminder immediately (debug harness)
    Trigger {
        kind: ReminderKind,
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { demo, locale } => commands::run::run(locale, demo),
        Commands::Status { locale } => commands::status::run(locale),
        Commands::Config { action } => commands::config::run(action),
        Commands::Egg { action } => commands::egg::run(action),
        Commands::Trigger { kind, locale } => commands::trigger::run(kind, locale),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
