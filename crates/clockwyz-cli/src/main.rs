use clap::{Parser, Subcommand};

mod commands;
mod sample;

#[derive(Parser)]
#[command(name = "clockwyz-cli", version, about = "Clockwyz CLI")]
struct Cli {
    /// Log level for stderr output (RUST_LOG overrides)
    #[arg(long, global = true, default_value = clockwyz_core::logging::DEFAULT_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time/pixel conversion
    Grid {
        #[command(subcommand)]
        action: commands::grid::GridAction,
    },
    /// The schedule board with a seeded sample week
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Chat with the assistant
    Assistant {
        #[command(subcommand)]
        action: commands::assistant::AssistantAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    clockwyz_core::logging::init_subscriber(&cli.log_level);

    let result = match cli.command {
        Commands::Grid { action } => commands::grid::run(action),
        Commands::Board { action } => commands::board::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Assistant { action } => commands::assistant::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
