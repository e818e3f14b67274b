//! datacollector CLI
//!
//! Demo programs for the datacollector logging facade

use clap::{Parser, Subcommand};
use datacollector_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "datacollector")]
#[command(about = "datacollector - leveled, transactional logging demos", long_about = None)]
struct Cli {
    /// Minimum level to emit (DEBUG, INFO, WARNING, ERROR)
    #[arg(long, global = true, default_value = "DEBUG")]
    log_level: String,

    /// Print the library's internal diagnostics to stderr
    #[arg(long, global = true)]
    diagnostics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log to the console
    Console(commands::console::ConsoleArgs),
    /// Log to a rotating file
    File(commands::file::FileArgs),
    /// Log to a file from several threads at once
    MultiThread(commands::multi_thread::MultiThreadArgs),
    /// Log through a driver defined in this program
    CustomDriver(commands::custom_driver::CustomDriverArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.diagnostics {
        init(Profile::Development);
    }

    let level = cli.log_level;
    let result = match cli.command {
        Commands::Console(args) => commands::console::execute(args, &level),
        Commands::File(args) => commands::file::execute(args, &level),
        Commands::MultiThread(args) => commands::multi_thread::execute(args, &level),
        Commands::CustomDriver(args) => commands::custom_driver::execute(args, &level),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
