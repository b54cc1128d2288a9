mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, payload, reorder, schedule, show, InitArgs, PayloadArgs, ReorderArgs, ScheduleArgs,
    ShowArgs,
};

/// Syllabus CLI - course outline management for the admin dashboard
#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a sample course and config
    Init(InitArgs),

    /// Print a course outline as a tree
    Show(ShowArgs),

    /// Move a chapter or lesson by drag key and save the new order
    Reorder(ReorderArgs),

    /// Print the sort payload for a course
    Payload(PayloadArgs),

    /// Compose a scheduled publish timestamp
    Schedule(ScheduleArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Reorder(args) => reorder(args, &cwd).await,
        Command::Payload(args) => payload(args, &cwd),
        Command::Schedule(args) => schedule(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
