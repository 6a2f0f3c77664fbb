use clap::Parser;
use colored::Colorize;

use revue::cli::args::{Cli, Commands};
use revue::cli::commands;
use revue::config::Config;
use revue::error::RevueError;
use revue::storage::Database;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RevueError> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.output.unwrap_or(config.general.default_output);

    let db = match &cli.db {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };

    let output = match cli.command {
        Commands::Page(args) => commands::page(&db, args.command, format)?,
        Commands::User(args) => commands::user(&db, args.command, format)?,
        Commands::Group(args) => commands::group(&db, args.command, format)?,
        Commands::Settings(args) => commands::settings(&db, args.command, format)?,
        Commands::Site(args) => commands::site(&db, args.command, format)?,
        Commands::Review(args) => commands::review(&db, &args, format)?,
        Commands::Report(args) => commands::report(&db, &args, &config, format)?,
        Commands::Schedule => commands::schedule(format)?,
        Commands::Job(args) => commands::job(&db, args.command, &config, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
