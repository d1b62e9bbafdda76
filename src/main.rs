//! lexmetrics CLI entry point.

use clap::Parser;
use lexmetrics::cli::{self, Cli, Commands, EXIT_ERROR};
use lexmetrics::Operation;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Classes(args) => cli::run_scan(&cli, args, Operation::ClassCount),
        Commands::Comments(args) => cli::run_scan(&cli, args, Operation::CommentCount),
        Commands::Returns(args) => cli::run_scan(&cli, args, Operation::ReturnCount),
        Commands::Dom(args) => cli::run_scan(&cli, args, Operation::DomSummary),
        Commands::Complexity(args) => cli::run_complexity(&cli, args),
        Commands::Languages => cli::run_languages(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
