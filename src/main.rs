use std::path::PathBuf;

use clap::Parser;
use taskline::config::Config;
use taskline::logging::{init_tracing, with_startup_logging};

#[derive(Parser, Debug)]
#[command(name = "taskline")]
#[command(version)]
#[command(
    about = "Select tasks and configure their options from one command line",
    long_about = None
)]
struct Cli {
    /// Config file declaring the available tasks
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the configured tasks as JSON
    #[arg(long)]
    json: bool,

    /// Tasks to run, each followed by its options
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TASK")]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = with_startup_logging(|| match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    })?;
    init_tracing(&config.logging);

    let configured = taskline::run(&config, &cli.tokens)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&configured)?);
    } else {
        for target in &configured {
            println!("{}", target.command_line());
        }
    }
    Ok(())
}
