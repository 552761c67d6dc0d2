//! Fieldsmith CLI - compile and generate custom field metadata.

use anyhow::Context;
use clap::Parser;
use fieldsmith_cli::commands;
use fieldsmith_cli::config::OutputFormat;
use fieldsmith_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let errors = Formatter::new(OutputFormat::Table, !cli.no_color);

    if let Err(e) = run(cli).await {
        eprintln!("{}", errors.error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr so command output stays pipeable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_api_key_override(cli.api_key);

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Compile(args) => commands::execute_compile(args, &formatter).await?,
        Command::List(args) => commands::execute_list(args, &formatter).await?,
        Command::Check(args) => commands::execute_check(args, &formatter).await?,
        Command::Reduce(args) => commands::execute_reduce(args, &config, &formatter).await?,
        Command::Prompt(args) => commands::execute_prompt(args, &config).await?,
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter).await?,
    }

    Ok(())
}
