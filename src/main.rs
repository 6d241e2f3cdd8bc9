use anyhow::Context;
use clap::Parser;
use cvecwe::cli::{Cli, Commands};
use cvecwe::config::AppSettings;
use cvecwe::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match (&cli.config, &cli.command) {
        (Some(path), Commands::Settings(_)) if !path.exists() => Ok(AppSettings::default()),
        (Some(path), _) => AppSettings::load_from(path),
        (None, _) => AppSettings::load(),
    }
    .context("failed to load settings")?;

    match &cli.command {
        Commands::Run(cmd) => {
            cmd.execute(settings, &cli.output_dir, cli.verbose, cli.quiet)
                .await?
        }
        Commands::Settings(cmd) => cmd.execute(&settings, cli.config.as_deref(), cli.quiet)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "cvecwe=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
