mod cli;
mod config;
mod diff;
mod docs;
mod render;
mod run;
mod scanner;
mod types;
mod util;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .init();

    let result = match &cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check(args).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

fn init(args: &cli::InitArgs) -> anyhow::Result<()> {
    if std::path::Path::new(&args.config).exists() && !args.r#override {
        anyhow::bail!(
            "{} already exists (use --override to replace it)",
            args.config
        );
    }
    std::fs::write(&args.config, config::DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", args.config))?;
    info!("Wrote {}", args.config);
    Ok(())
}

async fn check(args: &cli::CheckArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", args.config, e))?;

    let base = util::resolve_base(&args.base);
    debug!("Resolved base: {}", base);

    let files = util::changed_files(&base).context("Failed to list changed files")?;
    info!("Found {} changed files", files.len());

    let diffs = util::file_diffs(&base, &files);
    debug!("Collected {} non-empty diffs", diffs.len());

    let annotations = if args.no_docs {
        run::run(&diffs, &config.check, &docs::NoDocs).await?
    } else {
        run::run(&diffs, &config.check, &docs::RubocopDocs).await?
    };

    match &args.output {
        Some(path) => run::write_output(path, &annotations)?,
        None => run::print_annotations(&annotations),
    }

    if !annotations.is_empty() {
        error!("rubocop:disable directives found in this change");
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}
