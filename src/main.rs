//! rule-aggregator-r CLI
//!
//! Loads a rule-group config, aggregates each group's sources, and
//! writes the merged artifacts. Only a config loading failure is fatal;
//! per-source and per-group failures are logged and contained.

use std::path::PathBuf;

use clap::Parser;

use rule_aggregator_r::{write_artifacts, Aggregator, Config, HttpFetcher, Result};

#[derive(Parser)]
#[command(name = "rule-aggregator-r")]
#[command(about = "Aggregate domain rule lists into merged routing rule sets")]
struct Cli {
    /// Path to the rule groups config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory where merged rule artifacts are written
    #[arg(short, long, default_value = "rules")]
    output: PathBuf,

    /// User-Agent header sent with outbound requests
    #[arg(long)]
    user_agent: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    let mut fetcher = HttpFetcher::new();
    if let Some(ref user_agent) = cli.user_agent {
        fetcher = fetcher.with_user_agent(user_agent);
    }

    let aggregator = Aggregator::new(fetcher).with_logger(|msg| log::info!("{msg}"));

    for group in &config.rule_groups {
        let merged = aggregator.aggregate(group);
        if merged.is_empty() {
            log::warn!("group '{}': no valid rules, skipped", group.name);
            continue;
        }
        match write_artifacts(&cli.output, &group.name, &merged) {
            Ok(path) => log::info!(
                "group '{}': wrote {} entries to {}",
                group.name,
                merged.len(),
                path.display()
            ),
            Err(e) => log::error!("group '{}': failed to write artifacts: {e}", group.name),
        }
    }

    Ok(())
}
