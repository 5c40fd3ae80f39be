#![deny(clippy::all, clippy::pedantic)]
//! # Cube Arena Runner
//!
//! Plays cube arena episodes headless with a scripted policy and reports how
//! they went. Pass `--config` to load an arena from JSON and `--watch` to
//! pick up edits to that file between episodes.

mod app;
mod watcher;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::{PolicyKind, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "cube_arena", version, about = "Run cube arena episodes headless")]
struct Args {
    /// Number of episodes to play
    #[arg(long, default_value_t = 10)]
    episodes: u32,
    /// Seed for target placement and the random policy
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Policy standing in for a trained agent
    #[arg(long, value_enum, default_value_t = PolicyKind::Seek)]
    policy: PolicyKind,
    /// JSON arena config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Reload the config file between episodes when it changes
    #[arg(long, requires = "config")]
    watch: bool,
    /// Step limit per episode, overriding the config
    #[arg(long)]
    max_steps: Option<u32>,
    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = RunOptions {
        episodes: args.episodes,
        seed: args.seed,
        policy: args.policy,
        config_path: args.config,
        watch: args.watch,
        max_steps: args.max_steps,
    };

    let summary = app::run(&options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("episodes:      {}", summary.episodes);
        println!("successes:     {}", summary.successes);
        println!("failures:      {}", summary.failures);
        println!("interruptions: {}", summary.interruptions);
        println!("success rate:  {:.3}", summary.success_rate);
        println!("mean steps:    {:.1}", summary.mean_steps);
        println!("total reward:  {:.2}", summary.total_reward);
    }
    Ok(())
}
