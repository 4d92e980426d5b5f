//! tasklib - command line entry point
//!
//! Registers the tasks named in `TASKLIB_TASKS`, reads one episode as JSON
//! from stdin and writes the reward of every task as JSON to stdout.

use std::io::{self, Read, Write};

use anyhow::{bail, Context};
use serde::Serialize;
use tasklib::{config::Config, Episode, TaskLib};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One line of the report.
#[derive(Debug, Serialize)]
struct TaskReward<'a> {
    id: usize,
    name: &'a str,
    reward: f64,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let mut lib = TaskLib::new();
    lib.register_all(
        config
            .tasks
            .iter()
            .map(|d| (d.name.as_str(), d.args.as_str())),
    )
    .context("Failed to register tasks")?;

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read episode from stdin")?;
    let episode: Episode = serde_json::from_str(&raw).context("Failed to parse episode JSON")?;
    let Some(ctx) = episode.context() else {
        bail!("Episode has no outputs to score");
    };
    if !ctx.provides(lib.requirements()) {
        bail!(
            "Episode lacks neighbor data the configured tasks need: {:?}",
            lib.requirements()
        );
    }

    let report: Vec<TaskReward<'_>> = lib
        .iter()
        .zip(lib.evaluate_all(&ctx))
        .map(|(entry, reward)| TaskReward {
            id: entry.id(),
            name: entry.name(),
            reward,
        })
        .collect();

    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write report")?;
    Ok(())
}
