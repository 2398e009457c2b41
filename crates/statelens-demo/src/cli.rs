#![forbid(unsafe_code)]

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};
use crate::scenario::{ScenarioArgs, render_text, run_scenario};

const MAX_CLICKS: u32 = 10_000;

#[derive(Debug, Parser)]
#[command(
    name = "statelens-demo",
    about = "Click two counters and watch memoized selectors react",
    version
)]
pub struct Cli {
    /// Clicks applied to the first counter.
    #[arg(long, env = "STATELENS_DEMO_CLICKS", default_value_t = 3)]
    pub clicks: u32,

    /// Clicks applied to the second counter.
    #[arg(long = "clicks2", env = "STATELENS_DEMO_CLICKS2", default_value_t = 2)]
    pub clicks2: u32,

    /// Re-publish the final state of both counters unchanged afterwards.
    #[arg(long = "repeat-last", env = "STATELENS_DEMO_REPEAT_LAST")]
    pub repeat_last: bool,

    /// Hold the button subscription paused while clicking.
    #[arg(long, env = "STATELENS_DEMO_PAUSE")]
    pub pause: bool,

    /// Print the report as JSON instead of text.
    #[arg(long, env = "STATELENS_DEMO_JSON")]
    pub json: bool,

    /// Log filter directive, e.g. `statelens_runtime=trace`.
    #[arg(long, env = "STATELENS_LOG", default_value = "warn")]
    pub log: String,
}

impl Cli {
    fn scenario_args(&self) -> Result<ScenarioArgs> {
        for (flag, clicks) in [("--clicks", self.clicks), ("--clicks2", self.clicks2)] {
            if clicks > MAX_CLICKS {
                return Err(DemoError::invalid(format!(
                    "{flag} must be at most {MAX_CLICKS}, got {clicks}"
                )));
            }
        }
        Ok(ScenarioArgs {
            clicks1: self.clicks,
            clicks2: self.clicks2,
            repeat_last: self.repeat_last,
            pause: self.pause,
        })
    }
}

fn init_tracing(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let args = cli.scenario_args()?;
    let report = run_scenario(&args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render_text(&report, &mut out)?;
    }
    Ok(())
}
