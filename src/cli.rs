//! Command-line arguments for the terminal binary.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::SimConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunArgs {
    /// JSON file with a [`SimConfig`]
    pub config: Option<PathBuf>,
    /// Spawner seed; taken from the clock when absent
    pub seed: Option<u32>,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<RunArgs> {
    let mut out = RunArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                out.seed = Some(seed);
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

impl RunArgs {
    /// Load the config file, or the defaults when none was given.
    pub fn load_config(&self) -> Result<SimConfig> {
        let Some(path) = &self.config else {
            return Ok(SimConfig::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        SimConfig::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }
}
