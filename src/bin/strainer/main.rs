//! strainer - plays an arpeggio through the engine on the default output
//!
//! Run with: cargo run -- [config.json]
//!           cargo run -- --params     (print the parameter table as JSON)

mod player;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use strainer_dsp::{params::descriptors, EngineConfig};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--params") {
        println!("{}", serde_json::to_string_pretty(descriptors())?);
        return Ok(());
    }

    let config = match arg {
        Some(path) => {
            let json = std::fs::read_to_string(&path).wrap_err_with(|| format!("failed to read {path}"))?;
            EngineConfig::from_json(&json).wrap_err_with(|| format!("invalid config in {path}"))?
        }
        None => EngineConfig::default(),
    };

    player::run(config)
}
