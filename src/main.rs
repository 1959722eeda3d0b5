//=========================================================================
// spot-diff
//=========================================================================
//
// Usage: spot-diff [CONFIG]
//
// Config lookup: CONFIG argument, then $SPOT_DIFF_CONFIG, then
// ./spot_diff.toml, then built-in defaults. RUST_LOG filters logging
// (default: info).
//
//=========================================================================

use anyhow::Context;
use log::info;

use spot_diff::{EngineBuilder, GameConfig};

const CONFIG_ENV: &str = "SPOT_DIFF_CONFIG";

fn load_config() -> anyhow::Result<GameConfig> {
    let explicit = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV));

    match explicit {
        Some(path) => {
            info!("Loading config from {}", path.to_string_lossy());
            GameConfig::load_from_file(&path)
                .with_context(|| format!("loading {}", path.to_string_lossy()))
        }
        None => GameConfig::load_or_default().context("loading default config"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    EngineBuilder::new()
        .with_config(config)
        .build()
        .context("starting game")?
        .run()?;

    Ok(())
}
