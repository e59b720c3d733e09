//! Show the effective configuration.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let (config, source) = Config::load(path.as_deref().map(Path::new))?;
    config.game_config()?;

    match source {
        Some(path) => println!("{} {}", "# loaded from".dimmed(), path.display()),
        None => println!("{}", "# no grove.toml found, showing defaults".dimmed()),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
