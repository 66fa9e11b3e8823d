//! # CLI Layer
//!
//! One client of the library. This module is the only place that:
//! - Knows about terminal output and exit codes
//! - Reads command-line literals into [`Value`](strongly_typed::Value)s
//! - Locates the config file
//!
//! Conversion and validation all happen in the library; handlers here only
//! translate arguments into library calls and results into lines of text.

mod commands;
mod print;

use crate::args::{Cli, Commands};
use directories::ProjectDirs;
use log::debug;
use strongly_typed::{
    Coercer, CoercerConfig, CoercionError, ConfigError, DeclarationError, ModelError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

pub fn run(cli: Cli) -> Result<()> {
    let coercer = init_coercer(&cli)?;

    match cli.command {
        Commands::Coerce { value, to, kind } => commands::coerce(&coercer, &value, &to, kind),
        Commands::Build {
            attrs,
            positional,
            name,
            values,
        } => commands::build(&coercer, &name, &attrs, positional, &values),
        Commands::Types => {
            print::print_types();
            Ok(())
        }
    }
}

/// Config comes from `--config` or the user config dir; `--utc-offset` wins
/// over both.
fn init_coercer(cli: &Cli) -> Result<Coercer> {
    let config_dir = match &cli.config {
        Some(dir) => Some(dir.clone()),
        None => ProjectDirs::from("com", "strongly-typed", "strongly-typed")
            .map(|dirs| dirs.config_dir().to_path_buf()),
    };

    let mut config = match &config_dir {
        Some(dir) => CoercerConfig::load(dir)?,
        None => CoercerConfig::default(),
    };
    if let Some(offset) = &cli.utc_offset {
        config.utc_offset = Some(offset.clone());
    }

    let coercer = Coercer::from_config(&config)?;
    debug!(
        "config dir {:?}, normalizing times to {}",
        config_dir,
        coercer.local_offset()
    );
    Ok(coercer)
}
