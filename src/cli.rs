// src/cli.rs - Command-line surface: one subcommand per renderer
use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{self, Config, ConfigError, RenderOptions};
use crate::pin::{DuplicatePolicy, NameError};
use crate::registry::{Registry, RegistryError};
use crate::render::{self, RenderError};

#[derive(Parser, Debug)]
#[command(
    name = "pinmap-gen",
    author,
    version,
    about = "Generate FastGPIO pin macros, pin tables and editor keywords from AVR pin layouts"
)]
pub struct Cli {
    /// TOML file with render options and extra chip layouts
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// How to treat two pins with the same symbolic name
    #[arg(long, value_enum, global = true)]
    pub policy: Option<DuplicatePolicy>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `keywords` over every chip
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sorted keyword list for the Arduino editor (keywords.txt)
    Keywords {
        /// Chips to merge; all chips when omitted
        chips: Vec<String>,
    },
    /// `#define IO_xx <number>` lines for one chip
    Macros { chip: String },
    /// The pin struct array for one chip
    Array { chip: String },
    /// HTML pin reference table for one chip
    Table { chip: String },
    /// The complete chip-selection section of FastGPIO.h
    Header {
        /// Chips to include, in order; all chips when omitted
        chips: Vec<String>,
    },
    /// List known chips
    Chips,
}

impl Default for Command {
    fn default() -> Self {
        Command::Keywords { chips: Vec::new() }
    }
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Names(#[from] NameError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("config path is not valid UTF-8: {0}")]
    ConfigPath(PathBuf),
}

/// Build the chip registry and render options from the command line.
pub fn load(cli: &Cli) -> Result<(Registry, RenderOptions), CommandError> {
    let config = match &cli.config {
        Some(path) => {
            let path_str = path.to_str().ok_or_else(|| CommandError::ConfigPath(path.clone()))?;
            tracing::info!("Loading configuration from: {}", path_str);
            config::load_config(path_str)?
        }
        None => Config::default(),
    };
    let registry = Registry::from_config(&config)?;
    let mut options = config.render;
    if let Some(policy) = cli.policy {
        options.duplicate_policy = policy;
    }
    tracing::info!("{} chip(s) registered, duplicate policy {:?}", registry.len(), options.duplicate_policy);
    Ok((registry, options))
}

/// Render the output of `command`. Nothing is printed.
pub fn run(command: &Command, registry: &Registry, options: &RenderOptions) -> Result<String, CommandError> {
    let output = match command {
        Command::Keywords { chips } => {
            let chips = registry.select(chips)?;
            tracing::info!("Generating keywords for {} chip(s)", chips.len());
            render::keywords(chips.iter().map(|c| &c.pins), options)?
        }
        Command::Macros { chip } => {
            let chip = registry.get(chip)?;
            tracing::info!("Generating pin macros for {}", chip.name);
            let names = chip.pins.symbolic_names(options.duplicate_policy)?;
            render::macro_definitions(&names)
        }
        Command::Array { chip } => {
            let chip = registry.get(chip)?;
            tracing::info!("Generating pin array for {}", chip.name);
            render::array_literal(&chip.pins, options)
        }
        Command::Table { chip } => {
            let chip = registry.get(chip)?;
            tracing::info!("Generating pin table for {}", chip.name);
            render::html_table(&chip.pins)
        }
        Command::Header { chips } => {
            let chips = registry.select(chips)?;
            tracing::info!("Generating header section for {} chip(s)", chips.len());
            render::header_section(&chips, options)?
        }
        Command::Chips => registry
            .chips()
            .iter()
            .map(|chip| format!("{}\t{} pins\t{}\n", chip.name, chip.pins.len(), chip.mcu.join(" ")))
            .collect(),
    };
    Ok(output)
}

/// Write `text`, adding a final newline when it lacks one.
pub fn puts<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
