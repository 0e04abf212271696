// src/main.rs - pinmap-gen entry point
use clap::Parser;
use pinmap_gen::cli::{self, Cli};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for generated text
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting pinmap-gen {}", env!("CARGO_PKG_VERSION"));

    let (registry, options) = cli::load(&cli).map_err(|e| {
        tracing::error!("Failed to load chip layouts: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    let output = cli::run(&cli.command(), &registry, &options).map_err(|e| {
        tracing::error!("Generation failed: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    cli::puts(&mut std::io::stdout().lock(), &output)?;
    Ok(())
}
