//! Pipguide CLI Application
//!
//! Command-line front end for the Pipguide onboarding tutorial engine.
//! Each invocation rebuilds the engine from the persisted state, runs one
//! operation, and renders the result, which makes the cross-session
//! persistence contract directly observable from the shell.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pipguide_core::{EngineBuilder, TutorialCatalog};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        state_file,
        catalog_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = EngineBuilder::new();
    if let Some(path) = state_file {
        builder = builder.with_store_path(path);
    }
    if let Some(path) = &catalog_file {
        let catalog = TutorialCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
        builder = builder.with_catalog(catalog);
    }

    let engine = builder
        .build()
        .await
        .context("Failed to initialize tutorial engine")?;

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(engine, renderer);

    info!("Pipguide started");

    match command {
        Some(Status) | None => cli.status(),
        Some(Show) => cli.show(),
        Some(Sections) => cli.sections(),
        Some(Start) => cli.start().await,
        Some(Next) => cli.next().await,
        Some(Back) => cli.back().await,
        Some(Skip) => cli.skip().await,
        Some(Hide) => cli.hide(),
        Some(Goto(args)) => cli.goto(args).await,
        Some(Screen(args)) => cli.screen(args).await,
        Some(CompleteStep(args)) => cli.complete_step(args).await,
        Some(CompleteSection(args)) => cli.complete_section(args).await,
        Some(Reset(args)) => cli.reset(args).await,
    }
}
