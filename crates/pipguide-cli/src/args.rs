//! Command-line argument definitions using clap's derive API.
//!
//! The CLI stands in for the mobile presentation layer: every engine
//! operation maps to one subcommand. Argument structs stay free of engine
//! types; the handler layer in [`crate::cli`] converts them into engine
//! calls.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Guided onboarding for the Pipguide forex trading simulator
///
/// Walks through the tutorial content section by section, persisting
/// progress between invocations. Running without a subcommand prints the
/// current tutorial status.
#[derive(Parser)]
#[command(version, about, name = "pipguide")]
pub struct Args {
    /// Path to the state store file. Defaults to
    /// $XDG_DATA_HOME/pipguide/tutorial.db
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Path to a JSON catalog file replacing the built-in content
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Pipguide CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Show overall tutorial status
    #[command(alias = "st")]
    Status,
    /// Show the current step card
    Show,
    /// List all tutorial sections with completion state
    #[command(aliases = ["l", "ls"])]
    Sections,
    /// Begin (or restart) the tutorial at the entry section
    Start,
    /// Advance to the next step
    #[command(alias = "n")]
    Next,
    /// Go back one step within the current section
    #[command(alias = "b")]
    Back,
    /// Skip the tutorial entirely
    Skip,
    /// Dismiss the overlay without skipping or completing
    Hide,
    /// Jump to the start of a section
    #[command(alias = "g")]
    Goto(GotoArgs),
    /// Show contextual help for a simulator screen
    Screen(ScreenArgs),
    /// Record a step as completed without navigating
    CompleteStep(CompleteStepArgs),
    /// Mark a section complete and move on
    CompleteSection(CompleteSectionArgs),
    /// Discard all tutorial progress
    Reset(ResetArgs),
}

/// Jump to the start of a section
#[derive(ClapArgs)]
pub struct GotoArgs {
    /// Identifier of the section to jump to (see `sections`)
    pub section_id: String,
}

/// Show contextual help for a simulator screen
#[derive(ClapArgs)]
pub struct ScreenArgs {
    /// Screen name, e.g. DashboardScreen or TradeScreen
    pub screen: String,
}

/// Record a step as completed without navigating
#[derive(ClapArgs)]
pub struct CompleteStepArgs {
    /// Identifier of the step to record
    pub step_id: String,
}

/// Mark a section complete and move on
#[derive(ClapArgs)]
pub struct CompleteSectionArgs {
    /// Identifier of the section to mark complete
    pub section_id: String,
}

/// Discard all tutorial progress
#[derive(ClapArgs)]
pub struct ResetArgs {
    /// Confirm the reset (required to prevent accidental data loss)
    #[arg(long)]
    pub confirm: bool,
}
