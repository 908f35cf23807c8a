//! Command handlers bridging parsed arguments to engine operations.
//!
//! Each handler invokes exactly one engine operation and renders the
//! resulting state. The engine's operations are silent no-ops on unknown
//! identifiers; where a friendlier message helps, the handler checks the
//! catalog first and reports "nothing changed" itself.

use anyhow::Result;
use pipguide_core::{
    OperationStatus, ProgressReport, SectionOutline, StepCard, TutorialEngine,
};

use crate::args::{
    CompleteSectionArgs, CompleteStepArgs, GotoArgs, ResetArgs, ScreenArgs,
};
use crate::renderer::TerminalRenderer;

/// CLI command dispatcher owning the engine and renderer.
pub struct Cli {
    engine: TutorialEngine,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(engine: TutorialEngine, renderer: TerminalRenderer) -> Self {
        Self { engine, renderer }
    }

    /// Show overall tutorial status.
    pub fn status(&self) -> Result<()> {
        let report = ProgressReport::new(
            self.engine.progress(),
            self.engine.is_first_launch(),
            self.engine.show_tutorial(),
        );
        self.renderer.render(&report.to_string())
    }

    /// Show the current step card, or a notice when nothing is active.
    pub fn show(&self) -> Result<()> {
        self.render_current_step()
    }

    /// List all sections with completion state.
    pub fn sections(&self) -> Result<()> {
        let outline = SectionOutline::new(
            self.engine.catalog().sections(),
            self.engine.progress(),
        );
        self.renderer.render(&outline.to_string())
    }

    /// Begin (or restart) the tutorial.
    pub async fn start(&mut self) -> Result<()> {
        self.engine.start().await;
        self.render_current_step()
    }

    /// Advance one step.
    pub async fn next(&mut self) -> Result<()> {
        self.engine.advance().await;
        if self.engine.progress().has_completed_tutorial {
            return self.render_message("All required sections complete. Tutorial finished.");
        }
        self.render_current_step()
    }

    /// Go back one step.
    pub async fn back(&mut self) -> Result<()> {
        self.engine.retreat().await;
        self.render_current_step()
    }

    /// Skip the tutorial entirely.
    pub async fn skip(&mut self) -> Result<()> {
        self.engine.skip().await;
        self.render_message("Tutorial skipped. It will not reappear automatically.")
    }

    /// Dismiss the overlay only.
    pub fn hide(&mut self) -> Result<()> {
        self.engine.hide();
        self.render_message("Overlay hidden.")
    }

    /// Jump to a section by id.
    pub async fn goto(&mut self, args: GotoArgs) -> Result<()> {
        if self.engine.catalog().section(&args.section_id).is_none() {
            let message = format!(
                "Unknown section '{}'; nothing changed. Run `pipguide sections` to list ids.",
                args.section_id
            );
            return self.render_message(&message);
        }
        self.engine.go_to_section(&args.section_id).await;
        self.render_current_step()
    }

    /// Contextual help for a simulator screen.
    pub async fn screen(&mut self, args: ScreenArgs) -> Result<()> {
        self.engine.show_for_screen(&args.screen).await;
        self.render_current_step()
    }

    /// Record a step as completed without navigating.
    pub async fn complete_step(&mut self, args: CompleteStepArgs) -> Result<()> {
        self.engine.mark_step_complete(&args.step_id).await;
        let message = format!("Recorded step '{}' as complete.", args.step_id);
        self.render_message(&message)
    }

    /// Mark a section complete and move on.
    pub async fn complete_section(&mut self, args: CompleteSectionArgs) -> Result<()> {
        self.engine.complete_section(&args.section_id).await;
        if self.engine.progress().has_completed_tutorial {
            return self.render_message("All required sections complete. Tutorial finished.");
        }
        self.sections()
    }

    /// Discard all tutorial progress.
    pub async fn reset(&mut self, args: ResetArgs) -> Result<()> {
        if !args.confirm {
            return self.render_message("Reset discards all progress; re-run with --confirm.");
        }
        self.engine.reset().await;
        self.render_message("Tutorial progress reset.")
    }

    fn render_current_step(&self) -> Result<()> {
        match (self.engine.current_section(), self.engine.current_step()) {
            (Some(section), Some(step)) => {
                let card = StepCard::new(section, step, self.engine.current_step_index());
                self.renderer.render(&card.to_string())
            }
            _ => self.render_message("No active tutorial step."),
        }
    }

    fn render_message(&self, message: &str) -> Result<()> {
        self.renderer.render(&OperationStatus::new(message).to_string())
    }
}
