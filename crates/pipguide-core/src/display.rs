//! Display wrapper types for formatting tutorial state.
//!
//! Domain models implement [`std::fmt::Display`] for standalone markdown
//! formatting; the wrappers here add context the models alone do not carry
//! (completion icons next to catalog sections, step position within a
//! section, session flags). All output is markdown suitable for the
//! terminal renderer in the CLI crate or plain printing.

use std::fmt;

use crate::{
    catalog::{TutorialSection, TutorialStep},
    progress::TutorialProgress,
};

/// Formats the catalog as an outline with per-section completion state.
///
/// Each section renders as one line: a status icon, the title, a
/// step-count progress indicator, and the duration label.
///
/// # Examples
///
/// ```rust
/// use pipguide_core::catalog::TutorialCatalog;
/// use pipguide_core::display::SectionOutline;
/// use pipguide_core::progress::TutorialProgress;
///
/// let catalog = TutorialCatalog::builtin();
/// let progress = TutorialProgress::default();
/// let outline = SectionOutline::new(catalog.sections(), &progress);
/// println!("{}", outline);
/// ```
pub struct SectionOutline<'a> {
    sections: &'a [TutorialSection],
    progress: &'a TutorialProgress,
}

impl<'a> SectionOutline<'a> {
    /// Create a new SectionOutline wrapper.
    pub fn new(sections: &'a [TutorialSection], progress: &'a TutorialProgress) -> Self {
        Self { sections, progress }
    }

    fn icon_for(&self, section: &TutorialSection) -> &'static str {
        if self.progress.is_section_completed(&section.id) {
            "✓"
        } else if self.progress.current_section.as_deref() == Some(section.id.as_str()) {
            "➤"
        } else {
            "○"
        }
    }
}

impl<'a> fmt::Display for SectionOutline<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sections.is_empty() {
            writeln!(f, "No tutorial sections available.")?;
            return Ok(());
        }

        writeln!(f, "# Tutorial sections")?;
        writeln!(f)?;
        for section in self.sections {
            let done = section
                .steps
                .iter()
                .filter(|step| self.progress.is_step_completed(&step.id))
                .count();
            let required = if section.required { " *(required)*" } else { "" };
            writeln!(
                f,
                "- {} **{}** ({}/{} steps, {}){required} — {}",
                self.icon_for(section),
                section.title,
                done,
                section.step_count(),
                section.duration_label,
                section.id,
            )?;
        }
        Ok(())
    }
}

/// Formats a single step in its section context.
///
/// Adds the section title and a "Step n of m" position line on top of the
/// step's own Display output, which is what the presentation layer needs
/// to compute first/last-step affordances.
pub struct StepCard<'a> {
    section: &'a TutorialSection,
    step: &'a TutorialStep,
    index: usize,
}

impl<'a> StepCard<'a> {
    /// Create a StepCard for the step at `index` within `section`.
    pub fn new(section: &'a TutorialSection, step: &'a TutorialStep, index: usize) -> Self {
        Self {
            section,
            step,
            index,
        }
    }
}

impl<'a> fmt::Display for StepCard<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} — Step {} of {}",
            self.section.title,
            self.index + 1,
            self.section.step_count()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.step)?;
        Ok(())
    }
}

/// Formats the overall session state: launch flags, overlay visibility,
/// and the progress record summary.
pub struct ProgressReport<'a> {
    progress: &'a TutorialProgress,
    is_first_launch: bool,
    show_tutorial: bool,
}

impl<'a> ProgressReport<'a> {
    /// Create a new ProgressReport wrapper.
    pub fn new(progress: &'a TutorialProgress, is_first_launch: bool, show_tutorial: bool) -> Self {
        Self {
            progress,
            is_first_launch,
            show_tutorial,
        }
    }
}

impl<'a> fmt::Display for ProgressReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Tutorial status")?;
        writeln!(f)?;
        writeln!(f, "- First launch: {}", self.is_first_launch)?;
        writeln!(f, "- Overlay visible: {}", self.show_tutorial)?;
        write!(f, "{}", self.progress)?;
        Ok(())
    }
}

/// Formats a one-line confirmation for an operation.
pub struct OperationStatus<'a> {
    message: &'a str,
}

impl<'a> OperationStatus<'a> {
    /// Create a status wrapper around a confirmation message.
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl<'a> fmt::Display for OperationStatus<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}**", self.message)
    }
}
