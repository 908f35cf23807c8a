//! The persisted tutorial progress record.

use std::collections::BTreeSet;
use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Durable snapshot of navigation and completion state.
///
/// Created with all-default values on first-ever run and loaded from the
/// state store on every later launch. Every field carries a serde default
/// so records written by older builds (or hand-edited ones with missing
/// fields) deserialize to the documented defaults instead of failing.
///
/// Derived session state (`is_first_launch`, `show_tutorial`, the resolved
/// section object) is intentionally not part of this record; the engine
/// recomputes it at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorialProgress {
    /// Identifier of the active section, or none when no section is active
    #[serde(default)]
    pub current_section: Option<String>,

    /// Zero-based index into the active section's step sequence
    #[serde(default)]
    pub current_step_index: usize,

    /// Identifiers of completed sections (set semantics)
    #[serde(default)]
    pub completed_sections: BTreeSet<String>,

    /// Identifiers of completed steps (set semantics)
    #[serde(default)]
    pub completed_steps: BTreeSet<String>,

    /// Whether the welcome flow has been seen
    #[serde(default)]
    pub has_seen_intro: bool,

    /// Whether the tutorial has been finished or skipped
    #[serde(default)]
    pub has_completed_tutorial: bool,

    /// Updated on every mutation
    #[serde(default)]
    pub last_active: Timestamp,
}

impl Default for TutorialProgress {
    fn default() -> Self {
        Self {
            current_section: None,
            current_step_index: 0,
            completed_sections: BTreeSet::new(),
            completed_steps: BTreeSet::new(),
            has_seen_intro: false,
            has_completed_tutorial: false,
            last_active: Timestamp::default(),
        }
    }
}

impl TutorialProgress {
    /// Stamps the record with the current time. Called by the engine on
    /// every mutation, right before the write-through.
    pub fn touch(&mut self) {
        self.last_active = Timestamp::now();
    }

    /// Total number of completed sections.
    pub fn completed_section_count(&self) -> usize {
        self.completed_sections.len()
    }

    /// Whether `section_id` has been completed.
    pub fn is_section_completed(&self, section_id: &str) -> bool {
        self.completed_sections.contains(section_id)
    }

    /// Whether `step_id` has been recorded as completed.
    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.completed_steps.contains(step_id)
    }
}

impl fmt::Display for TutorialProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.current_section {
            Some(section) => writeln!(
                f,
                "- Active: {section} (step {})",
                self.current_step_index + 1
            )?,
            None => writeln!(f, "- Active: none")?,
        }
        writeln!(f, "- Sections completed: {}", self.completed_sections.len())?;
        writeln!(f, "- Steps completed: {}", self.completed_steps.len())?;
        writeln!(f, "- Intro seen: {}", self.has_seen_intro)?;
        writeln!(f, "- Tutorial complete: {}", self.has_completed_tutorial)?;
        Ok(())
    }
}
