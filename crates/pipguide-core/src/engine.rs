//! The tutorial progression engine.
//!
//! [`TutorialEngine`] owns the current section/step pointer, the completion
//! sets, and the session flags, and is the only mutator of
//! [`TutorialProgress`]. The presentation layer reads state through the
//! accessors and invokes the navigation operations; it never mutates state
//! directly.
//!
//! Navigation operations follow a log-and-degrade contract: they return
//! nothing, lookup misses are silent no-ops, and storage failures are
//! logged without ever corrupting the in-memory state. The in-memory value
//! is always the most recent operation's result regardless of persistence
//! outcome. Construction (the builder and `initialize`) is the only path
//! that surfaces errors.

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    catalog::{ScreenMap, TutorialCatalog, TutorialSection, TutorialStep},
    error::{Result, TutorialError},
    progress::TutorialProgress,
    store::StateStore,
};

/// State machine over two axes: which section is active (or none), and
/// which step within that section is active.
///
/// Terminal condition: `has_completed_tutorial` with no active section.
pub struct TutorialEngine {
    store_path: PathBuf,
    catalog: TutorialCatalog,
    screen_map: ScreenMap,
    progress: TutorialProgress,
    show_tutorial: bool,
    is_first_launch: bool,
}

impl TutorialEngine {
    fn new(store_path: PathBuf, catalog: TutorialCatalog, screen_map: ScreenMap) -> Self {
        Self {
            store_path,
            catalog,
            screen_map,
            progress: TutorialProgress::default(),
            show_tutorial: false,
            is_first_launch: false,
        }
    }

    // ------------------------------------------------------------------
    // Read accessors for the presentation layer
    // ------------------------------------------------------------------

    /// Read-only snapshot of the persisted progress state.
    pub fn progress(&self) -> &TutorialProgress {
        &self.progress
    }

    /// Whether the overlay should currently render.
    pub fn show_tutorial(&self) -> bool {
        self.show_tutorial
    }

    /// Whether this process start was the first-ever launch. Computed once
    /// during `initialize` from the launch marker.
    pub fn is_first_launch(&self) -> bool {
        self.is_first_launch
    }

    /// The content catalog the engine navigates over.
    pub fn catalog(&self) -> &TutorialCatalog {
        &self.catalog
    }

    /// The active section resolved against the catalog, or `None`.
    pub fn current_section(&self) -> Option<&TutorialSection> {
        self.progress
            .current_section
            .as_deref()
            .and_then(|id| self.catalog.section(id))
    }

    /// Zero-based index of the active step within the active section.
    pub fn current_step_index(&self) -> usize {
        self.progress.current_step_index
    }

    /// The active step, or `None` when no section is active.
    pub fn current_step(&self) -> Option<&TutorialStep> {
        self.current_section()
            .and_then(|section| section.step(self.progress.current_step_index))
    }

    // ------------------------------------------------------------------
    // Navigation operations
    // ------------------------------------------------------------------

    /// Loads persisted state and computes the session flags.
    ///
    /// Determines `is_first_launch` from the launch marker (absent means
    /// first launch, and the marker is written). A missing, unreadable, or
    /// malformed progress record degrades to full defaults. A persisted
    /// section id that no longer resolves against the catalog is cleared.
    /// On a first launch with the tutorial not yet complete, the tutorial
    /// is shown and `start` is invoked.
    ///
    /// Must complete before any other operation is invoked.
    pub async fn initialize(&mut self) {
        let store_path = self.store_path.clone();
        let loaded = task::spawn_blocking(move || -> Result<(bool, Option<TutorialProgress>)> {
            let mut store = StateStore::new(&store_path)?;
            let launched_before = store.has_launched()?;
            if !launched_before {
                store.mark_launched()?;
            }
            let progress = store.load_progress()?;
            Ok((launched_before, progress))
        })
        .await;

        let (launched_before, stored) = match loaded {
            Ok(Ok(state)) => state,
            Ok(Err(e)) => {
                log::warn!("Failed to read tutorial state, using defaults: {e}");
                (true, None)
            }
            Err(e) => {
                log::warn!("State load task failed to run, using defaults: {e}");
                (true, None)
            }
        };

        self.is_first_launch = !launched_before;
        self.progress = stored.unwrap_or_default();
        self.show_tutorial = false;

        // A content update may have removed the stored section.
        if let Some(section_id) = self.progress.current_section.clone() {
            match self.catalog.section(&section_id) {
                None => {
                    log::warn!("Stored section '{section_id}' is not in the catalog; clearing it");
                    self.progress.current_section = None;
                    self.progress.current_step_index = 0;
                }
                Some(section) => {
                    if self.progress.current_step_index >= section.step_count() {
                        log::warn!(
                            "Stored step index {} is out of bounds for section '{section_id}'; resetting to 0",
                            self.progress.current_step_index
                        );
                        self.progress.current_step_index = 0;
                    }
                }
            }
        }

        if self.is_first_launch && !self.progress.has_completed_tutorial {
            self.show_tutorial = true;
            self.start().await;
        }
    }

    /// Begins (or restarts) the tutorial at the entry section.
    ///
    /// The entry section is the first required section in catalog order,
    /// or the first section overall if none are required. Calling this
    /// mid-tutorial restarts progression without clearing the completion
    /// sets.
    pub async fn start(&mut self) {
        let Some(entry_id) = self.catalog.entry_section().map(|s| s.id.clone()) else {
            log::warn!("Cannot start tutorial: catalog has no sections");
            return;
        };

        self.progress.current_section = Some(entry_id);
        self.progress.current_step_index = 0;
        self.progress.has_seen_intro = true;
        self.show_tutorial = true;
        self.progress.touch();
        self.persist().await;
    }

    /// Skips the tutorial. Skipping is treated as equivalent to
    /// completion so the welcome flow never reappears automatically.
    pub async fn skip(&mut self) {
        self.progress.current_section = None;
        self.progress.current_step_index = 0;
        self.progress.has_seen_intro = true;
        self.progress.has_completed_tutorial = true;
        self.show_tutorial = false;
        self.progress.touch();
        self.persist().await;
    }

    /// Advances to the next step, or completes the section when already at
    /// its last step. No-op without an active section.
    ///
    /// The step being left is recorded into `completed_steps`; the final
    /// step of a section never is. Section completion is tracked at the
    /// section granularity only.
    pub async fn advance(&mut self) {
        let Some(section_id) = self.progress.current_section.clone() else {
            return;
        };
        let index = self.progress.current_step_index;
        let (step_count, outgoing_step) = match self.catalog.section(&section_id) {
            Some(section) => (
                section.step_count(),
                section.step(index).map(|step| step.id.clone()),
            ),
            None => return,
        };

        if index + 1 < step_count {
            if let Some(step_id) = outgoing_step {
                self.progress.completed_steps.insert(step_id);
            }
            self.progress.current_step_index += 1;
            self.progress.touch();
            self.persist().await;
        } else {
            self.complete_section(&section_id).await;
        }
    }

    /// Steps back within the active section. No-op at index 0 or without
    /// an active section. Never mutates `completed_steps`.
    pub async fn retreat(&mut self) {
        if self.progress.current_section.is_none() || self.progress.current_step_index == 0 {
            return;
        }
        self.progress.current_step_index -= 1;
        self.progress.touch();
        self.persist().await;
    }

    /// Jumps to the start of `section_id` and shows the overlay. Silent
    /// no-op when the section is not in the catalog.
    ///
    /// Unlike `start` and `show_for_screen`, this does not set
    /// `has_seen_intro`: direct navigation is an already-engaged path, not
    /// a first-time entry point.
    pub async fn go_to_section(&mut self, section_id: &str) {
        if self.catalog.section(section_id).is_none() {
            log::debug!("Ignoring navigation to unknown section '{section_id}'");
            return;
        }

        self.progress.current_section = Some(section_id.to_string());
        self.progress.current_step_index = 0;
        self.show_tutorial = true;
        self.progress.touch();
        self.persist().await;
    }

    /// Marks `section_id` complete and activates the next incomplete
    /// required section in catalog order; with none left, the tutorial
    /// reaches its terminal state.
    pub async fn complete_section(&mut self, section_id: &str) {
        self.progress
            .completed_sections
            .insert(section_id.to_string());

        let next_required = self
            .catalog
            .next_required_section(&self.progress.completed_sections)
            .map(|s| s.id.clone());

        if let Some(next_id) = next_required {
            self.progress.current_section = Some(next_id);
            self.progress.current_step_index = 0;
        } else {
            let all_required_done = self
                .catalog
                .sections()
                .iter()
                .filter(|s| s.required)
                .all(|s| self.progress.completed_sections.contains(&s.id));

            // The defensive branch mirrors the scan above and cannot
            // currently fire; completion state still persists either way.
            if all_required_done {
                self.progress.current_section = None;
                self.progress.current_step_index = 0;
                self.progress.has_completed_tutorial = true;
                self.show_tutorial = false;
            }
        }

        self.progress.touch();
        self.persist().await;
    }

    /// Records `step_id` as completed without advancing. Exists so the
    /// presentation layer can track action-based steps independently of
    /// navigation.
    pub async fn mark_step_complete(&mut self, step_id: &str) {
        self.progress.completed_steps.insert(step_id.to_string());
        self.progress.touch();
        self.persist().await;
    }

    /// Discards progress back to the all-default value and deletes the
    /// persisted record. The launch marker survives: a reset does not make
    /// the app think it is a fresh install.
    pub async fn reset(&mut self) {
        self.progress = TutorialProgress::default();
        self.show_tutorial = false;

        let store_path = self.store_path.clone();
        let result = task::spawn_blocking(move || {
            let mut store = StateStore::new(&store_path)?;
            store.clear_progress()
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Failed to delete persisted tutorial progress: {e}"),
            Err(e) => log::warn!("Reset task failed to run: {e}"),
        }
    }

    /// Dismisses the overlay without implying skip or completion
    /// semantics. Nothing is persisted.
    pub fn hide(&mut self) {
        self.show_tutorial = false;
    }

    /// Shows contextual help for `screen`, with increasingly generic
    /// fallbacks so the operation always produces a navigable state.
    ///
    /// A mapped section containing a step anchored to the screen gets a
    /// direct jump to that step. A mapped section without such a step
    /// falls back to its start. An unmapped screen (or a mapping that no
    /// longer resolves) falls back to the default entry section.
    pub async fn show_for_screen(&mut self, screen: &str) {
        let mapped_id = self
            .screen_map
            .section_for(screen)
            .filter(|id| self.catalog.section(id).is_some())
            .map(String::from);

        let Some(section_id) = mapped_id else {
            let default_id = self.screen_map.default_section().to_string();
            self.go_to_section(&default_id).await;
            return;
        };

        let target_index = self
            .catalog
            .section(&section_id)
            .and_then(|section| section.step_for_screen(screen))
            .map(|(index, _)| index);

        match target_index {
            Some(index) => {
                self.progress.current_section = Some(section_id);
                self.progress.current_step_index = index;
                self.progress.has_seen_intro = true;
                self.show_tutorial = true;
                self.progress.touch();
                self.persist().await;
            }
            None => self.go_to_section(&section_id).await,
        }
    }

    /// Write-through of the in-memory progress snapshot.
    ///
    /// Runs on the blocking thread pool; a failed write is logged, never
    /// surfaced. Durability is best-effort, correctness of the current
    /// session is not.
    async fn persist(&self) {
        let store_path = self.store_path.clone();
        let snapshot = self.progress.clone();
        let result = task::spawn_blocking(move || {
            let mut store = StateStore::new(&store_path)?;
            store.save_progress(&snapshot)
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Failed to persist tutorial progress: {e}"),
            Err(e) => log::warn!("Persist task failed to run: {e}"),
        }
    }
}

/// Builder for creating and configuring [`TutorialEngine`] instances.
///
/// The engine has no ambient global instance; whatever needs it receives
/// the built instance by reference. Construct one per application start.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    store_path: Option<PathBuf>,
    catalog: Option<TutorialCatalog>,
    screen_map: Option<ScreenMap>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom state store file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pipguide/tutorial.db` or
    /// `~/.local/share/pipguide/tutorial.db`
    pub fn with_store_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Substitutes a custom content catalog for the built-in one.
    pub fn with_catalog(mut self, catalog: TutorialCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Substitutes a custom screen mapping for the built-in one.
    pub fn with_screen_map(mut self, screen_map: ScreenMap) -> Self {
        self.screen_map = Some(screen_map);
        self
    }

    /// Builds the engine and runs its initialization pass, so the returned
    /// instance is ready for navigation calls.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::FileSystem` if the store path is invalid
    /// Returns `TutorialError::Storage` if store initialization fails
    pub async fn build(self) -> Result<TutorialEngine> {
        let store_path = match self.store_path {
            Some(path) => path,
            None => Self::default_store_path()?,
        };

        if let Some(parent) = store_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TutorialError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Verify the store opens before handing out an engine.
        let store_path_clone = store_path.clone();
        task::spawn_blocking(move || {
            let _store = StateStore::new(&store_path_clone)?;
            Ok::<(), TutorialError>(())
        })
        .await
        .map_err(|e| TutorialError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let catalog = self.catalog.unwrap_or_else(TutorialCatalog::builtin);
        let screen_map = self.screen_map.unwrap_or_else(ScreenMap::builtin);

        let mut engine = TutorialEngine::new(store_path, catalog, screen_map);
        engine.initialize().await;
        Ok(engine)
    }

    /// Returns the default store path following XDG Base Directory
    /// specification.
    fn default_store_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pipguide")
            .place_data_file("tutorial.db")
            .map_err(|e| TutorialError::XdgDirectory(e.to_string()))
    }
}
