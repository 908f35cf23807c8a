//! Core library for the Pipguide onboarding tutorial.
//!
//! This crate provides the tutorial progression engine for the Pipguide
//! forex trading simulator: a static content catalog of sections and
//! steps, a small state machine that walks the user through them, and a
//! key-value persistence layer so progress survives across sessions.
//!
//! The engine is the single owner and mutator of the progress record. A
//! presentation layer (the bundled CLI, or an app shell embedding this
//! crate) reads state through accessors and drives transitions through
//! the navigation operations; rendering, animation, and theming are out
//! of scope here.
//!
//! # Quick Start
//!
//! ```rust
//! use pipguide_core::EngineBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Construct the engine once at application start; build() loads (or
//! // creates) the persisted state and, on a first launch, begins the
//! // tutorial at the entry section.
//! let mut engine = EngineBuilder::new()
//!     .with_store_path("tutorial.db")
//!     .build()
//!     .await?;
//!
//! if engine.show_tutorial() {
//!     if let Some(step) = engine.current_step() {
//!         println!("{}", step.title);
//!     }
//!     engine.advance().await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod display;
pub mod engine;
pub mod error;
pub mod progress;
pub mod store;

// Re-export commonly used types
pub use catalog::{
    InteractionKind, Placement, ScreenMap, TutorialCatalog, TutorialSection, TutorialStep,
};
pub use display::{OperationStatus, ProgressReport, SectionOutline, StepCard};
pub use engine::{EngineBuilder, TutorialEngine};
pub use error::{Result, TutorialError};
pub use progress::TutorialProgress;
pub use store::StateStore;
