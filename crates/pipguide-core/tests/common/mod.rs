use std::path::PathBuf;

use pipguide_core::{
    EngineBuilder, TutorialCatalog, TutorialEngine, TutorialSection, TutorialStep,
};
use tempfile::TempDir;

/// Helper function to create a test engine backed by a temp store.
pub async fn create_test_engine() -> (TempDir, TutorialEngine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("test.db");
    let engine = EngineBuilder::new()
        .with_store_path(&store_path)
        .build()
        .await
        .expect("Failed to build engine");
    (temp_dir, engine)
}

/// Helper function to create a test engine with a custom catalog.
pub async fn create_engine_with_catalog(
    catalog: TutorialCatalog,
) -> (TempDir, PathBuf, TutorialEngine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("test.db");
    let engine = EngineBuilder::new()
        .with_store_path(&store_path)
        .with_catalog(catalog)
        .build()
        .await
        .expect("Failed to build engine");
    (temp_dir, store_path, engine)
}

fn section(id: &str, required: bool, steps: Vec<TutorialStep>) -> TutorialSection {
    TutorialSection {
        id: id.to_string(),
        title: id.to_uppercase(),
        description: format!("Section {id}"),
        icon: "dot".to_string(),
        color: "gray".to_string(),
        duration_label: "1 min".to_string(),
        required,
        steps,
    }
}

/// Three-section catalog used by the progression scenarios: required A
/// with two steps, required B with one step, optional C with two steps.
pub fn abc_catalog() -> TutorialCatalog {
    TutorialCatalog::new(vec![
        section(
            "a",
            true,
            vec![
                TutorialStep::new("a1", "A step 1", "First step of A"),
                TutorialStep::new("a2", "A step 2", "Second step of A"),
            ],
        ),
        section(
            "b",
            true,
            vec![TutorialStep::new("b1", "B step 1", "Only step of B")],
        ),
        section(
            "c",
            false,
            vec![
                TutorialStep::new("c1", "C step 1", "First step of C"),
                TutorialStep::new("c2", "C step 2", "Second step of C"),
            ],
        ),
    ])
    .expect("abc catalog is valid")
}
