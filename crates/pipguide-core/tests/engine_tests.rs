mod common;

use common::{abc_catalog, create_engine_with_catalog, create_test_engine};
use pipguide_core::EngineBuilder;

#[tokio::test]
async fn test_advance_is_monotonic_and_bounded() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    assert_eq!(engine.current_section().unwrap().id, "a");

    let step_count = engine.current_section().unwrap().step_count();
    let mut last_index = engine.current_step_index();

    // Within a section the index never decreases and never exceeds the
    // last step before section completion takes over.
    while engine.current_section().map(|s| s.id.clone()) == Some("a".to_string()) {
        engine.advance().await;
        let index = engine.current_step_index();
        if engine.current_section().map(|s| s.id.as_str() == "a") == Some(true) {
            assert!(index >= last_index);
            assert!(index < step_count);
            last_index = index;
        }
    }
}

#[tokio::test]
async fn test_required_section_walkthrough() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;

    // A has two steps: one advance moves within it, the second completes it.
    assert_eq!(engine.current_section().unwrap().id, "a");
    assert_eq!(engine.current_step_index(), 0);

    engine.advance().await;
    assert_eq!(engine.current_step_index(), 1);

    engine.advance().await;
    assert_eq!(engine.current_section().unwrap().id, "b");
    assert_eq!(engine.current_step_index(), 0);
    assert!(engine.progress().is_section_completed("a"));

    // B's only step is its last: advancing completes it, and with no
    // required section left the tutorial reaches its terminal state.
    engine.advance().await;
    assert!(engine.progress().has_completed_tutorial);
    assert!(engine.current_section().is_none());
    assert!(!engine.show_tutorial());
    assert!(engine.progress().is_section_completed("a"));
    assert!(engine.progress().is_section_completed("b"));

    // C is never required and never auto-visited.
    assert!(!engine.progress().is_section_completed("c"));
}

#[tokio::test]
async fn test_complete_section_is_idempotent() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;

    engine.complete_section("a").await;
    let after_first = engine.progress().completed_sections.clone();

    engine.complete_section("a").await;
    assert_eq!(engine.progress().completed_sections, after_first);
}

#[tokio::test]
async fn test_completed_tutorial_implies_no_active_section() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    engine.complete_section("a").await;
    engine.complete_section("b").await;

    assert!(engine.progress().has_completed_tutorial);
    assert!(engine.current_section().is_none());
    assert!(!engine.show_tutorial());
}

#[tokio::test]
async fn test_skip_marks_intro_and_completion() {
    let (_temp_dir, mut engine) = create_test_engine().await;
    engine.skip().await;

    assert!(engine.progress().has_seen_intro);
    assert!(engine.progress().has_completed_tutorial);
    assert!(!engine.show_tutorial());
    assert!(engine.current_section().is_none());
}

#[tokio::test]
async fn test_skip_holds_regardless_of_prior_state() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    engine.advance().await;
    engine.skip().await;

    assert!(engine.progress().has_seen_intro);
    assert!(engine.progress().has_completed_tutorial);
    assert!(!engine.show_tutorial());
}

#[tokio::test]
async fn test_progress_round_trips_across_engines() {
    let (_temp_dir, store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    engine.advance().await;
    engine.mark_step_complete("c1").await;
    let saved = engine.progress().clone();
    drop(engine);

    let reloaded = EngineBuilder::new()
        .with_store_path(&store_path)
        .with_catalog(abc_catalog())
        .build()
        .await
        .expect("Failed to rebuild engine");

    assert_eq!(reloaded.progress(), &saved);
    assert!(!reloaded.is_first_launch());
}

#[tokio::test]
async fn test_reset_then_initialize_keeps_launch_marker() {
    let (_temp_dir, mut engine) = create_test_engine().await;
    engine.advance().await;
    engine.reset().await;
    engine.initialize().await;

    // The launch marker survives a reset, so this is not treated as a
    // fresh install and nothing auto-starts.
    assert!(!engine.is_first_launch());
    assert_eq!(engine.progress(), &Default::default());
    assert!(!engine.show_tutorial());
    assert!(engine.current_section().is_none());
}

#[tokio::test]
async fn test_go_to_unknown_section_changes_nothing() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    let before = engine.progress().clone();
    let show_before = engine.show_tutorial();

    engine.go_to_section("nonexistent").await;

    assert_eq!(engine.progress(), &before);
    assert_eq!(engine.show_tutorial(), show_before);
}

#[tokio::test]
async fn test_show_for_unmapped_screen_falls_back_to_entry() {
    let (_temp_dir, mut engine) = create_test_engine().await;
    engine.skip().await;

    engine.show_for_screen("ScreenX").await;

    assert_eq!(engine.current_section().unwrap().id, "quick-start");
    assert_eq!(engine.current_step_index(), 0);
    assert!(engine.show_tutorial());
}

#[tokio::test]
async fn test_show_for_mapped_screen_jumps_to_target_step() {
    let (_temp_dir, mut engine) = create_test_engine().await;
    engine.skip().await;
    assert!(!engine.show_tutorial());

    engine.show_for_screen("PortfolioScreen").await;

    // risk-management's first step anchored to PortfolioScreen is
    // margin-meter at index 1.
    assert_eq!(engine.current_section().unwrap().id, "risk-management");
    assert_eq!(engine.current_step_index(), 1);
    assert_eq!(engine.current_step().unwrap().id, "margin-meter");
    assert!(engine.show_tutorial());
    assert!(engine.progress().has_seen_intro);
}

#[tokio::test]
async fn test_mark_step_complete_is_set_insert() {
    let (_temp_dir, mut engine) = create_test_engine().await;

    engine.mark_step_complete("welcome").await;
    engine.mark_step_complete("welcome").await;

    assert!(engine.progress().is_step_completed("welcome"));
    assert_eq!(
        engine
            .progress()
            .completed_steps
            .iter()
            .filter(|id| id.as_str() == "welcome")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_start_mid_tutorial_keeps_completion_sets() {
    let (_temp_dir, _store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.start().await;
    engine.advance().await;
    engine.advance().await;
    assert!(engine.progress().is_section_completed("a"));
    assert!(engine.progress().is_step_completed("a1"));

    engine.start().await;

    assert_eq!(engine.current_section().unwrap().id, "a");
    assert_eq!(engine.current_step_index(), 0);
    assert!(engine.progress().is_section_completed("a"));
    assert!(engine.progress().is_step_completed("a1"));
}

#[tokio::test]
async fn test_stale_persisted_section_resolves_to_none() {
    let (_temp_dir, store_path, mut engine) = create_engine_with_catalog(abc_catalog()).await;
    engine.go_to_section("c").await;
    assert_eq!(engine.current_section().unwrap().id, "c");
    drop(engine);

    // Rebuild against a catalog where section "c" no longer exists, as
    // after a content update.
    let trimmed = pipguide_core::TutorialCatalog::new(
        abc_catalog()
            .sections()
            .iter()
            .filter(|s| s.id != "c")
            .cloned()
            .collect(),
    )
    .expect("trimmed catalog is valid");

    let reloaded = EngineBuilder::new()
        .with_store_path(&store_path)
        .with_catalog(trimmed)
        .build()
        .await
        .expect("Failed to rebuild engine");

    assert!(reloaded.current_section().is_none());
    assert_eq!(reloaded.current_step_index(), 0);
}

#[tokio::test]
async fn test_failed_persist_never_corrupts_memory_state() {
    let (temp_dir, mut engine) = create_test_engine().await;
    engine.start().await;

    // Replace the store file with a directory so every later write fails.
    let store_path = temp_dir.path().join("test.db");
    std::fs::remove_file(&store_path).expect("Failed to remove store file");
    std::fs::create_dir(&store_path).expect("Failed to shadow store path");

    engine.advance().await;

    // The write was logged and dropped; the in-memory state still
    // reflects the operation.
    assert_eq!(engine.current_step_index(), 1);
}

#[tokio::test]
async fn test_advance_without_active_section_is_noop() {
    let (_temp_dir, mut engine) = create_test_engine().await;
    engine.skip().await;
    let before = engine.progress().clone();

    engine.advance().await;
    engine.retreat().await;

    assert_eq!(engine.progress(), &before);
}
