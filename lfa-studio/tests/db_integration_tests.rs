//! Integration tests for the persistence layer
//!
//! Runs against in-memory SQLite: project bootstrap, the transactional
//! component update, and progress persistence roundtrips.

use lfa_studio::db;
use lfa_studio::journey::{self, JOURNEY};
use lfa_studio::model::{
    ComponentContent, ComponentType, Geography, ProjectStatus,
};

#[tokio::test]
async fn test_create_project_bootstraps_components_and_progress() {
    let pool = db::init_memory_pool().await.unwrap();

    let project = db::projects::create_project(
        &pool,
        "FLN pilot Gaya",
        "FLN",
        Some(&Geography {
            state: "Bihar".to_string(),
            districts: vec!["Gaya".to_string()],
            blocks: vec![],
        }),
    )
    .await
    .unwrap();

    assert_eq!(project.completion_percentage, 0);
    assert_eq!(project.status, ProjectStatus::InProgress);

    // Exactly six components, one per type, all empty and incomplete
    let components = db::components::get_components(&pool, project.id).await.unwrap();
    assert_eq!(components.len(), 6);
    for (component, expected_type) in components.iter().zip(ComponentType::ALL) {
        assert_eq!(component.component_type, expected_type);
        assert_eq!(component.content, ComponentContent::empty_for(expected_type));
        assert!(!component.is_complete);
        assert_eq!(component.version, 1);
    }

    // Progress starts at level 1 / quest 1
    let progress = db::progress::get_progress(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.current_level, 1);
    assert_eq!(progress.current_quest, 1);
    assert!(progress.completed_quests.is_empty());
    assert_eq!(progress.total_points_earned, 0);
}

#[tokio::test]
async fn test_list_projects_returns_created() {
    let pool = db::init_memory_pool().await.unwrap();
    db::projects::create_project(&pool, "A", "FLN", None).await.unwrap();
    db::projects::create_project(&pool, "B", "CAREER_READINESS", None)
        .await
        .unwrap();

    let projects = db::projects::list_projects(&pool).await.unwrap();
    assert_eq!(projects.len(), 2);
}

#[tokio::test]
async fn test_component_update_is_one_transaction() {
    let pool = db::init_memory_pool().await.unwrap();
    let project = db::projects::create_project(&pool, "FLN pilot", "FLN", None)
        .await
        .unwrap();

    let content = ComponentContent::ProblemDefinition {
        problem_statement: "Only 23% of grade 3 students read at grade level".to_string(),
        evidence: vec!["ASER 2024".to_string()],
        affected_groups: vec!["grade 1-3 students".to_string()],
    };

    let updated =
        db::components::update_component(&pool, project.id, &content, true, Some("editor-1"))
            .await
            .unwrap();

    // Version bumped, content written
    assert_eq!(updated.version, 2);
    assert_eq!(updated.content, content);
    assert!(updated.is_complete);

    // Exactly one history row, carrying previous and new content
    let history = db::components::get_version_history(&pool, updated.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0].previous_content,
        ComponentContent::empty_for(ComponentType::ProblemDefinition)
    );
    assert_eq!(history[0].new_content, content);
    assert_eq!(history[0].changed_by.as_deref(), Some("editor-1"));

    // Completion recomputed in the same transaction: 1 of 6 -> 17
    let project = db::projects::get_project(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.completion_percentage, 17);
    assert_eq!(project.status, ProjectStatus::InProgress);
}

#[tokio::test]
async fn test_all_components_complete_yields_complete_status() {
    let pool = db::init_memory_pool().await.unwrap();
    let project = db::projects::create_project(&pool, "FLN pilot", "FLN", None)
        .await
        .unwrap();

    for component_type in ComponentType::ALL {
        let content = ComponentContent::empty_for(component_type);
        db::components::update_component(&pool, project.id, &content, true, None)
            .await
            .unwrap();
    }

    let project = db::projects::get_project(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.completion_percentage, 100);
    assert_eq!(project.status, ProjectStatus::Complete);
}

#[tokio::test]
async fn test_update_unknown_project_is_not_found() {
    let pool = db::init_memory_pool().await.unwrap();
    let content = ComponentContent::empty_for(ComponentType::ImpactVision);

    let err = db::components::update_component(&pool, uuid::Uuid::new_v4(), &content, false, None)
        .await
        .unwrap_err();
    assert!(matches!(err, lfa_common::Error::NotFound(_)));
}

#[tokio::test]
async fn test_progress_roundtrip_through_completion() {
    let pool = db::init_memory_pool().await.unwrap();
    let project = db::projects::create_project(&pool, "FLN pilot", "FLN", None)
        .await
        .unwrap();

    // Complete the whole first level, persisting after each step
    let mut progress = db::progress::get_progress(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    let now = lfa_common::time::now();
    journey::complete_quest(&JOURNEY, &mut progress, 1, "l1-problem-statement", now).unwrap();
    journey::complete_quest(&JOURNEY, &mut progress, 1, "l1-evidence-baseline", now).unwrap();
    db::progress::save_progress(&pool, project.id, &progress).await.unwrap();

    let restored = db::progress::get_progress(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restored, progress);
    assert_eq!(restored.current_level, 2);
    assert_eq!(restored.current_quest, 1);
    assert_eq!(restored.completed_quests.len(), 2);
    assert_eq!(restored.earned_badges.len(), 1);
    assert_eq!(restored.earned_badges[0].badge_id, "problem-explorer");
}

#[tokio::test]
async fn test_settings_roundtrip_and_update() {
    let pool = db::init_memory_pool().await.unwrap();

    assert_eq!(
        db::settings::get_setting(&pool, db::settings::GROQ_API_KEY)
            .await
            .unwrap(),
        None
    );

    db::settings::set_setting(&pool, db::settings::GROQ_API_KEY, "gsk_first")
        .await
        .unwrap();
    db::settings::set_setting(&pool, db::settings::GROQ_API_KEY, "gsk_second")
        .await
        .unwrap();

    assert_eq!(
        db::settings::get_setting(&pool, db::settings::GROQ_API_KEY)
            .await
            .unwrap()
            .as_deref(),
        Some("gsk_second")
    );
}
