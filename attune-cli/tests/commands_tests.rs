//! Integration tests for attune commands against a temporary database

use attune_cli::commands::{analyze_answers, run_analyze, run_forget, run_history, run_show};
use attune_cli::AppContext;
use attune_common::answers::{AttachmentTendency, MeditationPreference, PersonalGoal};
use attune_common::db::{init_database, ProfileStore};
use attune_common::{AttachmentStyle, Error, QuestionnaireAnswers};
use tempfile::TempDir;

/// Test helper: context over a fresh database
async fn setup_ctx() -> (TempDir, AppContext) {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("attune.db")).await.unwrap();
    (temp_dir, AppContext::new(ProfileStore::new(pool)))
}

fn sleep_answers() -> QuestionnaireAnswers {
    QuestionnaireAnswers {
        attachment_tendency: AttachmentTendency::Sometimes,
        personal_goal: PersonalGoal::BetterSleep,
        ..Default::default()
    }
}

#[test]
fn test_analyze_answers_report_json() {
    let report = analyze_answers(&sleep_answers());
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["profile"]["style"], "secure");
    assert_eq!(value["recommendation"]["type"], "Sleep Preparation");
    assert_eq!(
        value["recommendation"]["focus"],
        "releasing tension and preparing for restful sleep"
    );
    assert!(value.get("saved").is_none());
}

#[test]
fn test_analyze_all_empty_answers() {
    let report = analyze_answers(&QuestionnaireAnswers::default());

    assert_eq!(report.profile.style, AttachmentStyle::Unknown);
    assert_eq!(report.recommendation.session_type, "Grounding & Acceptance");
    assert_eq!(report.recommendation.focus, "mindfulness");
}

#[tokio::test]
async fn test_analyze_without_user_does_not_persist() {
    let (_dir, ctx) = setup_ctx().await;

    let report = run_analyze(&ctx, &sleep_answers(), None).await.unwrap();
    assert!(report.saved.is_none());

    let history = run_history(&ctx, "user_1", 10).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_analyze_then_show() {
    let (_dir, ctx) = setup_ctx().await;
    let answers = QuestionnaireAnswers {
        attachment_tendency: AttachmentTendency::Rarely,
        meditation_preference: MeditationPreference::VisualImagery,
        personal_goal: PersonalGoal::EmotionalHealing,
        ..Default::default()
    };

    let report = run_analyze(&ctx, &answers, Some("user_1")).await.unwrap();
    let saved = report.saved.clone().unwrap();

    let summary = run_show(&ctx, "user_1").await.unwrap();
    assert_eq!(summary.user_id, "user_1");
    assert_eq!(summary.profile.guid, saved.profile_guid);
    assert_eq!(summary.profile.profile.style, AttachmentStyle::Avoidant);

    let rec = summary.recommendation.unwrap().recommendation;
    assert_eq!(rec.session_type, "Emotional Healing");
    assert_eq!(
        rec.description,
        "A calming meditation to help center your mind and body. \
         Encourages gentle connection with emotions. \
         Includes peaceful visual imagery."
    );
}

#[tokio::test]
async fn test_show_unknown_user_is_not_found() {
    let (_dir, ctx) = setup_ctx().await;

    let result = run_show(&ctx, "ghost").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_history_and_forget() {
    let (_dir, ctx) = setup_ctx().await;

    for _ in 0..3 {
        run_analyze(&ctx, &sleep_answers(), Some("user_2")).await.unwrap();
    }

    assert_eq!(run_history(&ctx, "user_2", 10).await.unwrap().len(), 3);
    assert_eq!(run_history(&ctx, "user_2", 2).await.unwrap().len(), 2);

    let report = run_forget(&ctx, "user_2").await.unwrap();
    assert_eq!(report.deleted_profiles, 3);
    assert!(run_history(&ctx, "user_2", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_user_rejected() {
    let (_dir, ctx) = setup_ctx().await;

    let result = run_analyze(&ctx, &sleep_answers(), Some(" ")).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
