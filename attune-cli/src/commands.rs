//! Command implementations
//!
//! Each command returns a serializable report; `main` prints it as JSON.

use attune_common::db::{StoredProfile, StoredRecommendation};
use attune_common::{
    analyze, recommend, AttachmentProfile, Error, MeditationRecommendation, QuestionnaireAnswers,
    Result,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::AppContext;

/// Result of analyzing one answer set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub profile: AttachmentProfile,
    pub recommendation: MeditationRecommendation,
    /// Present when the analysis was persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<StoredRecommendation>,
}

/// Latest stored state for a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub profile: StoredProfile,
    pub recommendation: Option<StoredRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgetReport {
    pub user_id: String,
    pub deleted_profiles: u64,
}

/// Analyze answers without touching storage
pub fn analyze_answers(answers: &QuestionnaireAnswers) -> AnalysisReport {
    let profile = analyze(answers);
    let recommendation = recommend(&profile);

    debug!(
        "Analyzed {} answer(s): style={}, session={}",
        answers.answered_count(),
        profile.style,
        recommendation.session_type
    );

    AnalysisReport {
        profile,
        recommendation,
        saved: None,
    }
}

/// Analyze answers, persisting the result when a user is given
pub async fn run_analyze(
    ctx: &AppContext,
    answers: &QuestionnaireAnswers,
    user: Option<&str>,
) -> Result<AnalysisReport> {
    let mut report = analyze_answers(answers);

    if let Some(user_id) = user {
        let saved = ctx
            .store
            .save_analysis(user_id, &report.profile, &report.recommendation)
            .await?;
        report.saved = Some(saved);
    }

    Ok(report)
}

pub async fn run_show(ctx: &AppContext, user_id: &str) -> Result<UserSummary> {
    let profile = ctx
        .store
        .latest_profile(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("no profile stored for user {}", user_id)))?;

    let recommendation = ctx.store.latest_recommendation(user_id).await?;

    Ok(UserSummary {
        user_id: profile.user_id.clone(),
        profile,
        recommendation,
    })
}

pub async fn run_history(ctx: &AppContext, user_id: &str, limit: u32) -> Result<Vec<StoredProfile>> {
    ctx.store.profile_history(user_id, limit).await
}

pub async fn run_forget(ctx: &AppContext, user_id: &str) -> Result<ForgetReport> {
    let deleted_profiles = ctx.store.delete_user_profiles(user_id).await?;
    info!("Forgot user {} ({} profile(s))", user_id, deleted_profiles);

    Ok(ForgetReport {
        user_id: user_id.trim().to_string(),
        deleted_profiles,
    })
}
