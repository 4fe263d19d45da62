//! Profile storage
//!
//! Persists derived profiles and recommendations keyed by an opaque user
//! identifier issued by the external identity provider. The store holds a
//! pool handed to it at construction and never creates one itself.

use sqlx::sqlite::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{AttachmentProfile, AttachmentStyle};
use crate::answers::{MeditationPreference, PersonalGoal, StressResponse};
use crate::db::models::{StoredProfile, StoredRecommendation};
use crate::recommendation::MeditationRecommendation;
use crate::time::{from_db_string, now, to_db_string};
use crate::{Error, Result};

type ProfileRow = (
    String,         // guid
    String,         // user_id
    String,         // style
    String,         // primary_emotion
    Option<String>, // secondary_emotion
    String,         // meditation_preference
    String,         // stress_response
    String,         // personal_goal
    String,         // analysis_date
);

type RecommendationRow = (
    String, // guid
    String, // profile_guid
    String, // session_type
    String, // focus
    i64,    // duration_minutes
    bool,   // has_music
    String, // description
);

const PROFILE_COLUMNS: &str = "guid, user_id, style, primary_emotion, secondary_emotion, \
     meditation_preference, stress_response, personal_goal, analysis_date";

/// SQLite-backed profile store
#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Persist a profile for a user, returning its new guid
    pub async fn save_profile(&self, user_id: &str, profile: &AttachmentProfile) -> Result<Uuid> {
        let user_id = validate_user_id(user_id)?;
        let mut conn = self.pool.acquire().await?;
        let guid = insert_profile(&mut *conn, user_id, profile).await?;
        debug!("Saved profile {} for user {}", guid, user_id);
        Ok(guid)
    }

    /// Persist a recommendation against an existing profile
    pub async fn save_recommendation(
        &self,
        profile_guid: Uuid,
        recommendation: &MeditationRecommendation,
    ) -> Result<Uuid> {
        let mut conn = self.pool.acquire().await?;
        insert_recommendation(&mut *conn, profile_guid, recommendation).await
    }

    /// Persist a profile and its recommendation atomically
    pub async fn save_analysis(
        &self,
        user_id: &str,
        profile: &AttachmentProfile,
        recommendation: &MeditationRecommendation,
    ) -> Result<StoredRecommendation> {
        let user_id = validate_user_id(user_id)?;

        let mut tx = self.pool.begin().await?;
        let profile_guid = insert_profile(&mut *tx, user_id, profile).await?;
        let guid = insert_recommendation(&mut *tx, profile_guid, recommendation).await?;
        tx.commit().await?;

        info!(
            "Saved analysis for user {}: style={}, session={}",
            user_id, profile.style, recommendation.session_type
        );

        Ok(StoredRecommendation {
            guid,
            profile_guid,
            recommendation: recommendation.clone(),
        })
    }

    /// Most recent profile for a user
    pub async fn latest_profile(&self, user_id: &str) -> Result<Option<StoredProfile>> {
        Ok(self.profile_history(user_id, 1).await?.into_iter().next())
    }

    /// Profiles for a user, newest first
    pub async fn profile_history(&self, user_id: &str, limit: u32) -> Result<Vec<StoredProfile>> {
        let user_id = validate_user_id(user_id)?;

        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ? \
             ORDER BY analysis_date DESC, rowid DESC LIMIT ?",
            PROFILE_COLUMNS
        );
        let rows: Vec<ProfileRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(profile_from_row).collect()
    }

    /// Recommendation attached to the user's most recent profile
    pub async fn latest_recommendation(&self, user_id: &str) -> Result<Option<StoredRecommendation>> {
        let user_id = validate_user_id(user_id)?;

        let row: Option<RecommendationRow> = sqlx::query_as(
            r#"
            SELECT r.guid, r.profile_guid, r.session_type, r.focus,
                   r.duration_minutes, r.has_music, r.description
            FROM recommendations r
            JOIN profiles p ON p.guid = r.profile_guid
            WHERE p.user_id = ?
            ORDER BY p.analysis_date DESC, p.rowid DESC, r.created_at DESC, r.rowid DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(recommendation_from_row).transpose()
    }

    /// Delete every profile (and linked recommendation) for a user
    pub async fn delete_user_profiles(&self, user_id: &str) -> Result<u64> {
        let user_id = validate_user_id(user_id)?;

        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("Deleted {} profile(s) for user {}", result.rows_affected(), user_id);
        Ok(result.rows_affected())
    }
}

fn validate_user_id(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("user id must not be empty".to_string()));
    }
    Ok(trimmed)
}

async fn insert_profile(
    conn: &mut SqliteConnection,
    user_id: &str,
    profile: &AttachmentProfile,
) -> Result<Uuid> {
    let guid = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO profiles (
            guid, user_id, style, primary_emotion, secondary_emotion,
            meditation_preference, stress_response, personal_goal, analysis_date
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(user_id)
    .bind(profile.style.as_str())
    .bind(&profile.primary_emotion)
    .bind(profile.secondary_emotion.as_deref())
    .bind(profile.meditation_preference.as_str())
    .bind(profile.stress_response.as_str())
    .bind(profile.personal_goal.as_str())
    .bind(to_db_string(&profile.analysis_date))
    .execute(&mut *conn)
    .await?;

    Ok(guid)
}

/// Insert a recommendation for an existing profile
///
/// The existence check is part of the INSERT itself, so a profile deleted
/// concurrently yields `NotFound` rather than a foreign key failure.
async fn insert_recommendation(
    conn: &mut SqliteConnection,
    profile_guid: Uuid,
    recommendation: &MeditationRecommendation,
) -> Result<Uuid> {
    let guid = Uuid::new_v4();

    let result = sqlx::query(
        r#"
        INSERT INTO recommendations (
            guid, profile_guid, session_type, focus,
            duration_minutes, has_music, description, created_at
        )
        SELECT ?, ?, ?, ?, ?, ?, ?, ?
        WHERE EXISTS (SELECT 1 FROM profiles WHERE guid = ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(profile_guid.to_string())
    .bind(&recommendation.session_type)
    .bind(&recommendation.focus)
    .bind(i64::from(recommendation.duration))
    .bind(recommendation.has_music)
    .bind(&recommendation.description)
    .bind(to_db_string(&now()))
    .bind(profile_guid.to_string())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("profile {}", profile_guid)));
    }

    Ok(guid)
}

fn parse_guid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| Error::Internal(format!("Invalid stored guid '{}': {}", s, e)))
}

fn profile_from_row(row: ProfileRow) -> Result<StoredProfile> {
    let (guid, user_id, style, primary_emotion, secondary_emotion, preference, stress, goal, date) =
        row;

    Ok(StoredProfile {
        guid: parse_guid(&guid)?,
        user_id,
        profile: AttachmentProfile {
            style: AttachmentStyle::from_db_str(&style),
            primary_emotion,
            secondary_emotion,
            meditation_preference: MeditationPreference::parse(&preference),
            stress_response: StressResponse::parse(&stress),
            personal_goal: PersonalGoal::parse(&goal),
            analysis_date: from_db_string(&date)?,
        },
    })
}

fn recommendation_from_row(row: RecommendationRow) -> Result<StoredRecommendation> {
    let (guid, profile_guid, session_type, focus, duration, has_music, description) = row;

    let duration = u32::try_from(duration)
        .map_err(|_| Error::Internal(format!("Invalid stored duration {}", duration)))?;

    Ok(StoredRecommendation {
        guid: parse_guid(&guid)?,
        profile_guid: parse_guid(&profile_guid)?,
        recommendation: MeditationRecommendation {
            session_type,
            focus,
            duration,
            has_music,
            description,
        },
    })
}
