//! Database models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::AttachmentProfile;
use crate::recommendation::MeditationRecommendation;

/// A profile as persisted for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub guid: Uuid,
    pub user_id: String,
    pub profile: AttachmentProfile,
}

/// A recommendation as persisted, linked to the profile it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecommendation {
    pub guid: Uuid,
    pub profile_guid: Uuid,
    pub recommendation: MeditationRecommendation,
}
