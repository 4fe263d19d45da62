//! Profile analysis
//!
//! Derives an [`AttachmentProfile`] from questionnaire answers. The
//! derivation is a pure function of the answers and the supplied
//! timestamp; unanswered or unrecognized values select the `Unknown`
//! branch instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::answers::{
    AttachmentTendency, EmotionalCheckIn, MeditationPreference, PersonalGoal,
    QuestionnaireAnswers, StressResponse,
};

/// Placeholder emotion when the check-in question was skipped
pub const UNKNOWN_EMOTION: &str = "unknown";

/// Coarse attachment style label
///
/// `FearfulAvoidant` is part of the vocabulary but no current rule
/// produces it. Unrecognized labels read back as `Unknown`, from JSON and
/// from the database alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentStyle {
    Secure,
    Anxious,
    Avoidant,
    FearfulAvoidant,
    #[serde(other)]
    Unknown,
}

impl AttachmentStyle {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentStyle::Secure => "secure",
            AttachmentStyle::Anxious => "anxious",
            AttachmentStyle::Avoidant => "avoidant",
            AttachmentStyle::FearfulAvoidant => "fearful-avoidant",
            AttachmentStyle::Unknown => "unknown",
        }
    }

    /// Parse from database string representation
    ///
    /// Unrecognized text maps to `Unknown`.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "secure" => AttachmentStyle::Secure,
            "anxious" => AttachmentStyle::Anxious,
            "avoidant" => AttachmentStyle::Avoidant,
            "fearful-avoidant" => AttachmentStyle::FearfulAvoidant,
            _ => AttachmentStyle::Unknown,
        }
    }

    /// Style implied by the attachment tendency answer
    pub fn from_tendency(tendency: &AttachmentTendency) -> Self {
        match tendency {
            AttachmentTendency::Frequently => AttachmentStyle::Anxious,
            AttachmentTendency::Rarely => AttachmentStyle::Avoidant,
            AttachmentTendency::Sometimes => AttachmentStyle::Secure,
            AttachmentTendency::Unanswered | AttachmentTendency::Other(_) => {
                AttachmentStyle::Unknown
            }
        }
    }
}

impl std::fmt::Display for AttachmentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived user profile
///
/// Created fresh by [`analyze`]; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentProfile {
    pub style: AttachmentStyle,
    pub primary_emotion: String,
    /// Reserved; no rule populates it yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_emotion: Option<String>,
    pub meditation_preference: MeditationPreference,
    pub stress_response: StressResponse,
    pub personal_goal: PersonalGoal,
    pub analysis_date: DateTime<Utc>,
}

/// Analyze answers, stamping the profile with the current time
pub fn analyze(answers: &QuestionnaireAnswers) -> AttachmentProfile {
    analyze_at(answers, crate::time::now())
}

/// Analyze answers with an explicit analysis timestamp
pub fn analyze_at(answers: &QuestionnaireAnswers, at: DateTime<Utc>) -> AttachmentProfile {
    AttachmentProfile {
        style: AttachmentStyle::from_tendency(&answers.attachment_tendency),
        primary_emotion: primary_emotion(&answers.emotional_check_in),
        secondary_emotion: None,
        meditation_preference: answers.meditation_preference.clone(),
        stress_response: answers.stress_response.clone(),
        personal_goal: answers.personal_goal.clone(),
        analysis_date: at,
    }
}

fn primary_emotion(check_in: &EmotionalCheckIn) -> String {
    match check_in {
        EmotionalCheckIn::Unanswered => UNKNOWN_EMOTION.to_string(),
        EmotionalCheckIn::Anxiety
        | EmotionalCheckIn::Sadness
        | EmotionalCheckIn::Anger
        | EmotionalCheckIn::Fear
        | EmotionalCheckIn::Other(_) => check_in.as_str().to_string(),
    }
}
