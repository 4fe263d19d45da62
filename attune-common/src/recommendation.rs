//! Meditation recommendation rules
//!
//! Turns an [`AttachmentProfile`] into a [`MeditationRecommendation`] in
//! four fixed steps:
//! 1. Start from the default grounding session
//! 2. Override focus (and usually type) from the personal goal
//! 3. Append the attachment style clause, if any
//! 4. Append the meditation preference clause, if any
//!
//! Description clauses are appended in that order and nowhere else.

use serde::{Deserialize, Serialize};

use crate::analysis::{AttachmentProfile, AttachmentStyle};
use crate::answers::{MeditationPreference, PersonalGoal};

pub const DEFAULT_TYPE: &str = "Grounding & Acceptance";
pub const DEFAULT_FOCUS: &str = "mindfulness";
pub const DEFAULT_DURATION_MINUTES: u32 = 10;
pub const DEFAULT_DESCRIPTION: &str = "A calming meditation to help center your mind and body.";

/// Suggested meditation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationRecommendation {
    #[serde(rename = "type")]
    pub session_type: String,
    pub focus: String,
    /// Session length in minutes
    pub duration: u32,
    pub has_music: bool,
    pub description: String,
}

impl Default for MeditationRecommendation {
    fn default() -> Self {
        Self {
            session_type: DEFAULT_TYPE.to_string(),
            focus: DEFAULT_FOCUS.to_string(),
            duration: DEFAULT_DURATION_MINUTES,
            has_music: true,
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Build a recommendation for the given profile
pub fn recommend(profile: &AttachmentProfile) -> MeditationRecommendation {
    let mut recommendation = MeditationRecommendation::default();

    if let Some((focus, session_type)) = goal_override(&profile.personal_goal) {
        recommendation.focus = focus.to_string();
        if let Some(session_type) = session_type {
            recommendation.session_type = session_type.to_string();
        }
    }

    if let Some(clause) = style_clause(profile.style) {
        recommendation.description.push_str(clause);
    }

    if let Some(clause) = preference_clause(&profile.meditation_preference) {
        recommendation.description.push_str(clause);
    }

    recommendation
}

/// Focus text and optional session type for a goal
///
/// `None` leaves the defaults untouched.
fn goal_override(goal: &PersonalGoal) -> Option<(&'static str, Option<&'static str>)> {
    match goal {
        PersonalGoal::ReduceAnxiety => Some(("calming anxiety and finding inner peace", None)),
        PersonalGoal::BetterSleep => Some((
            "releasing tension and preparing for restful sleep",
            Some("Sleep Preparation"),
        )),
        PersonalGoal::EmotionalHealing => Some((
            "gentle emotional processing and healing",
            Some("Emotional Healing"),
        )),
        PersonalGoal::SelfAcceptance => Some((
            "self-compassion and inner acceptance",
            Some("Self-Compassion"),
        )),
        PersonalGoal::Focus => Some(("enhancing mental clarity and focus", Some("Mental Clarity"))),
        PersonalGoal::Unanswered | PersonalGoal::Other(_) => None,
    }
}

fn style_clause(style: AttachmentStyle) -> Option<&'static str> {
    match style {
        AttachmentStyle::Anxious => Some(" Focuses on building security and self-trust."),
        AttachmentStyle::Avoidant => Some(" Encourages gentle connection with emotions."),
        AttachmentStyle::Secure | AttachmentStyle::FearfulAvoidant | AttachmentStyle::Unknown => {
            None
        }
    }
}

fn preference_clause(preference: &MeditationPreference) -> Option<&'static str> {
    match preference {
        MeditationPreference::VisualImagery => Some(" Includes peaceful visual imagery."),
        MeditationPreference::Breathwork => Some(" Centered around rhythmic breathing techniques."),
        MeditationPreference::Soothing
        | MeditationPreference::Guidance
        | MeditationPreference::Unanswered
        | MeditationPreference::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_at, UNKNOWN_EMOTION};
    use crate::answers::{AttachmentTendency, QuestionnaireAnswers, StressResponse};
    use chrono::{TimeZone, Utc};

    fn profile(style: AttachmentStyle, goal: &str, preference: &str) -> AttachmentProfile {
        AttachmentProfile {
            style,
            primary_emotion: UNKNOWN_EMOTION.to_string(),
            secondary_emotion: None,
            meditation_preference: MeditationPreference::parse(preference),
            stress_response: StressResponse::Unanswered,
            personal_goal: PersonalGoal::parse(goal),
            analysis_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_better_sleep_secure() {
        let rec = recommend(&profile(AttachmentStyle::Secure, "betterSleep", ""));

        assert_eq!(rec.session_type, "Sleep Preparation");
        assert_eq!(rec.focus, "releasing tension and preparing for restful sleep");
        assert_eq!(rec.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_reduce_anxiety_anxious_breathwork_description() {
        let rec = recommend(&profile(AttachmentStyle::Anxious, "reduceAnxiety", "breathwork"));

        assert_eq!(
            rec.description,
            "A calming meditation to help center your mind and body. \
             Focuses on building security and self-trust. \
             Centered around rhythmic breathing techniques."
        );
        assert_eq!(rec.session_type, DEFAULT_TYPE);
        assert_eq!(rec.focus, "calming anxiety and finding inner peace");
    }

    #[test]
    fn test_unmatched_goal_returns_defaults() {
        let rec = recommend(&profile(AttachmentStyle::Unknown, "unknownGoal", "guidance"));

        assert_eq!(
            rec,
            MeditationRecommendation {
                session_type: "Grounding & Acceptance".to_string(),
                focus: "mindfulness".to_string(),
                duration: 10,
                has_music: true,
                description: "A calming meditation to help center your mind and body."
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_goal_table() {
        let cases = [
            ("emotionalHealing", "Emotional Healing", "gentle emotional processing and healing"),
            ("selfAcceptance", "Self-Compassion", "self-compassion and inner acceptance"),
            ("focus", "Mental Clarity", "enhancing mental clarity and focus"),
        ];
        for (goal, session_type, focus) in cases {
            let rec = recommend(&profile(AttachmentStyle::Secure, goal, ""));
            assert_eq!(rec.session_type, session_type, "goal {}", goal);
            assert_eq!(rec.focus, focus, "goal {}", goal);
        }
    }

    #[test]
    fn test_avoidant_visual_imagery_clause_order() {
        let rec = recommend(&profile(AttachmentStyle::Avoidant, "", "visualImagery"));

        assert_eq!(
            rec.description,
            "A calming meditation to help center your mind and body. \
             Encourages gentle connection with emotions. \
             Includes peaceful visual imagery."
        );
    }

    #[test]
    fn test_soothing_and_fearful_avoidant_add_nothing() {
        let rec = recommend(&profile(AttachmentStyle::FearfulAvoidant, "", "soothing"));
        assert_eq!(rec.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_duration_and_music_never_vary() {
        for goal in PersonalGoal::CHOICES {
            for preference in MeditationPreference::CHOICES {
                let mut p = profile(AttachmentStyle::Anxious, "", "");
                p.personal_goal = goal.clone();
                p.meditation_preference = preference.clone();

                let rec = recommend(&p);
                assert_eq!(rec.duration, DEFAULT_DURATION_MINUTES);
                assert!(rec.has_music);
            }
        }
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let p = profile(AttachmentStyle::Avoidant, "focus", "breathwork");
        assert_eq!(recommend(&p), recommend(&p));
    }

    #[test]
    fn test_field_assignment_order_does_not_matter() {
        let at = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap();

        let mut first = QuestionnaireAnswers::default();
        first.personal_goal = PersonalGoal::BetterSleep;
        first.attachment_tendency = AttachmentTendency::Frequently;
        first.meditation_preference = MeditationPreference::VisualImagery;

        let mut second = QuestionnaireAnswers::default();
        second.meditation_preference = MeditationPreference::VisualImagery;
        second.attachment_tendency = AttachmentTendency::Frequently;
        second.personal_goal = PersonalGoal::BetterSleep;

        assert_eq!(
            recommend(&analyze_at(&first, at)),
            recommend(&analyze_at(&second, at))
        );
    }

    #[test]
    fn test_recommendation_serializes_type_field() {
        let value = serde_json::to_value(MeditationRecommendation::default()).unwrap();

        assert_eq!(value["type"], "Grounding & Acceptance");
        assert_eq!(value["hasMusic"], true);
        assert_eq!(value["duration"], 10);
    }
}
