//! Questionnaire answer types
//!
//! The profile questionnaire collects five independently optional answers.
//! Each answer is a closed enum with one variant per known choice plus:
//! - `Unanswered`: the question was skipped (empty string on the wire)
//! - `Other(String)`: a literal outside the known domain, kept verbatim
//!
//! Parsing is total. Every string maps to exactly one variant and converts
//! back to the same string, so unknown values pass through storage and JSON
//! unchanged.

use serde::{Deserialize, Serialize};

/// Declares an answer enum together with its string conversions.
macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Question skipped
            #[default]
            Unanswered,
            /// Value outside the known choices, preserved as given
            Other(String),
        }

        impl $name {
            /// Every known choice, in questionnaire order
            pub const CHOICES: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Parse a raw answer. Never fails.
            pub fn parse(raw: &str) -> Self {
                match raw {
                    "" => $name::Unanswered,
                    $( $literal => $name::$variant, )+
                    other => $name::Other(other.to_string()),
                }
            }

            /// Wire representation (empty string when unanswered)
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $literal, )+
                    $name::Unanswered => "",
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_answered(&self) -> bool {
                !matches!(self, $name::Unanswered)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::parse(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $name::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(answer: $name) -> Self {
                match answer {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    /// How often the user worries about relationships
    AttachmentTendency {
        Frequently => "frequently",
        Sometimes => "sometimes",
        Rarely => "rarely",
    }
}

answer_enum! {
    /// Emotion reported at check-in
    EmotionalCheckIn {
        Anxiety => "anxiety",
        Sadness => "sadness",
        Anger => "anger",
        Fear => "fear",
    }
}

answer_enum! {
    /// Preferred meditation style
    MeditationPreference {
        VisualImagery => "visualImagery",
        Soothing => "soothing",
        Guidance => "guidance",
        Breathwork => "breathwork",
    }
}

answer_enum! {
    /// Typical response under stress
    StressResponse {
        SeekOthers => "seekOthers",
        Withdraw => "withdraw",
        Distract => "distract",
        ProblemSolve => "problemSolve",
    }
}

answer_enum! {
    /// What the user wants from meditation
    PersonalGoal {
        ReduceAnxiety => "reduceAnxiety",
        BetterSleep => "betterSleep",
        EmotionalHealing => "emotionalHealing",
        SelfAcceptance => "selfAcceptance",
        Focus => "focus",
    }
}

/// Answers collected by the multi-step questionnaire
///
/// Missing JSON fields deserialize as `Unanswered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireAnswers {
    pub attachment_tendency: AttachmentTendency,
    pub emotional_check_in: EmotionalCheckIn,
    pub meditation_preference: MeditationPreference,
    pub stress_response: StressResponse,
    pub personal_goal: PersonalGoal,
}

impl QuestionnaireAnswers {
    /// Number of questions that received an answer
    pub fn answered_count(&self) -> usize {
        [
            self.attachment_tendency.is_answered(),
            self.emotional_check_in.is_answered(),
            self.meditation_preference.is_answered(),
            self.stress_response.is_answered(),
            self.personal_goal.is_answered(),
        ]
        .iter()
        .filter(|answered| **answered)
        .count()
    }
}
