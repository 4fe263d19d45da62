//! Command-line arguments

use std::path::PathBuf;

use attune_common::answers::{
    AttachmentTendency, EmotionalCheckIn, MeditationPreference, PersonalGoal, StressResponse,
};
use attune_common::config::ROOT_FOLDER_ENV;
use attune_common::{QuestionnaireAnswers, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Default number of profiles listed by `history`
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Command-line arguments for attune
#[derive(Parser, Debug)]
#[command(name = "attune")]
#[command(about = "Personalized meditation recommendations from a short questionnaire")]
#[command(version)]
pub struct Args {
    /// Folder holding the profile database
    #[arg(long, global = true, env = ROOT_FOLDER_ENV)]
    pub root_folder: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze questionnaire answers and recommend a session
    Analyze {
        #[command(flatten)]
        answers: AnswerArgs,

        /// Persist the profile and recommendation for this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Show the latest stored profile and recommendation
    Show {
        #[arg(long)]
        user: String,
    },

    /// List stored profiles, newest first
    History {
        #[arg(long)]
        user: String,

        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// Delete every stored profile for a user
    Forget {
        #[arg(long)]
        user: String,
    },
}

/// Questionnaire answers given on the command line
///
/// Flags override values read from `--answers`.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct AnswerArgs {
    /// JSON file with questionnaire answers
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// frequently | sometimes | rarely
    #[arg(long)]
    pub tendency: Option<String>,

    /// anxiety | sadness | anger | fear
    #[arg(long)]
    pub emotion: Option<String>,

    /// visualImagery | soothing | guidance | breathwork
    #[arg(long)]
    pub preference: Option<String>,

    /// seekOthers | withdraw | distract | problemSolve
    #[arg(long)]
    pub stress: Option<String>,

    /// reduceAnxiety | betterSleep | emotionalHealing | selfAcceptance | focus
    #[arg(long)]
    pub goal: Option<String>,
}

impl AnswerArgs {
    /// Build the answer set from the file (if any) and the flags
    pub fn to_answers(&self) -> Result<QuestionnaireAnswers> {
        let mut answers = match &self.answers {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            None => QuestionnaireAnswers::default(),
        };

        if let Some(raw) = &self.tendency {
            answers.attachment_tendency = AttachmentTendency::parse(raw);
        }
        if let Some(raw) = &self.emotion {
            answers.emotional_check_in = EmotionalCheckIn::parse(raw);
        }
        if let Some(raw) = &self.preference {
            answers.meditation_preference = MeditationPreference::parse(raw);
        }
        if let Some(raw) = &self.stress {
            answers.stress_response = StressResponse::parse(raw);
        }
        if let Some(raw) = &self.goal {
            answers.personal_goal = PersonalGoal::parse(raw);
        }

        Ok(answers)
    }
}
