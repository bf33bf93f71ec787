//! Command-line presentation layer.
//!
//! Parses arguments with clap, wires the preference store and AI provider
//! from configuration, and renders results as text or JSON.

mod commands;
pub mod render;

use clap::{Args, Parser, Subcommand};

use crate::domain::coaching::{CoachingFocus, ToneSetting};
use crate::domain::personality::PersonalityCode;

pub use commands::{execute, run, CommandContext};

#[derive(Debug, Parser)]
#[command(name = "reply-coach")]
#[command(about = "Personality-aware coaching for the replies you are about to send")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// First-run setup: who you are, who you talk to, and how you relate
    Setup(SetupArgs),

    /// Show, edit or clear the saved relationship context
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Get tone analysis and better replies for a message exchange
    Coach(CoachArgs),

    /// Browse the personality reference
    Profiles {
        /// Show a single profile (e.g. INFJ)
        code: Option<PersonalityCode>,
    },
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Skip setup and start with defaults
    #[arg(long, conflicts_with_all = ["my_name", "my_type", "partner_name", "partner_type", "relationship"])]
    pub skip: bool,

    /// Your name or nickname
    #[arg(long)]
    pub my_name: Option<String>,

    /// Your personality code
    #[arg(long)]
    pub my_type: Option<PersonalityCode>,

    /// The other person's name or nickname
    #[arg(long)]
    pub partner_name: Option<String>,

    /// The other person's personality code
    #[arg(long)]
    pub partner_type: Option<PersonalityCode>,

    /// How you relate (e.g. "partner", "close friend", "manager")
    #[arg(long)]
    pub relationship: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum MemoryAction {
    /// Print the saved context
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change individual fields
    Set(MemorySetArgs),

    /// Clear everything back to defaults
    Reset,
}

#[derive(Debug, Args)]
pub struct MemorySetArgs {
    #[arg(long)]
    pub my_name: Option<String>,

    #[arg(long)]
    pub my_type: Option<PersonalityCode>,

    #[arg(long)]
    pub partner_name: Option<String>,

    #[arg(long)]
    pub partner_type: Option<PersonalityCode>,

    #[arg(long)]
    pub relationship: Option<String>,

    /// Anything else worth remembering about how you two talk
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct CoachArgs {
    /// What they said
    #[arg(long)]
    pub incoming: String,

    /// What you were about to reply
    #[arg(long)]
    pub reply: String,

    /// What you want the reply to achieve
    #[arg(long)]
    pub goal: Option<String>,

    /// Steer the reply with --focus and --tone
    #[arg(long)]
    pub advanced: bool,

    /// Conversation goal: soothe, clarify or co-create
    #[arg(long, requires = "advanced")]
    pub focus: Option<CoachingFocus>,

    /// Tone intensity: soft, balanced or direct
    #[arg(long, requires = "advanced")]
    pub tone: Option<ToneSetting>,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "pick")]
    pub json: bool,

    /// Print only the message of the reply option with this id
    #[arg(long)]
    pub pick: Option<String>,
}
