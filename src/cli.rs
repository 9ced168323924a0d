//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the DeckGen client.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// DeckGen - AI presentation generation client
///
/// Signs in to the DeckGen service, submits source documents for
/// transformation into executive-ready presentation decks, tracks
/// generation progress, and downloads the results.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DECKGEN_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store a session token
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted if omitted)
        #[arg(long, env = "DECKGEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Company name
        #[arg(long)]
        company: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (prompted if omitted)
        #[arg(long, env = "DECKGEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Discard the stored session token
    Logout,

    /// Show the signed-in user profile
    Whoami,

    /// Persona management (the viewpoint the deck is tailored to)
    Persona {
        #[command(subcommand)]
        subcommand: PersonaSubcommand,
    },

    /// Submit a document and drive it to a finished deck
    Generate {
        /// Source document (.zip or .md); a placeholder is submitted if omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Organization or topic the deck is about
        #[arg(long)]
        org: Option<String>,

        /// Purpose of the presentation
        #[arg(long)]
        purpose: Option<String>,

        /// Target audience
        #[arg(long)]
        audience: Option<String>,

        /// Key message to land
        #[arg(long)]
        message: Option<String>,

        /// Tone / design descriptor
        #[arg(long)]
        vibe: Option<String>,

        /// Where to save the finished deck (defaults to the download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-open the persona selector before submitting
        #[arg(long)]
        change_persona: bool,
    },

    /// Check the status of a generation job
    Status {
        /// Job identifier returned at submission
        job_id: String,
    },

    /// Download the finished deck for a job
    Download {
        /// Job identifier returned at submission
        job_id: String,

        /// Output path for the deck file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Persona subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PersonaSubcommand {
    /// List personas, with optional search and pagination
    List {
        /// Filter by a case-insensitive substring of title or description
        #[arg(long)]
        query: Option<String>,

        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Personas per page: 9, 50, or "all"
        #[arg(long, default_value = "9")]
        page_size: String,
    },

    /// Show the currently selected persona
    Show,

    /// Select a persona by id (e.g. cto, prod_mgr)
    Set {
        /// Persona id from 'deckgen persona list'
        persona: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Create a default configuration file
    Init {
        /// Path for the new configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check the configuration for errors
    Validate,
}
