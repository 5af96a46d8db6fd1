use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "prompt-forge")]
#[command(about = "Build and analyze AI video generation prompts")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.prompt-forge)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a prompt into phrases and categorize each one
    Analyze {
        /// Prompt text (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the prompt from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Merge the categorized phrases into the library
        #[arg(long)]
        add_to_library: bool,
    },

    /// List the categories used for analysis
    Categories {
        /// Print definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the phrase library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Compose a prompt from library phrases
    Build {
        /// Prompt types to select
        #[arg(short = 't', long = "type", required = true)]
        types: Vec<String>,

        /// Phrases to include (must belong to a selected type)
        #[arg(short, long = "phrase")]
        phrases: Vec<String>,

        /// Include every phrase of the selected types
        #[arg(short, long)]
        all: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum LibraryAction {
    /// List prompt types with phrase counts
    List,

    /// Show the phrases of one prompt type
    Show {
        /// Prompt type name
        name: String,
    },

    /// Add a phrase to a prompt type (created if missing)
    Add {
        /// Prompt type name
        name: String,

        /// Phrase text
        phrase: String,
    },

    /// Show library file path
    Path,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., library.file)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., prompt.separator)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
