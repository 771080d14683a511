use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use pulse_core::stats::SortKey;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pulse", version, about = "GitHub profile analytics from the command line")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "PULSE_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub access token (overrides config file)
    #[arg(long, env = "PULSE_TOKEN", global = true)]
    pub token: Option<String>,

    /// Directory holding the session cache file
    #[arg(long, env = "PULSE_CACHE_DIR", global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

/// Sort order for the repository list
#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Most stars first
    #[default]
    Stars,
    /// Most forks first
    Forks,
    /// Most recently updated first
    Updated,
}

impl From<SortBy> for SortKey {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Stars => SortKey::Stars,
            SortBy::Forks => SortKey::Forks,
            SortBy::Updated => SortKey::Updated,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a user's profile and repositories
    #[command(visible_alias = "p")]
    Profile {
        /// GitHub username to look up
        username: String,

        /// Sort order for the repository list
        #[arg(long, short = 's', value_enum, default_value_t = SortBy::Stars)]
        sort: SortBy,

        /// Filter repositories by name, description, language or topic
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// How many repositories to list
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Skip the session cache and refetch
        #[arg(long)]
        no_cache: bool,

        /// Write the full analytics report to a JSON file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
    /// Compare two developers side by side
    #[command(visible_alias = "c")]
    Compare {
        /// First developer
        user1: String,
        /// Second developer
        user2: String,
    },
    /// Aggregate metrics across team members
    Team {
        /// Member usernames (comma- or space-separated)
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// Generate release notes from a repository's commit history
    #[command(visible_alias = "rn")]
    ReleaseNotes {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,

        /// Version label for the document
        #[arg(long, default_value = "v1.0.0")]
        version: String,

        /// Commits to fetch (first page only)
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Write the Markdown document to a file
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Copy the Markdown document to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Show current API rate limits
    Limits,
    /// Recent profile lookups
    History {
        #[command(subcommand)]
        action: Option<HistoryCommands>,
    },
    /// Authenticate with GitHub via the OAuth proxy
    Login {
        /// OAuth App client id (overrides config)
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List recent lookups (default)
    Show,
    /// Clear the stored history
    Clear,
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "pulse", &mut std::io::stdout());
    }
}
