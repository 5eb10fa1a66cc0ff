use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use karafkit::Disposition;

#[derive(Parser)]
#[command(name = "karafctl")]
#[command(version)]
#[command(about = "Reconcile Karaf features and repositories over the console client", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage features in the remote runtime
    #[command(subcommand)]
    Feature(FeatureCommand),

    /// Manage feature repositories
    #[command(subcommand)]
    Repo(RepoCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Feature Commands
// ============================================================================

#[derive(Subcommand)]
pub enum FeatureCommand {
    /// Converge a feature to the desired state
    Apply(FeatureApplyArgs),

    /// List installed features
    List(ListArgs),
}

#[derive(Parser)]
pub struct FeatureApplyArgs {
    /// Feature name
    pub name: String,

    /// Feature version; without it any installed version satisfies presence
    #[arg(long)]
    pub version: Option<String>,

    /// Desired state
    #[arg(long, value_enum, default_value_t = FeatureState::Present)]
    pub state: FeatureState,

    /// Show the command that would run without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeatureState {
    Present,
    Absent,
}

impl From<FeatureState> for Disposition {
    fn from(state: FeatureState) -> Self {
        match state {
            FeatureState::Present => Disposition::Present,
            FeatureState::Absent => Disposition::Absent,
        }
    }
}

impl std::fmt::Display for FeatureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Disposition::from(*self))
    }
}

// ============================================================================
// Repo Commands
// ============================================================================

#[derive(Subcommand)]
pub enum RepoCommand {
    /// Converge a feature repository to the desired state
    Apply(RepoApplyArgs),

    /// List registered repositories
    List(ListArgs),
}

#[derive(Parser)]
pub struct RepoApplyArgs {
    /// Repository descriptor url
    pub url: String,

    /// Desired state
    #[arg(long, value_enum, default_value_t = RepoState::Present)]
    pub state: RepoState,

    /// Show the command that would run without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RepoState {
    Present,
    Absent,
    Refresh,
}

impl From<RepoState> for Disposition {
    fn from(state: RepoState) -> Self {
        match state {
            RepoState::Present => Disposition::Present,
            RepoState::Absent => Disposition::Absent,
            RepoState::Refresh => Disposition::Refresh,
        }
    }
}

impl std::fmt::Display for RepoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Disposition::from(*self))
    }
}

// ============================================================================
// Shared args
// ============================================================================

#[derive(Parser)]
pub struct ListArgs {
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection options forwarded verbatim to the client binary. All
/// optional; file-level defaults fill the gaps.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// Path to the client binary, or a Karaf install root containing bin/client
    #[arg(long, env = "KARAF_CLIENT_BIN")]
    pub client_bin: Option<String>,

    /// Host to connect to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to connect to
    #[arg(long)]
    pub port: Option<String>,

    /// User name
    #[arg(long)]
    pub user: Option<String>,

    /// Password
    #[arg(long, env = "KARAF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Intra-retry delay, forwarded to the client
    #[arg(long)]
    pub delay: Option<String>,

    /// Connection retry attempts, forwarded to the client
    #[arg(long)]
    pub retry: Option<String>,
}
