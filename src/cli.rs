use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "alertwatch",
    version,
    about = "Cluster alert summaries from the monitoring server"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Cluster name to use (overrides default)
    #[arg(long, global = true, env = "ALERTWATCH_CLUSTER")]
    pub cluster: Option<String>,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args)]
pub struct GlobalOpts {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Request timeout in seconds (defaults to request_timeout_secs from config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Restrict output to the alerts of one host or one service.
#[derive(Args, Clone, Default)]
pub struct MatchOpts {
    /// Show alerts for this host
    #[arg(long, conflicts_with = "service")]
    pub host: Option<String>,

    /// Show alerts for this service
    #[arg(long)]
    pub service: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage monitored clusters
    Clusters {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Show current alerts for a cluster
    Alerts {
        #[command(flatten)]
        matching: MatchOpts,
    },
    /// Continuously show alerts, served from the refresh cache
    Watch {
        #[command(flatten)]
        matching: MatchOpts,
        /// Redraw interval in seconds
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
}

#[derive(Subcommand)]
pub enum ClusterCommands {
    /// Register a cluster
    Add {
        /// Cluster name
        name: String,
        /// Host running the monitoring server (host or host:port)
        #[arg(long)]
        monitoring_host: Option<String>,
        /// Set as the default cluster
        #[arg(long)]
        default: bool,
    },
    /// List registered clusters
    List,
    /// Remove a cluster
    Remove {
        /// Cluster name to remove
        name: String,
    },
}
