use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marathon-sync")]
#[command(author = "Praekelt Foundation")]
#[command(version)]
#[command(about = "Sync Marathon with a set of group definitions", long_about = None)]
pub struct Cli {
    /// The address for the Marathon HTTP API endpoint
    #[arg(
        short,
        long,
        env = "MARATHON_URL",
        default_value = "http://localhost:8080"
    )]
    pub marathon: String,

    /// Path to a config file listing Marathon JSON group definitions, one per line
    #[arg(short, long, env = "MARATHON_SYNC_CONFIG")]
    pub config: PathBuf,

    /// Show what would be deleted and synced without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum number of concurrent requests to Marathon
    #[arg(short, long, default_value = "8", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Per-request timeout in seconds (0 waits forever)
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["marathon-sync", "--config", "groups.txt"]).unwrap();
        assert_eq!(cli.marathon, "http://localhost:8080");
        assert_eq!(cli.config, PathBuf::from("groups.txt"));
        assert_eq!(cli.jobs, 8);
        assert_eq!(cli.timeout, 30);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "marathon-sync",
            "-m",
            "http://1.2.3.4:8080",
            "-c",
            "groups.txt",
            "-j",
            "2",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.marathon, "http://1.2.3.4:8080");
        assert_eq!(cli.jobs, 2);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["marathon-sync", "-c", "groups.txt", "-j", "0"]).is_err());
    }
}
