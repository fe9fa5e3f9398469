//! Command-line entry point for gramlens.

mod accounts;
mod research;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gramlens")]
#[command(about = "Instagram engagement research from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch recent posts for the configured accounts, rank them by likes,
    /// and export the engagement report as CSV
    Research {
        /// Restrict the run to these handles (comma-separated or repeated);
        /// defaults to every account in the roster file
        #[arg(long, value_delimiter = ',')]
        accounts: Vec<String>,

        /// Number of recent posts to request per account (defaults to
        /// GRAMLENS_FETCH_COUNT)
        #[arg(long)]
        count: Option<u32>,

        /// Which API the posts are fetched from
        #[arg(long, value_enum, default_value_t = Source::Graph)]
        source: Source,

        /// Caption excerpt length in characters (defaults to
        /// GRAMLENS_CAPTION_EXCERPT_CHARS)
        #[arg(long)]
        excerpt_chars: Option<usize>,

        /// Write the CSV here instead of the timestamped path under data/
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print what would be fetched without making any network calls
        #[arg(long)]
        dry_run: bool,
    },
    /// List the account roster the research command runs against
    Accounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Private mobile feed API, authenticated with username and password
    Feed,
    /// Business discovery on the Graph API, authenticated with an access token
    Graph,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Graph => "graph",
        }
    }
}

// Required by `default_value_t`; must render exactly the value-enum names.
impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = gramlens_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Research {
            accounts,
            count,
            source,
            excerpt_chars,
            out,
            dry_run,
        } => {
            research::run_research(
                &config,
                &accounts,
                count,
                source,
                excerpt_chars,
                out.as_deref(),
                dry_run,
            )
            .await
        }
        Commands::Accounts => accounts::run_accounts(&config),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands, Source};

    #[test]
    fn parses_research_defaults() {
        let cli = Cli::try_parse_from(["gramlens", "research"]).unwrap();
        match cli.command {
            Commands::Research {
                accounts,
                count,
                source,
                excerpt_chars,
                out,
                dry_run,
            } => {
                assert!(accounts.is_empty());
                assert_eq!(count, None);
                assert_eq!(source, Source::Graph);
                assert_eq!(excerpt_chars, None);
                assert_eq!(out, None);
                assert!(!dry_run);
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_comma_separated_accounts() {
        let cli =
            Cli::try_parse_from(["gramlens", "research", "--accounts", "nintendo_jp,sony"])
                .unwrap();
        match cli.command {
            Commands::Research { accounts, .. } => {
                assert_eq!(accounts, vec!["nintendo_jp", "sony"]);
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_repeated_accounts_flag() {
        let cli = Cli::try_parse_from([
            "gramlens",
            "research",
            "--accounts",
            "nintendo_jp",
            "--accounts",
            "xbox",
        ])
        .unwrap();
        match cli.command {
            Commands::Research { accounts, .. } => {
                assert_eq!(accounts, vec!["nintendo_jp", "xbox"]);
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_feed_source_and_count() {
        let cli = Cli::try_parse_from([
            "gramlens",
            "research",
            "--source",
            "feed",
            "--count",
            "25",
        ])
        .unwrap();
        match cli.command {
            Commands::Research { source, count, .. } => {
                assert_eq!(source, Source::Feed);
                assert_eq!(count, Some(25));
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_excerpt_chars_override() {
        let cli = Cli::try_parse_from(["gramlens", "research", "--excerpt-chars", "30"]).unwrap();
        match cli.command {
            Commands::Research { excerpt_chars, .. } => {
                assert_eq!(excerpt_chars, Some(30));
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_out_path_and_dry_run() {
        let cli = Cli::try_parse_from([
            "gramlens",
            "research",
            "--out",
            "reports/latest.csv",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Research { out, dry_run, .. } => {
                assert_eq!(out.unwrap().to_str(), Some("reports/latest.csv"));
                assert!(dry_run);
            }
            Commands::Accounts => panic!("expected research command"),
        }
    }

    #[test]
    fn parses_accounts_subcommand() {
        let cli = Cli::try_parse_from(["gramlens", "accounts"]).unwrap();
        assert!(matches!(cli.command, Commands::Accounts));
    }

    #[test]
    fn rejects_unknown_source() {
        let result = Cli::try_parse_from(["gramlens", "research", "--source", "rss"]);
        assert!(result.is_err());
    }

    #[test]
    fn source_labels() {
        assert_eq!(Source::Feed.as_str(), "feed");
        assert_eq!(Source::Graph.as_str(), "graph");
    }
}
