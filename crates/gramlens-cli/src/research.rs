//! Engagement research command: fetch, normalize, analyze, export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use gramlens_core::{AppConfig, CanonicalPost};
use gramlens_engagement::{analyze, write_csv_file, EngagementReport};
use gramlens_feed::FeedClient;
use gramlens_graph::GraphClient;

use crate::Source;

/// Per-account result for the end-of-run summary. Failed accounts never
/// abort the run unless every account fails.
enum AccountOutcome {
    Fetched { posts: usize, skipped: usize },
    Failed { reason: String },
}

enum Fetcher {
    Feed(FeedClient),
    Graph { client: GraphClient, user_id: String },
}

pub(crate) async fn run_research(
    config: &AppConfig,
    accounts: &[String],
    count: Option<u32>,
    source: Source,
    excerpt_chars: Option<usize>,
    out: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let handles = resolve_handles(config, accounts)?;
    let (count, excerpt_chars) = resolve_limits(config, count, excerpt_chars)?;

    if dry_run {
        println!(
            "dry-run: would fetch {count} posts each for {} accounts via {}: [{}]",
            handles.len(),
            source.as_str(),
            handles.join(", ")
        );
        return Ok(());
    }

    let fetcher = build_fetcher(config, source).await?;

    let mut posts: Vec<CanonicalPost> = Vec::new();
    let mut outcomes: Vec<(String, AccountOutcome)> = Vec::new();

    for (index, handle) in handles.iter().enumerate() {
        if index > 0 {
            pause_between_accounts(config).await;
        }

        match fetcher
            .fetch_account(handle, count, excerpt_chars, config.page_delay_ms)
            .await
        {
            Ok((account_posts, skipped)) => {
                tracing::info!(
                    account = %handle,
                    posts = account_posts.len(),
                    skipped,
                    "account fetched"
                );
                outcomes.push((
                    handle.clone(),
                    AccountOutcome::Fetched {
                        posts: account_posts.len(),
                        skipped,
                    },
                ));
                posts.extend(account_posts);
            }
            Err(e) => {
                tracing::error!(account = %handle, error = %e, "account fetch failed");
                outcomes.push((
                    handle.clone(),
                    AccountOutcome::Failed {
                        reason: e.to_string(),
                    },
                ));
            }
        }
    }

    let failed = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, AccountOutcome::Failed { .. }))
        .count();
    if failed == handles.len() {
        anyhow::bail!("all {failed} accounts failed to fetch");
    }

    if posts.is_empty() {
        render_outcomes(&outcomes);
        println!("\nno posts fetched; nothing to analyze");
        return Ok(());
    }

    let report = analyze(posts);

    render_report(&report);
    render_outcomes(&outcomes);

    let path = out.map_or_else(default_csv_path, Path::to_path_buf);
    write_csv_file(&report, &path)?;
    println!("\nexported {} rows to {}", report.posts.len(), path.display());

    Ok(())
}

/// Explicit `--accounts` handles win; otherwise the whole roster file runs.
fn resolve_handles(config: &AppConfig, accounts: &[String]) -> anyhow::Result<Vec<String>> {
    if accounts.is_empty() {
        let roster = gramlens_core::load_accounts(&config.accounts_path)?;
        Ok(roster
            .accounts
            .into_iter()
            .map(|account| account.handle)
            .collect())
    } else {
        Ok(accounts.to_vec())
    }
}

/// Explicit flag overrides win over the configured defaults; zero is
/// rejected either way, matching the env-var validation.
fn resolve_limits(
    config: &AppConfig,
    count: Option<u32>,
    excerpt_chars: Option<usize>,
) -> anyhow::Result<(u32, usize)> {
    let count = count.unwrap_or(config.fetch_count);
    if count == 0 {
        anyhow::bail!("--count must be at least 1");
    }
    let excerpt_chars = excerpt_chars.unwrap_or(config.caption_excerpt_chars);
    if excerpt_chars == 0 {
        anyhow::bail!("--excerpt-chars must be at least 1");
    }
    Ok((count, excerpt_chars))
}

async fn build_fetcher(config: &AppConfig, source: Source) -> anyhow::Result<Fetcher> {
    match source {
        Source::Feed => {
            let (username, password) = config.feed_credentials()?;
            let client = FeedClient::login(
                username,
                password,
                config.request_timeout_secs,
                &config.user_agent,
            )
            .await?;
            Ok(Fetcher::Feed(client))
        }
        Source::Graph => {
            let (access_token, user_id) = config.graph_credentials()?;
            let client =
                GraphClient::new(access_token, config.request_timeout_secs, &config.user_agent)?;
            Ok(Fetcher::Graph {
                client,
                user_id: user_id.to_owned(),
            })
        }
    }
}

impl Fetcher {
    /// Fetch one account and normalize its records. Malformed records are
    /// logged and skipped; they never fail the account.
    async fn fetch_account(
        &self,
        handle: &str,
        count: u32,
        excerpt_chars: usize,
        page_delay_ms: u64,
    ) -> anyhow::Result<(Vec<CanonicalPost>, usize)> {
        match self {
            Self::Feed(client) => {
                let items = client
                    .fetch_recent_posts(handle, count, page_delay_ms)
                    .await?;
                let mut posts = Vec::with_capacity(items.len());
                let mut skipped = 0usize;
                for item in &items {
                    match gramlens_feed::normalize_post(handle, item, excerpt_chars) {
                        Ok(post) => posts.push(post),
                        Err(e) => {
                            tracing::warn!(account = %handle, error = %e, "skipping record");
                            skipped += 1;
                        }
                    }
                }
                Ok((posts, skipped))
            }
            Self::Graph { client, user_id } => {
                let records = client.discover_recent_media(user_id, handle, count).await?;
                let mut posts = Vec::with_capacity(records.len());
                let mut skipped = 0usize;
                for record in &records {
                    match gramlens_graph::normalize_media(handle, record, excerpt_chars) {
                        Ok(post) => posts.push(post),
                        Err(e) => {
                            tracing::warn!(account = %handle, error = %e, "skipping record");
                            skipped += 1;
                        }
                    }
                }
                Ok((posts, skipped))
            }
        }
    }
}

/// Random pause between account fetches so consecutive requests do not
/// arrive at a machine-regular cadence.
async fn pause_between_accounts(config: &AppConfig) {
    let delay_ms = rand::random_range(config.account_delay_min_ms..=config.account_delay_max_ms);
    if delay_ms > 0 {
        tracing::debug!(delay_ms, "pausing before next account");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

fn render_report(report: &EngagementReport) {
    println!(
        "{:<20}{:>10}{:>10}{:>12}  {:<9}CAPTION",
        "ACCOUNT", "LIKES", "COMMENTS", "MEAN", "FLAG"
    );
    for analyzed in &report.posts {
        let post = &analyzed.post;
        let flag = if analyzed.is_outlier { "OUTLIER" } else { "" };
        println!(
            "{:<20}{:>10}{:>10}{:>12.1}  {:<9}{}",
            post.account,
            post.like_count,
            post.comment_count,
            analyzed.group_mean_likes,
            flag,
            post.caption_excerpt
        );
    }

    println!();
    println!("{:<20}{:>8}{:>14}", "ACCOUNT", "POSTS", "MEAN LIKES");
    for mean in &report.account_means {
        println!(
            "{:<20}{:>8}{:>14.1}",
            mean.account, mean.post_count, mean.mean_likes
        );
    }
}

fn render_outcomes(outcomes: &[(String, AccountOutcome)]) {
    println!();
    println!("{:<20}STATUS", "ACCOUNT");
    for (handle, outcome) in outcomes {
        match outcome {
            AccountOutcome::Fetched { posts, skipped } if *skipped > 0 => {
                println!("{handle:<20}ok ({posts} posts, {skipped} records skipped)");
            }
            AccountOutcome::Fetched { posts, .. } => {
                println!("{handle:<20}ok ({posts} posts)");
            }
            AccountOutcome::Failed { reason } => {
                println!("{handle:<20}failed: {reason}");
            }
        }
    }
}

fn default_csv_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M");
    PathBuf::from("data").join(format!("research_{stamp}.csv"))
}
