//! Ranking, per-account baselines, and outlier classification.

use std::collections::HashMap;

use gramlens_core::CanonicalPost;

use crate::types::{AccountMean, AnalyzedPost, EngagementReport};

/// A post is an outlier when its likes strictly exceed the account mean
/// times this multiplier.
pub const OUTLIER_MULTIPLIER: f64 = 1.5;

/// Analyzes a batch of canonical posts.
///
/// Posts are ranked by like count, descending, with a stable sort so ties
/// keep their arrival order. Baselines are computed per account over the
/// full batch before any post is classified: a post's outlier flag depends
/// on every other post of its account, including ones that arrived later.
/// Accounts are grouped by the literal handle, case-sensitively.
///
/// A single-post account can never be an outlier, since its likes equal its
/// own mean. Empty input produces an empty report.
#[must_use]
pub fn analyze(mut posts: Vec<CanonicalPost>) -> EngagementReport {
    posts.sort_by(|a, b| b.like_count.cmp(&a.like_count));

    // Sums accumulate in u128: per-post counts are arbitrary u64, so a u64
    // group total could wrap.
    let mut sums: HashMap<String, (u128, usize)> = HashMap::new();
    for post in &posts {
        let entry = sums.entry(post.account.clone()).or_insert((0, 0));
        entry.0 += u128::from(post.like_count);
        entry.1 += 1;
    }

    let mut account_means: Vec<AccountMean> = sums
        .into_iter()
        .map(|(account, (likes, count))| {
            #[allow(clippy::cast_precision_loss)]
            let mean_likes = likes as f64 / count as f64;
            AccountMean {
                account,
                mean_likes,
                post_count: count,
            }
        })
        .collect();
    account_means.sort_by(|a, b| a.account.cmp(&b.account));

    let mean_by_account: HashMap<String, f64> = account_means
        .iter()
        .map(|m| (m.account.clone(), m.mean_likes))
        .collect();

    let analyzed = posts
        .into_iter()
        .map(|post| {
            let group_mean_likes = mean_by_account
                .get(post.account.as_str())
                .copied()
                .unwrap_or(0.0);
            #[allow(clippy::cast_precision_loss)]
            let likes = post.like_count as f64;
            let is_outlier = likes > group_mean_likes * OUTLIER_MULTIPLIER;
            AnalyzedPost {
                post,
                group_mean_likes,
                is_outlier,
            }
        })
        .collect();

    EngagementReport {
        posts: analyzed,
        account_means,
    }
}
