//! Output shapes of the engagement analysis.

use gramlens_core::CanonicalPost;

/// A canonical post annotated with its account baseline and outlier flag.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedPost {
    pub post: CanonicalPost,
    /// Mean like count across every analyzed post of the same account.
    pub group_mean_likes: f64,
    /// Whether the post's likes exceed the account baseline by the
    /// outlier multiplier.
    pub is_outlier: bool,
}

/// Per-account engagement baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountMean {
    pub account: String,
    pub mean_likes: f64,
    pub post_count: usize,
}

/// Full result of one analysis run.
///
/// `posts` are ranked by like count, descending; ties keep their arrival
/// order. `account_means` are sorted by handle so repeated runs over the
/// same input render identically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngagementReport {
    pub posts: Vec<AnalyzedPost>,
    pub account_means: Vec<AccountMean>,
}
