//! Private-feed source for gramlens.
//!
//! Authenticates with username and password, resolves handles to numeric
//! user ids, and pages through an account's recent posts. Raw records are
//! converted to [`gramlens_core::CanonicalPost`] via [`normalize_post`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
pub use normalize::normalize_post;
