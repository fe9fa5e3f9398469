//! Graph API source for gramlens.
//!
//! Fetches an account's recent media through the business-discovery field
//! expansion, which lets one token-holding business user look up another
//! business account by handle. No password or session is involved; the
//! trade-off is that only business and creator accounts are discoverable.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::GraphClient;
pub use error::GraphError;
pub use normalize::normalize_media;
