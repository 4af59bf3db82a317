//! All Slack-specific functionality

pub mod client;

// Re-export main types for convenience
pub use client::{SEARCH_PAGE_SIZE, SlackClient, build_search_url};
