//! Post-processing of search results

pub mod grouping;

pub use grouping::{ChannelGroup, ChannelGroups, GroupKey, group_by, group_by_channel, sort_groups};
