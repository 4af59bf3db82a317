//! Channel grouping of search matches
//!
//! Groups borrow from the envelope they were built from, so they can be
//! rebuilt at any time and never alter the source list.

use std::collections::HashMap;

use crate::core::models::{MatchedMessage, TimeStamp};

/// Which channel attribute identifies a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupKey {
    /// Display name. Two channels sharing a name end up in one group.
    #[default]
    ChannelName,
    /// Stable channel id, robust against renames and duplicate names.
    ChannelId,
}

impl GroupKey {
    fn key_of<'a>(self, message: &'a MatchedMessage) -> &'a str {
        match self {
            GroupKey::ChannelName => &message.channel.name,
            GroupKey::ChannelId => &message.channel.id,
        }
    }
}

/// Matches that share one grouping key, in the order they were returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGroup<'a> {
    pub key: &'a str,
    /// Display name of the first match in the group.
    pub channel_name: &'a str,
    pub messages: Vec<&'a MatchedMessage>,
}

impl<'a> ChannelGroup<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Newest timestamp in the group, compared on the raw wire strings.
    #[must_use]
    pub fn latest_ts(&self) -> Option<&'a TimeStamp> {
        self.messages.iter().map(|&m| &m.ts).max()
    }
}

/// Insertion-ordered mapping from grouping key to its matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelGroups<'a> {
    groups: Vec<ChannelGroup<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ChannelGroups<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ChannelGroup<'a>> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|g| g.key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelGroup<'a>> {
        self.groups.iter()
    }

    fn push(&mut self, key: &'a str, message: &'a MatchedMessage) {
        if let Some(&i) = self.index.get(key) {
            self.groups[i].messages.push(message);
        } else {
            self.index.insert(key, self.groups.len());
            self.groups.push(ChannelGroup {
                key,
                channel_name: &message.channel.name,
                messages: vec![message],
            });
        }
    }
}

impl<'a> IntoIterator for ChannelGroups<'a> {
    type Item = ChannelGroup<'a>;
    type IntoIter = std::vec::IntoIter<ChannelGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Group matches by channel name.
///
/// `None` (no envelope, or an error envelope) and an empty slice both give an
/// empty mapping.
#[must_use]
pub fn group_by_channel(matches: Option<&[MatchedMessage]>) -> ChannelGroups<'_> {
    group_by(matches, GroupKey::ChannelName)
}

/// Group matches by the given key, keeping input order inside each group.
#[must_use]
pub fn group_by(matches: Option<&[MatchedMessage]>, key: GroupKey) -> ChannelGroups<'_> {
    let mut groups = ChannelGroups::default();
    for message in matches.unwrap_or_default() {
        groups.push(key.key_of(message), message);
    }
    groups
}

/// Order groups by match count, largest first.
///
/// The sort is stable: groups of equal size keep their first-seen order.
#[must_use]
pub fn sort_groups(groups: ChannelGroups<'_>) -> Vec<ChannelGroup<'_>> {
    let mut sorted: Vec<ChannelGroup<'_>> = groups.into_iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
}
