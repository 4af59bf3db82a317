//! Terminal rendition of the search panel
//!
//! `SearchSession` holds the latest envelope and decides whether a finished
//! request may replace it. The `render_*` functions turn an envelope into
//! grouped text.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::core::models::{MatchedMessage, SearchEnvelope};
use crate::search::grouping::{ChannelGroup, GroupKey, group_by, sort_groups};
use crate::time_format::DisplayZone;

/// Slack query modifiers shown next to the query box.
pub const QUERY_CHEATSHEET: &[(&str, &str)] = &[
    ("before:2024-02-10", "before 2024/02/10 (the day itself excluded)"),
    ("after:2024-02-10", "after 2024/02/10 (the day itself excluded)"),
    ("on:2024-02-10", "on 2024/02/10"),
    ("is:thread with:alice", "threads you took part in with alice"),
    ("-from:me", "exclude your own messages"),
];

/// Ticket handed out when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestSeq(u64);

impl RequestSeq {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The panel's only mutable state: the latest result and the in-flight ticket.
///
/// A response is applied only when its ticket is the most recent one issued,
/// so an older request finishing late cannot overwrite a newer result.
#[derive(Debug, Default)]
pub struct SearchSession {
    issued: u64,
    pending: Option<RequestSeq>,
    latest: Option<SearchEnvelope>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestSeq {
        self.issued += 1;
        let seq = RequestSeq(self.issued);
        self.pending = Some(seq);
        seq
    }

    fn is_current(&self, seq: RequestSeq) -> bool {
        seq.0 == self.issued
    }

    /// Store the envelope if `seq` is still current. Returns whether it was applied.
    pub fn complete(&mut self, seq: RequestSeq, envelope: SearchEnvelope) -> bool {
        if !self.is_current(seq) {
            debug!(seq = seq.0, latest = self.issued, "Dropping stale search response");
            return false;
        }
        self.pending = None;
        self.latest = Some(envelope);
        true
    }

    /// Clear the loading state after a failed request, keeping the previous result.
    pub fn fail(&mut self, seq: RequestSeq) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.pending = None;
        true
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&SearchEnvelope> {
        self.latest.as_ref()
    }
}

/// Render an envelope as channel sections, biggest channel first.
#[must_use]
pub fn render_results(
    envelope: &SearchEnvelope,
    key: GroupKey,
    zone: DisplayZone,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    if !envelope.ok {
        let code = envelope.error.as_deref().unwrap_or("unknown_error");
        warn!(error = code, "search.messages returned ok=false");
        let _ = writeln!(out, "Slack returned an error: {code}");
        return out;
    }

    let groups = sort_groups(group_by(envelope.matches(), key));
    if groups.is_empty() {
        let _ = writeln!(out, "No messages matched \"{}\".", envelope.query);
        return out;
    }

    for group in &groups {
        out.push_str(&render_group(group, zone, now));
    }
    out
}

/// One channel section: a header with the match count, channel name and the
/// age of the newest match, then every match in envelope order.
#[must_use]
pub fn render_group(group: &ChannelGroup<'_>, zone: DisplayZone, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let latest = group
        .latest_ts()
        .map(|ts| zone.relative_at(ts, now))
        .unwrap_or_default();

    let _ = writeln!(out, "[{}] #{}  ({latest})", group.len(), group.channel_name);
    for message in &group.messages {
        out.push_str(&render_message(message, zone));
    }
    out.push('\n');
    out
}

#[must_use]
pub fn render_message(message: &MatchedMessage, zone: DisplayZone) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  👤 {}  {}", message.username, zone.absolute(&message.ts));
    if !message.permalink.is_empty() {
        let _ = writeln!(out, "  {}", message.permalink);
    }
    for line in message.text.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out
}

#[must_use]
pub fn render_cheatsheet() -> String {
    let width = QUERY_CHEATSHEET
        .iter()
        .map(|(modifier, _)| modifier.len())
        .max()
        .unwrap_or(0);

    QUERY_CHEATSHEET
        .iter()
        .map(|(modifier, meaning)| format!("{modifier:<width$}   {meaning}\n"))
        .collect()
}
