//! Display helpers for Slack timestamps
//!
//! Absolute times render as `YYYY/MM/DD HH:MM:SS`. Relative times use hour,
//! minute and second units followed by `前` ("ago"), and fall back to the
//! absolute form once the message is more than a day old.

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::core::models::TimeStamp;

pub const ABSOLUTE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Relative rendering is used up to and including this many seconds.
pub const RELATIVE_WINDOW_SECS: i64 = 86_400;

/// Timezone used for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    #[default]
    Local,
    Named(Tz),
}

impl From<Option<Tz>> for DisplayZone {
    fn from(tz: Option<Tz>) -> Self {
        tz.map_or(DisplayZone::Local, DisplayZone::Named)
    }
}

impl DisplayZone {
    #[must_use]
    pub fn absolute(self, ts: &TimeStamp) -> String {
        match self {
            DisplayZone::Local => display_absolute_in(ts, &Local),
            DisplayZone::Named(tz) => display_absolute_in(ts, &tz),
        }
    }

    #[must_use]
    pub fn relative_at(self, ts: &TimeStamp, now: DateTime<Utc>) -> String {
        match self {
            DisplayZone::Local => display_relative_at(ts, now, &Local),
            DisplayZone::Named(tz) => display_relative_at(ts, now, &tz),
        }
    }

    #[must_use]
    pub fn relative(self, ts: &TimeStamp) -> String {
        self.relative_at(ts, Utc::now())
    }
}

/// Absolute date-time in the local timezone.
#[must_use]
pub fn display_absolute(ts: &TimeStamp) -> String {
    display_absolute_in(ts, &Local)
}

/// Absolute date-time in `tz`. An unparseable timestamp is returned verbatim.
#[must_use]
pub fn display_absolute_in<Z>(ts: &TimeStamp, tz: &Z) -> String
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    match ts.to_datetime() {
        Ok(dt) => dt.with_timezone(tz).format(ABSOLUTE_FORMAT).to_string(),
        Err(e) => {
            warn!("Cannot render timestamp: {}", e);
            ts.to_string()
        }
    }
}

/// Time elapsed since `ts`, measured against the current clock.
#[must_use]
pub fn display_relative(ts: &TimeStamp) -> String {
    display_relative_at(ts, Utc::now(), &Local)
}

/// Time elapsed between `ts` and `now`; older than a day falls back to
/// [`display_absolute_in`].
#[must_use]
pub fn display_relative_at<Z>(ts: &TimeStamp, now: DateTime<Utc>, tz: &Z) -> String
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    let then = match ts.to_datetime() {
        Ok(dt) => dt,
        Err(e) => {
            warn!("Cannot render timestamp: {}", e);
            return ts.to_string();
        }
    };

    let diff_secs = elapsed_secs(then, now);
    if diff_secs > RELATIVE_WINDOW_SECS {
        return display_absolute_in(ts, tz);
    }
    format_elapsed(diff_secs)
}

/// Relative form for an optional timestamp; empty when there is none.
#[must_use]
pub fn display_relative_opt(ts: Option<&TimeStamp>) -> String {
    ts.map(display_relative).unwrap_or_default()
}

/// Whole seconds from `then` to `now`, floored. Future instants clamp to 0.
fn elapsed_secs(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let micros = (now - then).num_microseconds().unwrap_or(i64::MAX);
    micros.div_euclid(1_000_000).max(0)
}

/// Render an elapsed duration in seconds as hour/minute/second units.
///
/// Hours appear when nonzero. Minutes appear when hours or minutes are
/// nonzero. Seconds appear only when both hours and minutes are zero.
#[must_use]
pub fn format_elapsed(diff_secs: i64) -> String {
    let diff_secs = diff_secs.max(0);
    let hours = diff_secs / 3600;
    let minutes = (diff_secs % 3600) / 60;
    let seconds = diff_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}時間"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}分"));
    } else {
        out.push_str(&format!("{seconds}秒"));
    }
    out.push('前');
    out
}
