//! Insights engine: statistics, patterns, and trend series over an entry snapshot.
//!
//! Every function here is pure. Given the same entries and the same clock value
//! the output is identical, and an empty snapshot yields sentinels or empty
//! lists rather than errors. Each insight takes its own trailing window:
//!
//! | Insight | Default window | Membership |
//! |---------|----------------|------------|
//! | [`stats::compute_stats`] | 30 days | `timestamp >= now - N days` |
//! | [`patterns::detect_patterns`] | 14 days | `timestamp >= now - N days` |
//! | [`trend::compute_trend`] | 7 days | `date` equals one of the last N calendar days |

pub mod patterns;
pub mod stats;
pub mod trend;
pub mod window;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::InsightsConfig;
use crate::journal::types::Entry;
use patterns::Pattern;
use stats::Stats;
use trend::TrendPoint;

/// Everything the insights view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    pub stats: Stats,
    pub patterns: Vec<Pattern>,
    pub trend: Vec<TrendPoint>,
}

impl InsightsReport {
    pub fn compute(entries: &[Entry], config: &InsightsConfig, now: DateTime<Utc>) -> Self {
        Self {
            stats: stats::compute_stats(entries, config.stats_window_days, now),
            patterns: patterns::detect_patterns(entries, config.pattern_window_days, now),
            trend: trend::compute_trend(entries, config.trend_window_days, now.date_naive()),
        }
    }
}
