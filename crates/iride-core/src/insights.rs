//! Read-only indicators derived from a [`SeoReport`] for presentation.
//!
//! None of these alter the report; they interpret it the way the dashboard
//! and exported documents do.

use std::ops::RangeInclusive;

use crate::report::{AnchorType, Keyword, SeoReport};

/// Nominal rank band for top keywords.
pub const TOP_RANK_BAND: RangeInclusive<u32> = 1..=10;
/// Nominal rank band for striking-distance keywords.
pub const OPPORTUNITY_RANK_BAND: RangeInclusive<u32> = 11..=30;

/// Authority above this is shown as a strong domain.
const STRONG_AUTHORITY: u32 = 50;

/// Formats large counts compactly: `950`, `1.2k`, `3.4M`.
#[must_use]
pub fn format_compact(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = n as f64;
    if n >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Points by which trust trails authority; `0` when trust keeps up.
#[must_use]
pub fn trust_gap(report: &SeoReport) -> u32 {
    report.zoom_authority.saturating_sub(report.zoom_trust)
}

/// Trust below authority suggests spam or manipulated links.
#[must_use]
pub fn has_manipulation_risk(report: &SeoReport) -> bool {
    report.zoom_trust < report.zoom_authority
}

#[must_use]
pub fn has_strong_authority(report: &SeoReport) -> bool {
    report.zoom_authority > STRONG_AUTHORITY
}

/// Sum of the anchor percentages as reported; not guaranteed to be 100.
#[must_use]
pub fn anchor_percentage_total(report: &SeoReport) -> u32 {
    report.anchor_profile.iter().map(|a| a.percentage).sum()
}

/// Share of a given anchor type, summed across entries.
#[must_use]
pub fn anchor_share(report: &SeoReport, kind: AnchorType) -> u32 {
    report
        .anchor_profile
        .iter()
        .filter(|a| a.kind == kind)
        .map(|a| a.percentage)
        .sum()
}

/// Keywords whose current rank lies outside the nominal band.
#[must_use]
pub fn out_of_band<'a>(keywords: &'a [Keyword], band: &RangeInclusive<u32>) -> Vec<&'a Keyword> {
    keywords
        .iter()
        .filter(|k| !band.contains(&k.current_rank))
        .collect()
}

/// Rank movement from the first to the last recorded position.
///
/// Positive means the keyword climbed. `None` with fewer than two points.
#[must_use]
pub fn rank_change(keyword: &Keyword) -> Option<i64> {
    match keyword.rank_history.as_slice() {
        [first, .., last] => Some(i64::from(*first) - i64::from(*last)),
        _ => None,
    }
}
