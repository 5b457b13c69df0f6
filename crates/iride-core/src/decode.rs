//! Strict decode-and-validate for structured analysis responses.
//!
//! The model's JSON is never trusted implicitly: it must deserialize into
//! [`SeoReport`] with every required field present and correctly typed, or
//! decoding fails with [`ReportFormatError`]. Bounded scores that drift out
//! of range are clamped and reported as [`Adjustment`]s.

use serde_json::error::Category;

use crate::error::ReportFormatError;
use crate::report::SeoReport;

/// Upper bound shared by every 0-100 score in the report.
pub const SCORE_MAX: u32 = 100;

/// A correction applied to an out-of-range value during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// JSON-pointer-like path of the corrected field, e.g. `topKeywords[2].difficulty`.
    pub field: String,
    pub original: u32,
    pub corrected: u32,
}

/// Decodes a raw structured response into a validated [`SeoReport`].
///
/// A surrounding Markdown code fence is tolerated. Any other deviation from
/// the contract is an error; there is no partial result.
///
/// # Errors
///
/// - [`ReportFormatError::Empty`] if the body is blank.
/// - [`ReportFormatError::NotJson`] if the body is not syntactically valid JSON.
/// - [`ReportFormatError::Shape`] if a required field is missing, has the wrong
///   type, carries an unknown enum value or a negative count.
pub fn decode_report(raw: &str) -> Result<SeoReport, ReportFormatError> {
    decode_report_with_adjustments(raw).map(|(report, _)| report)
}

/// Like [`decode_report`] but also returns the clamping corrections applied.
///
/// # Errors
///
/// See [`decode_report`].
pub fn decode_report_with_adjustments(
    raw: &str,
) -> Result<(SeoReport, Vec<Adjustment>), ReportFormatError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(ReportFormatError::Empty);
    }

    let mut report: SeoReport = serde_json::from_str(body).map_err(|e| match e.classify() {
        Category::Data => ReportFormatError::Shape(e),
        Category::Syntax | Category::Eof | Category::Io => ReportFormatError::NotJson(e),
    })?;

    let adjustments = clamp_out_of_range(&mut report);
    for adj in &adjustments {
        tracing::warn!(
            field = %adj.field,
            original = adj.original,
            corrected = adj.corrected,
            "clamped out-of-range value in analysis response"
        );
    }

    Ok((report, adjustments))
}

/// Removes a ```` ```json ```` fence if the model wrapped its output in one.
fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // Drop the info string (`json`), which may share a line with the body.
    let rest = match rest.split_once('\n') {
        Some((_, tail)) => tail,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn clamp_out_of_range(report: &mut SeoReport) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    clamp_max(&mut report.zoom_authority, "zoomAuthority", &mut adjustments);
    clamp_max(&mut report.zoom_trust, "zoomTrust", &mut adjustments);

    for (i, anchor) in report.anchor_profile.iter_mut().enumerate() {
        clamp_max(
            &mut anchor.percentage,
            &format!("anchorProfile[{i}].percentage"),
            &mut adjustments,
        );
    }

    for (list, name) in [
        (&mut report.top_keywords, "topKeywords"),
        (&mut report.opportunity_keywords, "opportunityKeywords"),
    ] {
        for (i, keyword) in list.iter_mut().enumerate() {
            clamp_max(
                &mut keyword.difficulty,
                &format!("{name}[{i}].difficulty"),
                &mut adjustments,
            );
            raise_to_first(
                &mut keyword.current_rank,
                &format!("{name}[{i}].currentRank"),
                &mut adjustments,
            );
            for (j, rank) in keyword.rank_history.iter_mut().enumerate() {
                raise_to_first(
                    rank,
                    &format!("{name}[{i}].rankHistory[{j}]"),
                    &mut adjustments,
                );
            }
        }
    }

    for (i, competitor) in report.competitors.iter_mut().enumerate() {
        clamp_max(
            &mut competitor.overlap_score,
            &format!("competitors[{i}].overlapScore"),
            &mut adjustments,
        );
    }

    adjustments
}

fn clamp_max(value: &mut u32, field: &str, adjustments: &mut Vec<Adjustment>) {
    if *value > SCORE_MAX {
        adjustments.push(Adjustment {
            field: field.to_string(),
            original: *value,
            corrected: SCORE_MAX,
        });
        *value = SCORE_MAX;
    }
}

// Ranks are 1-based positions.
fn raise_to_first(value: &mut u32, field: &str, adjustments: &mut Vec<Adjustment>) {
    if *value == 0 {
        adjustments.push(Adjustment {
            field: field.to_string(),
            original: 0,
            corrected: 1,
        });
        *value = 1;
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
