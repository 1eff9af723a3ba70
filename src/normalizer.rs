//! Temporal normalization.
//!
//! Populates each norm's `temporal_interval` from its explicit effective
//! dates or, failing that, from temporal phrases in its text snippet
//! ("enters into force on ...", "expires on ...", and so on). Norms with no
//! usable temporal information degrade to an open-ended, uncertain
//! interval; this is logged, never fatal.

use chrono::NaiveDate;
use regex::RegexBuilder;
use tracing::debug;

use crate::interval::TemporalInterval;
use crate::norm::Norm;

/// Which interval bound a matched temporal phrase contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundKind {
    Start,
    End,
}

/// Date-shaped capture: ISO, "August 2, 2026", "August 2 2026",
/// or "2 August 2026".
const DATE_CAPTURE: &str = r"(\d{4}-\d{2}-\d{2}|\w+\s+\d{1,2},?\s+\d{4}|\d{1,2}\s+\w+\s+\d{4})";

/// Phrase prefixes recognized in legal text, with the bound they feed.
const TEMPORAL_PATTERNS: &[(&str, BoundKind)] = &[
    // Entry into force
    (r"enters?\s+into\s+force\s+on\s+", BoundKind::Start),
    (r"shall\s+enter\s+into\s+force\s+on\s+", BoundKind::Start),
    // Application dates
    (r"applies?\s+from\s+", BoundKind::Start),
    (r"shall\s+apply\s+from\s+", BoundKind::Start),
    (r"effective\s+(?:from\s+)?", BoundKind::Start),
    (r"takes?\s+effect\s+(?:on\s+)?", BoundKind::Start),
    // Expiration
    (r"expires?\s+(?:on\s+)?", BoundKind::End),
    (r"ceases?\s+to\s+apply\s+(?:on\s+)?", BoundKind::End),
    (r"valid\s+until\s+", BoundKind::End),
];

/// Date formats accepted inside temporal phrases.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// Normalizes temporal information for norms.
///
/// Normalization is idempotent: a norm whose `temporal_interval` is already
/// populated is left untouched, so a second pass changes nothing.
#[derive(Debug)]
pub struct TemporalNormalizer {
    patterns: Vec<(regex::Regex, BoundKind)>,
}

impl TemporalNormalizer {
    /// Creates a normalizer with the built-in phrase patterns.
    #[must_use]
    pub fn new() -> Self {
        let patterns = TEMPORAL_PATTERNS
            .iter()
            .filter_map(|(prefix, kind)| {
                RegexBuilder::new(&format!("{prefix}{DATE_CAPTURE}"))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, *kind))
            })
            .collect();
        Self { patterns }
    }

    /// Parses a temporal expression from free text.
    ///
    /// Keeps the earliest start-contributing date and the latest
    /// end-contributing date; the result is open-ended when only a start
    /// was found. Returns None when no date could be recovered.
    #[must_use]
    pub fn parse_temporal_expression(&self, text: &str) -> Option<TemporalInterval> {
        let mut start: Option<NaiveDate> = None;
        let mut end: Option<NaiveDate> = None;

        for (pattern, kind) in &self.patterns {
            for captures in pattern.captures_iter(text) {
                let Some(date) = captures.get(1).and_then(|m| parse_date(m.as_str())) else {
                    continue;
                };
                match kind {
                    BoundKind::Start => {
                        if start.map_or(true, |existing| date < existing) {
                            start = Some(date);
                        }
                    }
                    BoundKind::End => {
                        if end.map_or(true, |existing| date > existing) {
                            end = Some(date);
                        }
                    }
                }
            }
        }

        if start.is_none() && end.is_none() {
            return None;
        }

        Some(TemporalInterval::new(
            start,
            end,
            start.is_some() && end.is_none(),
        ))
    }

    /// Derives the temporal interval for one norm.
    ///
    /// Priority: explicit effective dates, then the text snippet, then the
    /// open-ended uncertain fallback.
    #[must_use]
    pub fn extract_from_norm(&self, norm: &Norm) -> TemporalInterval {
        if norm.effective_start.is_some() || norm.effective_end.is_some() {
            return TemporalInterval::new(
                norm.effective_start,
                norm.effective_end,
                norm.effective_end.is_none() && norm.effective_start.is_some(),
            );
        }

        if let Some(snippet) = &norm.text_snippet {
            if let Some(interval) = self.parse_temporal_expression(snippet) {
                return interval;
            }
        }

        debug!(
            source_id = %norm.source_id,
            version_id = %norm.version_id,
            "no usable temporal information; falling back to uncertain open interval"
        );
        TemporalInterval::uncertain_open()
    }

    /// Populates `temporal_interval` on every norm that lacks one.
    #[must_use]
    pub fn normalize_norms(&self, mut norms: Vec<Norm>) -> Vec<Norm> {
        for norm in &mut norms {
            if norm.temporal_interval.is_none() {
                norm.temporal_interval = Some(self.extract_from_norm(norm));
            }
        }
        norms
    }
}

impl Default for TemporalNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a date string in any of the accepted formats.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cleaned, format).ok())
}
