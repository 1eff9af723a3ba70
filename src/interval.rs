//! Temporal interval algebra over legal effectiveness windows.
//!
//! Intervals carry calendar dates and may be open-ended (no known end) or
//! uncertain (ambiguous source dates). All operations are pure and total.
//! Where a comparison touches a missing date, the algebra returns the
//! overlap-permissive answer: in an audit tool a missed conflict is worse
//! than a spurious one. The single exception is the *undefined* interval
//! (no bounds at all, not open-ended), which never overlaps anything.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Boundary style of an interval.
///
/// Retained on the wire for forward compatibility; the overlap logic treats
/// every interval as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    /// `[start, end]`
    Closed,
    /// `(start, end)`
    Open,
    /// `(start, end]`
    HalfOpenLeft,
    /// `[start, end)`
    HalfOpenRight,
}

impl Default for IntervalType {
    fn default() -> Self {
        Self::Closed
    }
}

/// A possibly open-ended, possibly uncertain date range.
///
/// Immutable value type: created by the normalizer or detector, never
/// mutated after construction.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lexcheck::TemporalInterval;
///
/// let a = TemporalInterval::bounded(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
/// );
/// let b = TemporalInterval::starting_at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// assert!(a.overlaps(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporalInterval {
    /// Start of the range (inclusive). None when unknown.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// End of the range (inclusive). Ignored by the algebra when
    /// `is_open_ended` is set.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Boundary style; not load-bearing for overlap logic.
    #[serde(default)]
    pub interval_type: IntervalType,

    /// True when the range has no known end.
    #[serde(default)]
    pub is_open_ended: bool,

    /// True when the source dates were ambiguous.
    #[serde(default)]
    pub uncertainty_flag: bool,
}

impl TemporalInterval {
    /// Creates an interval from optional bounds.
    ///
    /// `is_open_ended` is authoritative: when it is set together with a
    /// concrete `end_date`, the end is treated as stale and a warning is
    /// logged.
    #[must_use]
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        is_open_ended: bool,
    ) -> Self {
        if is_open_ended && end_date.is_some() {
            tracing::warn!(
                ?start_date,
                ?end_date,
                "open-ended interval carries a concrete end date; treating it as unbounded"
            );
        }
        Self {
            start_date,
            end_date,
            interval_type: IntervalType::Closed,
            is_open_ended,
            uncertainty_flag: false,
        }
    }

    /// Creates a closed interval between two dates.
    #[must_use]
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end), false)
    }

    /// Creates an open-ended interval starting at the given date.
    #[must_use]
    pub fn starting_at(start: NaiveDate) -> Self {
        Self::new(Some(start), None, true)
    }

    /// The interval with no known bounds at all. Never overlaps anything.
    #[must_use]
    pub fn undefined() -> Self {
        Self::new(None, None, false)
    }

    /// The open-ended, uncertain interval the normalizer falls back to when
    /// a norm carries no usable temporal information.
    #[must_use]
    pub fn uncertain_open() -> Self {
        Self {
            uncertainty_flag: true,
            ..Self::new(None, None, true)
        }
    }

    /// Marks the interval's dates as uncertain.
    #[must_use]
    pub fn with_uncertainty(mut self) -> Self {
        self.uncertainty_flag = true;
        self
    }

    /// End bound as the algebra sees it: None for open-ended intervals
    /// regardless of any stored `end_date`.
    #[must_use]
    pub const fn effective_end(&self) -> Option<NaiveDate> {
        if self.is_open_ended {
            None
        } else {
            self.end_date
        }
    }

    /// True when both bounds are absent and the interval is not open-ended.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && !self.is_open_ended
    }

    /// Checks whether two intervals share at least one day.
    ///
    /// Two open-ended intervals overlap iff both have begun. An open-ended
    /// interval against a bounded one overlaps iff the open start is at or
    /// before the bounded end, with missing dates resolving to overlap.
    /// Two bounded intervals require all four dates; an undefined interval
    /// overlaps nothing.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        // An undefined interval has no temporal contact with anything, not
        // even another undefined interval.
        if self.is_undefined() || other.is_undefined() {
            return false;
        }

        if self.is_open_ended && other.is_open_ended {
            // Two unbounded future ranges always overlap once both begin.
            return self.start_date.is_some() && other.start_date.is_some();
        }

        if self.is_open_ended {
            return match (self.start_date, other.effective_end()) {
                (Some(start), Some(end)) => start <= end,
                _ => true,
            };
        }

        if other.is_open_ended {
            return match (other.start_date, self.effective_end()) {
                (Some(start), Some(end)) => start <= end,
                _ => true,
            };
        }

        match (
            self.start_date,
            self.end_date,
            other.start_date,
            other.end_date,
        ) {
            (Some(s1), Some(e1), Some(s2), Some(e2)) => s1 <= e2 && s2 <= e1,
            _ => false,
        }
    }

    /// Returns the intersection of two intervals, or None when they do not
    /// overlap.
    ///
    /// Start is the max of the defined starts; end is the min of the
    /// defined effective ends. The result is open-ended when no end is
    /// defined and either input was open-ended.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let start = match (self.start_date, other.start_date) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let end = match (self.effective_end(), other.effective_end()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let open_ended = end.is_none() && (self.is_open_ended || other.is_open_ended);

        Some(Self::new(start, end, open_ended))
    }

    /// Returns the union of two intervals when they overlap or are adjacent
    /// (gap of at most one day); None when disjoint, since a disjoint union
    /// is not representable as a single interval.
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            if let (Some(end), Some(start)) = (self.effective_end(), other.start_date) {
                let gap = (start - end).num_days();
                if (0..=1).contains(&gap) {
                    return Some(Self::new(
                        self.start_date,
                        other.effective_end(),
                        other.is_open_ended,
                    ));
                }
            }
            if let (Some(end), Some(start)) = (other.effective_end(), self.start_date) {
                let gap = (start - end).num_days();
                if (0..=1).contains(&gap) {
                    return Some(Self::new(
                        other.start_date,
                        self.effective_end(),
                        self.is_open_ended,
                    ));
                }
            }
            return None;
        }

        if self.is_open_ended || other.is_open_ended {
            let start = match (self.start_date, other.start_date) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            return Some(Self::new(start, None, true));
        }

        match (
            self.start_date,
            self.end_date,
            other.start_date,
            other.end_date,
        ) {
            (Some(s1), Some(e1), Some(s2), Some(e2)) => {
                Some(Self::new(Some(s1.min(s2)), Some(e1.max(e2)), false))
            }
            _ => None,
        }
    }

    /// Checks whether a date falls within this interval (bounds inclusive).
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        if self.is_open_ended {
            return match self.start_date {
                Some(start) => date >= start,
                None => true,
            };
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Duration in days, or None for open-ended intervals or missing bounds.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        if self.is_open_ended {
            return None;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Splits the interval at a date, the split date itself belonging to
    /// the *after* half.
    ///
    /// A split date outside the interval returns the whole interval on the
    /// side it falls on.
    #[must_use]
    pub fn split_by_date(&self, split: NaiveDate) -> (Option<Self>, Option<Self>) {
        if !self.contains_date(split) {
            if let Some(start) = self.start_date {
                if split < start {
                    return (None, Some(self.clone()));
                }
            }
            return (Some(self.clone()), None);
        }

        let before = self
            .start_date
            .filter(|start| split > *start)
            .map(|start| Self {
                start_date: Some(start),
                end_date: Some(split),
                interval_type: IntervalType::HalfOpenRight,
                is_open_ended: false,
                uncertainty_flag: self.uncertainty_flag,
            });

        let has_after =
            self.is_open_ended || self.end_date.map_or(false, |end| split < end);
        let after = if has_after {
            Some(Self {
                start_date: Some(split),
                end_date: self.effective_end(),
                interval_type: if self.is_open_ended {
                    IntervalType::Closed
                } else {
                    IntervalType::HalfOpenLeft
                },
                is_open_ended: self.is_open_ended,
                uncertainty_flag: self.uncertainty_flag,
            })
        } else {
            None
        };

        (before, after)
    }
}

impl fmt::Display for TemporalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self
            .start_date
            .map_or_else(|| "?".to_string(), |d| d.to_string());
        if self.is_open_ended {
            write!(f, "[{start} \u{2192} ongoing]")
        } else {
            let end = self
                .end_date
                .map_or_else(|| "?".to_string(), |d| d.to_string());
            write!(f, "[{start} to {end}]")
        }
    }
}
