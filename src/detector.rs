//! Pairwise conflict detection across versions.
//!
//! Norms are grouped by normalized (subject, action); within each group,
//! pairs drawn from different versions are compared. A pair with no
//! temporal contact is never a conflict, whatever its modalities. The
//! severity formulas live here as named policy constants so tests can pin
//! exact thresholds.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::conflict::{Conflict, ConflictType, HIGH_SEVERITY_THRESHOLD};
use crate::interval::TemporalInterval;
use crate::norm::{normalize_key, Modality, Norm};

/// Base severity for a deontic contradiction.
pub const DEONTIC_BASE_SEVERITY: f32 = 0.8;

/// Severity for the maximally severe Obligation vs Prohibition pair.
pub const DEONTIC_MAX_SEVERITY: f32 = 1.0;

/// Severity bump for overlaps longer than [`LONG_OVERLAP_DAYS`].
pub const LONG_OVERLAP_BONUS: f32 = 0.1;

/// Overlap duration, in days, past which a contradiction counts as
/// long-lived.
pub const LONG_OVERLAP_DAYS: i64 = 365;

/// Base severity for a condition inconsistency.
pub const CONDITION_BASE_SEVERITY: f32 = 0.5;

/// Severity when both sides carry substantial condition text.
pub const CONDITION_SUBSTANTIAL_SEVERITY: f32 = 0.7;

/// Condition length, in characters, treated as substantial.
pub const SUBSTANTIAL_CONDITION_LEN: usize = 50;

/// Fixed severity for an exception gap.
pub const EXCEPTION_GAP_SEVERITY: f32 = 0.6;

/// Default emission threshold for the detector.
pub const DEFAULT_SEVERITY_THRESHOLD: f32 = 0.3;

/// Contract shared by conflict-search backends.
///
/// The default implementation is the heuristic [`ConflictDetector`]; an
/// exhaustive solver-backed search can plug in behind the same contract.
pub trait ConflictBackend {
    /// Detects all cross-version conflicts in `norms`.
    fn detect(&self, norms: &[Norm]) -> Vec<Conflict>;
}

/// Heuristic pairwise conflict detector.
///
/// Deterministic: groups are processed in sorted key order and conflict
/// ids are counter-assigned in detection order.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    severity_threshold: f32,
}

impl ConflictDetector {
    /// Creates a detector with the default severity threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
        }
    }

    /// Creates a detector with a caller-chosen emission threshold.
    #[must_use]
    pub fn with_threshold(severity_threshold: f32) -> Self {
        Self { severity_threshold }
    }

    /// The current emission threshold.
    #[must_use]
    pub const fn severity_threshold(&self) -> f32 {
        self.severity_threshold
    }

    /// Detects all cross-version conflicts in `norms`.
    ///
    /// Output order is detection order; ids run "conflict_0000",
    /// "conflict_0001", and so on. Conflicts below the severity threshold
    /// are not emitted.
    #[must_use]
    pub fn detect(&self, norms: &[Norm]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        let mut counter = 0usize;

        for group in group_norms(norms).values() {
            for (i, &norm1) in group.iter().enumerate() {
                for &norm2 in &group[i + 1..] {
                    // Only cross-version pairs are of interest.
                    if norm1.version_id == norm2.version_id {
                        continue;
                    }

                    let Some((conflict_type, severity, description)) =
                        detect_pairwise(norm1, norm2)
                    else {
                        continue;
                    };
                    if severity < self.severity_threshold {
                        continue;
                    }

                    let conflict_id = format!("conflict_{counter:04}");
                    counter += 1;
                    conflicts.push(Conflict::new(
                        conflict_id,
                        conflict_type,
                        norm1.clone(),
                        norm2.clone(),
                        overlap_of(norm1, norm2),
                        severity,
                        description,
                    ));
                }
            }
        }

        conflicts
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictBackend for ConflictDetector {
    fn detect(&self, norms: &[Norm]) -> Vec<Conflict> {
        Self::detect(self, norms)
    }
}

/// Groups norms by normalized (subject, action), in sorted key order.
fn group_norms(norms: &[Norm]) -> BTreeMap<(String, String), Vec<&Norm>> {
    let mut groups: BTreeMap<(String, String), Vec<&Norm>> = BTreeMap::new();
    for norm in norms {
        groups
            .entry((normalize_key(&norm.subject), normalize_key(&norm.action)))
            .or_default()
            .push(norm);
    }
    groups
}

/// Classifies one cross-version pair, first match wins:
/// deontic contradiction, condition inconsistency, exception gap.
fn detect_pairwise(norm1: &Norm, norm2: &Norm) -> Option<(ConflictType, f32, String)> {
    let interval1 = norm1.effective_interval();
    let interval2 = norm2.effective_interval();
    if !interval1.overlaps(&interval2) {
        // No temporal contact, no conflict.
        return None;
    }

    if norm1.contradictory_modality(norm2) {
        return Some((
            ConflictType::DeonticContradiction,
            deontic_severity(norm1, norm2),
            describe_deontic(norm1, norm2),
        ));
    }

    if norm1.modality == norm2.modality && norm1.conditions != norm2.conditions {
        return Some((
            ConflictType::ConditionInconsistency,
            condition_severity(norm1, norm2),
            describe_condition(norm1, norm2),
        ));
    }

    if has_exception_gap(norm1, norm2) {
        return Some((
            ConflictType::ExceptionGap,
            EXCEPTION_GAP_SEVERITY,
            describe_exception_gap(norm1, norm2),
        ));
    }

    None
}

/// Temporal overlap between two norms' effective intervals.
fn overlap_of(norm1: &Norm, norm2: &Norm) -> Option<TemporalInterval> {
    norm1
        .effective_interval()
        .intersection(&norm2.effective_interval())
}

/// Severity of a deontic contradiction between two overlapping norms.
///
/// Obligation vs Prohibition starts at the maximum; other contradictory
/// pairs at the base. Overlaps longer than a year earn a capped bump.
#[must_use]
pub fn deontic_severity(norm1: &Norm, norm2: &Norm) -> f32 {
    let mut severity = match (norm1.modality, norm2.modality) {
        (Modality::Obligation, Modality::Prohibition)
        | (Modality::Prohibition, Modality::Obligation) => DEONTIC_MAX_SEVERITY,
        _ => DEONTIC_BASE_SEVERITY,
    };

    if let Some(duration) = overlap_of(norm1, norm2)
        .as_ref()
        .and_then(TemporalInterval::duration_days)
    {
        if duration > LONG_OVERLAP_DAYS {
            severity = (severity + LONG_OVERLAP_BONUS).min(1.0);
        }
    }

    severity
}

/// Severity of a condition inconsistency.
#[must_use]
pub fn condition_severity(norm1: &Norm, norm2: &Norm) -> f32 {
    match (&norm1.conditions, &norm2.conditions) {
        (Some(c1), Some(c2))
            if c1.len() > SUBSTANTIAL_CONDITION_LEN && c2.len() > SUBSTANTIAL_CONDITION_LEN =>
        {
            CONDITION_SUBSTANTIAL_SEVERITY
        }
        _ => CONDITION_BASE_SEVERITY,
    }
}

/// True when exactly one side carries exceptions, or both do but the sets
/// differ.
fn has_exception_gap(norm1: &Norm, norm2: &Norm) -> bool {
    let exceptions1: HashSet<&String> = norm1.exceptions.iter().collect();
    let exceptions2: HashSet<&String> = norm2.exceptions.iter().collect();

    if exceptions1.is_empty() != exceptions2.is_empty() {
        return true;
    }
    if !exceptions1.is_empty() {
        return exceptions1.symmetric_difference(&exceptions2).next().is_some();
    }
    false
}

fn describe_deontic(norm1: &Norm, norm2: &Norm) -> String {
    let overlap = overlap_of(norm1, norm2)
        .map_or_else(|| "overlapping period".to_string(), |o| o.to_string());
    format!(
        "Deontic contradiction: '{}' is {} under {} but {} under {} during {}",
        norm1.action,
        norm1.modality.as_adjective(),
        norm1.version_id,
        norm2.modality.as_adjective(),
        norm2.version_id,
        overlap,
    )
}

fn describe_condition(norm1: &Norm, norm2: &Norm) -> String {
    format!(
        "Condition inconsistency: '{}' has different conditions in {} vs {}",
        norm1.action, norm1.version_id, norm2.version_id,
    )
}

fn describe_exception_gap(norm1: &Norm, norm2: &Norm) -> String {
    format!(
        "Exception gap: '{}' has different exceptions ({} in {}, {} in {})",
        norm1.action,
        norm1.exceptions.len(),
        norm1.version_id,
        norm2.exceptions.len(),
        norm2.version_id,
    )
}

/// Filters conflicts by minimum severity and/or type set.
#[must_use]
pub fn filter_conflicts(
    conflicts: &[Conflict],
    min_severity: Option<f32>,
    types: Option<&[ConflictType]>,
) -> Vec<Conflict> {
    conflicts
        .iter()
        .filter(|c| min_severity.map_or(true, |min| c.severity >= min))
        .filter(|c| types.map_or(true, |ts| ts.contains(&c.conflict_type)))
        .cloned()
        .collect()
}

/// Ranks conflicts by descending severity, ties broken by ascending
/// conflict id.
#[must_use]
pub fn rank_conflicts(mut conflicts: Vec<Conflict>) -> Vec<Conflict> {
    conflicts.sort_by(|a, b| {
        b.severity
            .total_cmp(&a.severity)
            .then_with(|| a.conflict_id.cmp(&b.conflict_id))
    });
    conflicts
}

/// Conflict counts per severity band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityDistribution {
    /// Severity in [0.8, 1.0].
    pub critical: usize,

    /// Severity in [0.6, 0.8).
    pub high: usize,

    /// Severity in [0.4, 0.6).
    pub medium: usize,

    /// Severity in [0.0, 0.4).
    pub low: usize,
}

/// Summary statistics over a set of detected conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSummary {
    /// Total number of conflicts.
    pub total: usize,

    /// Conflict counts keyed by type wire name.
    pub by_type: BTreeMap<String, usize>,

    /// Mean severity across all conflicts (0 when empty).
    pub avg_severity: f32,

    /// Conflicts with severity at or above [`HIGH_SEVERITY_THRESHOLD`].
    pub high_severity_count: usize,

    /// Conflict counts by severity band.
    pub severity_distribution: SeverityDistribution,
}

/// Computes summary statistics for a set of conflicts. Empty input yields
/// an all-zero summary.
#[must_use]
pub fn summarize_conflicts(conflicts: &[Conflict]) -> ConflictSummary {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut distribution = SeverityDistribution::default();
    let mut severity_sum = 0.0f32;

    for conflict in conflicts {
        *by_type
            .entry(conflict.conflict_type.as_str().to_string())
            .or_insert(0) += 1;
        severity_sum += conflict.severity;

        if conflict.severity >= HIGH_SEVERITY_THRESHOLD {
            distribution.critical += 1;
        } else if conflict.severity >= 0.6 {
            distribution.high += 1;
        } else if conflict.severity >= 0.4 {
            distribution.medium += 1;
        } else {
            distribution.low += 1;
        }
    }

    let total = conflicts.len();
    #[allow(clippy::cast_precision_loss)]
    let avg_severity = if total == 0 {
        0.0
    } else {
        severity_sum / total as f32
    };

    ConflictSummary {
        total,
        by_type,
        avg_severity,
        high_severity_count: distribution.critical,
        severity_distribution: distribution,
    }
}
