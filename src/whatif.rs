//! What-if temporal queries.
//!
//! Answers "what applies on date D", "is action A required, permitted or
//! prohibited at the conduct date", and "which conflicts are live during a
//! window" over an immutable snapshot of norms and (possibly resolved)
//! conflicts.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::Conflict;
use crate::interval::TemporalInterval;
use crate::norm::{Modality, Norm};

/// A what-if query, echoed back in its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "query_type", rename_all = "snake_case")]
pub enum WhatIfQuery {
    /// Which norms apply on a date.
    ApplicableNorms {
        /// Date to evaluate.
        date: NaiveDate,
        /// Optional action substring filter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<String>,
        /// Optional subject substring filter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
    },

    /// Is an action required, permitted or prohibited at the conduct date.
    ActionStatus {
        /// When the decision is made.
        decision_date: NaiveDate,
        /// When the conduct would occur.
        conduct_date: NaiveDate,
        /// Action being queried.
        action: String,
        /// Optional subject substring filter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
    },

    /// Which conflicts are live during a window.
    ConflictsInWindow {
        /// The queried window.
        interval: TemporalInterval,
    },
}

/// Result of a what-if query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// The original query.
    pub query: WhatIfQuery,

    /// Norms that apply in the queried scope.
    pub applicable_norms: Vec<Norm>,

    /// Conflicts active in the queried scope.
    pub active_conflicts: Vec<Conflict>,

    /// Overlap-hazard warnings.
    pub warnings: Vec<String>,

    /// Recommended course of action.
    pub recommendation: String,
}

/// Analyzes what-if scenarios over a fixed snapshot of norms and
/// conflicts.
#[derive(Debug, Clone)]
pub struct WhatIfAnalyzer {
    norms: Vec<Norm>,
    conflicts: Vec<Conflict>,
}

impl WhatIfAnalyzer {
    /// Creates an analyzer over a snapshot of all norms and all conflicts.
    #[must_use]
    pub fn new(norms: Vec<Norm>, conflicts: Vec<Conflict>) -> Self {
        Self { norms, conflicts }
    }

    /// Queries which norms apply on a specific date, optionally filtered
    /// by action and subject substrings (case-insensitive).
    #[must_use]
    pub fn applicable_norms(
        &self,
        date: NaiveDate,
        action: Option<&str>,
        subject: Option<&str>,
    ) -> WhatIfResult {
        let applicable = self.norms_applying(date, action, subject);
        let active_conflicts = self.active_conflicts_at(date, &applicable);
        let warnings = point_warnings(&applicable, &active_conflicts);
        let recommendation = point_recommendation(&applicable, &active_conflicts);

        WhatIfResult {
            query: WhatIfQuery::ApplicableNorms {
                date,
                action: action.map(str::to_string),
                subject: subject.map(str::to_string),
            },
            applicable_norms: applicable,
            active_conflicts,
            warnings,
            recommendation,
        }
    }

    /// Queries whether an action is required, permitted or prohibited.
    ///
    /// Applicability is evaluated at the conduct date. When the decision
    /// and conduct dates differ and the applicable-norm count changes
    /// between them, a warning flags that the law may change in between.
    #[must_use]
    pub fn action_status(
        &self,
        decision_date: NaiveDate,
        conduct_date: NaiveDate,
        action: &str,
        subject: Option<&str>,
    ) -> WhatIfResult {
        let applicable = self.norms_applying(conduct_date, Some(action), subject);

        let has_obligation = applicable
            .iter()
            .any(|n| n.modality == Modality::Obligation);
        let has_permission = applicable
            .iter()
            .any(|n| n.modality == Modality::Permission);
        let has_prohibition = applicable
            .iter()
            .any(|n| n.modality == Modality::Prohibition);

        let active_conflicts = self.active_conflicts_at(conduct_date, &applicable);

        let mut warnings = Vec::new();
        if has_obligation && has_prohibition {
            warnings.push(format!(
                "CRITICAL: Action '{action}' is both required and prohibited on {conduct_date}"
            ));
        }
        if has_permission && has_prohibition {
            warnings.push(format!(
                "WARNING: Action '{action}' is both permitted and prohibited on {conduct_date}"
            ));
        }
        if applicable.is_empty() {
            warnings.push(format!(
                "No applicable norms found for action '{action}' on {conduct_date}"
            ));
        }
        if decision_date != conduct_date {
            let at_decision = self.norms_applying(decision_date, Some(action), subject);
            if at_decision.len() != applicable.len() {
                warnings.push(format!(
                    "Norms may change between decision date ({decision_date}) and conduct date ({conduct_date})"
                ));
            }
        }

        // Prohibition dominates obligation in the stated recommendation,
        // even though the critical warning above already fired.
        let recommendation = if has_obligation && !has_prohibition {
            format!("Action '{action}' is REQUIRED on {conduct_date}")
        } else if has_prohibition {
            format!("Action '{action}' is PROHIBITED on {conduct_date}")
        } else if has_permission {
            format!("Action '{action}' is PERMITTED on {conduct_date}")
        } else {
            format!("Status of action '{action}' is UNCLEAR on {conduct_date}")
        };

        WhatIfResult {
            query: WhatIfQuery::ActionStatus {
                decision_date,
                conduct_date,
                action: action.to_string(),
                subject: subject.map(str::to_string),
            },
            applicable_norms: applicable,
            active_conflicts,
            warnings,
            recommendation,
        }
    }

    /// Queries conflicts whose overlap interval touches `[start, end]`,
    /// together with the de-duplicated union of norms they reference.
    #[must_use]
    pub fn conflicts_in_window(&self, start: NaiveDate, end: NaiveDate) -> WhatIfResult {
        let window = TemporalInterval::bounded(start, end);

        let active_conflicts: Vec<Conflict> = self
            .conflicts
            .iter()
            .filter(|c| {
                c.overlap_interval
                    .as_ref()
                    .map_or(false, |overlap| overlap.overlaps(&window))
            })
            .cloned()
            .collect();

        // De-duplicated union of referenced norms, in first-seen order.
        let mut seen = HashSet::new();
        let mut involved = Vec::new();
        for conflict in &active_conflicts {
            for norm in [&conflict.norm1, &conflict.norm2] {
                if seen.insert((norm.source_id.clone(), norm.version_id.clone())) {
                    involved.push(norm.clone());
                }
            }
        }

        let high = active_conflicts
            .iter()
            .filter(|c| c.is_high_severity())
            .count();
        let warnings = vec![
            format!(
                "Found {} conflict(s) in the specified window",
                active_conflicts.len()
            ),
            format!("{high} high-severity conflicts"),
        ];

        let recommendation = if active_conflicts.is_empty() {
            "No conflicts detected in the specified window.".to_string()
        } else if high > 0 {
            format!(
                "High-risk window: {high} high-severity conflicts detected. \
                 Recommend delaying action or seeking legal counsel."
            )
        } else {
            format!(
                "{} conflicts detected. Review resolutions before proceeding.",
                active_conflicts.len()
            )
        };

        WhatIfResult {
            query: WhatIfQuery::ConflictsInWindow { interval: window },
            applicable_norms: involved,
            active_conflicts,
            warnings,
            recommendation,
        }
    }

    /// Norms whose interval contains `date` and whose action/subject match
    /// the given substring filters.
    fn norms_applying(
        &self,
        date: NaiveDate,
        action: Option<&str>,
        subject: Option<&str>,
    ) -> Vec<Norm> {
        self.norms
            .iter()
            .filter(|n| n.effective_interval().contains_date(date))
            .filter(|n| matches_filter(&n.action, action))
            .filter(|n| matches_filter(&n.subject, subject))
            .cloned()
            .collect()
    }

    /// Conflicts whose overlap contains `date` and which involve at least
    /// one applicable norm.
    fn active_conflicts_at(&self, date: NaiveDate, applicable: &[Norm]) -> Vec<Conflict> {
        let ids: HashSet<&str> = applicable.iter().map(|n| n.source_id.as_str()).collect();

        self.conflicts
            .iter()
            .filter(|c| {
                ids.contains(c.norm1.source_id.as_str())
                    || ids.contains(c.norm2.source_id.as_str())
            })
            .filter(|c| {
                c.overlap_interval
                    .as_ref()
                    .map_or(false, |overlap| overlap.contains_date(date))
            })
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring filter; an absent filter matches everything.
fn matches_filter(field: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| {
        field.to_lowercase().contains(&f.to_lowercase())
    })
}

fn point_warnings(applicable: &[Norm], active: &[Conflict]) -> Vec<String> {
    let mut warnings = Vec::new();

    if !active.is_empty() {
        warnings.push(format!("{} active conflict(s) detected", active.len()));

        let high = active.iter().filter(|c| c.is_high_severity()).count();
        if high > 0 {
            warnings.push(format!(
                "{high} high-severity conflict(s) require immediate attention"
            ));
        }
    }

    let modalities: HashSet<Modality> = applicable.iter().map(|n| n.modality).collect();
    if modalities.len() > 1 {
        warnings.push(
            "Multiple conflicting modalities detected (obligation/permission/prohibition)"
                .to_string(),
        );
    }

    warnings
}

fn point_recommendation(applicable: &[Norm], active: &[Conflict]) -> String {
    if !active.is_empty() {
        if let Some(resolution) = active.iter().find_map(|c| c.resolution.as_ref()) {
            return format!(
                "Conflicts detected. Recommend following {} canon: {}",
                resolution.canon_applied, resolution.rationale,
            );
        }
        return "Conflicts detected but not yet resolved. Human review required.".to_string();
    }

    match applicable {
        [] => "No applicable norms found. Action may not be regulated.".to_string(),
        [only] => format!(
            "Action is {} under {}",
            only.modality.as_adjective(),
            only.version_id
        ),
        _ => format!(
            "{} applicable norms found. Review recommended.",
            applicable.len()
        ),
    }
}
