//! Conflict and resolution records.
//!
//! Conflicts are explicit objects, not hidden errors. When two versions of
//! a text impose incompatible norms over the same subject and action, the
//! detector emits a Conflict record carrying both norms, the overlapping
//! window, a severity score, and eventually a canon-based resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::TemporalInterval;
use crate::norm::Norm;

/// Severity at or above which a conflict counts as high-severity.
pub const HIGH_SEVERITY_THRESHOLD: f32 = 0.8;

/// Classification of a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Contradictory modalities: obligation vs prohibition, or permission
    /// vs prohibition.
    DeonticContradiction,

    /// Same action, conflicting applicability windows. Carried on the wire
    /// for compatibility; the default detector never emits it.
    TemporalOverlap,

    /// Same modality with incompatible conditions.
    ConditionInconsistency,

    /// Diverging exception sets causing over- or under-broad obligations.
    ExceptionGap,
}

impl ConflictType {
    /// snake_case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeonticContradiction => "deontic_contradiction",
            Self::TemporalOverlap => "temporal_overlap",
            Self::ConditionInconsistency => "condition_inconsistency",
            Self::ExceptionGap => "exception_gap",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConflictType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deontic_contradiction" => Ok(Self::DeonticContradiction),
            "temporal_overlap" => Ok(Self::TemporalOverlap),
            "condition_inconsistency" => Ok(Self::ConditionInconsistency),
            "exception_gap" => Ok(Self::ExceptionGap),
            other => Err(ValidationError::InvalidConflictType {
                value: other.to_string(),
            }),
        }
    }
}

/// Legal interpretive canons for conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Canon {
    /// Higher authority prevails.
    LexSuperior,

    /// Later-enacted rule prevails.
    LexPosterior,

    /// More specific rule prevails.
    LexSpecialis,
}

impl Canon {
    /// snake_case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LexSuperior => "lex_superior",
            Self::LexPosterior => "lex_posterior",
            Self::LexSpecialis => "lex_specialis",
        }
    }
}

impl fmt::Display for Canon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Canon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lex_superior" => Ok(Self::LexSuperior),
            "lex_posterior" => Ok(Self::LexPosterior),
            "lex_specialis" => Ok(Self::LexSpecialis),
            other => Err(ValidationError::InvalidCanon {
                value: other.to_string(),
            }),
        }
    }
}

fn default_resolution_confidence() -> f32 {
    0.8
}

/// Canon-based resolution of a conflict.
///
/// Always complete: the resolver never produces a partial resolution,
/// falling back to a low-confidence default when no canon decisively
/// applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Which canon was applied.
    pub canon_applied: Canon,

    /// `source_id` of the norm that prevails.
    pub prevailing_norm: String,

    /// Natural language explanation.
    pub rationale: String,

    /// Confidence in this resolution (0-1).
    #[serde(default = "default_resolution_confidence")]
    pub confidence: f32,
}

impl Resolution {
    /// Creates a resolution. Confidence is clamped to [0.0, 1.0].
    #[must_use]
    pub fn new(
        canon_applied: Canon,
        prevailing_norm: impl Into<String>,
        rationale: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            canon_applied,
            prevailing_norm: prevailing_norm.into(),
            rationale: rationale.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A detected conflict between two norms from different versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Counter-assigned identifier ("conflict_0000", "conflict_0001", ...).
    pub conflict_id: String,

    /// Classification of the conflict.
    pub conflict_type: ConflictType,

    /// First conflicting norm.
    pub norm1: Norm,

    /// Second conflicting norm. Always from a different version than
    /// `norm1`.
    pub norm2: Norm,

    /// Temporal overlap period, when computable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_interval: Option<TemporalInterval>,

    /// Severity score (0-1).
    pub severity: f32,

    /// Human-readable conflict description.
    pub description: String,

    /// Canon-based resolution, attached at most once by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,

    /// When this conflict was detected.
    #[serde(default = "Utc::now")]
    pub detected_at: DateTime<Utc>,
}

impl Conflict {
    /// Creates a new, unresolved conflict. Severity is clamped to
    /// [0.0, 1.0].
    #[must_use]
    pub fn new(
        conflict_id: impl Into<String>,
        conflict_type: ConflictType,
        norm1: Norm,
        norm2: Norm,
        overlap_interval: Option<TemporalInterval>,
        severity: f32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            conflict_id: conflict_id.into(),
            conflict_type,
            norm1,
            norm2,
            overlap_interval,
            severity: severity.clamp(0.0, 1.0),
            description: description.into(),
            resolution: None,
            detected_at: Utc::now(),
        }
    }

    /// True once a resolution has been attached.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// True when severity meets [`HIGH_SEVERITY_THRESHOLD`].
    #[must_use]
    pub fn is_high_severity(&self) -> bool {
        self.severity >= HIGH_SEVERITY_THRESHOLD
    }

    /// Attaches a resolution only if none is present. Returns whether the
    /// resolution was attached; an existing resolution is never replaced.
    pub fn attach_resolution(&mut self, resolution: Resolution) -> bool {
        if self.resolution.is_some() {
            return false;
        }
        self.resolution = Some(resolution);
        true
    }

    /// Replaces any existing resolution. Reserved for ensemble overrides;
    /// the base resolver goes through [`Conflict::attach_resolution`].
    pub fn override_resolution(&mut self, resolution: Resolution) {
        self.resolution = Some(resolution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::norm::Modality;

    fn norm(version: &str) -> Norm {
        Norm::builder()
            .modality(Modality::Obligation)
            .subject("providers")
            .action("disclose information")
            .source_id(format!("src_{version}"))
            .version_id(version)
            .build()
            .unwrap()
    }

    fn conflict() -> Conflict {
        Conflict::new(
            "conflict_0000",
            ConflictType::DeonticContradiction,
            norm("v1"),
            norm("v2"),
            None,
            0.9,
            "test conflict",
        )
    }

    #[test]
    fn test_conflict_starts_unresolved() {
        let c = conflict();
        assert!(!c.is_resolved());
        assert!(c.is_high_severity());
    }

    #[test]
    fn test_severity_clamping() {
        let c = Conflict::new(
            "conflict_0001",
            ConflictType::ExceptionGap,
            norm("v1"),
            norm("v2"),
            None,
            1.7,
            "over-severe",
        );
        assert!((c.severity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_attach_resolution_is_single_assignment() {
        let mut c = conflict();

        let first = Resolution::new(Canon::LexSuperior, "src_v1", "first", 0.9);
        let second = Resolution::new(Canon::LexPosterior, "src_v2", "second", 0.85);

        assert!(c.attach_resolution(first.clone()));
        assert!(!c.attach_resolution(second));
        assert_eq!(c.resolution, Some(first));
    }

    #[test]
    fn test_override_resolution_replaces() {
        let mut c = conflict();
        c.attach_resolution(Resolution::new(Canon::LexSuperior, "src_v1", "base", 0.9));
        c.override_resolution(Resolution::new(
            Canon::LexSpecialis,
            "src_v2",
            "ensemble override",
            0.75,
        ));
        assert_eq!(c.resolution.unwrap().canon_applied, Canon::LexSpecialis);
    }

    #[test]
    fn test_resolution_confidence_clamped() {
        let r = Resolution::new(Canon::LexSuperior, "src", "rationale", 1.4);
        assert!((r.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resolution_confidence_default() {
        let json = r#"{
            "canon_applied": "lex_posterior",
            "prevailing_norm": "src_v2",
            "rationale": "later enacted"
        }"#;
        let r: Resolution = serde_json::from_str(json).unwrap();
        assert!((r.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ConflictType::DeonticContradiction).unwrap(),
            "\"deontic_contradiction\""
        );
        assert_eq!(
            serde_json::to_string(&Canon::LexSuperior).unwrap(),
            "\"lex_superior\""
        );
        assert_eq!(
            "condition_inconsistency".parse::<ConflictType>().unwrap(),
            ConflictType::ConditionInconsistency
        );
        assert!("lex_mercatoria".parse::<Canon>().is_err());
        assert!("style_disagreement".parse::<ConflictType>().is_err());
    }

    #[test]
    fn test_conflict_round_trip() {
        let mut c = conflict();
        c.attach_resolution(Resolution::new(Canon::LexSuperior, "src_v1", "why", 0.9));

        let json = serde_json::to_string(&c).unwrap();
        let back: Conflict = serde_json::from_str(&json).unwrap();
        assert_eq!(c.conflict_id, back.conflict_id);
        assert_eq!(c.resolution, back.resolution);
    }
}
