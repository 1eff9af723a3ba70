//! Canon-based conflict resolution.
//!
//! Applies an ordered cascade of legal interpretive canons to pick a
//! prevailing norm per conflict: lex superior, then lex posterior, then
//! lex specialis, then a low-confidence default. Resolution is total; the
//! resolver never fails to produce one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{Canon, Conflict, Resolution};
use crate::norm::Norm;

/// Maximum specificity bonus for condition text.
pub const CONDITION_BONUS_CAP: f32 = 0.2;

/// Condition length, in characters, that earns the full condition bonus.
pub const CONDITION_BONUS_SCALE: f32 = 500.0;

/// Per-exception specificity bonus.
pub const EXCEPTION_BONUS_STEP: f32 = 0.05;

/// Maximum specificity bonus for exceptions.
pub const EXCEPTION_BONUS_CAP: f32 = 0.1;

/// Specificity bonus for naming an object.
pub const OBJECT_BONUS: f32 = 0.1;

/// Specificity bonus for a bounded effective span shorter than a year.
pub const NARROW_SPAN_BONUS: f32 = 0.1;

/// Effective span, in days, under which a norm counts as narrowly scoped.
pub const NARROW_SPAN_DAYS: i64 = 365;

/// Confidence values assigned to each canon's resolutions.
///
/// Threaded through the resolver's constructor so callers and tests can pin
/// exact values; there are no module-level confidence globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonResolverConfig {
    /// Confidence for lex superior resolutions.
    pub lex_superior_confidence: f32,

    /// Confidence for lex posterior resolutions.
    pub lex_posterior_confidence: f32,

    /// Confidence for lex specialis resolutions.
    pub lex_specialis_confidence: f32,

    /// Confidence for the fallback default resolution.
    pub fallback_confidence: f32,

    /// Minimum specificity delta for lex specialis to apply.
    pub specificity_margin: f32,
}

impl Default for CanonResolverConfig {
    fn default() -> Self {
        Self {
            lex_superior_confidence: 0.9,
            lex_posterior_confidence: 0.85,
            lex_specialis_confidence: 0.75,
            fallback_confidence: 0.5,
            specificity_margin: 0.2,
        }
    }
}

/// Resolves conflicts using legal interpretive canons.
#[derive(Debug, Clone)]
pub struct CanonResolver {
    config: CanonResolverConfig,
}

impl CanonResolver {
    /// Creates a resolver with the default confidence configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CanonResolverConfig::default(),
        }
    }

    /// Creates a resolver with an explicit confidence configuration.
    #[must_use]
    pub fn with_config(config: CanonResolverConfig) -> Self {
        Self { config }
    }

    /// Resolves one conflict.
    ///
    /// Total: some resolution is always produced. When no canon decisively
    /// applies, the fallback prefers the norm with the later effective
    /// start (deterministically `norm2` otherwise) at low confidence, and
    /// its rationale recommends human review.
    #[must_use]
    pub fn resolve(&self, conflict: &Conflict) -> Resolution {
        let norm1 = &conflict.norm1;
        let norm2 = &conflict.norm2;

        self.try_lex_superior(norm1, norm2)
            .or_else(|| self.try_lex_posterior(norm1, norm2))
            .or_else(|| self.try_lex_specialis(norm1, norm2))
            .unwrap_or_else(|| self.default_resolution(norm1, norm2))
    }

    /// Attaches a resolution to every conflict lacking one.
    ///
    /// Existing resolutions are never overwritten; ensemble overrides go
    /// through [`Conflict::override_resolution`] at the caller's choice.
    #[must_use]
    pub fn resolve_all(&self, mut conflicts: Vec<Conflict>) -> Vec<Conflict> {
        for conflict in &mut conflicts {
            if !conflict.is_resolved() {
                let resolution = self.resolve(conflict);
                conflict.attach_resolution(resolution);
            }
        }
        conflicts
    }

    /// Lex superior: the higher authority level prevails. Applicable only
    /// when the ranks differ.
    fn try_lex_superior(&self, norm1: &Norm, norm2: &Norm) -> Option<Resolution> {
        let rank1 = norm1.authority_level.rank();
        let rank2 = norm2.authority_level.rank();
        if rank1 == rank2 {
            return None;
        }

        let (winner, loser) = if rank1 > rank2 {
            (norm1, norm2)
        } else {
            (norm2, norm1)
        };
        let rationale = format!(
            "Applying lex superior: {} (in {}) has higher authority than {} (in {})",
            winner.authority_level, winner.version_id, loser.authority_level, loser.version_id,
        );
        Some(Resolution::new(
            Canon::LexSuperior,
            winner.source_id.clone(),
            rationale,
            self.config.lex_superior_confidence,
        ))
    }

    /// Lex posterior: the later-enacted rule prevails. Uses the enactment
    /// date, falling back to the effective start; applicable only when both
    /// dates resolve and differ.
    fn try_lex_posterior(&self, norm1: &Norm, norm2: &Norm) -> Option<Resolution> {
        let date1 = norm1.enactment_or_effective()?;
        let date2 = norm2.enactment_or_effective()?;
        if date1 == date2 {
            return None;
        }

        let (winner, winner_date, loser, loser_date) = if date1 > date2 {
            (norm1, date1, norm2, date2)
        } else {
            (norm2, date2, norm1, date1)
        };
        let rationale = format!(
            "Applying lex posterior: {} (enacted {}) is later than {} (enacted {}). \
             Later-enacted rule governs.",
            winner.version_id, winner_date, loser.version_id, loser_date,
        );
        Some(Resolution::new(
            Canon::LexPosterior,
            winner.source_id.clone(),
            rationale,
            self.config.lex_posterior_confidence,
        ))
    }

    /// Lex specialis: the more specific rule prevails. Applicable only when
    /// the specificity scores differ by at least the configured margin.
    fn try_lex_specialis(&self, norm1: &Norm, norm2: &Norm) -> Option<Resolution> {
        let score1 = specificity(norm1);
        let score2 = specificity(norm2);
        if (score1 - score2).abs() < self.config.specificity_margin {
            return None;
        }

        let (winner, winner_score, loser, loser_score) = if score1 > score2 {
            (norm1, score1, norm2, score2)
        } else {
            (norm2, score2, norm1, score1)
        };
        let rationale = format!(
            "Applying lex specialis: {} is more specific (specificity: {winner_score:.2}) \
             than {} (specificity: {loser_score:.2}). More specific rule prevails.",
            winner.version_id, loser.version_id,
        );
        Some(Resolution::new(
            Canon::LexSpecialis,
            winner.source_id.clone(),
            rationale,
            self.config.lex_specialis_confidence,
        ))
    }

    /// Fallback when no canon decisively applies: prefer the later
    /// effective start, else `norm2`.
    fn default_resolution(&self, norm1: &Norm, norm2: &Norm) -> Resolution {
        let winner = match (norm1.effective_start, norm2.effective_start) {
            (Some(d1), Some(d2)) if d1 > d2 => norm1,
            _ => norm2,
        };
        debug!(
            prevailing = %winner.source_id,
            "no canon decisively applies; using default resolution"
        );
        let rationale = format!(
            "No clear canon applies. As a default, preferring {}. Human review recommended.",
            winner.version_id,
        );
        Resolution::new(
            Canon::LexPosterior,
            winner.source_id.clone(),
            rationale,
            self.config.fallback_confidence,
        )
    }
}

impl Default for CanonResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Specificity score used by lex specialis.
///
/// Starts from the norm's stored score and adds bounded bonuses for
/// condition length, exception count, a stated object, and a narrow
/// bounded effective span; the total is clamped to [0, 1].
#[must_use]
pub fn specificity(norm: &Norm) -> f32 {
    let mut score = norm.specificity_score;

    if let Some(conditions) = &norm.conditions {
        #[allow(clippy::cast_precision_loss)]
        let bonus = (conditions.len() as f32 / CONDITION_BONUS_SCALE).min(CONDITION_BONUS_CAP);
        score += bonus;
    }

    #[allow(clippy::cast_precision_loss)]
    let exception_bonus =
        (norm.exceptions.len() as f32 * EXCEPTION_BONUS_STEP).min(EXCEPTION_BONUS_CAP);
    score += exception_bonus;

    if norm.object.is_some() {
        score += OBJECT_BONUS;
    }

    if let (Some(start), Some(end)) = (norm.effective_start, norm.effective_end) {
        if (end - start).num_days() < NARROW_SPAN_DAYS {
            score += NARROW_SPAN_BONUS;
        }
    }

    score.clamp(0.0, 1.0)
}

/// Ranks resolved conflicts by severity times confidence, descending.
/// Unresolved conflicts are skipped.
#[must_use]
pub fn rank_resolutions(conflicts: &[Conflict]) -> Vec<(Conflict, f32)> {
    let mut scored: Vec<(Conflict, f32)> = conflicts
        .iter()
        .filter_map(|conflict| {
            conflict
                .resolution
                .as_ref()
                .map(|resolution| (conflict.clone(), conflict.severity * resolution.confidence))
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

/// Deterministic multi-line explanation of a resolved conflict.
///
/// Includes both norms' modality, subject, action and effective window,
/// plus the canon, rationale and confidence of the resolution.
#[must_use]
pub fn explain_resolution(conflict: &Conflict) -> String {
    let Some(resolution) = &conflict.resolution else {
        return "Conflict not yet resolved.".to_string();
    };

    let effective = |norm: &Norm| {
        let start = norm
            .effective_start
            .map_or_else(|| "unknown".to_string(), |d| d.to_string());
        let end = norm
            .effective_end
            .map_or_else(|| "ongoing".to_string(), |d| d.to_string());
        format!("{start} to {end}")
    };

    let mut lines = vec![format!("Conflict: {}", conflict.description)];
    for (label, norm) in [("Norm 1", &conflict.norm1), ("Norm 2", &conflict.norm2)] {
        lines.push(String::new());
        lines.push(format!("{label} ({}):", norm.version_id));
        lines.push(format!("  Modality: {}", norm.modality));
        lines.push(format!("  Subject: {}", norm.subject));
        lines.push(format!("  Action: {}", norm.action));
        lines.push(format!("  Effective: {}", effective(norm)));
    }
    lines.push(String::new());
    lines.push("Resolution:".to_string());
    lines.push(format!("  Canon Applied: {}", resolution.canon_applied));
    lines.push(format!("  Prevailing Norm: {}", resolution.prevailing_norm));
    lines.push(format!("  Rationale: {}", resolution.rationale));
    lines.push(format!("  Confidence: {:.2}", resolution.confidence));

    lines.join("\n")
}

/// Summary statistics over resolved conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Total number of conflicts considered.
    pub total: usize,

    /// How many carry a resolution.
    pub resolved: usize,

    /// Resolution counts keyed by canon wire name.
    pub by_canon: BTreeMap<String, usize>,

    /// Mean resolution confidence (0 when nothing is resolved).
    pub avg_confidence: f32,

    /// Resolutions with confidence >= 0.8.
    pub high_confidence: usize,

    /// Resolutions with confidence in [0.6, 0.8).
    pub medium_confidence: usize,

    /// Resolutions with confidence < 0.6.
    pub low_confidence: usize,
}

/// Computes summary statistics over resolutions. Empty input yields an
/// all-zero summary.
#[must_use]
pub fn summarize_resolutions(conflicts: &[Conflict]) -> ResolutionSummary {
    let mut by_canon: BTreeMap<String, usize> = BTreeMap::new();
    let mut confidence_sum = 0.0f32;
    let mut resolved = 0usize;
    let mut high_confidence = 0usize;
    let mut medium_confidence = 0usize;
    let mut low_confidence = 0usize;

    for conflict in conflicts {
        let Some(resolution) = &conflict.resolution else {
            continue;
        };
        resolved += 1;
        *by_canon
            .entry(resolution.canon_applied.as_str().to_string())
            .or_insert(0) += 1;
        confidence_sum += resolution.confidence;

        if resolution.confidence >= 0.8 {
            high_confidence += 1;
        } else if resolution.confidence >= 0.6 {
            medium_confidence += 1;
        } else {
            low_confidence += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let avg_confidence = if resolved == 0 {
        0.0
    } else {
        confidence_sum / resolved as f32
    };

    ResolutionSummary {
        total: conflicts.len(),
        resolved,
        by_canon,
        avg_confidence,
        high_confidence,
        medium_confidence,
        low_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictType;
    use crate::norm::{AuthorityLevel, Modality};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn norm(version: &str, authority: AuthorityLevel) -> Norm {
        Norm::builder()
            .modality(Modality::Obligation)
            .subject("employers")
            .action("provide notice of automated tool use")
            .source_id(format!("src_{version}"))
            .version_id(version)
            .authority_level(authority)
            .build()
            .unwrap()
    }

    fn conflict_between(norm1: Norm, norm2: Norm) -> Conflict {
        Conflict::new(
            "conflict_0000",
            ConflictType::ConditionInconsistency,
            norm1,
            norm2,
            None,
            0.7,
            "notice requirements differ between versions",
        )
    }

    #[test]
    fn test_lex_superior_prevails() {
        let statute = norm("local_law", AuthorityLevel::Statute);
        let regulation = norm("final_rules", AuthorityLevel::Regulation);
        let conflict = conflict_between(statute.clone(), regulation);

        let resolution = CanonResolver::new().resolve(&conflict);
        assert_eq!(resolution.canon_applied, Canon::LexSuperior);
        assert_eq!(resolution.prevailing_norm, statute.source_id);
        assert!((resolution.confidence - 0.9).abs() < f32::EPSILON);
        assert!(resolution.rationale.contains("lex superior"));
    }

    #[test]
    fn test_lex_superior_regardless_of_dates() {
        // The later-enacted regulation still loses to the statute.
        let mut statute = norm("v1", AuthorityLevel::Statute);
        statute.enactment_date = Some(date(2021, 11, 11));
        let mut regulation = norm("v2", AuthorityLevel::Regulation);
        regulation.enactment_date = Some(date(2023, 4, 6));

        let resolution =
            CanonResolver::new().resolve(&conflict_between(statute.clone(), regulation));
        assert_eq!(resolution.canon_applied, Canon::LexSuperior);
        assert_eq!(resolution.prevailing_norm, statute.source_id);
    }

    #[test]
    fn test_lex_posterior_on_enactment_dates() {
        let mut earlier = norm("v1", AuthorityLevel::Regulation);
        earlier.enactment_date = Some(date(2021, 11, 11));
        let mut later = norm("v2", AuthorityLevel::Regulation);
        later.enactment_date = Some(date(2023, 4, 6));

        let resolution = CanonResolver::new().resolve(&conflict_between(earlier, later.clone()));
        assert_eq!(resolution.canon_applied, Canon::LexPosterior);
        assert_eq!(resolution.prevailing_norm, later.source_id);
        assert!((resolution.confidence - 0.85).abs() < f32::EPSILON);
        assert!(resolution.rationale.contains("2023-04-06"));
    }

    #[test]
    fn test_lex_posterior_falls_back_to_effective_start() {
        let mut earlier = norm("v1", AuthorityLevel::Regulation);
        earlier.effective_start = Some(date(2023, 1, 1));
        let mut later = norm("v2", AuthorityLevel::Regulation);
        later.effective_start = Some(date(2023, 7, 5));

        let resolution = CanonResolver::new().resolve(&conflict_between(earlier, later.clone()));
        assert_eq!(resolution.canon_applied, Canon::LexPosterior);
        assert_eq!(resolution.prevailing_norm, later.source_id);
    }

    #[test]
    fn test_lex_specialis_when_dates_tie() {
        let mut broad = norm("v1", AuthorityLevel::Regulation);
        broad.effective_start = Some(date(2023, 1, 1));
        broad.specificity_score = 0.3;

        let mut narrow = norm("v2", AuthorityLevel::Regulation);
        narrow.effective_start = Some(date(2023, 1, 1));
        narrow.specificity_score = 0.8;
        narrow.object = Some("automated employment decision tools".to_string());

        let resolution = CanonResolver::new().resolve(&conflict_between(broad, narrow.clone()));
        assert_eq!(resolution.canon_applied, Canon::LexSpecialis);
        assert_eq!(resolution.prevailing_norm, narrow.source_id);
        assert!((resolution.confidence - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lex_specialis_needs_margin() {
        // Same authority, same dates, specificity delta below 0.2: default.
        let mut a = norm("v1", AuthorityLevel::Regulation);
        a.effective_start = Some(date(2023, 1, 1));
        a.specificity_score = 0.5;
        let mut b = norm("v2", AuthorityLevel::Regulation);
        b.effective_start = Some(date(2023, 1, 1));
        b.specificity_score = 0.6;

        let resolution = CanonResolver::new().resolve(&conflict_between(a, b.clone()));
        assert!((resolution.confidence - 0.5).abs() < f32::EPSILON);
        assert!(resolution.rationale.contains("Human review recommended"));
        // Deterministic tie-break: norm2 prevails.
        assert_eq!(resolution.prevailing_norm, b.source_id);
    }

    #[test]
    fn test_default_prefers_later_effective_start() {
        let mut a = norm("v1", AuthorityLevel::Regulation);
        a.effective_start = Some(date(2023, 7, 5));
        a.enactment_date = Some(date(2023, 1, 1));
        let mut b = norm("v2", AuthorityLevel::Regulation);
        b.effective_start = Some(date(2023, 1, 1));
        b.enactment_date = Some(date(2023, 1, 1));

        // Enactment dates tie, specificity ties; default looks at
        // effective starts and picks the later one, norm1 here.
        let resolution = CanonResolver::new().resolve(&conflict_between(a.clone(), b));
        assert_eq!(resolution.prevailing_norm, a.source_id);
        assert!((resolution.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resolver_is_total() {
        // No authority difference, no dates, no specificity signal.
        let a = norm("v1", AuthorityLevel::Guidance);
        let b = norm("v2", AuthorityLevel::Guidance);

        let resolution = CanonResolver::new().resolve(&conflict_between(a, b));
        assert!((0.0..=1.0).contains(&resolution.confidence));
        assert!(!resolution.prevailing_norm.is_empty());
        assert!(!resolution.rationale.is_empty());
    }

    #[test]
    fn test_resolve_all_never_overwrites() {
        let a = norm("v1", AuthorityLevel::Statute);
        let b = norm("v2", AuthorityLevel::Regulation);
        let mut conflict = conflict_between(a, b);

        let manual = Resolution::new(Canon::LexSpecialis, "manual_pick", "reviewed", 0.95);
        conflict.attach_resolution(manual.clone());

        let resolved = CanonResolver::new().resolve_all(vec![conflict]);
        assert_eq!(resolved[0].resolution, Some(manual));
    }

    #[test]
    fn test_resolve_all_attaches_to_unresolved() {
        let conflicts = vec![
            conflict_between(
                norm("v1", AuthorityLevel::Statute),
                norm("v2", AuthorityLevel::Regulation),
            ),
            conflict_between(
                norm("v1", AuthorityLevel::Guidance),
                norm("v2", AuthorityLevel::Guidance),
            ),
        ];

        let resolved = CanonResolver::new().resolve_all(conflicts);
        assert!(resolved.iter().all(Conflict::is_resolved));
    }

    #[test]
    fn test_specificity_bonuses() {
        let mut plain = norm("v1", AuthorityLevel::Regulation);
        plain.specificity_score = 0.5;
        assert!((specificity(&plain) - 0.5).abs() < f32::EPSILON);

        let mut rich = plain.clone();
        rich.conditions = Some("c".repeat(1000)); // capped at +0.2
        rich.exceptions = vec!["a".to_string(), "b".to_string(), "c".to_string()]; // 3 * 0.05 capped at +0.1
        rich.object = Some("records".to_string()); // +0.1
        rich.effective_start = Some(date(2024, 1, 1)); // 181-day span: +0.1
        rich.effective_end = Some(date(2024, 6, 30));

        assert!((specificity(&rich) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_specificity_clamped() {
        let mut maxed = norm("v1", AuthorityLevel::Regulation);
        maxed.specificity_score = 1.0;
        maxed.conditions = Some("c".repeat(1000));
        maxed.object = Some("o".to_string());
        assert!((specificity(&maxed) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rank_resolutions() {
        let resolver = CanonResolver::new();
        let mut severe = conflict_between(
            norm("v1", AuthorityLevel::Statute),
            norm("v2", AuthorityLevel::Regulation),
        );
        severe.severity = 1.0;
        let mut mild = conflict_between(
            norm("v1", AuthorityLevel::Guidance),
            norm("v2", AuthorityLevel::Guidance),
        );
        mild.severity = 0.4;
        let unresolved = conflict_between(
            norm("v1", AuthorityLevel::Guidance),
            norm("v2", AuthorityLevel::Guidance),
        );

        let mut resolved = resolver.resolve_all(vec![severe, mild]);
        resolved.push(unresolved);

        let ranked = rank_resolutions(&resolved);
        assert_eq!(ranked.len(), 2);
        // 1.0 * 0.9 ahead of 0.4 * 0.5.
        assert!((ranked[0].1 - 0.9).abs() < 1e-6);
        assert!((ranked[1].1 - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_explain_contains_all_fields() {
        let a = norm("v1", AuthorityLevel::Statute);
        let b = norm("v2", AuthorityLevel::Regulation);
        let resolver = CanonResolver::new();
        let resolved = resolver.resolve_all(vec![conflict_between(a, b)]);

        let explanation = explain_resolution(&resolved[0]);
        for needle in [
            "Modality: O",
            "Subject: employers",
            "Action: provide notice of automated tool use",
            "Effective:",
            "Canon Applied: lex_superior",
            "Rationale:",
            "Confidence: 0.90",
        ] {
            assert!(explanation.contains(needle), "missing: {needle}");
        }
    }

    #[test]
    fn test_explain_unresolved() {
        let conflict = conflict_between(
            norm("v1", AuthorityLevel::Statute),
            norm("v2", AuthorityLevel::Regulation),
        );
        assert_eq!(explain_resolution(&conflict), "Conflict not yet resolved.");
    }

    #[test]
    fn test_summarize_resolutions() {
        let resolver = CanonResolver::new();
        let conflicts = vec![
            conflict_between(
                norm("v1", AuthorityLevel::Statute),
                norm("v2", AuthorityLevel::Regulation),
            ),
            conflict_between(
                norm("v1", AuthorityLevel::Guidance),
                norm("v2", AuthorityLevel::Guidance),
            ),
        ];
        let mut resolved = resolver.resolve_all(conflicts);
        resolved.push(conflict_between(
            norm("v1", AuthorityLevel::Guidance),
            norm("v2", AuthorityLevel::Guidance),
        ));

        let summary = summarize_resolutions(&resolved);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.resolved, 2);
        assert_eq!(summary.by_canon["lex_superior"], 1);
        assert_eq!(summary.by_canon["lex_posterior"], 1);
        assert_eq!(summary.high_confidence, 1);
        assert_eq!(summary.low_confidence, 1);
        assert!((summary.avg_confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_resolutions(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.resolved, 0);
        assert!(summary.by_canon.is_empty());
    }

    #[test]
    fn test_custom_config_confidences() {
        let config = CanonResolverConfig {
            lex_superior_confidence: 0.99,
            ..CanonResolverConfig::default()
        };
        let resolver = CanonResolver::with_config(config);
        let resolution = resolver.resolve(&conflict_between(
            norm("v1", AuthorityLevel::Constitution),
            norm("v2", AuthorityLevel::InternalPolicy),
        ));
        assert!((resolution.confidence - 0.99).abs() < f32::EPSILON);
    }
}
