//! Norm records and the deontic vocabulary.
//!
//! A norm is one deontic statement extracted from one section of one
//! version of a legal text. Norms are produced by the extraction and
//! normalization layers and are read-only inside the engine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::TemporalInterval;

/// Deontic modality of a norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Must do ("O" on the wire).
    #[serde(rename = "O")]
    Obligation,

    /// May do ("P" on the wire).
    #[serde(rename = "P")]
    Permission,

    /// Must not do ("F" on the wire).
    #[serde(rename = "F")]
    Prohibition,
}

impl Modality {
    /// Single-letter wire code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Obligation => "O",
            Self::Permission => "P",
            Self::Prohibition => "F",
        }
    }

    /// English rendering used in descriptions and recommendations.
    #[must_use]
    pub const fn as_adjective(&self) -> &'static str {
        match self {
            Self::Obligation => "required",
            Self::Permission => "permitted",
            Self::Prohibition => "prohibited",
        }
    }

    /// True when the two modalities cannot both govern the same conduct:
    /// Obligation vs Prohibition, or Permission vs Prohibition.
    #[must_use]
    pub const fn contradicts(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Obligation, Self::Prohibition)
                | (Self::Prohibition, Self::Obligation)
                | (Self::Permission, Self::Prohibition)
                | (Self::Prohibition, Self::Permission)
        )
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Modality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O" => Ok(Self::Obligation),
            "P" => Ok(Self::Permission),
            "F" => Ok(Self::Prohibition),
            other => Err(ValidationError::InvalidModality {
                value: other.to_string(),
            }),
        }
    }
}

/// Legal authority hierarchy, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    /// An organization's own policy documents.
    InternalPolicy,

    /// Non-binding regulator guidance.
    Guidance,

    /// Administrative regulation.
    Regulation,

    /// Legislative statute.
    Statute,

    /// Constitutional provision.
    Constitution,
}

impl AuthorityLevel {
    /// Numeric rank used by lex superior (InternalPolicy=1 up to
    /// Constitution=5).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::InternalPolicy => 1,
            Self::Guidance => 2,
            Self::Regulation => 3,
            Self::Statute => 4,
            Self::Constitution => 5,
        }
    }

    /// snake_case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InternalPolicy => "internal_policy",
            Self::Guidance => "guidance",
            Self::Regulation => "regulation",
            Self::Statute => "statute",
            Self::Constitution => "constitution",
        }
    }
}

impl Default for AuthorityLevel {
    fn default() -> Self {
        Self::Statute
    }
}

impl fmt::Display for AuthorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthorityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal_policy" => Ok(Self::InternalPolicy),
            "guidance" => Ok(Self::Guidance),
            "regulation" => Ok(Self::Regulation),
            "statute" => Ok(Self::Statute),
            "constitution" => Ok(Self::Constitution),
            other => Err(ValidationError::InvalidAuthorityLevel {
                value: other.to_string(),
            }),
        }
    }
}

fn default_specificity() -> f32 {
    0.5
}

/// One deontic statement extracted from one section of one version.
///
/// `source_id` + `version_id` uniquely identify a norm instance. Equality
/// for grouping purposes uses [`Norm::same_subject_action`], not full
/// structural equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Norm {
    /// Deontic modality (O/P/F on the wire).
    pub modality: Modality,

    /// Who is bound by this norm.
    pub subject: String,

    /// What must, may, or must not be done.
    pub action: String,

    /// What is affected, if stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// Prerequisites or circumstances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    /// Applicable legal domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,

    /// Explicit carve-outs, in source order.
    #[serde(default)]
    pub exceptions: Vec<String>,

    /// When this norm starts to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_start: Option<NaiveDate>,

    /// When this norm ceases to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_end: Option<NaiveDate>,

    /// Full temporal applicability, populated by the normalizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_interval: Option<TemporalInterval>,

    /// Source document/section identifier.
    pub source_id: String,

    /// Version identifier.
    pub version_id: String,

    /// Legal authority level.
    #[serde(default)]
    pub authority_level: AuthorityLevel,

    /// When the law was enacted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enactment_date: Option<NaiveDate>,

    /// Original text excerpt, when the extractor kept one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_snippet: Option<String>,

    /// How narrowly this norm is scoped (0-1).
    #[serde(default = "default_specificity")]
    pub specificity_score: f32,
}

impl Norm {
    /// Starts building a norm.
    #[must_use]
    pub fn builder() -> NormBuilder {
        NormBuilder::default()
    }

    /// Grouping equality: case-insensitive, whitespace-trimmed comparison
    /// of subject and action.
    #[must_use]
    pub fn same_subject_action(&self, other: &Self) -> bool {
        normalize_key(&self.subject) == normalize_key(&other.subject)
            && normalize_key(&self.action) == normalize_key(&other.action)
    }

    /// True when the two norms impose incompatible modalities.
    #[must_use]
    pub fn contradictory_modality(&self, other: &Self) -> bool {
        self.modality.contradicts(other.modality)
    }

    /// The interval this norm is in force: the populated
    /// `temporal_interval`, else one synthesized from the effective dates
    /// (open-ended when only a start is known).
    #[must_use]
    pub fn effective_interval(&self) -> TemporalInterval {
        self.temporal_interval.clone().unwrap_or_else(|| {
            TemporalInterval::new(
                self.effective_start,
                self.effective_end,
                self.effective_end.is_none() && self.effective_start.is_some(),
            )
        })
    }

    /// Date used by lex posterior: `enactment_date`, falling back to
    /// `effective_start` when no enactment date is recorded.
    #[must_use]
    pub fn enactment_or_effective(&self) -> Option<NaiveDate> {
        self.enactment_date.or(self.effective_start)
    }
}

/// Normalized grouping key component: trimmed and lowercased.
pub(crate) fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Builder for [`Norm`].
///
/// # Example
/// ```rust,ignore
/// let norm = Norm::builder()
///     .modality(Modality::Obligation)
///     .subject("AI system providers")
///     .action("disclose transparency information")
///     .source_id("eu_ai_act_article_50")
///     .version_id("pre_application")
///     .effective_start(date)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct NormBuilder {
    modality: Option<Modality>,
    subject: Option<String>,
    action: Option<String>,
    object: Option<String>,
    conditions: Option<String>,
    jurisdiction: Option<String>,
    exceptions: Vec<String>,
    effective_start: Option<NaiveDate>,
    effective_end: Option<NaiveDate>,
    temporal_interval: Option<TemporalInterval>,
    source_id: Option<String>,
    version_id: Option<String>,
    authority_level: AuthorityLevel,
    enactment_date: Option<NaiveDate>,
    text_snippet: Option<String>,
    specificity_score: Option<f32>,
}

impl NormBuilder {
    /// Set the deontic modality (required).
    #[must_use]
    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    /// Set who is bound (required, non-empty).
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the governed action (required, non-empty).
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set what is affected.
    #[must_use]
    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Set prerequisites or circumstances.
    #[must_use]
    pub fn conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Set the applicable legal domain.
    #[must_use]
    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    /// Add one explicit carve-out.
    #[must_use]
    pub fn exception(mut self, exception: impl Into<String>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Replace the carve-out list.
    #[must_use]
    pub fn exceptions(mut self, exceptions: Vec<String>) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// Set the date the norm starts to apply.
    #[must_use]
    pub fn effective_start(mut self, date: NaiveDate) -> Self {
        self.effective_start = Some(date);
        self
    }

    /// Set the date the norm ceases to apply.
    #[must_use]
    pub fn effective_end(mut self, date: NaiveDate) -> Self {
        self.effective_end = Some(date);
        self
    }

    /// Set the full temporal applicability.
    #[must_use]
    pub fn temporal_interval(mut self, interval: TemporalInterval) -> Self {
        self.temporal_interval = Some(interval);
        self
    }

    /// Set the source document/section identifier (required, non-empty).
    #[must_use]
    pub fn source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Set the version identifier (required, non-empty).
    #[must_use]
    pub fn version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Set the legal authority level (default: statute).
    #[must_use]
    pub fn authority_level(mut self, level: AuthorityLevel) -> Self {
        self.authority_level = level;
        self
    }

    /// Set the enactment date.
    #[must_use]
    pub fn enactment_date(mut self, date: NaiveDate) -> Self {
        self.enactment_date = Some(date);
        self
    }

    /// Keep the original text excerpt.
    #[must_use]
    pub fn text_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.text_snippet = Some(snippet.into());
        self
    }

    /// Set the stored specificity score (default: 0.5).
    #[must_use]
    pub fn specificity_score(mut self, score: f32) -> Self {
        self.specificity_score = Some(score);
        self
    }

    /// Build the norm.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a required field is missing or empty,
    /// or when `specificity_score` is outside [0.0, 1.0].
    pub fn build(self) -> Result<Norm, ValidationError> {
        let modality = self.modality.ok_or(ValidationError::MissingField {
            field: "modality".to_string(),
        })?;
        let subject = self.subject.ok_or(ValidationError::EmptySubject)?;
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        let action = self.action.ok_or(ValidationError::EmptyAction)?;
        if action.trim().is_empty() {
            return Err(ValidationError::EmptyAction);
        }
        let source_id = self.source_id.ok_or(ValidationError::EmptySourceId)?;
        if source_id.is_empty() {
            return Err(ValidationError::EmptySourceId);
        }
        let version_id = self.version_id.ok_or(ValidationError::EmptyVersionId)?;
        if version_id.is_empty() {
            return Err(ValidationError::EmptyVersionId);
        }

        let specificity_score = self.specificity_score.unwrap_or_else(default_specificity);
        if !(0.0..=1.0).contains(&specificity_score) {
            return Err(ValidationError::ScoreOutOfRange {
                value: specificity_score,
            });
        }

        Ok(Norm {
            modality,
            subject,
            action,
            object: self.object,
            conditions: self.conditions,
            jurisdiction: self.jurisdiction,
            exceptions: self.exceptions,
            effective_start: self.effective_start,
            effective_end: self.effective_end,
            temporal_interval: self.temporal_interval,
            source_id,
            version_id,
            authority_level: self.authority_level,
            enactment_date: self.enactment_date,
            text_snippet: self.text_snippet,
            specificity_score,
        })
    }
}
