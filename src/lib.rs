//! # lexcheck - Temporal-Deontic Conflict Engine
//!
//! lexcheck audits multiple dated versions of a legal text. It finds places
//! where two versions impose contradictory or inconsistent obligations over
//! the same subject and action during overlapping time windows, scores and
//! ranks those conflicts, resolves them with legal interpretive canons, and
//! answers point-in-time and window queries.
//!
//! ## Core Concepts
//!
//! - **Norm**: one deontic statement (obligation/permission/prohibition)
//!   tied to one version of a legal text
//! - **TemporalInterval**: the date range a norm is in force; possibly
//!   open-ended or uncertain
//! - **Conflict**: an explicit record of a cross-version contradiction,
//!   with a severity score and, once resolved, a canon-based resolution
//! - **Canon**: interpretive priority rule (lex superior, lex posterior,
//!   lex specialis)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lexcheck::{CanonResolver, ConflictDetector, TemporalNormalizer, WhatIfAnalyzer};
//!
//! let norms = TemporalNormalizer::new().normalize_norms(norms);
//! let conflicts = ConflictDetector::new().detect(&norms);
//! let conflicts = CanonResolver::new().resolve_all(conflicts);
//!
//! let analyzer = WhatIfAnalyzer::new(norms, conflicts);
//! let result = analyzer.applicable_norms(date, Some("disclose"), None);
//! ```
//!
//! The engine is synchronous and pure: it consumes and produces structured
//! records, never performs I/O, and treats its inputs as immutable
//! snapshots. Extraction, storage, rendering and orchestration belong to
//! outer layers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod conflict;
pub mod detector;
pub mod error;
pub mod interval;
pub mod norm;
pub mod normalizer;
pub mod resolver;
pub mod whatif;

// Re-export primary types at crate root for convenience
pub use conflict::{Canon, Conflict, ConflictType, Resolution, HIGH_SEVERITY_THRESHOLD};
pub use detector::{
    filter_conflicts, rank_conflicts, summarize_conflicts, ConflictBackend, ConflictDetector,
    ConflictSummary, SeverityDistribution,
};
pub use error::{LexResult, ValidationError};
pub use interval::{IntervalType, TemporalInterval};
pub use norm::{AuthorityLevel, Modality, Norm, NormBuilder};
pub use normalizer::TemporalNormalizer;
pub use resolver::{
    explain_resolution, rank_resolutions, specificity, summarize_resolutions, CanonResolver,
    CanonResolverConfig, ResolutionSummary,
};
pub use whatif::{WhatIfAnalyzer, WhatIfQuery, WhatIfResult};
