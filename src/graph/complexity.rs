//! Pipeline complexity scoring.
//!
//! A pipeline's complexity is its function count, banded into tiers. The
//! count appears in different places depending on which API route produced
//! the record, so extraction is an ordered list of strategies with the first
//! present value winning.

use crate::api::PipelineRecord;

/// Complexity tier derived from a pipeline's function count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComplexityTier {
    #[default]
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    fn glyph(self) -> &'static str {
        match self {
            ComplexityTier::Low => "·",
            ComplexityTier::Medium => "▲",
            ComplexityTier::High => "◆",
        }
    }
}

/// Complexity score for one pipeline.
#[derive(Debug, Clone, Default)]
pub struct Complexity {
    pub score: usize,
    pub tier: ComplexityTier,
    /// Edge annotation. Empty when the score is 0.
    pub label: String,
}

impl Complexity {
    /// Whether this pipeline is heavy enough to annotate on an edge.
    /// Low-tier pipelines are left unannotated to avoid visual noise.
    pub fn annotates_edge(&self) -> bool {
        self.tier >= ComplexityTier::Medium
    }
}

type CountStrategy = fn(&PipelineRecord) -> Option<usize>;

// Tried in order; first present value wins.
const COUNT_STRATEGIES: &[CountStrategy] = &[
    |r| r.functions.as_ref().map(|f| f.len()),
    |r| r.function_count,
    |r| {
        r.conf
            .as_ref()
            .and_then(|c| c.functions.as_ref())
            .map(|f| f.len())
    },
];

/// Resolve a pipeline's function count, defaulting to 0.
pub fn function_count(record: &PipelineRecord) -> usize {
    COUNT_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(record))
        .unwrap_or(0)
}

/// Score a pipeline record.
pub fn score(record: &PipelineRecord) -> Complexity {
    let score = function_count(record);

    let tier = if score > 15 {
        ComplexityTier::High
    } else if score >= 5 {
        ComplexityTier::Medium
    } else {
        ComplexityTier::Low
    };

    let label = if score == 0 {
        String::new()
    } else {
        format!("{} {} fn", tier.glyph(), score)
    };

    Complexity { score, tier, label }
}
