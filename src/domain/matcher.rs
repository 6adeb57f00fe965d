//! Comparable matching between a query title and candidate sold listings.
//!
//! Near-binary discriminators (quantity, language) are checked before fuzzy
//! lexical overlap, which has to tolerate marketing-word noise while still
//! demanding substantial shared vocabulary.

use serde::Deserialize;

use super::signature::{QuerySignature, TitleAnalyzer};

/// Thresholds for the comparable decision.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Queries with fewer significant tokens than this are too short to
    /// disambiguate and accept every candidate.
    #[serde(default = "default_min_query_tokens")]
    pub min_query_tokens: usize,

    /// Minimum fraction of the query's required tokens a candidate must
    /// carry.
    #[serde(default = "default_required_token_ratio")]
    pub required_token_ratio: f64,

    /// Minimum Jaccard similarity of the full token sets.
    #[serde(default = "default_jaccard_threshold")]
    pub jaccard_threshold: f64,
}

fn default_min_query_tokens() -> usize {
    3
}

fn default_required_token_ratio() -> f64 {
    0.70
}

fn default_jaccard_threshold() -> f64 {
    0.35
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_query_tokens: default_min_query_tokens(),
            required_token_ratio: default_required_token_ratio(),
            jaccard_threshold: default_jaccard_threshold(),
        }
    }
}

/// Decides whether a candidate listing describes the same item as the
/// query.
#[derive(Debug)]
pub struct ComparableMatcher {
    analyzer: TitleAnalyzer,
    config: MatcherConfig,
}

impl ComparableMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            analyzer: TitleAnalyzer::new(),
            config,
        }
    }

    /// Derive the signature for a query title.
    pub fn signature(&self, title: &str) -> QuerySignature {
        self.analyzer.signature(title)
    }

    /// Ordered, short-circuiting comparable decision.
    pub fn is_comparable(&self, query: &QuerySignature, candidate_title: &str) -> bool {
        // Too few tokens to tell items apart; rejecting would be guessing.
        if query.tokens.len() < self.config.min_query_tokens {
            return true;
        }

        let candidate = self.analyzer.signature(candidate_title);

        // Wrong lot size is a different product, not a fuzzy mismatch.
        if let (Some(wanted), Some(found)) = (query.quantity, candidate.quantity) {
            if wanted != found {
                return false;
            }
        }

        // Once the query is language-specific, an unknown candidate
        // language counts as a mismatch.
        if let Some(language) = query.language {
            if candidate.language != Some(language) {
                return false;
            }
        }

        if !query.required.is_empty() {
            let shared = query
                .required
                .iter()
                .filter(|token| candidate.tokens.contains(*token))
                .count();
            let ratio = shared as f64 / query.required.len() as f64;
            if ratio < self.config.required_token_ratio {
                return false;
            }
        }

        jaccard(&query.tokens, &candidate.tokens) >= self.config.jaccard_threshold
    }
}

/// Intersection size over union size of two token sets.
fn jaccard(
    left: &std::collections::HashSet<String>,
    right: &std::collections::HashSet<String>,
) -> f64 {
    let intersection = left.intersection(right).count();
    let union = left.len() + right.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
