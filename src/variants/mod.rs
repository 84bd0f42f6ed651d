//! Sentence scoring variants
//!
//! - LexRank: centrality in the cosine-similarity graph (the default)
//! - Frequency: graph-free term-frequency scoring with a position bias, used
//!   on request and as the fallback when the ranker runs out of time

pub mod frequency;
pub mod lexrank;

use crate::pipeline::artifacts::ScoreVector;
use crate::types::{Document, ScoringMode, SummaryConfig};

/// Score a document's sentences with the requested mode, without a deadline
pub fn rank_sentences(document: &Document, config: &SummaryConfig) -> ScoreVector {
    match config.scoring_mode {
        ScoringMode::GraphCentrality => lexrank::rank_sentences_lexrank(document, config),
        ScoringMode::Frequency => frequency::rank_sentences_frequency(document, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::segmenter::SentenceSegmenter;
    use crate::nlp::stopwords::StopwordFilter;

    #[test]
    fn test_dispatch_follows_scoring_mode() {
        let doc = SentenceSegmenter::new().segment(
            "Solar panels convert sunlight. Wind turbines spin fast. Solar farms need sunlight.",
            &StopwordFilter::new("en"),
        );

        let graph = rank_sentences(&doc, &SummaryConfig::default());
        assert_eq!(graph.mode(), ScoringMode::GraphCentrality);

        let config = SummaryConfig::default().with_scoring_mode("freq".parse().unwrap());
        let frequency = rank_sentences(&doc, &config);
        assert_eq!(frequency.mode(), ScoringMode::Frequency);
        assert_eq!(frequency.len(), 3);
    }
}
