//! Final ranking of the detectors' combined output.

use crate::types::GapRecord;

/// Sort gaps by confidence, highest first. The sort is stable, so ties keep
/// detector-then-emission order. No deduplication across detectors: two
/// detectors proposing the same edge both appear.
pub fn rank(mut gaps: Vec<GapRecord>) -> Vec<GapRecord> {
    gaps.sort_by(|a, b| {
        b.confidence_score
            .partial_cmp(&a.confidence_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingConnection, ResearchPriority};

    fn record(tag: &str, confidence: f64) -> GapRecord {
        GapRecord {
            hypothesis_text: tag.into(),
            confidence_score: confidence,
            supporting_evidence: vec![],
            missing_connections: vec![MissingConnection::edge("a", "b", "REGULATES")],
            research_priority: ResearchPriority::Low,
            suggested_methods: vec![],
        }
    }

    #[test]
    fn test_descending_by_confidence() {
        let ranked = rank(vec![record("low", 0.1), record("high", 0.9), record("mid", 0.5)]);
        let tags: Vec<&str> = ranked.iter().map(|g| g.hypothesis_text.as_str()).collect();
        assert_eq!(tags, ["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_emission_order() {
        let ranked = rank(vec![
            record("first", 0.5),
            record("second", 0.5),
            record("third", 0.5),
        ]);
        let tags: Vec<&str> = ranked.iter().map(|g| g.hypothesis_text.as_str()).collect();
        assert_eq!(tags, ["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
