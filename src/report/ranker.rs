//! Top-risk node selection

use super::RiskNode;
use crate::algo::NodeScores;
use crate::graph::KnowledgeGraph;
use crate::model::SeverityWeights;
use std::cmp::Reverse;

/// Order nodes by `(severity rank desc, degree desc)` and keep the first `k`.
///
/// `scores` is indexed like the graph's first-seen order. The sort is stable,
/// so nodes that tie on both keys keep that order.
pub fn rank_top_risk(
    graph: &KnowledgeGraph,
    scores: &[NodeScores],
    weights: &SeverityWeights,
    k: usize,
) -> Vec<RiskNode> {
    let mut candidates: Vec<(usize, u32, f64)> = graph
        .nodes()
        .enumerate()
        .map(|(idx, node)| {
            let degree = scores.get(idx).map_or(0.0, |s| s.degree);
            (idx, weights.rank(node.severity), degree)
        })
        .collect();

    candidates.sort_by(|a, b| {
        Reverse(a.1)
            .cmp(&Reverse(b.1))
            .then_with(|| b.2.total_cmp(&a.2))
    });

    candidates
        .into_iter()
        .take(k)
        .filter_map(|(idx, _, _)| {
            let node = graph.node_at(idx)?;
            let s = scores.get(idx).copied().unwrap_or_default();
            Some(RiskNode {
                node_id: node.id.clone(),
                entity_type: node.entity_type.clone(),
                label: node.label.clone(),
                severity: node.severity,
                degree: s.degree,
                betweenness: s.betweenness,
                closeness: s.closeness,
                pagerank: s.pagerank,
            })
        })
        .collect()
}
