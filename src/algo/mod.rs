//! Graph analytics adapter
//!
//! Algorithms are implemented in the `riskgraph-algorithms` crate.
//! This module provides the integration layer: it maps dense indices
//! back to knowledge-graph identities.

use crate::graph::{GraphError, GraphResult, KnowledgeGraph};
use riskgraph_algorithms::{adamic_adar, centrality, page_rank_scores, GraphView, PageRankConfig};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Structural scores of one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeScores {
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    pub pagerank: f64,
}

/// Compute centrality and PageRank for every node, indexed like the view
pub fn compute_centrality(view: &GraphView, pagerank: PageRankConfig) -> Vec<NodeScores> {
    let started = Instant::now();
    let (triple, ranks) = rayon::join(|| centrality(view), || page_rank_scores(view, pagerank));

    let scores: Vec<NodeScores> = (0..view.node_count)
        .map(|i| NodeScores {
            degree: triple.degree[i],
            betweenness: triple.betweenness[i],
            closeness: triple.closeness[i],
            pagerank: ranks[i],
        })
        .collect();

    debug!(nodes = view.node_count, elapsed_ms = started.elapsed().as_millis() as u64, "Computed centrality");
    scores
}

/// A candidate link scored by the Adamic-Adar index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkPrediction {
    pub node_id: String,
    pub entity_type: String,
    /// Normalised to `(0, 1]`, 1 for the strongest candidate
    pub score: f64,
}

/// Nodes most likely to be linked to `node_id`, strongest first
pub fn predict_links(graph: &KnowledgeGraph, node_id: &str, limit: usize) -> GraphResult<Vec<LinkPrediction>> {
    let index = graph
        .index_of(node_id)
        .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
    let view = graph.view();

    Ok(adamic_adar(&view, index)
        .into_iter()
        .take(limit)
        .filter_map(|(idx, score)| {
            let node = graph.node_at(idx)?;
            Some(LinkPrediction {
                node_id: node.id.clone(),
                entity_type: node.entity_type.clone(),
                score,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{predicates, Fact};

    fn located(equipment: &str, pad: &str) -> Fact {
        Fact::new(equipment, "component", predicates::LOCATED_AT, pad, "pad")
    }

    #[test]
    fn test_scores_line_up_with_graph_indices() {
        let facts = vec![located("ENG-12", "PAD-A"), located("TRANS-12", "PAD-A"), located("ENG-27", "PAD-B")];
        let graph = KnowledgeGraph::build(&facts).unwrap();
        let scores = compute_centrality(&graph.view(), PageRankConfig::default());
        assert_eq!(scores.len(), graph.node_count());

        let pad_a = graph.index_of("PAD-A").unwrap();
        let eng_27 = graph.index_of("ENG-27").unwrap();
        assert!(scores[pad_a].degree > scores[eng_27].degree);
        assert!(scores[pad_a].pagerank > scores[eng_27].pagerank);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.degree)));
    }

    #[test]
    fn test_predict_links_through_shared_location() {
        let facts = vec![
            located("ENG-12", "PAD-A"),
            located("TRANS-12", "PAD-A"),
            Fact::new("ENG-12", "component", predicates::HAS_SYMPTOM, "Overheating", "symptom"),
        ];
        let graph = KnowledgeGraph::build(&facts).unwrap();
        let links = predict_links(&graph, "TRANS-12", 5).unwrap();
        assert_eq!(links[0].node_id, "ENG-12");
        assert_eq!(links[0].score, 1.0);

        assert!(matches!(
            predict_links(&graph, "missing", 5),
            Err(GraphError::NodeNotFound(_))
        ));
    }
}
