//! All-pairs cosine similarity ranking

use super::NodeEmbeddings;
use riskgraph_algorithms::cosine_similarity;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Two embedded nodes and the cosine similarity of their vectors.
///
/// `node_a` is the lexically smaller id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub node_a: String,
    pub node_b: String,
    pub similarity: f64,
}

/// Pair of embedding-table indices with its score
type Scored = (usize, usize, f64);

/// Rank every unordered pair of embedded nodes and keep the `top_k` best.
///
/// Order: similarity descending, then `(node_a, node_b)` lexically. Each
/// worker keeps only its own best `top_k`; the global best `top_k` is always
/// contained in the union of those partial lists.
pub fn rank_similar_pairs(embeddings: &NodeEmbeddings, top_k: usize) -> Vec<SimilarPair> {
    let embedded = embeddings.embedded();
    if embedded.len() < 2 || top_k == 0 {
        return Vec::new();
    }

    let ids: Vec<&str> = {
        let mut table = vec![""; embedded.iter().map(|(idx, _)| idx + 1).max().unwrap_or(0)];
        for &(idx, id) in &embedded {
            table[idx] = id;
        }
        table
    };

    let order = |a: &Scored, b: &Scored| -> Ordering {
        b.2.total_cmp(&a.2)
            .then_with(|| ids[a.0].cmp(ids[b.0]))
            .then_with(|| ids[a.1].cmp(ids[b.1]))
    };
    let prune = |list: &mut Vec<Scored>| {
        list.sort_by(order);
        list.truncate(top_k);
    };

    let best = (0..embedded.len())
        .into_par_iter()
        .fold(Vec::new, |mut acc: Vec<Scored>, i| {
            let (a, id_a) = embedded[i];
            let va = embeddings.vector_at(a);
            for &(b, id_b) in &embedded[i + 1..] {
                let similarity = cosine_similarity(va, embeddings.vector_at(b));
                acc.push(if id_a < id_b { (a, b, similarity) } else { (b, a, similarity) });
            }
            if acc.len() > top_k.saturating_mul(4).max(64) {
                prune(&mut acc);
            }
            acc
        })
        .map(|mut acc| {
            prune(&mut acc);
            acc
        })
        .reduce(Vec::new, |mut left, right| {
            left.extend(right);
            prune(&mut left);
            left
        });

    best.into_iter()
        .map(|(a, b, similarity)| SimilarPair {
            node_a: ids[a].to_string(),
            node_b: ids[b].to_string(),
            similarity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{embed, tests::fast_config};
    use crate::graph::KnowledgeGraph;
    use crate::model::{predicates, Fact};

    fn star(spokes: usize) -> KnowledgeGraph {
        let facts: Vec<Fact> = (0..spokes)
            .map(|i| Fact::new(format!("ENG-{i}"), "component", predicates::LOCATED_AT, "PAD-A", "pad"))
            .collect();
        KnowledgeGraph::build(&facts).unwrap()
    }

    #[test]
    fn test_pairs_sorted_and_bounded() {
        let graph = star(6);
        let emb = embed(&graph, &graph.view(), &fast_config());
        let pairs = rank_similar_pairs(&emb, 5);
        assert_eq!(pairs.len(), 5);
        for w in pairs.windows(2) {
            assert!(w[0].similarity >= w[1].similarity);
        }
        for p in &pairs {
            assert_ne!(p.node_a, p.node_b);
            assert_eq!(Some(p.similarity), emb.similarity(&p.node_b, &p.node_a));
        }
    }

    #[test]
    fn test_pair_endpoints_ordered_by_id() {
        // Spokes are seen before the hub, and every spoke id sorts after it
        let facts: Vec<Fact> = ["ZONE-3", "ZONE-1", "ZONE-2"]
            .iter()
            .map(|id| Fact::new(*id, "pad", predicates::LOCATED_AT, "AREA-0", "area"))
            .collect();
        let graph = KnowledgeGraph::build(&facts).unwrap();
        let emb = embed(&graph, &graph.view(), &fast_config());
        let pairs = rank_similar_pairs(&emb, usize::MAX);
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|p| p.node_a < p.node_b));
        assert!(pairs
            .iter()
            .any(|p| p.node_a == "AREA-0" && p.node_b == "ZONE-3"));
    }

    #[test]
    fn test_top_k_matches_full_enumeration() {
        let graph = star(12);
        let emb = embed(&graph, &graph.view(), &fast_config());
        let all = rank_similar_pairs(&emb, usize::MAX);
        assert_eq!(all.len(), 13 * 12 / 2);
        let top = rank_similar_pairs(&emb, 7);
        assert_eq!(top, all[..7].to_vec());
    }

    #[test]
    fn test_too_few_nodes_gives_empty_list() {
        let single = KnowledgeGraph::build(&[Fact::new("A", "x", "self", "A", "x")]).unwrap();
        let emb = embed(&single, &single.view(), &fast_config());
        assert!(rank_similar_pairs(&emb, 10).is_empty());

        let empty = KnowledgeGraph::new();
        let emb = embed(&empty, &empty.view(), &fast_config());
        assert!(rank_similar_pairs(&emb, 10).is_empty());
    }
}
