//! In-memory knowledge graph built from facts
//!
//! Nodes are kept in first-seen order; that order is the stable tie-break
//! used by the risk ranking.

use super::edge::Edge;
use super::node::Node;
use crate::model::Fact;
use indexmap::IndexMap;
use riskgraph_algorithms::GraphView;
use rustc_hash::FxBuildHasher;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A fact whose identity fields cannot form a node or edge
    #[error("Malformed fact #{index}: {reason}")]
    MalformedFact { index: usize, reason: String },

    #[error("Node {0} not found")]
    NodeNotFound(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Directed, attributed graph of entities
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: IndexMap<String, Node, FxBuildHasher>,
    edges: IndexMap<(usize, usize), Edge, FxBuildHasher>,
}

fn check_identity(index: usize, field: &str, value: &str) -> GraphResult<()> {
    let reason = if value.trim().is_empty() {
        format!("{field} is empty")
    } else if value.chars().any(char::is_control) {
        format!("{field} contains control characters")
    } else {
        return Ok(());
    };
    Err(GraphError::MalformedFact { index, reason })
}

fn validate_fact(index: usize, fact: &Fact) -> GraphResult<()> {
    check_identity(index, "subject_id", &fact.subject_id)?;
    check_identity(index, "object_id", &fact.object_id)?;
    check_identity(index, "predicate", &fact.predicate)
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fact sequence into a graph.
    ///
    /// The node and edge sets do not depend on fact order; node severities are
    /// a max-reduction over every fact touching the node.
    pub fn build(facts: &[Fact]) -> GraphResult<Self> {
        let mut graph = KnowledgeGraph::new();
        for (index, fact) in facts.iter().enumerate() {
            graph.insert_fact(index, fact)?;
        }
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "Built knowledge graph");
        Ok(graph)
    }

    /// Reject the first fact whose identity fields cannot form a node or edge.
    ///
    /// `index` in the error is the position within `facts`.
    pub fn validate(facts: &[Fact]) -> GraphResult<()> {
        facts
            .iter()
            .enumerate()
            .try_for_each(|(index, fact)| validate_fact(index, fact))
    }

    /// Upsert both endpoints and the subject -> object edge
    pub fn insert_fact(&mut self, index: usize, fact: &Fact) -> GraphResult<()> {
        validate_fact(index, fact)?;

        let source = self.upsert_node(&fact.subject_id, &fact.subject_type, fact);
        let target = self.upsert_node(&fact.object_id, &fact.object_type, fact);

        self.edges
            .entry((source, target))
            .and_modify(|edge| {
                edge.add_predicate(&fact.predicate);
            })
            .or_insert_with(|| Edge::new(source, target, fact.predicate.as_str()));
        Ok(())
    }

    fn upsert_node(&mut self, id: &str, entity_type: &str, fact: &Fact) -> usize {
        let entry = self.nodes.entry(id.to_string());
        let index = entry.index();
        entry
            .or_insert_with(|| Node::new(id, entity_type))
            .upgrade_severity(fact.severity);
        index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Node by first-seen index
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        let key = (self.index_of(source)?, self.index_of(target)?);
        self.edges.get(&key)
    }

    /// Dense topology view for the algorithms crate; node ids are first-seen indices
    pub fn view(&self) -> GraphView {
        let edges: Vec<(usize, usize)> = self.edges.keys().copied().collect();
        GraphView::from_edges((0..self.nodes.len() as u64).collect(), &edges)
    }
}
