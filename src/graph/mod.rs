//! Knowledge graph of equipment, locations, symptoms and metrics
//!
//! - Nodes are created lazily from fact subjects and objects
//! - Edges are directed subject -> object and labelled by predicate
//! - Facts between the same ordered pair share one edge with a predicate set

pub mod edge;
pub mod node;
pub mod store;

pub use edge::Edge;
pub use node::Node;
pub use store::{GraphError, GraphResult, KnowledgeGraph};
