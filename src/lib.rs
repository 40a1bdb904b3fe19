//! Relgraph
//!
//! A small attributed graph object model: nodes and relations that are
//! either directed or undirected, each with a string identity and a keyed
//! attribute bag, plus a depth-first traversal that reports visitation
//! order and cycles in one pass.
//!
//! # Architecture
//!
//! - The [`GraphStore`] owns every node and relation (arena style).
//!   Nodes index incident relations by ID; relations name their endpoints
//!   by ID. All cross-references resolve through the store.
//! - Directed and undirected objects are closed enum variants
//!   ([`Incidence`], [`Endpoints`]) rather than separate types.
//! - [`DepthFirstTraversal`] walks eagerly with an explicit work-stack.
//!
//! ## Example Usage
//!
//! ```rust
//! use relgraph::{Attributed, GraphStore};
//!
//! let mut store = GraphStore::new();
//!
//! let a = store.create_node(Some("a")).unwrap();
//! let b = store.create_node(Some("b")).unwrap();
//! let c = store.create_node(Some("c")).unwrap();
//! store.set_node_attribute(&a, "name", "Alice").unwrap();
//!
//! store.connect(&a, &b).unwrap();
//! store.connect(&b, &c).unwrap();
//! store.connect(&c, &a).unwrap();
//!
//! let traversal = store.traverse(&a).unwrap();
//! assert!(traversal.has_cycles());
//! let order: Vec<_> = traversal.map(|n| n.id().as_str()).collect();
//! assert_eq!(order, vec!["a", "b", "c"]);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    AttributeMap, AttributeValue, Attributed, Endpoints, ErrorKind, GraphError, GraphKind,
    GraphResult, GraphStatistics, GraphStore, Incidence, Node, NodeId, Relation, RelationId,
};

pub use algo::DepthFirstTraversal;

pub use config::{ConfigError, ConfigResult, GraphConfig, IdStrategy};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
