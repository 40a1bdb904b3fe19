//! Core graph object model
//!
//! This module implements:
//! - Nodes and relations sharing an attributed-identity surface
//! - Directed and undirected variants of both
//! - An owning container that keeps node and relation cross-references consistent

pub mod attribute;
pub mod node;
pub mod relation;
pub mod store;
pub mod types;

// Re-export main types
pub use attribute::{AttributeMap, AttributeValue, Attributed};
pub use node::{Incidence, Node};
pub use relation::{Endpoints, Relation};
pub use store::{ErrorKind, GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{GraphKind, NodeId, RelationId};
