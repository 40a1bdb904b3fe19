//! Relation (edge) implementation
//!
//! A relation connects exactly two nodes. Undirected relations are
//! symmetric over `node1`/`node2`; directed relations run `from` -> `to`.
//! Endpoints are held as node IDs and resolved through the owning
//! [`GraphStore`](super::GraphStore).

use super::attribute::{AttributeMap, Attributed};
use super::store::{GraphError, GraphResult};
use super::types::{GraphKind, NodeId, RelationId};
use indexmap::IndexSet;

/// The two endpoints of a relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoints {
    Undirected { node1: NodeId, node2: NodeId },
    Directed { from: NodeId, to: NodeId },
}

impl Endpoints {
    /// `node1` for undirected, `from` for directed
    pub fn first(&self) -> &NodeId {
        match self {
            Endpoints::Undirected { node1, .. } => node1,
            Endpoints::Directed { from, .. } => from,
        }
    }

    /// `node2` for undirected, `to` for directed
    pub fn second(&self) -> &NodeId {
        match self {
            Endpoints::Undirected { node2, .. } => node2,
            Endpoints::Directed { to, .. } => to,
        }
    }

    pub fn kind(&self) -> GraphKind {
        match self {
            Endpoints::Undirected { .. } => GraphKind::Undirected,
            Endpoints::Directed { .. } => GraphKind::Directed,
        }
    }
}

/// A relation between two nodes
///
/// Relations have:
/// - A unique ID
/// - Two endpoints (ordered for directed relations)
/// - Attributes (key-value pairs)
#[derive(Debug, Clone)]
pub struct Relation {
    id: RelationId,
    endpoints: Endpoints,
    attributes: AttributeMap,
}

impl Relation {
    /// Create a relation of the given kind.
    ///
    /// Both endpoints are required; a missing one is an
    /// [`GraphError::InvalidArgument`].
    pub fn try_new(
        kind: GraphKind,
        id: impl Into<RelationId>,
        node1: Option<NodeId>,
        node2: Option<NodeId>,
    ) -> GraphResult<Self> {
        let id = id.into();
        let (node1, node2) = match (node1, node2) {
            (Some(a), Some(b)) => (a, b),
            (None, _) => {
                return Err(GraphError::InvalidArgument(format!(
                    "relation {} is missing its first endpoint",
                    id
                )))
            }
            (_, None) => {
                return Err(GraphError::InvalidArgument(format!(
                    "relation {} is missing its second endpoint",
                    id
                )))
            }
        };

        let endpoints = match kind {
            GraphKind::Undirected => Endpoints::Undirected { node1, node2 },
            GraphKind::Directed => Endpoints::Directed {
                from: node1,
                to: node2,
            },
        };

        Ok(Relation {
            id,
            endpoints,
            attributes: AttributeMap::new(),
        })
    }

    /// Create an undirected relation
    pub fn undirected(
        id: impl Into<RelationId>,
        node1: impl Into<NodeId>,
        node2: impl Into<NodeId>,
    ) -> Self {
        Relation {
            id: id.into(),
            endpoints: Endpoints::Undirected {
                node1: node1.into(),
                node2: node2.into(),
            },
            attributes: AttributeMap::new(),
        }
    }

    /// Create a directed relation running `from` -> `to`
    pub fn directed(
        id: impl Into<RelationId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> Self {
        Relation {
            id: id.into(),
            endpoints: Endpoints::Directed {
                from: from.into(),
                to: to.into(),
            },
            attributes: AttributeMap::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.endpoints.kind()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Source node of a directed relation
    pub fn source(&self) -> Option<&NodeId> {
        match &self.endpoints {
            Endpoints::Directed { from, .. } => Some(from),
            Endpoints::Undirected { .. } => None,
        }
    }

    /// Target node of a directed relation
    pub fn target(&self) -> Option<&NodeId> {
        match &self.endpoints {
            Endpoints::Directed { to, .. } => Some(to),
            Endpoints::Undirected { .. } => None,
        }
    }

    /// Check if `node` is one of the two endpoints
    pub fn is_related_to(&self, node: &NodeId) -> bool {
        self.endpoints.first() == node || self.endpoints.second() == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.endpoints.first() == self.endpoints.second()
    }

    /// IDs of the connected nodes, first endpoint then second.
    ///
    /// A self-loop collapses to a single entry.
    pub fn connected_node_ids(&self) -> IndexSet<NodeId> {
        let mut ids = IndexSet::with_capacity(2);
        ids.insert(self.endpoints.first().clone());
        ids.insert(self.endpoints.second().clone());
        ids
    }

    /// The endpoint opposite `node`, if `node` is an endpoint at all
    pub fn other_endpoint(&self, node: &NodeId) -> Option<&NodeId> {
        if self.endpoints.first() == node {
            Some(self.endpoints.second())
        } else if self.endpoints.second() == node {
            Some(self.endpoints.first())
        } else {
            None
        }
    }
}

impl Attributed for Relation {
    type Id = RelationId;

    fn id(&self) -> &RelationId {
        &self.id
    }

    fn is_directed(&self) -> bool {
        self.kind().is_directed()
    }

    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.endpoints == other.endpoints
    }
}

impl Eq for Relation {}

impl std::hash::Hash for Relation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_relation() {
        let rel = Relation::undirected("r1", "a", "b");

        assert_eq!(rel.id(), &RelationId::new("r1"));
        assert!(!rel.is_directed());
        assert_eq!(rel.endpoints().first(), &NodeId::new("a"));
        assert_eq!(rel.endpoints().second(), &NodeId::new("b"));
        assert!(rel.source().is_none());
    }

    #[test]
    fn test_missing_endpoint() {
        let result = Relation::try_new(GraphKind::Undirected, "r1", None, Some(NodeId::new("b")));
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));

        let result = Relation::try_new(GraphKind::Directed, "r1", Some(NodeId::new("a")), None);
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_try_new_directed() {
        let rel = Relation::try_new(
            GraphKind::Directed,
            "r1",
            Some(NodeId::new("a")),
            Some(NodeId::new("b")),
        )
        .unwrap();

        assert!(rel.is_directed());
        assert_eq!(rel.source(), Some(&NodeId::new("a")));
        assert_eq!(rel.target(), Some(&NodeId::new("b")));
    }

    #[test]
    fn test_is_related_to() {
        let rel = Relation::directed("r1", "a", "b");
        assert!(rel.is_related_to(&NodeId::new("a")));
        assert!(rel.is_related_to(&NodeId::new("b")));
        assert!(!rel.is_related_to(&NodeId::new("c")));
    }

    #[test]
    fn test_connected_node_ids() {
        let rel = Relation::undirected("r1", "a", "b");
        let ids: Vec<_> = rel.connected_node_ids().into_iter().collect();
        assert_eq!(ids, vec![NodeId::new("a"), NodeId::new("b")]);

        let self_loop = Relation::undirected("r2", "a", "a");
        let ids: Vec<_> = self_loop.connected_node_ids().into_iter().collect();
        assert_eq!(ids, vec![NodeId::new("a")]);
        assert!(self_loop.is_self_loop());
    }

    #[test]
    fn test_other_endpoint() {
        let rel = Relation::undirected("r1", "a", "b");
        assert_eq!(rel.other_endpoint(&NodeId::new("a")), Some(&NodeId::new("b")));
        assert_eq!(rel.other_endpoint(&NodeId::new("b")), Some(&NodeId::new("a")));
        assert_eq!(rel.other_endpoint(&NodeId::new("c")), None);
    }

    #[test]
    fn test_relation_equality() {
        let r1 = Relation::undirected("r1", "a", "b");
        let r2 = Relation::undirected("r1", "a", "b");
        let swapped = Relation::undirected("r1", "b", "a");
        let other_id = Relation::undirected("r2", "a", "b");

        assert_eq!(r1, r2);
        assert_ne!(r1, swapped); // Endpoints compared in order
        assert_ne!(r1, other_id);
        assert_ne!(Relation::undirected("r1", "a", "b"), Relation::directed("r1", "a", "b"));
    }

    #[test]
    fn test_relation_attributes() {
        let mut rel = Relation::directed("r1", "a", "b");
        rel.set_attribute("since", 2020i64);
        rel.set_attribute("weight", 0.5);

        assert_eq!(rel.get_attribute("since").unwrap().as_integer(), Some(2020));
        assert_eq!(rel.attribute_count(), 2);
        assert!(rel.remove_attribute("weight").is_some());
        assert!(!rel.has_attribute("weight"));
    }
}
