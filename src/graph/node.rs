//! Node implementation
//!
//! A node indexes the relations incident to it. It never owns them: the
//! [`GraphStore`](super::GraphStore) does, and keeps both sides in sync.

use super::attribute::{AttributeMap, Attributed};
use super::relation::Relation;
use super::types::{GraphKind, NodeId, RelationId};
use indexmap::IndexSet;

/// Incidence index of a node
///
/// Sets keep insertion order, which is the order traversal walks them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incidence {
    Undirected {
        relations: IndexSet<RelationId>,
    },
    Directed {
        outgoing: IndexSet<RelationId>,
        incoming: IndexSet<RelationId>,
    },
}

impl Incidence {
    fn new(kind: GraphKind) -> Self {
        match kind {
            GraphKind::Undirected => Incidence::Undirected {
                relations: IndexSet::new(),
            },
            GraphKind::Directed => Incidence::Directed {
                outgoing: IndexSet::new(),
                incoming: IndexSet::new(),
            },
        }
    }
}

/// A node in the graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node
    id: NodeId,

    /// Attributes associated with this node
    attributes: AttributeMap,

    /// Relations touching this node
    incidence: Incidence,
}

impl Node {
    /// Create a node of the given kind
    pub fn new(id: impl Into<NodeId>, kind: GraphKind) -> Self {
        Node {
            id: id.into(),
            attributes: AttributeMap::new(),
            incidence: Incidence::new(kind),
        }
    }

    /// Create an undirected node
    pub fn undirected(id: impl Into<NodeId>) -> Self {
        Self::new(id, GraphKind::Undirected)
    }

    /// Create a directed node
    pub fn directed(id: impl Into<NodeId>) -> Self {
        Self::new(id, GraphKind::Directed)
    }

    /// Create a node with attributes
    pub fn new_with_attributes(
        id: impl Into<NodeId>,
        kind: GraphKind,
        attributes: AttributeMap,
    ) -> Self {
        Node {
            id: id.into(),
            attributes,
            incidence: Incidence::new(kind),
        }
    }

    pub fn kind(&self) -> GraphKind {
        match self.incidence {
            Incidence::Undirected { .. } => GraphKind::Undirected,
            Incidence::Directed { .. } => GraphKind::Directed,
        }
    }

    pub fn incidence(&self) -> &Incidence {
        &self.incidence
    }

    /// Index `relation` on this node. Idempotent.
    ///
    /// On a directed node the relation lands in the outgoing set when this
    /// node is its first endpoint and in the incoming set when it is the
    /// second; a self-loop lands in both. Returns true if anything changed.
    /// Only the store calls this, so incidence entries always name stored
    /// relations.
    pub(crate) fn add_relation(&mut self, relation: &Relation) -> bool {
        let rel_id = relation.id();
        match &mut self.incidence {
            Incidence::Undirected { relations } => relations.insert(rel_id.clone()),
            Incidence::Directed { outgoing, incoming } => {
                let mut changed = false;
                if relation.endpoints().first() == &self.id {
                    changed |= outgoing.insert(rel_id.clone());
                }
                if relation.endpoints().second() == &self.id {
                    changed |= incoming.insert(rel_id.clone());
                }
                changed
            }
        }
    }

    /// Drop `relation_id` from every incidence set. Returns true if it was present.
    pub(crate) fn remove_relation(&mut self, relation_id: &RelationId) -> bool {
        match &mut self.incidence {
            Incidence::Undirected { relations } => relations.shift_remove(relation_id),
            Incidence::Directed { outgoing, incoming } => {
                let out = outgoing.shift_remove(relation_id);
                let inc = incoming.shift_remove(relation_id);
                out || inc
            }
        }
    }

    /// Snapshot of every incident relation ID.
    ///
    /// Directed nodes list outgoing relations before incoming ones.
    pub fn all_relations(&self) -> IndexSet<RelationId> {
        match &self.incidence {
            Incidence::Undirected { relations } => relations.clone(),
            Incidence::Directed { outgoing, incoming } => {
                outgoing.iter().chain(incoming.iter()).cloned().collect()
            }
        }
    }

    /// Outgoing relations; `None` on an undirected node
    pub fn outgoing_relations(&self) -> Option<&IndexSet<RelationId>> {
        match &self.incidence {
            Incidence::Directed { outgoing, .. } => Some(outgoing),
            Incidence::Undirected { .. } => None,
        }
    }

    /// Incoming relations; `None` on an undirected node
    pub fn incoming_relations(&self) -> Option<&IndexSet<RelationId>> {
        match &self.incidence {
            Incidence::Directed { incoming, .. } => Some(incoming),
            Incidence::Undirected { .. } => None,
        }
    }

    /// Relations a traversal may leave this node through: all of them when
    /// undirected, only the outgoing ones when directed.
    pub fn traversable_relations(&self) -> &IndexSet<RelationId> {
        match &self.incidence {
            Incidence::Undirected { relations } => relations,
            Incidence::Directed { outgoing, .. } => outgoing,
        }
    }

    pub fn is_incident_to(&self, relation_id: &RelationId) -> bool {
        match &self.incidence {
            Incidence::Undirected { relations } => relations.contains(relation_id),
            Incidence::Directed { outgoing, incoming } => {
                outgoing.contains(relation_id) || incoming.contains(relation_id)
            }
        }
    }

    /// Number of distinct incident relations
    pub fn degree(&self) -> usize {
        match &self.incidence {
            Incidence::Undirected { relations } => relations.len(),
            Incidence::Directed { outgoing, incoming } => {
                outgoing.len() + incoming.iter().filter(|r| !outgoing.contains(*r)).count()
            }
        }
    }
}

impl Attributed for Node {
    type Id = NodeId;

    fn id(&self) -> &NodeId {
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

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
