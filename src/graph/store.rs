//! In-memory graph container
//!
//! The store is the sole owner of every node and relation. Nodes index
//! their incident relations by ID and relations name their endpoints by ID,
//! so all cross-references resolve through here. Registration and removal
//! are the only places those references are created or torn down.

use super::attribute::{AttributeValue, Attributed};
use super::node::Node;
use super::relation::Relation;
use super::types::{GraphKind, NodeId, RelationId};
use crate::algo::DepthFirstTraversal;
use crate::config::{GraphConfig, IdStrategy};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("Relation {0} already exists")]
    DuplicateRelation(RelationId),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Relation {0} not found")]
    RelationNotFound(RelationId),
}

/// Coarse classification of [`GraphError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    DuplicateId,
    NotFound,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GraphError::DuplicateNode(_) | GraphError::DuplicateRelation(_) => {
                ErrorKind::DuplicateId
            }
            GraphError::NodeNotFound(_) | GraphError::RelationNotFound(_) => ErrorKind::NotFound,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Summary counts over a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub relation_count: usize,
    pub self_loop_count: usize,
    pub isolated_node_count: usize,
}

/// In-memory graph storage
///
/// Uses insertion-ordered hash maps:
/// - nodes: NodeId -> Node
/// - relations: RelationId -> Relation
///
/// Invariants:
/// - every stored relation has both endpoints in `nodes`
/// - every incidence entry of every node names a stored relation
#[derive(Debug)]
pub struct GraphStore {
    config: GraphConfig,

    nodes: IndexMap<NodeId, Node>,

    relations: IndexMap<RelationId, Relation>,

    /// Next sequential node ID suffix
    next_node_seq: u64,

    /// Next sequential relation ID suffix
    next_relation_seq: u64,
}

impl GraphStore {
    /// Create a new empty undirected graph store
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new empty directed graph store
    pub fn directed() -> Self {
        Self::with_config(GraphConfig::directed())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        GraphStore {
            config,
            nodes: IndexMap::new(),
            relations: IndexMap::new(),
            next_node_seq: 1,
            next_relation_seq: 1,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn kind(&self) -> GraphKind {
        self.config.kind
    }

    /// Create and register a node, generating an ID when `id` is `None`
    pub fn create_node(&mut self, id: Option<&str>) -> GraphResult<NodeId> {
        let id = match id {
            Some(id) => NodeId::new(id),
            None => self.generate_node_id(),
        };
        self.add_node(Node::new(id, self.kind()))
    }

    /// Create and register a relation between two registered nodes.
    ///
    /// A missing endpoint is an [`GraphError::InvalidArgument`]; the ID is
    /// generated when `id` is `None`.
    pub fn create_relation(
        &mut self,
        id: Option<&str>,
        node1: Option<&NodeId>,
        node2: Option<&NodeId>,
    ) -> GraphResult<RelationId> {
        let id = match id {
            Some(id) => RelationId::new(id),
            None => self.generate_relation_id(),
        };
        let relation = Relation::try_new(self.kind(), id, node1.cloned(), node2.cloned())?;
        self.add_relation(relation)
    }

    /// Create a relation with a generated ID
    pub fn connect(&mut self, node1: &NodeId, node2: &NodeId) -> GraphResult<RelationId> {
        self.create_relation(None, Some(node1), Some(node2))
    }

    /// Register a standalone node
    ///
    /// The node must match the store's kind and must not index any
    /// relations yet; relations are attached by [`GraphStore::add_relation`].
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if node.kind() != self.kind() {
            return Err(GraphError::InvalidArgument(format!(
                "{} node {} cannot join a {} graph",
                node.kind(),
                node.id(),
                self.kind()
            )));
        }
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        if node.degree() > 0 {
            return Err(GraphError::InvalidArgument(format!(
                "node {} already indexes relations outside this graph",
                node.id()
            )));
        }

        let id = node.id().clone();
        debug!("Added node {}", id);
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Register a standalone relation and index it on both endpoints
    pub fn add_relation(&mut self, relation: Relation) -> GraphResult<RelationId> {
        if relation.kind() != self.kind() {
            return Err(GraphError::InvalidArgument(format!(
                "{} relation {} cannot join a {} graph",
                relation.kind(),
                relation.id(),
                self.kind()
            )));
        }
        if self.relations.contains_key(relation.id()) {
            return Err(GraphError::DuplicateRelation(relation.id().clone()));
        }
        for endpoint in [relation.endpoints().first(), relation.endpoints().second()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }

        for endpoint in relation.connected_node_ids() {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.add_relation(&relation);
            }
        }

        let id = relation.id().clone();
        debug!(
            "Added relation {} ({} -> {})",
            id,
            relation.endpoints().first(),
            relation.endpoints().second()
        );
        self.relations.insert(id.clone(), relation);
        Ok(id)
    }

    /// Remove a node and every relation incident to it
    pub fn remove_node(&mut self, id: &NodeId) -> GraphResult<Node> {
        let incident = self
            .nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?
            .all_relations();

        for relation_id in &incident {
            if self.relations.contains_key(relation_id) {
                self.remove_relation(relation_id)?;
            }
        }

        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        debug!("Removed node {} and {} incident relations", id, incident.len());
        Ok(node)
    }

    /// Remove a relation, detaching it from both endpoints first
    pub fn remove_relation(&mut self, id: &RelationId) -> GraphResult<Relation> {
        let relation = self
            .relations
            .shift_remove(id)
            .ok_or_else(|| GraphError::RelationNotFound(id.clone()))?;

        for endpoint in relation.connected_node_ids() {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.remove_relation(id);
            }
        }

        debug!("Removed relation {}", id);
        Ok(relation)
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> GraphResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Get a mutable node by ID, for attribute updates
    pub fn get_node_mut(&mut self, id: &NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Get a relation by ID
    pub fn get_relation(&self, id: &RelationId) -> GraphResult<&Relation> {
        self.relations
            .get(id)
            .ok_or_else(|| GraphError::RelationNotFound(id.clone()))
    }

    /// Get a mutable relation by ID, for attribute updates
    pub fn get_relation_mut(&mut self, id: &RelationId) -> GraphResult<&mut Relation> {
        self.relations
            .get_mut(id)
            .ok_or_else(|| GraphError::RelationNotFound(id.clone()))
    }

    /// Set a node attribute, returning the value it replaced
    pub fn set_node_attribute(
        &mut self,
        id: &NodeId,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> GraphResult<Option<AttributeValue>> {
        Ok(self.get_node_mut(id)?.set_attribute(key, value))
    }

    /// Set a relation attribute, returning the value it replaced
    pub fn set_relation_attribute(
        &mut self,
        id: &RelationId,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> GraphResult<Option<AttributeValue>> {
        Ok(self.get_relation_mut(id)?.set_attribute(key, value))
    }

    /// Remove a node attribute, returning its value
    pub fn remove_node_attribute(
        &mut self,
        id: &NodeId,
        key: &str,
    ) -> GraphResult<Option<AttributeValue>> {
        Ok(self.get_node_mut(id)?.remove_attribute(key))
    }

    /// Remove a relation attribute, returning its value
    pub fn remove_relation_attribute(
        &mut self,
        id: &RelationId,
        key: &str,
    ) -> GraphResult<Option<AttributeValue>> {
        Ok(self.get_relation_mut(id)?.remove_attribute(key))
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn has_relation(&self, id: &RelationId) -> bool {
        self.relations.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All relations in insertion order
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// Every relation incident to a node, in incidence order
    pub fn relations_of(&self, id: &NodeId) -> GraphResult<Vec<&Relation>> {
        let node = self.get_node(id)?;
        Ok(node
            .all_relations()
            .iter()
            .filter_map(|rel_id| self.relations.get(rel_id))
            .collect())
    }

    /// The nodes a relation connects, first endpoint first.
    ///
    /// A self-loop yields a single node.
    pub fn connected_nodes(&self, id: &RelationId) -> GraphResult<Vec<&Node>> {
        let relation = self.get_relation(id)?;
        relation
            .connected_node_ids()
            .iter()
            .map(|node_id| self.get_node(node_id))
            .collect()
    }

    /// Nodes reachable in one step over the node's traversable relations
    pub fn neighbors(&self, id: &NodeId) -> GraphResult<Vec<&Node>> {
        let node = self.get_node(id)?;
        let mut seen: IndexSet<&NodeId> = IndexSet::new();
        for rel_id in node.traversable_relations() {
            if let Some(other) = self
                .relations
                .get(rel_id)
                .and_then(|rel| rel.other_endpoint(id))
            {
                if other != id {
                    seen.insert(other);
                }
            }
        }
        Ok(seen
            .into_iter()
            .filter_map(|other| self.nodes.get(other))
            .collect())
    }

    /// Depth-first traversal from `start`, computed eagerly.
    ///
    /// The start node must be registered in this store.
    pub fn traverse(&self, start: &NodeId) -> GraphResult<DepthFirstTraversal<'_>> {
        DepthFirstTraversal::new(self, start)
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.nodes.len(),
            relation_count: self.relations.len(),
            self_loop_count: self.relations.values().filter(|r| r.is_self_loop()).count(),
            isolated_node_count: self.nodes.values().filter(|n| n.degree() == 0).count(),
        }
    }

    /// Remove everything. Sequential ID counters keep counting.
    pub fn clear(&mut self) {
        self.relations.clear();
        self.nodes.clear();
    }

    fn generate_node_id(&mut self) -> NodeId {
        loop {
            let candidate = match &self.config.id_strategy {
                IdStrategy::Uuid => NodeId::new(uuid::Uuid::new_v4().to_string()),
                IdStrategy::Sequential { node_prefix, .. } => {
                    let id = NodeId::new(format!("{}{}", node_prefix, self.next_node_seq));
                    self.next_node_seq += 1;
                    id
                }
            };
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn generate_relation_id(&mut self) -> RelationId {
        loop {
            let candidate = match &self.config.id_strategy {
                IdStrategy::Uuid => RelationId::new(uuid::Uuid::new_v4().to_string()),
                IdStrategy::Sequential {
                    relation_prefix, ..
                } => {
                    let id =
                        RelationId::new(format!("{}{}", relation_prefix, self.next_relation_seq));
                    self.next_relation_seq += 1;
                    id
                }
            };
            if !self.relations.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
