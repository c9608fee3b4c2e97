//! Provides the tree representation the engine operates on.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [NodeArena] - Arena of [Node]s, referenced by [NodeIndex]
//! * [Phylogeny] - A rooted tree over a (possibly shared) arena plus
//!   tree-level [TreeMetadata]
//! * [PreOrderIter] and [PostOrderIter] - Explicit, deterministic traversals
//!
//! # Sharing
//! The arena of a [Phylogeny] sits behind an `Arc<RwLock<_>>`. Trees created
//! by [extract_subtree](crate::extract::extract_subtree) reuse the arena of
//! their source, so mutations of shared nodes are visible in both trees.
//! [`Phylogeny::deep_copy()`] produces an isolated tree.

use crate::error::AnnotationError;
use crate::model::node::{Confidence, Node, NodeData, NodeIndex};
use crate::model::taxonomy::Identifier;
use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::collections::HashMap;
use std::sync::Arc;

// =#========================================================================#=
// NODE ARENA
// =#========================================================================#=
/// Contiguous storage of [Node]s (arena pattern).
///
/// Nodes are referenced by [NodeIndex] only, never by pointer. An arena may
/// contain several roots: the root of its original tree and the roots of
/// subtrees extracted from it.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes stored, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node is stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`, or `None` if out of bounds.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns an iterator over the subtree at `start` in pre-order
    /// (parents before children, children in stored order).
    pub fn pre_order(&self, start: NodeIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, start)
    }

    /// Returns an iterator over the subtree at `start` in post-order
    /// (children before parents, children in stored order).
    pub fn post_order(&self, start: NodeIndex) -> PostOrderIter<'_> {
        PostOrderIter::new(self, start)
    }

    /// Returns all descendants of `start` in pre-order, excluding `start`.
    pub fn descendants(&self, start: NodeIndex) -> impl Iterator<Item = &Node> {
        self.pre_order(start).skip(1)
    }

    /// Returns the external (leaf) descendants of `start` in pre-order.
    ///
    /// A leaf is its own single external descendant.
    pub fn external_descendants(&self, start: NodeIndex) -> impl Iterator<Item = &Node> {
        self.pre_order(start).filter(|node| node.is_leaf())
    }

    /// Pushes a new parentless, childless node and returns its index.
    pub(crate) fn push(&mut self, data: NodeData) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, data));
        index
    }

    /// Checks that `children` may become the children of a new node:
    /// all exist, none has a parent yet, none is listed twice.
    fn check_new_children(&self, children: &[NodeIndex]) -> Result<(), AnnotationError> {
        for (i, &child) in children.iter().enumerate() {
            let node = self.get(child).ok_or(AnnotationError::UnknownNode(child))?;
            if node.parent.is_some() || children[..i].contains(&child) {
                return Err(AnnotationError::MalformedTree(child));
            }
        }
        Ok(())
    }

    /// Pushes a new node with `children`, setting their parent.
    fn push_with_children(
        &mut self,
        children: Vec<NodeIndex>,
        data: NodeData,
    ) -> Result<NodeIndex, AnnotationError> {
        self.check_new_children(&children)?;

        let index = self.push(data);
        for &child in &children {
            self.nodes[child].parent = Some(index);
        }
        self.nodes[index].children = children;

        Ok(index)
    }
}

impl std::ops::Index<NodeIndex> for NodeArena {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeIndex> for NodeArena {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// =#========================================================================#=
// TREE METADATA
// =#========================================================================#=
/// Tree-level data, copied verbatim when a subtree is extracted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeMetadata {
    /// Name of the tree
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Type of tree, e.g. `"gene tree"`
    pub tree_type: Option<String>,
    /// Unit of branch lengths
    pub distance_unit: Option<String>,
    /// Support of the tree as a whole
    pub confidence: Option<Confidence>,
    /// Identifier of the tree
    pub identifier: Option<Identifier>,
}

// =#========================================================================#=
// PHYLOGENY
// =#========================================================================#=
/// A rooted phylogenetic tree over a [NodeArena].
///
/// # Construction
/// Build bottom-up: add leaves, then internal nodes referring to their
/// children, finally the root. Children keep the order they are given in.
///
/// # Example
/// ```
/// use cladetint::model::{NodeData, Phylogeny};
///
/// let mut tree = Phylogeny::new();
/// let kea = tree.add_leaf(NodeData::named("Kea"));
/// let kaka = tree.add_leaf(NodeData::named("Kaka"));
/// let kakapo = tree.add_leaf(NodeData::named("Kakapo"));
/// let nestor = tree.add_internal_node(vec![kea, kaka], NodeData::named("Nestor"))?;
/// let root = tree.add_root(vec![nestor, kakapo], NodeData::default())?;
///
/// assert_eq!(tree.validate()?, root);
/// assert_eq!(tree.pre_order(), vec![root, nestor, kea, kaka, kakapo]);
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
///
/// # Aliasing
/// Trees do not implement [Clone]: a plain copy would silently share nodes.
/// Use [`Phylogeny::deep_copy()`] for an isolated copy, or
/// [extract_subtree](crate::extract::extract_subtree) for a deliberately
/// shared view.
///
/// Every extraction pushes its new root into the shared arena. Those roots
/// are never reclaimed, so the source's [`Phylogeny::nodes()`] grows by one
/// node per extraction for as long as any sharing tree is alive. Extract
/// from a [`Phylogeny::deep_copy()`] to keep the source arena untouched.
#[derive(Debug)]
pub struct Phylogeny {
    pub(crate) nodes: Arc<RwLock<NodeArena>>,
    pub(crate) root: Option<NodeIndex>,
    pub(crate) metadata: TreeMetadata,
    pub(crate) rooted: bool,
    pub(crate) rerootable: bool,
}

impl Default for Phylogeny {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Construction, Getters / Accessors (pub)
// ============================================================================
impl Phylogeny {
    /// Creates a new tree with an empty, unshared arena and no root.
    pub fn new() -> Self {
        Phylogeny {
            nodes: Arc::new(RwLock::new(NodeArena::new())),
            root: None,
            metadata: TreeMetadata::default(),
            rooted: false,
            rerootable: true,
        }
    }

    /// Attaches tree-level metadata.
    pub fn with_metadata(mut self, metadata: TreeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attaches a name to this tree.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    /// Adds a leaf, returning its index.
    pub fn add_leaf(&mut self, data: NodeData) -> NodeIndex {
        self.nodes.write().push(data)
    }

    /// Adds an internal node with the given ordered children, returning its index.
    ///
    /// # Errors
    /// * [AnnotationError::InvalidArgument] if `children` is empty
    /// * [AnnotationError::UnknownNode] if a child does not exist
    /// * [AnnotationError::MalformedTree] if a child already has a parent
    ///   or is listed twice
    pub fn add_internal_node(
        &mut self,
        children: Vec<NodeIndex>,
        data: NodeData,
    ) -> Result<NodeIndex, AnnotationError> {
        if children.is_empty() {
            return Err(AnnotationError::invalid_argument(
                "internal node needs at least one child",
            ));
        }
        self.nodes.write().push_with_children(children, data)
    }

    /// Adds the root with the given ordered children (possibly none, for a
    /// single-node tree) and makes it the root of this tree.
    ///
    /// # Errors
    /// Same as [`Phylogeny::add_internal_node()`], except that empty
    /// `children` are allowed.
    pub fn add_root(
        &mut self,
        children: Vec<NodeIndex>,
        data: NodeData,
    ) -> Result<NodeIndex, AnnotationError> {
        let index = self.nodes.write().push_with_children(children, data)?;
        self.root = Some(index);
        Ok(index)
    }

    /// Returns the index of the root, or `None` if not set yet.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Validates the structure reachable from the root and returns the root index.
    ///
    /// Checks:
    /// - Root is set and exists in the arena
    /// - All child indices exist in the arena
    /// - No node is reachable twice (which also rules out cycles)
    ///
    /// # Errors
    /// [AnnotationError::MissingRoot], [AnnotationError::UnknownNode] or
    /// [AnnotationError::MalformedTree] respectively.
    pub fn validate(&self) -> Result<NodeIndex, AnnotationError> {
        let root = self.root.ok_or(AnnotationError::MissingRoot)?;
        let nodes = self.nodes.read();
        if root >= nodes.len() {
            return Err(AnnotationError::UnknownNode(root));
        }

        let mut seen = vec![false; nodes.len()];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if seen[index] {
                return Err(AnnotationError::MalformedTree(index));
            }
            seen[index] = true;

            for &child in nodes[index].children() {
                if child >= nodes.len() {
                    return Err(AnnotationError::UnknownNode(child));
                }
                stack.push(child);
            }
        }

        Ok(root)
    }

    /// Returns the tree-level metadata.
    pub fn metadata(&self) -> &TreeMetadata {
        &self.metadata
    }

    /// Returns the tree-level metadata mutably.
    pub fn metadata_mut(&mut self) -> &mut TreeMetadata {
        &mut self.metadata
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Returns whether this tree is explicitly rooted.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Sets whether this tree is explicitly rooted.
    pub fn set_rooted(&mut self, rooted: bool) {
        self.rooted = rooted;
    }

    /// Returns whether re-rooting this tree is safe; `false` after subtrees
    /// were collapsed by taxonomy.
    pub fn is_rerootable(&self) -> bool {
        self.rerootable
    }

    /// Sets whether re-rooting this tree is safe.
    pub fn set_rerootable(&mut self, rerootable: bool) {
        self.rerootable = rerootable;
    }

    /// Locks the arena for reading.
    ///
    /// Do not hold the guard while calling a mutating method of this or any
    /// tree sharing the arena; the lock is not reentrant.
    pub fn nodes(&self) -> RwLockReadGuard<'_, NodeArena> {
        self.nodes.read()
    }

    /// Locks the arena for writing.
    pub fn nodes_mut(&mut self) -> RwLockWriteGuard<'_, NodeArena> {
        self.nodes.write()
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> MappedRwLockReadGuard<'_, Node> {
        RwLockReadGuard::map(self.nodes.read(), |nodes| &nodes[index])
    }

    /// Returns the node at `index` mutably.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> MappedRwLockWriteGuard<'_, Node> {
        RwLockWriteGuard::map(self.nodes.write(), |nodes| &mut nodes[index])
    }

    /// Returns the parent of `index` within this tree.
    ///
    /// Differs from [`Node::parent()`] only for the children of an extracted
    /// subtree's root: within the extracted tree their parent is that root.
    pub fn parent_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        let root = self.root?;
        if index == root {
            return None;
        }

        let nodes = self.nodes.read();
        if nodes.get(root)?.children().contains(&index) {
            Some(root)
        } else {
            nodes.get(index)?.parent()
        }
    }

    /// Returns the node indices in pre-order; empty if no root is set.
    pub fn pre_order(&self) -> Vec<NodeIndex> {
        match self.root {
            Some(root) => self.nodes.read().pre_order(root).map(Node::index).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the node indices in post-order; empty if no root is set.
    pub fn post_order(&self) -> Vec<NodeIndex> {
        match self.root {
            Some(root) => self.nodes.read().post_order(root).map(Node::index).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the indices of the external descendants of `index` in pre-order.
    pub fn external_descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.nodes
            .read()
            .external_descendants(index)
            .map(Node::index)
            .collect()
    }

    /// Returns the number of nodes reachable from the root.
    pub fn num_nodes(&self) -> usize {
        self.pre_order().len()
    }

    /// Returns the number of leaves reachable from the root.
    pub fn num_external_nodes(&self) -> usize {
        match self.root {
            Some(root) => self.nodes.read().external_descendants(root).count(),
            None => 0,
        }
    }

    /// Returns `true` if this tree and `other` operate on the same arena,
    /// i.e. mutations of shared nodes are visible in both.
    pub fn shares_nodes_with(&self, other: &Phylogeny) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Creates an isolated copy with its own arena.
    ///
    /// Only nodes reachable from the root are copied; indices are renumbered
    /// in pre-order, so the root of the copy has index 0.
    ///
    /// # Errors
    /// Errors of [`Phylogeny::validate()`].
    pub fn deep_copy(&self) -> Result<Phylogeny, AnnotationError> {
        let root = self.validate()?;
        let nodes = self.nodes.read();

        let order: Vec<NodeIndex> = nodes.pre_order(root).map(Node::index).collect();
        let renumbered: HashMap<NodeIndex, NodeIndex> = order
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();

        let mut arena = NodeArena::with_capacity(order.len());
        for &old in &order {
            let source = &nodes[old];
            let index = arena.push(source.data.clone());
            arena[index].collapse = source.collapse;
            arena[index].children = source.children.iter().map(|c| renumbered[c]).collect();
        }
        for index in 0..arena.len() {
            for child in arena[index].children.clone() {
                arena[child].parent = Some(index);
            }
        }

        Ok(Phylogeny {
            nodes: Arc::new(RwLock::new(arena)),
            root: Some(0),
            metadata: self.metadata.clone(),
            rooted: self.rooted,
            rerootable: self.rerootable,
        })
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl Phylogeny {
    /// Returns a visual representation of the tree, showing names,
    /// taxonomies, branch colors and collapse flags.
    ///
    /// # Example Output
    /// ```text
    /// [4] (collapsed)
    ///   ├─ [2] Nestor #4a3c8c
    ///   │   ├─ [0] Kea {Nestor notabilis} #4a3c8c
    ///   │   └─ [1] Kaka {Nestor meridionalis} #4a3c8c
    ///   └─ [3] Kakapo {Strigops habroptilus}
    /// ```
    pub fn to_ascii(&self) -> String {
        let Some(root) = self.root else {
            return String::from("(No root set)\n");
        };

        let nodes = self.nodes.read();
        let mut out = String::new();
        Self::write_node(&nodes, root, "", true, &mut out);
        out
    }

    /// Helper function to recursively write a node and its children.
    fn write_node(nodes: &NodeArena, index: NodeIndex, prefix: &str, is_last: bool, out: &mut String) {
        let node = &nodes[index];

        let connector = if prefix.is_empty() {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };

        let mut line = format!("{}{}[{}]", prefix, connector, index);
        if !node.data.name.is_empty() {
            line.push(' ');
            line.push_str(&node.data.name);
        }
        if let Some(taxonomy) = node.non_empty_taxonomy() {
            let label = [taxonomy.scientific_name(), taxonomy.code(), taxonomy.common_name()]
                .into_iter()
                .find(|s| !s.is_empty())
                .unwrap_or("?");
            line.push_str(&format!(" {{{}}}", label));
        }
        if let Some(color) = node.branch_color() {
            line.push_str(&format!(" {}", color));
        }
        if node.collapse {
            line.push_str(" (collapsed)");
        }
        out.push_str(&line);
        out.push('\n');

        let new_prefix = if prefix.is_empty() {
            "  ".to_string()
        } else {
            format!("{}{}   ", prefix, if is_last { " " } else { "│" })
        };
        let num_children = node.children.len();
        for (i, &child) in node.children.iter().enumerate() {
            Self::write_node(nodes, child, &new_prefix, i + 1 == num_children, out);
        }
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all its descendants have been visited; siblings
/// are visited in stored order.
pub struct PostOrderIter<'a> {
    arena: &'a NodeArena,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(arena: &'a NodeArena, start: NodeIndex) -> Self {
        let mut stack = Vec::new();
        if start < arena.len() {
            stack.push((start, false));
        }
        PostOrderIter { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.arena[index];

            if children_visited || node.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(node);
            } else {
                // Mark this node as "children will be visited"
                self.stack.push((index, true));

                // Push children in reverse, so the first child is processed first
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants; siblings are visited
/// in stored order.
pub struct PreOrderIter<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(arena: &'a NodeArena, start: NodeIndex) -> Self {
        let mut stack = Vec::new();
        if start < arena.len() {
            stack.push(start);
        }
        PreOrderIter { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.arena[index];

        // Push children in reverse, so the first child is processed first
        self.stack.extend(node.children.iter().rev());

        Some(node)
    }
}
