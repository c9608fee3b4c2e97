//! Node module for phylogenetic tree representation.

use crate::color::Rgb;
use crate::model::sequence::{Annotation, Sequence};
use crate::model::taxonomy::Taxonomy;
use std::collections::BTreeSet;
use std::ops::Deref;

/// Index of a node in a [NodeArena](crate::model::NodeArena).
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a phylogenetic tree, stored in a [NodeArena](crate::model::NodeArena).
///
/// Structure (index, parent, ordered children) is managed by the arena;
/// everything describing the node itself lives in [NodeData].
///
/// # Invariants
/// - `index` is the position of this node in its arena
/// - `children` keeps insertion order; a node appears as child of at most
///   one parent within the arena, except for roots of extracted subtrees,
///   which share the children of the node they were extracted at
/// - `collapse` defaults to `false`
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of this node in the arena
    pub(crate) index: NodeIndex,
    /// Index of the parent; `None` for roots
    pub(crate) parent: Option<NodeIndex>,
    /// Ordered indices of the children
    pub(crate) children: Vec<NodeIndex>,
    /// Data of this node
    pub(crate) data: NodeData,
    /// Whether consumers should treat the subtree as a single unit
    pub(crate) collapse: bool,
}

impl Node {
    pub(crate) fn new(index: NodeIndex, data: NodeData) -> Self {
        Node {
            index,
            parent: None,
            children: Vec::new(),
            data,
            collapse: false,
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the index of the parent as stored in the arena, `None` for roots.
    ///
    /// For children shared with an extracted subtree this is the parent in
    /// the source tree; use [`Phylogeny::parent_of()`](crate::model::Phylogeny::parent_of)
    /// for the parent within a particular tree.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the ordered child indices.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children (external node).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has children.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the node data.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns the node data mutably.
    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    /// Returns the collapse flag.
    pub fn is_collapse(&self) -> bool {
        self.collapse
    }

    /// Sets the collapse flag of this node only.
    pub fn set_collapse(&mut self, collapse: bool) {
        self.collapse = collapse;
    }

    /// Returns the taxonomy, if any.
    pub fn taxonomy(&self) -> Option<&Taxonomy> {
        self.data.taxonomy.as_ref()
    }

    /// Returns the taxonomy if present and not [empty](Taxonomy::is_empty).
    pub fn non_empty_taxonomy(&self) -> Option<&Taxonomy> {
        self.data.taxonomy.as_ref().filter(|t| !t.is_empty())
    }

    /// Returns the branch color, `None` if unset.
    pub fn branch_color(&self) -> Option<Rgb> {
        self.data.branch_color
    }

    /// Sets (or with `None` clears) the branch color of this node only.
    pub fn set_branch_color(&mut self, color: Option<Rgb>) {
        self.data.branch_color = color;
    }

    /// Returns the value of the first confidence, if any.
    pub fn confidence(&self) -> Option<f64> {
        self.data.confidences.first().map(|c| c.value)
    }
}

// =#========================================================================#=
// NODE DATA
// =#========================================================================#=
/// Data fields of a [Node], independent of tree structure.
///
/// Extracting a subtree copies exactly this struct for the new root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    /// Node name; empty if absent
    pub name: String,
    /// Taxonomy of this node
    pub taxonomy: Option<Taxonomy>,
    /// Sequence of this node
    pub sequence: Option<Sequence>,
    /// String annotations, ordered
    pub annotations: BTreeSet<Annotation>,
    /// Distance to parent
    pub distance_to_parent: Option<BranchLength>,
    /// Confidence values of the branch to the parent; the first is used for coloring
    pub confidences: Vec<Confidence>,
    /// Branch color; `None` means unset / inherit
    pub branch_color: Option<Rgb>,
}

impl NodeData {
    /// Creates data carrying only a name.
    pub fn named<S: Into<String>>(name: S) -> Self {
        NodeData {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attaches a taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Attaches a sequence.
    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Adds an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    /// Attaches the distance to the parent.
    pub fn with_distance(mut self, distance: BranchLength) -> Self {
        self.distance_to_parent = Some(distance);
        self
    }

    /// Adds a confidence value.
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidences.push(confidence);
        self
    }

    /// Attaches a branch color.
    pub fn with_branch_color(mut self, color: Rgb) -> Self {
        self.branch_color = Some(color);
        self
    }
}

// =#========================================================================#=
// CONFIDENCE
// =#========================================================================#=
/// Support value of a branch (or of a whole tree), e.g. a bootstrap value.
#[derive(Debug, Clone, PartialEq)]
pub struct Confidence {
    /// The support value
    pub value: f64,
    /// Kind of support, e.g. `"bootstrap"`; may be empty
    pub kind: String,
}

impl Confidence {
    /// Creates a confidence of the given kind.
    pub fn new<S: Into<String>>(value: f64, kind: S) -> Self {
        Confidence {
            value,
            kind: kind.into(),
        }
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Confidence::new(value, "")
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a node and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
