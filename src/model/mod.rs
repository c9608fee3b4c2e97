//! Data model of phylogenetic trees as consumed by the annotation engine.
//!
//! Trees are built bottom-up into an arena ([NodeArena]) and wrapped in a
//! [Phylogeny]. Nodes carry optional [Taxonomy], [Sequence], confidences,
//! annotations, a branch color and a collapse flag.

/// Tree nodes and their data
pub mod node;
/// Sequence data and annotations
pub mod sequence;
/// Taxonomy data and its value equality
pub mod taxonomy;
/// Arena, tree and traversal
pub mod tree;

pub use node::{BranchLength, Confidence, Node, NodeData, NodeIndex};
pub use sequence::{Accession, Annotation, Sequence};
pub use taxonomy::{Identifier, Taxonomy, TaxonomyKey};
pub use tree::{NodeArena, Phylogeny, PostOrderIter, PreOrderIter, TreeMetadata};
