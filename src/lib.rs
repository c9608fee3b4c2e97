//! Cladetint is a library to annotate phylogenetic trees based on the
//! taxonomy of their leaves.
//!
//! The engine traverses a tree and derives two kinds of annotations:
//! - Collapsing: subtrees whose external descendants all share one taxonomy
//!   get flagged as collapsed (see [crate::collapse]).
//! - Branch colors (see [crate::colorize]):
//!   - by confidence, interpolated between two [Palette](crate::color::Palette) colors
//!   - by external taxonomy, one deterministic color per shared taxonomy
//!   - by taxonomic rank, resolving lineage labels through a
//!     [TaxonomyResolver](crate::lineage::TaxonomyResolver) behind a
//!     process-wide [LineageRankCache](crate::lineage::LineageRankCache)
//!
//! Further functionality:
//! - Tree model: arena of nodes referenced by index, built bottom-up, with
//!   explicit pre-/post-order traversal. See [crate::model].
//! - Subtree extraction as a view sharing nodes with its source, or
//!   isolated via deep copy. See [crate::extract].
//! - Display text for node data over external descendants, annotations and
//!   FASTA records. See [crate::format].
//!
//! Limitations:
//! - No parsing or writing of tree files; trees are built through the API
//! - No rendering; colors and flags are annotations for the caller to draw
//!
//! # Concurrency
//! Operations run synchronously on the calling thread and mutate the tree in
//! place. Rank coloring may block on the resolver, so callers with a UI
//! thread should run it on a worker; trees and the cache are `Send + Sync`.
//! Do not run two operations on trees sharing an arena at the same time
//! without coordinating them.
//!
//! # Logging
//! Passes report through [tracing]; install a subscriber to see them.
//!
//! # Example
//! ```
//! use cladetint::color::{Palette, TaxonomyColorer};
//! use cladetint::model::{NodeData, Phylogeny, Taxonomy};
//!
//! let kiwi = |name: &str| NodeData::named(name)
//!     .with_taxonomy(Taxonomy::from_scientific_name("Apteryx mantelli"));
//! let mut tree = Phylogeny::new();
//! let a = tree.add_leaf(kiwi("North Island brown kiwi 1"));
//! let b = tree.add_leaf(kiwi("North Island brown kiwi 2"));
//! let kakapo = tree.add_leaf(NodeData::named("Kakapo")
//!     .with_taxonomy(Taxonomy::from_scientific_name("Strigops habroptilus")));
//! let kiwis = tree.add_internal_node(vec![a, b], NodeData::default())?;
//! let root = tree.add_root(vec![kiwis, kakapo], NodeData::default())?;
//!
//! assert_eq!(cladetint::collapse_uniform_subtrees(&mut tree)?, 1);
//! assert!(tree.node(kiwis).is_collapse());
//! assert!(!tree.node(root).is_collapse());
//!
//! let mut colorer = TaxonomyColorer::new(Palette::default());
//! cladetint::color_by_external_taxonomy(&mut tree, &mut colorer)?;
//! assert_eq!(tree.node(a).branch_color(), tree.node(kiwis).branch_color());
//! assert_eq!(tree.node(root).branch_color(), None);
//! # Ok::<(), cladetint::AnnotationError>(())
//! ```

pub mod aggregate;
pub mod collapse;
pub mod color;
pub mod colorize;
pub mod error;
pub mod extract;
pub mod format;
pub mod lineage;
pub mod model;

pub use crate::aggregate::{common_external_taxonomy, distinct_taxonomies};
pub use crate::collapse::{collapse_uniform_subtrees, set_subtree_collapse};
pub use crate::colorize::{
    RankColoring, RankColorizer, clear_branch_colors, color_by_confidence,
    color_by_external_taxonomy, colorize_subtree,
};
pub use crate::error::AnnotationError;
pub use crate::extract::extract_subtree;
pub use crate::format::{format_annotations, group_and_format};
