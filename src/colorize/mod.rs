//! Branch coloring strategies.
//!
//! All strategies paint with [colorize_subtree] semantics: a node and its
//! whole subtree get the same color, overwriting whatever was there. Since
//! traversals are deterministic, which color survives where subtrees overlap
//! is fixed:
//! * [color_by_confidence] - pre-order, the deepest qualifying node wins
//! * [color_by_external_taxonomy] - pre-order, only unset nodes are painted
//! * [RankColorizer] - post-order, an ancestor of matching rank paints over
//!   its descendants

mod confidence;
mod rank;
mod taxonomy;

pub use confidence::color_by_confidence;
pub use rank::{RankColoring, RankColorizer};
pub use taxonomy::color_by_external_taxonomy;

use crate::aggregate::check_node;
use crate::color::Rgb;
use crate::error::AnnotationError;
use crate::model::{Node, NodeArena, NodeIndex, Phylogeny};

/// Sets the branch color of `node` and of every node in its subtree.
///
/// # Errors
/// * Errors of [`Phylogeny::validate()`]
/// * [AnnotationError::UnknownNode] if `node` is not in the tree's arena
pub fn colorize_subtree(
    tree: &mut Phylogeny,
    node: NodeIndex,
    color: Rgb,
) -> Result<(), AnnotationError> {
    tree.validate()?;
    let mut nodes = tree.nodes_mut();
    check_node(&nodes, node)?;
    paint_subtree(&mut nodes, node, Some(color));
    Ok(())
}

/// Unsets the branch color of every node of the tree.
///
/// # Errors
/// Errors of [`Phylogeny::validate()`].
pub fn clear_branch_colors(tree: &mut Phylogeny) -> Result<(), AnnotationError> {
    let root = tree.validate()?;
    paint_subtree(&mut tree.nodes_mut(), root, None);
    Ok(())
}

pub(crate) fn paint_subtree(nodes: &mut NodeArena, node: NodeIndex, color: Option<Rgb>) {
    let subtree: Vec<NodeIndex> = nodes.pre_order(node).map(Node::index).collect();
    for index in subtree {
        nodes[index].set_branch_color(color);
    }
}
