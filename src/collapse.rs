//! Collapsing of subtrees whose external descendants share one taxonomy.

use crate::aggregate::{check_node, distinct_in};
use crate::error::AnnotationError;
use crate::model::{Node, NodeArena, NodeIndex, Phylogeny};
use tracing::debug;

/// Collapses every maximal subtree whose leaves all carry the same taxonomy.
///
/// Visits nodes in pre-order. Each internal node with more than one child
/// that is not yet collapsed is inspected:
/// * exactly one distinct leaf taxonomy: the node and every node below it are
///   marked collapsed; a node without (non-empty) taxonomy receives a copy of
///   the shared one
/// * otherwise: the node's collapse flag is reset to `false`
///
/// Nodes inside a collapsed subtree are skipped, as they are collapsed by
/// then. If anything was collapsed the tree is marked non-rerootable.
/// Only collapse flags and taxonomies are touched; no node is removed.
///
/// # Returns
/// Number of subtrees collapsed.
///
/// # Errors
/// Errors of [`Phylogeny::validate()`].
///
/// # Example
/// ```
/// use cladetint::collapse::collapse_uniform_subtrees;
/// use cladetint::model::{NodeData, Phylogeny, Taxonomy};
///
/// let kiwi = || NodeData::default().with_taxonomy(Taxonomy::from_scientific_name("Apteryx"));
/// let mut tree = Phylogeny::new();
/// let a = tree.add_leaf(kiwi());
/// let b = tree.add_leaf(kiwi());
/// let root = tree.add_root(vec![a, b], NodeData::default())?;
///
/// assert_eq!(collapse_uniform_subtrees(&mut tree)?, 1);
/// assert!(tree.node(root).is_collapse());
/// assert!(!tree.is_rerootable());
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
pub fn collapse_uniform_subtrees(tree: &mut Phylogeny) -> Result<usize, AnnotationError> {
    let root = tree.validate()?;
    let mut collapsed = 0;

    {
        let mut nodes = tree.nodes_mut();
        let order: Vec<NodeIndex> = nodes.pre_order(root).map(Node::index).collect();

        for index in order {
            let node = &nodes[index];
            if node.is_collapse() || node.num_children() < 2 {
                continue;
            }

            match distinct_in(&nodes, index) {
                Some(mut distinct) if distinct.len() == 1 => {
                    let shared = distinct.remove(0);
                    let node = &mut nodes[index];
                    if node.non_empty_taxonomy().is_none() {
                        node.data.taxonomy = Some(shared);
                    }
                    set_collapse_below(&mut nodes, index, true);
                    collapsed += 1;
                }
                _ => nodes[index].set_collapse(false),
            }
        }
    }

    if collapsed > 0 {
        tree.set_rerootable(false);
    }
    debug!(collapsed, "collapsed uniform subtrees");

    Ok(collapsed)
}

/// Sets the collapse flag of `node` and of every node in its subtree.
///
/// # Errors
/// * Errors of [`Phylogeny::validate()`]
/// * [AnnotationError::UnknownNode] if `node` is not in the tree's arena
pub fn set_subtree_collapse(
    tree: &mut Phylogeny,
    node: NodeIndex,
    collapse: bool,
) -> Result<(), AnnotationError> {
    tree.validate()?;
    let mut nodes = tree.nodes_mut();
    check_node(&nodes, node)?;
    set_collapse_below(&mut nodes, node, collapse);
    Ok(())
}

fn set_collapse_below(nodes: &mut NodeArena, node: NodeIndex, collapse: bool) {
    let subtree: Vec<NodeIndex> = nodes.pre_order(node).map(Node::index).collect();
    for index in subtree {
        nodes[index].set_collapse(collapse);
    }
}
