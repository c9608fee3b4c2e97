//! Extraction of a subtree as a tree of its own, sharing nodes with its source.

use crate::error::AnnotationError;
use crate::model::{Node, NodeIndex, Phylogeny};
use std::sync::Arc;
use tracing::debug;

/// Creates a new tree rooted at a copy of `node`, sharing everything below.
///
/// The new tree:
/// * copies the source tree's metadata, rooted and rerootable flags
/// * gets a new root node, pushed into the source's arena, holding a copy of
///   `node`'s data and collapse flag and the *same* child indices
/// * shares the arena with the source, so changes to any node below the root
///   are visible through both trees
///
/// Parent pointers of the shared children keep pointing into the source tree;
/// [`Phylogeny::parent_of()`] resolves them to the new root within the new
/// tree. Use [`Phylogeny::deep_copy()`] on the result for an isolated tree.
///
/// The pushed root stays in the shared arena even after the new tree is
/// dropped: repeated extractions grow the source's arena by one node each.
///
/// # Arguments
/// * `tree` - Source tree
/// * `node` - Node of the source tree becoming the new root
///
/// # Errors
/// * Errors of [`Phylogeny::validate()`]
/// * [AnnotationError::UnknownNode] if `node` is not reachable from the
///   source tree's root
///
/// # Example
/// ```
/// use cladetint::color::Rgb;
/// use cladetint::extract::extract_subtree;
/// use cladetint::model::{NodeData, Phylogeny};
///
/// let mut tree = Phylogeny::new();
/// let kea = tree.add_leaf(NodeData::named("Kea"));
/// let kaka = tree.add_leaf(NodeData::named("Kaka"));
/// let nestor = tree.add_internal_node(vec![kea, kaka], NodeData::named("Nestor"))?;
/// let kakapo = tree.add_leaf(NodeData::named("Kakapo"));
/// tree.add_root(vec![nestor, kakapo], NodeData::default())?;
///
/// let mut nestor_tree = extract_subtree(&tree, nestor)?;
/// nestor_tree.node_mut(kea).set_branch_color(Some(Rgb::WHITE));
/// assert_eq!(tree.node(kea).branch_color(), Some(Rgb::WHITE));
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
pub fn extract_subtree(tree: &Phylogeny, node: NodeIndex) -> Result<Phylogeny, AnnotationError> {
    let root = tree.validate()?;

    let new_root = {
        let mut nodes = tree.nodes.write();
        if !nodes.pre_order(root).any(|n| n.index() == node) {
            return Err(AnnotationError::UnknownNode(node));
        }

        let source: &Node = &nodes[node];
        let data = source.data.clone();
        let children = source.children.clone();
        let collapse = source.collapse;

        let new_root = nodes.push(data);
        nodes[new_root].children = children;
        nodes[new_root].collapse = collapse;
        new_root
    };
    debug!(source = node, new_root, "extracted subtree");

    Ok(Phylogeny {
        nodes: Arc::clone(&tree.nodes),
        root: Some(new_root),
        metadata: tree.metadata.clone(),
        rooted: tree.rooted,
        rerootable: tree.rerootable,
    })
}
