//! Taxonomy aggregation over the external descendants of a node.
//!
//! Both queries compare taxonomies by value ([`Taxonomy::key()`]) and treat
//! a leaf without (non-empty) taxonomy as "unknown", which makes the whole
//! result unknown rather than merely smaller.

use crate::error::AnnotationError;
use crate::model::{NodeArena, NodeIndex, Phylogeny, Taxonomy, TaxonomyKey};
use std::collections::HashSet;

/// Returns the value-distinct taxonomies of the external descendants of `node`.
///
/// Taxonomies are returned in order of first occurrence (pre-order over the
/// leaves). A leaf is its own single external descendant.
///
/// # Returns
/// * `Some(taxonomies)` - at least one taxonomy if every leaf has one
/// * `None` - if any leaf lacks a non-empty taxonomy
///
/// # Errors
/// [AnnotationError::UnknownNode] if `node` is not in the tree's arena.
///
/// # Example
/// ```
/// use cladetint::aggregate::distinct_taxonomies;
/// use cladetint::model::{NodeData, Phylogeny, Taxonomy};
///
/// let mut tree = Phylogeny::new();
/// let tui = tree.add_leaf(NodeData::named("Tui")
///     .with_taxonomy(Taxonomy::from_scientific_name("Prosthemadera novaeseelandiae")));
/// let bellbird = tree.add_leaf(NodeData::named("Korimako")
///     .with_taxonomy(Taxonomy::from_scientific_name("Anthornis melanura")));
/// let root = tree.add_root(vec![tui, bellbird], NodeData::default())?;
///
/// assert_eq!(distinct_taxonomies(&tree, root)?.map(|t| t.len()), Some(2));
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
pub fn distinct_taxonomies(
    tree: &Phylogeny,
    node: NodeIndex,
) -> Result<Option<Vec<Taxonomy>>, AnnotationError> {
    let nodes = tree.nodes();
    check_node(&nodes, node)?;
    Ok(distinct_in(&nodes, node))
}

/// Returns the taxonomy shared by all external descendants of `node`.
///
/// # Returns
/// * `Some(taxonomy)` - a copy of the first leaf's taxonomy, if every leaf
///   carries a taxonomy equal to it
/// * `None` - if the leaves disagree or any leaf lacks a non-empty taxonomy
///
/// # Errors
/// [AnnotationError::UnknownNode] if `node` is not in the tree's arena.
pub fn common_external_taxonomy(
    tree: &Phylogeny,
    node: NodeIndex,
) -> Result<Option<Taxonomy>, AnnotationError> {
    let nodes = tree.nodes();
    check_node(&nodes, node)?;
    Ok(common_in(&nodes, node))
}

// ============================================================================
// Arena-level helpers (crate)
// ============================================================================
/// [distinct_taxonomies] on an already locked arena.
pub(crate) fn distinct_in(nodes: &NodeArena, node: NodeIndex) -> Option<Vec<Taxonomy>> {
    let mut seen: HashSet<TaxonomyKey> = HashSet::new();
    let mut distinct = Vec::new();

    for leaf in nodes.external_descendants(node) {
        let taxonomy = leaf.non_empty_taxonomy()?;
        if seen.insert(taxonomy.key()) {
            distinct.push(taxonomy.clone());
        }
    }

    Some(distinct)
}

/// [common_external_taxonomy] on an already locked arena.
pub(crate) fn common_in(nodes: &NodeArena, node: NodeIndex) -> Option<Taxonomy> {
    let mut leaves = nodes.external_descendants(node);
    let first = leaves.next()?.non_empty_taxonomy()?;
    let key = first.key();

    for leaf in leaves {
        if leaf.non_empty_taxonomy()?.key() != key {
            return None;
        }
    }

    Some(first.clone())
}

pub(crate) fn check_node(nodes: &NodeArena, node: NodeIndex) -> Result<(), AnnotationError> {
    match nodes.get(node) {
        Some(_) => Ok(()),
        None => Err(AnnotationError::UnknownNode(node)),
    }
}
