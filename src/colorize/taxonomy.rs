use super::paint_subtree;
use crate::aggregate::common_in;
use crate::color::TaxonomyColorer;
use crate::error::AnnotationError;
use crate::model::{Node, NodeIndex, Phylogeny};
use tracing::debug;

/// Colors every maximal subtree whose leaves share one taxonomy.
///
/// First pass unsets every branch color. Second pass (pre-order) visits
/// nodes still unset; if all external descendants of such a node share a
/// taxonomy, the subtree is painted with that taxonomy's color from
/// `colorer`. Leaves with a taxonomy thus always get colored, subtrees with
/// mixed or missing taxonomies stay unset above their uniform parts.
///
/// # Returns
/// Number of subtrees painted.
///
/// # Errors
/// Errors of [`Phylogeny::validate()`].
pub fn color_by_external_taxonomy(
    tree: &mut Phylogeny,
    colorer: &mut TaxonomyColorer,
) -> Result<usize, AnnotationError> {
    let root = tree.validate()?;
    let mut nodes = tree.nodes_mut();
    paint_subtree(&mut nodes, root, None);

    let order: Vec<NodeIndex> = nodes.pre_order(root).map(Node::index).collect();
    let mut painted = 0;
    for index in order {
        if nodes[index].branch_color().is_some() {
            continue;
        }
        if let Some(taxonomy) = common_in(&nodes, index) {
            let color = colorer.taxonomy_color(&taxonomy);
            paint_subtree(&mut nodes, index, Some(color));
            painted += 1;
        }
    }
    debug!(painted, "colored by external taxonomy");

    Ok(painted)
}
