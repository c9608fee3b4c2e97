use super::paint_subtree;
use crate::color::Palette;
use crate::error::AnnotationError;
use crate::model::{Node, NodeIndex, Phylogeny};
use tracing::debug;

/// Colors branches by confidence, relative to the tree's maximal confidence.
///
/// First pass (pre-order): unsets every branch color and finds the maximal
/// first-confidence value. If it is not positive, nothing else happens.
///
/// Second pass (pre-order): each node with a confidence paints its subtree
/// with `palette.background` interpolated towards `palette.branch` by
/// `confidence / max`. Later (deeper) nodes paint over earlier ones.
///
/// # Returns
/// Number of nodes that painted their subtree.
///
/// # Errors
/// Errors of [`Phylogeny::validate()`].
pub fn color_by_confidence(tree: &mut Phylogeny, palette: &Palette) -> Result<usize, AnnotationError> {
    let root = tree.validate()?;
    let mut nodes = tree.nodes_mut();
    let order: Vec<NodeIndex> = nodes.pre_order(root).map(Node::index).collect();

    let mut max = 0.0;
    for &index in &order {
        let node = &mut nodes[index];
        node.set_branch_color(None);
        if let Some(confidence) = node.confidence()
            && confidence > max
        {
            max = confidence;
        }
    }
    if max <= 0.0 {
        debug!(max, "no positive confidence, branch colors cleared");
        return Ok(0);
    }

    let mut painted = 0;
    for &index in &order {
        if let Some(confidence) = nodes[index].confidence() {
            let color = palette.background.interpolate(palette.branch, confidence / max);
            paint_subtree(&mut nodes, index, Some(color));
            painted += 1;
        }
    }
    debug!(max, painted, "colored by confidence");

    Ok(painted)
}
