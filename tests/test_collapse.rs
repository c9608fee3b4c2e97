use cladetint::model::{Identifier, NodeData, NodeIndex, Phylogeny, Taxonomy};
use cladetint::{
    AnnotationError, collapse_uniform_subtrees, common_external_taxonomy, distinct_taxonomies,
    set_subtree_collapse,
};

fn leaf(tree: &mut Phylogeny, name: &str, scientific_name: &str) -> NodeIndex {
    tree.add_leaf(
        NodeData::named(name).with_taxonomy(Taxonomy::from_scientific_name(scientific_name)),
    )
}

/// Builds (((Tokoeka1,Tokoeka2)A,Tokoeka3)B,(Rowi,Tokoeka4)C)Root, returning
/// tree and indices (a, b, c, root).
fn kiwis() -> (Phylogeny, [NodeIndex; 4]) {
    let mut tree = Phylogeny::new();
    let t1 = leaf(&mut tree, "Tokoeka1", "Apteryx australis");
    let t2 = leaf(&mut tree, "Tokoeka2", "Apteryx australis");
    let a = tree.add_internal_node(vec![t1, t2], NodeData::named("A")).unwrap();
    let t3 = leaf(&mut tree, "Tokoeka3", "Apteryx australis");
    let b = tree.add_internal_node(vec![a, t3], NodeData::named("B")).unwrap();
    let rowi = leaf(&mut tree, "Rowi", "Apteryx rowi");
    let t4 = leaf(&mut tree, "Tokoeka4", "Apteryx australis");
    let c = tree.add_internal_node(vec![rowi, t4], NodeData::named("C")).unwrap();
    let root = tree.add_root(vec![b, c], NodeData::named("Root")).unwrap();
    (tree, [a, b, c, root])
}

// --- TESTS AGGREGATION ---
#[test]
fn test_distinct_taxonomies() {
    let (tree, [a, _, c, root]) = kiwis();

    let distinct = distinct_taxonomies(&tree, root).unwrap().unwrap();
    let names: Vec<&str> = distinct.iter().map(|t| t.scientific_name()).collect();
    assert_eq!(names, vec!["Apteryx australis", "Apteryx rowi"]);

    assert_eq!(distinct_taxonomies(&tree, a).unwrap().unwrap().len(), 1);
    assert_eq!(distinct_taxonomies(&tree, c).unwrap().unwrap().len(), 2);
}

#[test]
fn test_distinct_taxonomies_unknown_leaf() {
    let mut tree = Phylogeny::new();
    let tui = leaf(&mut tree, "Tui", "Prosthemadera novaeseelandiae");
    let unknown = tree.add_leaf(NodeData::named("Unknown").with_taxonomy(Taxonomy::new()));
    let root = tree.add_root(vec![tui, unknown], NodeData::default()).unwrap();

    assert_eq!(distinct_taxonomies(&tree, root), Ok(None));
    assert_eq!(common_external_taxonomy(&tree, root), Ok(None));
    // A rank alone does not make a taxonomy known
    assert!(Taxonomy::new().with_rank("species").is_empty());
}

#[test]
fn test_distinct_taxonomies_value_equality() {
    let mut tree = Phylogeny::new();
    let x = tree.add_leaf(NodeData::default().with_taxonomy(
        Taxonomy::from_scientific_name("Apteryx owenii").with_lineage(["Aves"]),
    ));
    let y = tree.add_leaf(NodeData::default().with_taxonomy(
        Taxonomy::from_scientific_name("APTERYX OWENII").with_rank("species"),
    ));
    let z = tree.add_leaf(NodeData::default().with_taxonomy(
        Taxonomy::new()
            .with_identifier(Identifier::new("8823", "ncbi"))
            .with_scientific_name("Apteryx owenii"),
    ));
    let root = tree.add_root(vec![x, y, z], NodeData::default()).unwrap();

    // Identifier takes precedence over the name
    assert_eq!(distinct_taxonomies(&tree, root).unwrap().unwrap().len(), 2);
}

#[test]
fn test_distinct_taxonomies_authority_and_synonyms() {
    let mut tree = Phylogeny::new();
    let shaw = tree.add_leaf(NodeData::default().with_taxonomy(
        Taxonomy::from_scientific_name("Apteryx australis").with_authority("Shaw, 1813"),
    ));
    let shaw_lower = tree.add_leaf(NodeData::default().with_taxonomy(
        Taxonomy::from_scientific_name("Apteryx australis").with_authority("shaw, 1813"),
    ));
    let bare = leaf(&mut tree, "Tokoeka", "Apteryx australis");
    let australis = tree.add_internal_node(vec![shaw, shaw_lower, bare], NodeData::default()).unwrap();

    let synonym = || Taxonomy::new().with_synonyms(["Dinornis maximus"]);
    let moa1 = tree.add_leaf(NodeData::default().with_taxonomy(synonym()));
    let moa2 = tree.add_leaf(
        NodeData::default().with_taxonomy(Taxonomy::new().with_synonyms(["DINORNIS MAXIMUS"])),
    );
    let moas = tree.add_internal_node(vec![moa1, moa2], NodeData::default()).unwrap();
    let root = tree.add_root(vec![australis, moas], NodeData::default()).unwrap();

    // Differing authority only: distinct taxa
    let distinct = distinct_taxonomies(&tree, australis).unwrap().unwrap();
    assert_eq!(distinct.len(), 2);
    assert_eq!(common_external_taxonomy(&tree, australis), Ok(None));

    // Synonyms alone identify a taxonomy
    assert!(!synonym().is_empty());
    assert_eq!(common_external_taxonomy(&tree, moas), Ok(Some(synonym())));
    assert_eq!(distinct_taxonomies(&tree, root).unwrap().unwrap().len(), 3);
}

#[test]
fn test_common_external_taxonomy() {
    let (tree, [a, b, c, root]) = kiwis();

    let common = common_external_taxonomy(&tree, b).unwrap().unwrap();
    assert_eq!(common.scientific_name(), "Apteryx australis");
    assert_eq!(common_external_taxonomy(&tree, a).unwrap(), Some(common));
    assert_eq!(common_external_taxonomy(&tree, c), Ok(None));
    assert_eq!(common_external_taxonomy(&tree, root), Ok(None));
    assert_eq!(
        common_external_taxonomy(&tree, 99),
        Err(AnnotationError::UnknownNode(99))
    );
}

// --- TESTS COLLAPSING ---
#[test]
fn test_collapse_uniform_tree_collapses_everything() {
    let mut tree = Phylogeny::new();
    let leaves: Vec<NodeIndex> = (1..=4)
        .map(|i| leaf(&mut tree, &format!("Kakapo{}", i), "Strigops habroptilus"))
        .collect();
    let left = tree
        .add_internal_node(leaves[..2].to_vec(), NodeData::default())
        .unwrap();
    let root = tree
        .add_root(vec![left, leaves[2], leaves[3]], NodeData::default())
        .unwrap();

    assert_eq!(collapse_uniform_subtrees(&mut tree), Ok(1));
    for index in tree.pre_order() {
        assert!(tree.node(index).is_collapse());
    }
    // Root without taxonomy gets the shared one
    assert_eq!(
        tree.node(root).taxonomy().unwrap().scientific_name(),
        "Strigops habroptilus"
    );
    assert!(!tree.is_rerootable());
}

#[test]
fn test_collapse_mixed_tree() {
    let (mut tree, [a, b, c, root]) = kiwis();

    // B is the maximal uniform subtree, A lies inside it
    assert_eq!(collapse_uniform_subtrees(&mut tree), Ok(1));
    assert!(tree.node(b).is_collapse());
    assert!(tree.node(a).is_collapse());
    for leaf in tree.external_descendants(b) {
        assert!(tree.node(leaf).is_collapse());
    }
    assert!(!tree.node(c).is_collapse());
    assert!(!tree.node(root).is_collapse());

    assert_eq!(
        tree.node(b).taxonomy().unwrap().scientific_name(),
        "Apteryx australis"
    );
    assert!(tree.node(c).taxonomy().is_none());
    assert!(!tree.is_rerootable());
}

#[test]
fn test_collapse_skips_flagged_nodes() {
    let (mut tree, [_, _, c, root]) = kiwis();
    tree.node_mut(c).set_collapse(true);
    tree.node_mut(root).set_collapse(true);

    collapse_uniform_subtrees(&mut tree).unwrap();

    // Root is skipped as it is flagged already
    assert!(tree.node(root).is_collapse());

    set_subtree_collapse(&mut tree, root, false).unwrap();
    collapse_uniform_subtrees(&mut tree).unwrap();
    assert!(!tree.node(root).is_collapse());
    assert!(!tree.node(c).is_collapse());
}

#[test]
fn test_collapse_keeps_own_taxonomy() {
    let mut tree = Phylogeny::new();
    let a = leaf(&mut tree, "Weka1", "Gallirallus australis");
    let b = leaf(&mut tree, "Weka2", "Gallirallus australis");
    let root = tree
        .add_root(
            vec![a, b],
            NodeData::default().with_taxonomy(Taxonomy::from_scientific_name("Gallirallus")),
        )
        .unwrap();

    collapse_uniform_subtrees(&mut tree).unwrap();
    assert!(tree.node(root).is_collapse());
    assert_eq!(tree.node(root).taxonomy().unwrap().scientific_name(), "Gallirallus");
}

#[test]
fn test_collapse_nothing_keeps_rerootable() {
    let mut tree = Phylogeny::new();
    let a = leaf(&mut tree, "Kea", "Nestor notabilis");
    let b = leaf(&mut tree, "Kaka", "Nestor meridionalis");
    tree.add_root(vec![a, b], NodeData::default()).unwrap();

    assert_eq!(collapse_uniform_subtrees(&mut tree), Ok(0));
    assert!(tree.is_rerootable());
}

#[test]
fn test_collapse_skips_single_child_nodes() {
    let mut tree = Phylogeny::new();
    let a = leaf(&mut tree, "Hoiho", "Megadyptes antipodes");
    let root = tree.add_root(vec![a], NodeData::default()).unwrap();

    assert_eq!(collapse_uniform_subtrees(&mut tree), Ok(0));
    assert!(!tree.node(root).is_collapse());
}

#[test]
fn test_collapse_requires_root() {
    let mut tree = Phylogeny::new();
    assert_eq!(
        collapse_uniform_subtrees(&mut tree),
        Err(AnnotationError::MissingRoot)
    );
}

#[test]
fn test_set_subtree_collapse() {
    let (mut tree, [a, b, c, root]) = kiwis();

    set_subtree_collapse(&mut tree, b, true).unwrap();
    assert!(tree.node(b).is_collapse());
    assert!(tree.node(a).is_collapse());
    assert!(!tree.node(c).is_collapse());
    assert!(!tree.node(root).is_collapse());

    set_subtree_collapse(&mut tree, root, false).unwrap();
    assert!(tree.pre_order().into_iter().all(|i| !tree.node(i).is_collapse()));

    assert_eq!(
        set_subtree_collapse(&mut tree, 1000, true),
        Err(AnnotationError::UnknownNode(1000))
    );
}
