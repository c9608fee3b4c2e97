use cladetint::AnnotationError;
use cladetint::color::Rgb;
use cladetint::model::{
    BranchLength, Confidence, Identifier, NodeData, NodeIndex, Phylogeny, Taxonomy, TreeMetadata,
};

/// Builds ((Kea,Kaka)Nestor,Kakapo)Root, returning tree and
/// indices (kea, kaka, nestor, kakapo, root).
fn parrots() -> (Phylogeny, [NodeIndex; 5]) {
    let mut tree = Phylogeny::new().with_name("Strigopoidea");
    let kea = tree.add_leaf(
        NodeData::named("Kea")
            .with_taxonomy(Taxonomy::from_scientific_name("Nestor notabilis"))
            .with_distance(BranchLength::new(0.5)),
    );
    let kaka = tree.add_leaf(
        NodeData::named("Kaka")
            .with_taxonomy(Taxonomy::from_scientific_name("Nestor meridionalis")),
    );
    let nestor = tree
        .add_internal_node(vec![kea, kaka], NodeData::named("Nestor"))
        .unwrap();
    let kakapo = tree.add_leaf(
        NodeData::named("Kakapo")
            .with_taxonomy(Taxonomy::from_scientific_name("Strigops habroptilus")),
    );
    let root = tree
        .add_root(vec![nestor, kakapo], NodeData::named("Root"))
        .unwrap();
    (tree, [kea, kaka, nestor, kakapo, root])
}

// --- TESTS CONSTRUCTION ---
#[test]
fn test_basic_construction() {
    let (tree, [kea, kaka, nestor, kakapo, root]) = parrots();

    assert_eq!(tree.root_index(), Some(root));
    assert_eq!(tree.validate(), Ok(root));
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_external_nodes(), 3);
    assert_eq!(tree.name(), Some("Strigopoidea"));

    // Relationships
    assert_eq!(tree.node(root).children(), &[nestor, kakapo]);
    assert_eq!(tree.node(nestor).children(), &[kea, kaka]);
    assert_eq!(tree.node(kea).parent(), Some(nestor));
    assert_eq!(tree.node(nestor).parent(), Some(root));
    assert_eq!(tree.node(root).parent(), None);
    assert!(tree.node(kea).is_leaf());
    assert!(tree.node(nestor).is_internal());

    // Data
    assert_eq!(tree.node(kea).data().name, "Kea");
    assert_eq!(*tree.node(kea).data().distance_to_parent.unwrap(), 0.5);
    assert_eq!(
        tree.node(kakapo).taxonomy().unwrap().scientific_name(),
        "Strigops habroptilus"
    );
    assert!(!tree.node(root).is_collapse());
    assert_eq!(tree.node(root).branch_color(), None);
}

#[test]
fn test_single_node_tree() {
    let mut tree = Phylogeny::new();
    let root = tree.add_root(vec![], NodeData::named("Takahe")).unwrap();

    assert_eq!(tree.validate(), Ok(root));
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.num_external_nodes(), 1);
    assert_eq!(tree.pre_order(), vec![root]);
    assert_eq!(tree.post_order(), vec![root]);
}

#[test]
fn test_reject_second_parent() {
    let (mut tree, [kea, ..]) = parrots();
    let result = tree.add_internal_node(vec![kea], NodeData::default());
    assert_eq!(result, Err(AnnotationError::MalformedTree(kea)));
}

#[test]
fn test_reject_duplicate_child() {
    let mut tree = Phylogeny::new();
    let weka = tree.add_leaf(NodeData::named("Weka"));
    let result = tree.add_internal_node(vec![weka, weka], NodeData::default());
    assert_eq!(result, Err(AnnotationError::MalformedTree(weka)));
    // Failed insertions leave the child untouched
    assert_eq!(tree.node(weka).parent(), None);
}

#[test]
fn test_reject_unknown_child() {
    let mut tree = Phylogeny::new();
    let result = tree.add_root(vec![42], NodeData::default());
    assert_eq!(result, Err(AnnotationError::UnknownNode(42)));
    assert_eq!(tree.root_index(), None);
}

#[test]
fn test_reject_childless_internal_node() {
    let mut tree = Phylogeny::new();
    let result = tree.add_internal_node(vec![], NodeData::default());
    assert!(matches!(result, Err(AnnotationError::InvalidArgument(_))));
}

#[test]
fn test_missing_root() {
    let mut tree = Phylogeny::new();
    tree.add_leaf(NodeData::named("Pukeko"));

    assert_eq!(tree.validate(), Err(AnnotationError::MissingRoot));
    assert!(tree.validate().unwrap_err().is_invalid_argument());
    assert!(tree.pre_order().is_empty());
    assert_eq!(tree.num_nodes(), 0);
    assert!(tree.deep_copy().is_err());
}

#[test]
fn test_metadata() {
    let metadata = TreeMetadata {
        name: Some("Ratites".to_string()),
        description: Some("Flightless birds".to_string()),
        tree_type: Some("species tree".to_string()),
        distance_unit: Some("substitutions/site".to_string()),
        confidence: Some(Confidence::new(0.98, "posterior")),
        identifier: Some(Identifier::new("T42", "treebase")),
    };
    let mut tree = Phylogeny::new().with_metadata(metadata.clone());

    assert_eq!(tree.metadata(), &metadata);
    assert_eq!(tree.name(), Some("Ratites"));
    assert!(tree.is_rerootable());
    assert!(!tree.is_rooted());

    tree.metadata_mut().name = None;
    tree.set_rooted(true);
    assert_eq!(tree.name(), None);
    assert!(tree.is_rooted());
}

// --- TESTS TRAVERSAL ---
#[test]
fn test_pre_order() {
    let (tree, [kea, kaka, nestor, kakapo, root]) = parrots();
    assert_eq!(tree.pre_order(), vec![root, nestor, kea, kaka, kakapo]);
}

#[test]
fn test_post_order() {
    let (tree, [kea, kaka, nestor, kakapo, root]) = parrots();
    assert_eq!(tree.post_order(), vec![kea, kaka, nestor, kakapo, root]);
}

#[test]
fn test_arena_iterators_from_inner_node() {
    let (tree, [kea, kaka, nestor, kakapo, root]) = parrots();
    let nodes = tree.nodes();

    let descendants: Vec<NodeIndex> = nodes.descendants(nestor).map(|n| n.index()).collect();
    assert_eq!(descendants, vec![kea, kaka]);

    let external: Vec<NodeIndex> = nodes.external_descendants(root).map(|n| n.index()).collect();
    assert_eq!(external, vec![kea, kaka, kakapo]);

    // A leaf is its own external descendant
    let external: Vec<NodeIndex> = nodes.external_descendants(kakapo).map(|n| n.index()).collect();
    assert_eq!(external, vec![kakapo]);

    assert_eq!(nodes.post_order(nestor).count(), 3);
    assert_eq!(nodes.pre_order(999).count(), 0);
}

#[test]
fn test_children_order_preserved() {
    let mut tree = Phylogeny::new();
    let leaves: Vec<NodeIndex> = ["Tui", "Korimako", "Hihi", "Kokako"]
        .into_iter()
        .map(|name| tree.add_leaf(NodeData::named(name)))
        .collect();
    let reversed: Vec<NodeIndex> = leaves.iter().rev().copied().collect();
    let root = tree.add_root(reversed.clone(), NodeData::default()).unwrap();

    assert_eq!(tree.node(root).children(), reversed.as_slice());
    assert_eq!(tree.external_descendants(root), reversed);
}

// --- TESTS COPY & SHARING ---
#[test]
fn test_deep_copy_is_isolated() {
    let (tree, [kea, ..]) = parrots();
    let mut copy = tree.deep_copy().unwrap();

    assert!(!copy.shares_nodes_with(&tree));
    assert_eq!(copy.root_index(), Some(0));
    assert_eq!(copy.num_nodes(), 5);
    assert_eq!(copy.name(), Some("Strigopoidea"));

    // Indices are renumbered in pre-order: root, Nestor, Kea, Kaka, Kakapo
    assert_eq!(copy.node(2).data().name, "Kea");
    assert_eq!(copy.node(2).parent(), Some(1));
    assert_eq!(copy.node(0).children(), &[1, 4]);

    copy.node_mut(2).set_branch_color(Some(Rgb::WHITE));
    assert_eq!(tree.node(kea).branch_color(), None);
}

#[test]
fn test_to_ascii() {
    let (mut tree, [kea, ..]) = parrots();
    tree.node_mut(kea).set_branch_color(Some(Rgb::new(255, 0, 0)));

    let expected = "\
[4] Root
  ├─ [2] Nestor
  │   ├─ [0] Kea {Nestor notabilis} #ff0000
  │   └─ [1] Kaka {Nestor meridionalis}
  └─ [3] Kakapo {Strigops habroptilus}
";
    assert_eq!(tree.to_ascii(), expected);
    assert_eq!(Phylogeny::new().to_ascii(), "(No root set)\n");
}
