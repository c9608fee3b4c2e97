use cladetint::color::{DerivationMode, Palette, Rgb, TaxonomyColorer, derive_color};
use cladetint::model::{Confidence, NodeData, NodeIndex, Phylogeny, Taxonomy};
use cladetint::{
    AnnotationError, clear_branch_colors, color_by_confidence, color_by_external_taxonomy,
    colorize_subtree,
};

/// Builds ((Kea:c1,Kaka:c2)Nestor:c3,Kakapo:c4)Root with the given
/// confidences, returning tree and indices (kea, kaka, nestor, kakapo, root).
fn parrots(confidences: [Option<f64>; 4]) -> (Phylogeny, [NodeIndex; 5]) {
    let data = |name: &str, scientific_name: &str, confidence: Option<f64>| {
        let mut data = NodeData::named(name);
        if !scientific_name.is_empty() {
            data = data.with_taxonomy(Taxonomy::from_scientific_name(scientific_name));
        }
        if let Some(value) = confidence {
            data = data.with_confidence(Confidence::new(value, "bootstrap"));
        }
        data
    };

    let mut tree = Phylogeny::new();
    let kea = tree.add_leaf(data("Kea", "Nestor notabilis", confidences[0]));
    let kaka = tree.add_leaf(data("Kaka", "Nestor meridionalis", confidences[1]));
    let nestor = tree
        .add_internal_node(vec![kea, kaka], data("Nestor", "", confidences[2]))
        .unwrap();
    let kakapo = tree.add_leaf(data("Kakapo", "Strigops habroptilus", confidences[3]));
    let root = tree
        .add_root(vec![nestor, kakapo], NodeData::named("Root"))
        .unwrap();
    (tree, [kea, kaka, nestor, kakapo, root])
}

fn colors(tree: &Phylogeny) -> Vec<Option<Rgb>> {
    tree.pre_order()
        .into_iter()
        .map(|i| tree.node(i).branch_color())
        .collect()
}

// --- TESTS SUBTREE COLORING ---
#[test]
fn test_colorize_subtree() {
    let (mut tree, [kea, kaka, nestor, kakapo, root]) = parrots([None; 4]);
    let red = Rgb::new(255, 0, 0);

    colorize_subtree(&mut tree, nestor, red).unwrap();
    assert_eq!(tree.node(nestor).branch_color(), Some(red));
    assert_eq!(tree.node(kea).branch_color(), Some(red));
    assert_eq!(tree.node(kaka).branch_color(), Some(red));
    assert_eq!(tree.node(kakapo).branch_color(), None);
    assert_eq!(tree.node(root).branch_color(), None);

    // Unconditional overwrite
    colorize_subtree(&mut tree, root, Rgb::WHITE).unwrap();
    assert!(colors(&tree).iter().all(|&c| c == Some(Rgb::WHITE)));

    clear_branch_colors(&mut tree).unwrap();
    assert!(colors(&tree).iter().all(Option::is_none));

    assert_eq!(
        colorize_subtree(&mut tree, 17, red),
        Err(AnnotationError::UnknownNode(17))
    );
}

// --- TESTS CONFIDENCE ---
#[test]
fn test_confidence_all_zero_leaves_colors_unset() {
    let (mut tree, [kea, ..]) = parrots([Some(0.0); 4]);
    tree.node_mut(kea).set_branch_color(Some(Rgb::WHITE));

    assert_eq!(color_by_confidence(&mut tree, &Palette::default()), Ok(0));
    assert!(colors(&tree).iter().all(Option::is_none));
}

#[test]
fn test_confidence_without_values_is_noop() {
    let (mut tree, _) = parrots([None; 4]);
    assert_eq!(color_by_confidence(&mut tree, &Palette::default()), Ok(0));
    assert!(colors(&tree).iter().all(Option::is_none));
}

#[test]
fn test_confidence_interpolation() {
    let (mut tree, [kea, kaka, nestor, kakapo, root]) =
        parrots([Some(100.0), None, Some(50.0), Some(25.0)]);
    let palette = Palette::default()
        .with_background(Rgb::new(0, 0, 0))
        .with_branch(Rgb::new(200, 100, 0));

    assert_eq!(color_by_confidence(&mut tree, &palette), Ok(3));

    // Deeper node visited later wins over Nestor's color
    assert_eq!(tree.node(kea).branch_color(), Some(Rgb::new(200, 100, 0)));
    // Kaka has no confidence, keeps Nestor's color
    assert_eq!(tree.node(nestor).branch_color(), Some(Rgb::new(100, 50, 0)));
    assert_eq!(tree.node(kaka).branch_color(), Some(Rgb::new(100, 50, 0)));
    assert_eq!(tree.node(kakapo).branch_color(), Some(Rgb::new(50, 25, 0)));
    assert_eq!(tree.node(root).branch_color(), None);
}

#[test]
fn test_confidence_uses_first_value() {
    let mut tree = Phylogeny::new();
    let leaf = tree.add_leaf(
        NodeData::named("Kokako")
            .with_confidence(Confidence::from(10.0))
            .with_confidence(Confidence::from(1000.0)),
    );
    let other = tree.add_leaf(NodeData::named("Tieke").with_confidence(Confidence::from(5.0)));
    tree.add_root(vec![leaf, other], NodeData::default()).unwrap();

    color_by_confidence(&mut tree, &Palette::default()).unwrap();
    assert_eq!(tree.node(leaf).branch_color(), Some(Rgb::WHITE));
    assert_eq!(tree.node(other).branch_color(), Some(Rgb::new(127, 127, 127)));
}

// --- TESTS EXTERNAL TAXONOMY ---
#[test]
fn test_external_taxonomy_coloring() {
    let (mut tree, [kea, kaka, nestor, kakapo, root]) = parrots([None; 4]);
    tree.node_mut(root).set_branch_color(Some(Rgb::WHITE));
    let mut colorer = TaxonomyColorer::new(Palette::default());

    // Kea, Kaka, Kakapo each on their own
    assert_eq!(color_by_external_taxonomy(&mut tree, &mut colorer), Ok(3));

    let expected = |name| derive_color(name, DerivationMode::Taxonomy).ok();
    assert_eq!(tree.node(root).branch_color(), None);
    assert_eq!(tree.node(nestor).branch_color(), None);
    assert_eq!(tree.node(kea).branch_color(), expected("Nestor notabilis"));
    assert_eq!(tree.node(kaka).branch_color(), expected("Nestor meridionalis"));
    assert_eq!(tree.node(kakapo).branch_color(), expected("Strigops habroptilus"));
}

#[test]
fn test_external_taxonomy_colors_uniform_subtree_once() {
    let mut tree = Phylogeny::new();
    let kiwi = || NodeData::default().with_taxonomy(Taxonomy::from_scientific_name("Apteryx owenii"));
    let a = tree.add_leaf(kiwi());
    let b = tree.add_leaf(kiwi());
    let inner = tree.add_internal_node(vec![a, b], NodeData::default()).unwrap();
    let c = tree.add_leaf(kiwi());
    let root = tree.add_root(vec![inner, c], NodeData::default()).unwrap();

    let mut colorer = TaxonomyColorer::new(Palette::default());
    colorer.assign_color("Apteryx owenii", Rgb::new(9, 9, 9));

    assert_eq!(color_by_external_taxonomy(&mut tree, &mut colorer), Ok(1));
    for index in [a, b, inner, c, root] {
        assert_eq!(tree.node(index).branch_color(), Some(Rgb::new(9, 9, 9)));
    }
}
