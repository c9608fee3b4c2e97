use super::paint_subtree;
use crate::color::{Rgb, TaxonomyColorer};
use crate::error::AnnotationError;
use crate::lineage::{LineageRankCache, TaxonomyResolver};
use crate::model::{Node, NodeIndex, Phylogeny, Taxonomy};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace, warn};

// =#========================================================================#=
// RANK COLORING
// =#========================================================================#=
/// Outcome of [`RankColorizer::colorize()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankColoring {
    /// Number of subtrees painted, over both passes
    pub colorizations: usize,
    /// Lineage labels the resolver failed on, sorted
    pub unresolved: BTreeSet<String>,
    /// Number of calls made to the resolver
    pub resolver_calls: usize,
}

/// Colors subtrees by the taxon they belong to at a given rank.
///
/// Holds the two collaborators of rank coloring: the (possibly remote, possibly
/// blocking) [TaxonomyResolver] and the process-wide [LineageRankCache] in
/// front of it. Both are borrowed, so one cache can serve many colorizers,
/// trees and threads.
///
/// # Example
/// ```
/// use cladetint::color::{Palette, TaxonomyColorer};
/// use cladetint::colorize::RankColorizer;
/// use cladetint::lineage::{LineageRankCache, OfflineResolver};
/// use cladetint::model::{NodeData, Phylogeny, Taxonomy};
///
/// let taxonomy = Taxonomy::from_scientific_name("Apteryx haastii")
///     .with_rank("species")
///     .with_lineage(["Aves", "Apteryx"]);
/// let mut tree = Phylogeny::new();
/// let roroa = tree.add_leaf(NodeData::named("Roroa").with_taxonomy(taxonomy));
/// tree.add_root(vec![roroa], NodeData::default())?;
///
/// let cache: LineageRankCache = [("Aves", "class"), ("Apteryx", "genus")].into_iter().collect();
/// let mut colorer = TaxonomyColorer::new(Palette::default());
/// let report = RankColorizer::new(&OfflineResolver, &cache)
///     .colorize(&mut tree, "genus", &mut colorer)?;
///
/// assert_eq!(report.colorizations, 1);
/// assert_eq!(report.resolver_calls, 0);
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
pub struct RankColorizer<'a, R: ?Sized> {
    resolver: &'a R,
    cache: &'a LineageRankCache,
}

/// State of a single [`RankColorizer::colorize()`] call.
struct Invocation<'r> {
    rank: &'r str,
    /// Colors assigned per scientific name / lineage label during this call
    lineage_colors: HashMap<String, Rgb>,
    report: RankColoring,
}

impl<'a, R: TaxonomyResolver + ?Sized> RankColorizer<'a, R> {
    /// Creates a colorizer consulting `cache` before `resolver`.
    pub fn new(resolver: &'a R, cache: &'a LineageRankCache) -> Self {
        RankColorizer { resolver, cache }
    }

    /// Colors every subtree belonging to a taxon of rank `rank`.
    ///
    /// # Pass A (post-order)
    /// Each node whose taxonomy has a name or code and whose rank equals
    /// `rank` (ignoring case) paints its subtree with its taxonomy color.
    /// The color is remembered under the scientific name; for a name painted
    /// twice, the node visited last wins.
    ///
    /// # Pass B (post-order)
    /// Each node still unset whose taxonomy has a lineage paints its subtree
    /// with the color of
    /// 1. the first lineage label remembered in pass A or earlier in pass B,
    ///    or else
    /// 2. the first label, in stored order, whose cached rank or (if not
    ///    cached) resolved rank equals `rank`.
    ///
    /// A label with a cached rank different from `rank` is skipped without
    /// asking the resolver. Resolved ranks are cached whether they match or
    /// not. A resolver failure marks the label as unresolved for the rest of
    /// this call and resolution continues with the next label. The tree's
    /// arena is not locked while the resolver runs, so views sharing it (see
    /// [extract_subtree](crate::extract::extract_subtree)) stay readable.
    ///
    /// # Errors
    /// * [AnnotationError::InvalidArgument] if `rank` is blank
    /// * Errors of [`Phylogeny::validate()`]
    ///
    /// Resolver failures are never returned, see [`RankColoring::unresolved`].
    pub fn colorize(
        &self,
        tree: &mut Phylogeny,
        rank: &str,
        colorer: &mut TaxonomyColorer,
    ) -> Result<RankColoring, AnnotationError> {
        if rank.trim().is_empty() {
            return Err(AnnotationError::invalid_argument("target rank must not be empty"));
        }
        let root = tree.validate()?;

        let mut call = Invocation {
            rank,
            lineage_colors: HashMap::new(),
            report: RankColoring::default(),
        };
        let (by_rank, candidates) = {
            let mut nodes = tree.nodes_mut();
            let order: Vec<NodeIndex> = nodes.post_order(root).map(Node::index).collect();

            // Pass A: nodes of the target rank
            for &index in &order {
                let Some(taxonomy) = nodes[index].taxonomy() else {
                    continue;
                };
                if !taxonomy.has_name_or_code() || !taxonomy.has_rank(rank) {
                    continue;
                }
                let color = colorer.taxonomy_color(taxonomy);
                let name = taxonomy.scientific_name().to_string();

                paint_subtree(&mut nodes, index, Some(color));
                call.report.colorizations += 1;
                if !name.is_empty() {
                    call.lineage_colors.insert(name, color);
                }
            }

            // Post-order: painting a candidate never reaches a later candidate
            let candidates: Vec<(NodeIndex, Vec<String>)> = order
                .iter()
                .filter_map(|&index| {
                    let node = &nodes[index];
                    if node.branch_color().is_some() {
                        return None;
                    }
                    match node.taxonomy() {
                        Some(taxonomy) if !taxonomy.lineage().is_empty() => {
                            Some((index, taxonomy.lineage().to_vec()))
                        }
                        _ => None,
                    }
                })
                .collect();
            (call.report.colorizations, candidates)
        };

        // Pass B: unset nodes, via their lineage. The resolver runs unlocked.
        for (index, lineage) in candidates {
            if let Some(color) = self.lineage_color(&lineage, &mut call, colorer) {
                paint_subtree(&mut tree.nodes_mut(), index, Some(color));
                call.report.colorizations += 1;
            }
        }

        debug!(
            rank,
            by_rank,
            by_lineage = call.report.colorizations - by_rank,
            resolver_calls = call.report.resolver_calls,
            unresolved = call.report.unresolved.len(),
            "colored by rank"
        );
        Ok(call.report)
    }

    /// Returns the color for the first entry of `lineage` that denotes a taxon
    /// of the target rank. Colors known from this call are looked up for all
    /// entries before the cache or resolver is consulted for any of them.
    fn lineage_color(
        &self,
        lineage: &[String],
        call: &mut Invocation<'_>,
        colorer: &mut TaxonomyColorer,
    ) -> Option<Rgb> {
        if let Some(&color) = lineage.iter().find_map(|label| call.lineage_colors.get(label)) {
            return Some(color);
        }

        for label in lineage.iter().filter(|label| !label.is_empty()) {
            let label_rank = match self.cache.get(label) {
                Some(cached) => {
                    trace!(label = label.as_str(), rank = %cached, "lineage rank cache hit");
                    cached
                }
                None => match self.resolve(label, call) {
                    Some(resolved) => resolved,
                    None => continue,
                },
            };

            let taxon = Taxonomy::from_scientific_name(label.as_str()).with_rank(label_rank);
            if !taxon.has_rank(call.rank) {
                continue;
            }
            let color = colorer.taxonomy_color(&taxon);
            call.lineage_colors.insert(label.clone(), color);
            return Some(color);
        }
        None
    }

    /// Asks the resolver for the rank of `label` and caches the answer.
    fn resolve(&self, label: &str, call: &mut Invocation<'_>) -> Option<String> {
        if call.report.unresolved.contains(label) {
            return None;
        }

        call.report.resolver_calls += 1;
        match self.resolver.lookup_rank(label) {
            Ok(rank) if !rank.trim().is_empty() => {
                self.cache.insert(label, rank.as_str());
                Some(rank)
            }
            Ok(_) => {
                warn!(label, "taxonomy resolver returned no rank");
                call.report.unresolved.insert(label.to_string());
                None
            }
            Err(error) => {
                warn!(label, %error, "could not resolve lineage rank");
                call.report.unresolved.insert(label.to_string());
                None
            }
        }
    }
}
