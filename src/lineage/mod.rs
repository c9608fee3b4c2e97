//! Resolution of lineage labels to taxonomic ranks: the [TaxonomyResolver]
//! collaborator and the [LineageRankCache] memoizing its answers.

pub mod cache;
pub mod resolver;

pub use cache::LineageRankCache;
pub use resolver::{OfflineResolver, ResolveError, TaxonomyResolver};
