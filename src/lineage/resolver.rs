//! The external collaborator resolving lineage labels to ranks.

/// Failure of a single rank lookup.
///
/// Never fatal for the engine: the affected lineage label counts as
/// unresolved and resolution continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Label unknown to the taxonomy service
    #[error("Taxonomy '{0}' not found")]
    NotFound(String),

    /// Transport failure
    #[error("Network error - {0}")]
    Network(String),

    /// Lookup did not finish in time
    #[error("Lookup timed out")]
    Timeout,

    /// Service answered with something unusable
    #[error("Malformed response - {0}")]
    Malformed(String),

    /// No service available
    #[error("Taxonomy service is offline")]
    Offline,
}

/// Looks up the taxonomic rank of a lineage label, typically remotely.
///
/// Implementations may block. Rank coloring calls [`lookup_rank()`] at most
/// once per unresolved label per invocation and treats every error, including
/// timeouts imposed by the implementation, the same way.
///
/// Closures `Fn(&str) -> Result<String, ResolveError>` implement this trait.
///
/// [`lookup_rank()`]: TaxonomyResolver::lookup_rank
pub trait TaxonomyResolver {
    /// Returns the rank (e.g. `"genus"`) of `lineage_label` (e.g. `"Apteryx"`).
    fn lookup_rank(&self, lineage_label: &str) -> Result<String, ResolveError>;
}

impl<F> TaxonomyResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError>,
{
    fn lookup_rank(&self, lineage_label: &str) -> Result<String, ResolveError> {
        self(lineage_label)
    }
}

/// Resolver for working without a taxonomy service: every lookup fails with
/// [ResolveError::Offline], so only cached ranks are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResolver;

impl TaxonomyResolver for OfflineResolver {
    fn lookup_rank(&self, _lineage_label: &str) -> Result<String, ResolveError> {
        Err(ResolveError::Offline)
    }
}
