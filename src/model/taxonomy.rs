//! Taxonomy data attached to tree nodes.
//!
//! Provides [Taxonomy], its optional [Identifier], and [TaxonomyKey], the
//! normalized value two taxonomies are compared by when aggregating over
//! external descendants.

use std::hash::{Hash, Hasher};

// =#========================================================================#=
// IDENTIFIER
// =#========================================================================#=
/// Identifier of a taxonomy in some database, e.g. `ncbi:8822`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Identifier {
    value: String,
    provider: String,
}

impl Identifier {
    /// Creates a new identifier.
    ///
    /// # Arguments
    /// * `value` - The identifier itself, e.g. `"8822"`
    /// * `provider` - The database, e.g. `"ncbi"`; may be empty
    pub fn new<V: Into<String>, P: Into<String>>(value: V, provider: P) -> Self {
        Identifier {
            value: value.into(),
            provider: provider.into(),
        }
    }

    /// Returns the identifier value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the provider (database) of this identifier.
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

// =#========================================================================#=
// TAXONOMY
// =#========================================================================#=
/// Taxonomic information of a node.
///
/// Text fields use the empty string for "absent". The lineage is kept in the
/// order it was given (typically root to leaf); the engine walks it in that
/// stored order.
///
/// # Equality
/// [PartialEq] and [Hash] compare the normalized [TaxonomyKey], not every
/// field: two taxonomies with the same scientific name but different lineages
/// are equal. This is the equality used for aggregation.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    identifier: Option<Identifier>,
    code: String,
    scientific_name: String,
    common_name: String,
    authority: String,
    rank: String,
    synonyms: Vec<String>,
    lineage: Vec<String>,
}

impl Taxonomy {
    /// Creates a new, empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a taxonomy carrying only a scientific name.
    pub fn from_scientific_name<S: Into<String>>(name: S) -> Self {
        Taxonomy::new().with_scientific_name(name)
    }

    /// Attaches an identifier.
    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Attaches a taxonomy code (e.g. UniProt mnemonic `APTHA`).
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = code.into();
        self
    }

    /// Attaches a scientific name.
    pub fn with_scientific_name<S: Into<String>>(mut self, name: S) -> Self {
        self.scientific_name = name.into();
        self
    }

    /// Attaches a common name.
    pub fn with_common_name<S: Into<String>>(mut self, name: S) -> Self {
        self.common_name = name.into();
        self
    }

    /// Attaches the authority of the scientific name.
    pub fn with_authority<S: Into<String>>(mut self, authority: S) -> Self {
        self.authority = authority.into();
        self
    }

    /// Attaches a rank (e.g. `"species"`, `"genus"`).
    pub fn with_rank<S: Into<String>>(mut self, rank: S) -> Self {
        self.rank = rank.into();
        self
    }

    /// Attaches synonyms.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a lineage, kept in the given order.
    pub fn with_lineage<I, S>(mut self, lineage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lineage = lineage.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the identifier, if any.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Returns the taxonomy code; empty if absent.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the scientific name; empty if absent.
    pub fn scientific_name(&self) -> &str {
        &self.scientific_name
    }

    /// Returns the common name; empty if absent.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Returns the authority; empty if absent.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns the rank; empty if absent.
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// Returns the synonyms.
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Returns the lineage in stored order.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// Returns `true` if this taxonomy carries no identifying data: no
    /// identifier, and code, common name, scientific name and synonyms all
    /// empty. Rank and lineage alone do not make a taxonomy non-empty.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none()
            && self.code.is_empty()
            && self.common_name.is_empty()
            && self.scientific_name.is_empty()
            && self.synonyms.is_empty()
    }

    /// Returns `true` if scientific name, common name or code is present.
    pub fn has_name_or_code(&self) -> bool {
        !self.scientific_name.is_empty() || !self.common_name.is_empty() || !self.code.is_empty()
    }

    /// Returns `true` if the rank equals `rank`, ignoring ASCII case.
    /// An empty rank never matches.
    pub fn has_rank(&self, rank: &str) -> bool {
        !self.rank.is_empty() && self.rank.eq_ignore_ascii_case(rank)
    }

    /// Returns the normalized value this taxonomy is compared by.
    ///
    /// Precedence: identifier (with a non-empty value), code, scientific
    /// name (+ authority), common name, synonyms. Names are case-folded.
    pub fn key(&self) -> TaxonomyKey {
        if let Some(id) = self.identifier.as_ref().filter(|id| !id.value.is_empty()) {
            TaxonomyKey::Identifier {
                provider: id.provider.clone(),
                value: id.value.clone(),
            }
        } else if !self.code.is_empty() {
            TaxonomyKey::Code(self.code.clone())
        } else if !self.scientific_name.is_empty() {
            TaxonomyKey::ScientificName {
                name: self.scientific_name.to_lowercase(),
                authority: self.authority.to_lowercase(),
            }
        } else if !self.common_name.is_empty() {
            TaxonomyKey::CommonName(self.common_name.to_lowercase())
        } else if !self.synonyms.is_empty() {
            TaxonomyKey::Synonyms(self.synonyms.iter().map(|s| s.to_lowercase()).collect())
        } else {
            TaxonomyKey::Empty
        }
    }
}

impl PartialEq for Taxonomy {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Taxonomy {}

impl Hash for Taxonomy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

// =#========================================================================#=
// TAXONOMY KEY
// =#========================================================================#=
/// Normalized identity of a [Taxonomy], see [`Taxonomy::key()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaxonomyKey {
    /// Database identifier
    Identifier {
        /// Database
        provider: String,
        /// Identifier within database
        value: String,
    },
    /// Taxonomy code, case-sensitive
    Code(String),
    /// Lower-cased scientific name with lower-cased authority (may be empty)
    ScientificName {
        /// Scientific name
        name: String,
        /// Authority
        authority: String,
    },
    /// Lower-cased common name
    CommonName(String),
    /// Lower-cased synonyms in stored order
    Synonyms(Vec<String>),
    /// No identifying data
    Empty,
}
