//! Sequence data and string annotations attached to tree nodes.

use crate::error::AnnotationError;
use std::fmt;

// =#========================================================================#=
// SEQUENCE
// =#========================================================================#=
/// Molecular sequence information of a node.
///
/// Text fields use the empty string for "absent".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    name: String,
    symbol: String,
    gene_name: String,
    accession: Option<Accession>,
    molecular_sequence: String,
}

impl Sequence {
    /// Creates a new, empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a sequence name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches a symbol.
    pub fn with_symbol<S: Into<String>>(mut self, symbol: S) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Attaches a gene name.
    pub fn with_gene_name<S: Into<String>>(mut self, gene_name: S) -> Self {
        self.gene_name = gene_name.into();
        self
    }

    /// Attaches an accession.
    pub fn with_accession(mut self, accession: Accession) -> Self {
        self.accession = Some(accession);
        self
    }

    /// Attaches the molecular sequence itself.
    pub fn with_molecular_sequence<S: Into<String>>(mut self, sequence: S) -> Self {
        self.molecular_sequence = sequence.into();
        self
    }

    /// Returns the name; empty if absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol; empty if absent.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the gene name; empty if absent.
    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }

    /// Returns the accession, if any.
    pub fn accession(&self) -> Option<&Accession> {
        self.accession.as_ref()
    }

    /// Returns the molecular sequence; empty if absent.
    pub fn molecular_sequence(&self) -> &str {
        &self.molecular_sequence
    }

    /// Returns `true` if no accession, name, gene name or symbol is present.
    pub fn is_empty(&self) -> bool {
        self.accession.is_none()
            && self.name.is_empty()
            && self.gene_name.is_empty()
            && self.symbol.is_empty()
    }
}

/// Accession of a sequence in a database, e.g. `UniProtKB:Q9BYF1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accession {
    value: String,
    source: String,
}

impl Accession {
    /// Creates a new accession; `source` may be empty.
    pub fn new<V: Into<String>, S: Into<String>>(value: V, source: S) -> Self {
        Accession {
            value: value.into(),
            source: source.into(),
        }
    }

    /// Returns the accession value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the source database; empty if absent.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}:{}", self.source, self.value)
        }
    }
}

// =#========================================================================#=
// ANNOTATION
// =#========================================================================#=
/// String annotation of a node, e.g. a GO term with description.
///
/// The reference has the form `source:value` (e.g. `GO:0005829`) or is
/// empty. Annotations order by reference, then description.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotation {
    reference: String,
    description: String,
}

impl Annotation {
    /// Creates an annotation from a `source:value` reference.
    ///
    /// # Errors
    /// [AnnotationError::InvalidAnnotationRef] if `reference` is shorter than
    /// three characters or the first colon is at the start or the end.
    pub fn new<S: Into<String>>(reference: S) -> Result<Self, AnnotationError> {
        let reference = reference.into();
        let valid = match reference.find(':') {
            Some(colon) => colon >= 1 && colon + 1 < reference.len() && reference.len() >= 3,
            None => false,
        };
        if !valid {
            return Err(AnnotationError::InvalidAnnotationRef(reference));
        }

        Ok(Annotation {
            reference,
            description: String::new(),
        })
    }

    /// Creates an annotation without reference, holding only a description.
    pub fn from_description<S: Into<String>>(description: S) -> Self {
        Annotation {
            reference: String::new(),
            description: description.into(),
        }
    }

    /// Attaches a description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the full reference; empty if absent.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the description; empty if absent.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the part of the reference before the first colon, or empty.
    pub fn ref_source(&self) -> &str {
        self.reference
            .split_once(':')
            .map(|(source, _)| source)
            .unwrap_or("")
    }

    /// Returns the part of the reference after the first colon, or empty.
    pub fn ref_value(&self) -> &str {
        self.reference
            .split_once(':')
            .map(|(_, value)| value)
            .unwrap_or("")
    }
}
