use super::group::group_and_format;
use crate::aggregate::check_node;
use crate::error::AnnotationError;
use crate::model::{Node, NodeIndex, Phylogeny};

/// Line width of the sequence part of FASTA records.
const FASTA_WIDTH: usize = 60;

/// A per-node field that can be listed over external descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeDataField {
    /// Node name
    NodeName,
    /// Sequence name
    SequenceName,
    /// Gene name of the sequence
    GeneName,
    /// Sequence symbol
    SequenceSymbol,
    /// Molecular sequence, unformatted
    MolecularSequence,
    /// Molecular sequence as FASTA record, see [to_fasta]
    Fasta,
    /// Sequence accession as `source:value`
    SequenceAccession,
    /// Taxonomy scientific name
    ScientificName,
    /// Taxonomy common name
    CommonName,
    /// Taxonomy code
    TaxonomyCode,
}

impl NodeDataField {
    /// Returns `true` for fields listed as-is rather than grouped and counted.
    pub fn is_raw(self) -> bool {
        matches!(self, NodeDataField::MolecularSequence | NodeDataField::Fasta)
    }

    /// Returns the value of this field of `node`, `None` if absent or empty.
    pub fn extract(self, node: &Node) -> Option<String> {
        let data = node.data();
        let sequence = data.sequence.as_ref();
        let taxonomy = data.taxonomy.as_ref();

        let value = match self {
            NodeDataField::NodeName => data.name.clone(),
            NodeDataField::SequenceName => sequence?.name().to_string(),
            NodeDataField::GeneName => sequence?.gene_name().to_string(),
            NodeDataField::SequenceSymbol => sequence?.symbol().to_string(),
            NodeDataField::MolecularSequence => sequence?.molecular_sequence().to_string(),
            NodeDataField::Fasta => to_fasta(node)?,
            NodeDataField::SequenceAccession => sequence?.accession()?.to_string(),
            NodeDataField::ScientificName => taxonomy?.scientific_name().to_string(),
            NodeDataField::CommonName => taxonomy?.common_name().to_string(),
            NodeDataField::TaxonomyCode => taxonomy?.code().to_string(),
        };

        Some(value).filter(|v| !v.is_empty())
    }
}

/// Returns the values of `field` over the external descendants of `node`,
/// in pre-order, skipping leaves without a value.
///
/// # Errors
/// [AnnotationError::UnknownNode] if `node` is not in the tree's arena.
pub fn collect_external_data(
    tree: &Phylogeny,
    node: NodeIndex,
    field: NodeDataField,
) -> Result<Vec<String>, AnnotationError> {
    let nodes = tree.nodes();
    check_node(&nodes, node)?;
    Ok(nodes
        .external_descendants(node)
        .filter_map(|leaf| field.extract(leaf))
        .collect())
}

/// Lists `field` over the external descendants of `node` as display text,
/// see [group_and_format]. Sequence fields are listed raw, all others are
/// grouped and counted.
///
/// # Returns
/// The text and its number of lines.
///
/// # Errors
/// [AnnotationError::UnknownNode] if `node` is not in the tree's arena.
pub fn describe_external_descendants(
    tree: &Phylogeny,
    node: NodeIndex,
    field: NodeDataField,
) -> Result<(String, usize), AnnotationError> {
    let values = collect_external_data(tree, node, field)?;
    Ok(group_and_format(values, field.is_raw()))
}

/// Returns a FASTA record of the molecular sequence of `node`, or `None` if
/// it has none.
///
/// The header joins the node name, `SYM=`symbol, `NAME=`sequence name,
/// `GN=`gene name, `ACC=`accession, `TAXID=`taxonomy code and
/// `SN=`scientific name with `|`, leaving out absent parts. The sequence is
/// wrapped at 60 columns. There is no trailing newline.
///
/// # Example
/// ```
/// use cladetint::format::to_fasta;
/// use cladetint::model::{NodeData, Phylogeny, Sequence};
///
/// let mut tree = Phylogeny::new();
/// let leaf = tree.add_leaf(NodeData::named("kiwi1")
///     .with_sequence(Sequence::new().with_symbol("MC1R").with_molecular_sequence("MAVQ")));
///
/// assert_eq!(to_fasta(&tree.node(leaf)).as_deref(), Some(">kiwi1|SYM=MC1R\nMAVQ"));
/// ```
pub fn to_fasta(node: &Node) -> Option<String> {
    let data = node.data();
    let sequence = data.sequence.as_ref()?;
    if sequence.molecular_sequence().is_empty() {
        return None;
    }

    let mut header: Vec<String> = Vec::new();
    if !data.name.is_empty() {
        header.push(data.name.clone());
    }
    let tagged = [
        ("SYM=", sequence.symbol()),
        ("NAME=", sequence.name()),
        ("GN=", sequence.gene_name()),
    ];
    header.extend(
        tagged
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(tag, value)| format!("{}{}", tag, value)),
    );
    if let Some(accession) = sequence.accession() {
        header.push(format!("ACC={}", accession));
    }
    if let Some(taxonomy) = data.taxonomy.as_ref() {
        if !taxonomy.code().is_empty() {
            header.push(format!("TAXID={}", taxonomy.code()));
        }
        if !taxonomy.scientific_name().is_empty() {
            header.push(format!("SN={}", taxonomy.scientific_name()));
        }
    }

    let residues: Vec<char> = sequence.molecular_sequence().chars().collect();
    let lines: Vec<String> = residues
        .chunks(FASTA_WIDTH)
        .map(|line| line.iter().collect())
        .collect();

    Some(format!(">{}\n{}", header.join("|"), lines.join("\n")))
}
