//! Display text for string-valued node data: grouping and counting of values,
//! annotation summaries, and listings over external descendants.

mod descendants;
mod group;

pub use descendants::{
    NodeDataField, collect_external_data, describe_external_descendants, to_fasta,
};
pub use group::{format_annotations, group_and_format};
