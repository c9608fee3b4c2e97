use crate::model::Annotation;
use std::collections::BTreeMap;

/// Groups string values into a display text.
///
/// * `raw == false`: values are deduplicated and emitted sorted, one
///   `"value\tcount\n"` line each, where `count` is the number of occurrences
/// * `raw == true`: values are emitted unchanged in input order, one per line
///   (for molecular sequences and FASTA records)
///
/// Empty values are ignored in both modes.
///
/// # Returns
/// The text and the number of lines in it: distinct values (grouped) or
/// emitted values (raw).
///
/// # Example
/// ```
/// use cladetint::format::group_and_format;
///
/// let (text, count) = group_and_format(["Kea", "Kaka", "Kea"], false);
/// assert_eq!(text, "Kaka\t1\nKea\t2\n");
/// assert_eq!(count, 2);
/// ```
pub fn group_and_format<I, S>(values: I, raw: bool) -> (String, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    let values = values.into_iter().filter(|v| !v.as_ref().is_empty());

    if raw {
        let mut lines = 0;
        for value in values {
            text.push_str(value.as_ref());
            text.push('\n');
            lines += 1;
        }
        return (text, lines);
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.as_ref().to_string()).or_default() += 1;
    }
    for (value, count) in &counts {
        text.push_str(&format!("{}\t{}\n", value, count));
    }
    (text, counts.len())
}

/// Formats annotations grouped by the source of their reference.
///
/// Annotations without reference source are grouped under `"?"`. Groups are
/// emitted sorted by source and separated by a space; if there is more than
/// one group, each is wrapped in brackets. Within a group, entries are joined
/// with `", "`, each entry being the reference value and the description
/// separated by a space (either may be absent).
///
/// # Arguments
/// * `annotations` - Annotations in the order they should be listed per group
/// * `show_ref_source` - Prefix each group (other than `"?"`) with `"source: "`
///
/// # Example
/// ```
/// use cladetint::format::format_annotations;
/// use cladetint::model::Annotation;
///
/// let go = Annotation::new("GO:0005829")?.with_description("cytosol");
/// let ec = Annotation::new("EC:1.1.1.1")?;
/// assert_eq!(format_annotations([&ec, &go], true), "[EC: 1.1.1.1] [GO: 0005829 cytosol]");
/// # Ok::<(), cladetint::AnnotationError>(())
/// ```
pub fn format_annotations<'a, I>(annotations: I, show_ref_source: bool) -> String
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for annotation in annotations {
        let source = match annotation.ref_source() {
            "" => "?",
            source => source,
        };
        let entry = [annotation.ref_value(), annotation.description()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        groups.entry(source).or_default().push(entry);
    }

    let bracket = groups.len() > 1;
    groups
        .iter()
        .map(|(source, entries)| {
            let mut group = String::new();
            if bracket {
                group.push('[');
            }
            if show_ref_source && *source != "?" {
                group.push_str(source);
                group.push_str(": ");
            }
            group.push_str(&entries.join(", "));
            if bracket {
                group.push(']');
            }
            group
        })
        .collect::<Vec<_>>()
        .join(" ")
}
