//! Element extraction from parsed payloads

use std::collections::HashMap;

use xmltree::Element;

use crate::error::ParseResult;

/// Parse a payload string into an XML document
///
/// Returns the root element, or an error the caller should treat as
/// "no document" (log and continue, never crash).
pub fn parse_document(xml: &str) -> ParseResult<Element> {
    Ok(Element::parse(xml.as_bytes())?)
}

/// Text content of the first descendant element with the given tag
///
/// Searches the whole subtree under `doc`, in document order. Returns
/// `None` if no such element exists or it carries no text.
pub fn extract_scalar(doc: &Element, tag: &str) -> Option<String> {
    first_descendant(doc, tag)
        .and_then(|el| el.get_text())
        .map(|text| text.into_owned())
}

/// Extract a key→value mapping from a list-shaped payload
///
/// Iterates every descendant element named `record_tag`; each contributes
/// an entry only if both the `key_tag` and `value_tag` children are present
/// with non-empty text. Malformed records are skipped without aborting the
/// rest of the list. Duplicate keys last-write-win.
pub fn extract_records(
    doc: &Element,
    record_tag: &str,
    key_tag: &str,
    value_tag: &str,
) -> HashMap<String, String> {
    let mut records = Vec::new();
    collect_descendants(doc, record_tag, &mut records);

    let mut map = HashMap::new();
    for record in records {
        let key = child_text(record, key_tag);
        let value = child_text(record, value_tag);
        if let (Some(key), Some(value)) = (key, value) {
            map.insert(key, value);
        }
    }
    map
}

/// Non-empty text of a direct child element
fn child_text(parent: &Element, tag: &str) -> Option<String> {
    parent
        .get_child(tag)
        .and_then(|el| el.get_text())
        .map(|text| text.into_owned())
        .filter(|text| !text.is_empty())
}

fn first_descendant<'a>(parent: &'a Element, tag: &str) -> Option<&'a Element> {
    for node in &parent.children {
        if let Some(el) = node.as_element() {
            if el.name == tag {
                return Some(el);
            }
            if let Some(found) = first_descendant(el, tag) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_descendants<'a>(parent: &'a Element, tag: &str, out: &mut Vec<&'a Element>) {
    for node in &parent.children {
        if let Some(el) = node.as_element() {
            if el.name == tag {
                out.push(el);
            }
            collect_descendants(el, tag, out);
        }
    }
}
