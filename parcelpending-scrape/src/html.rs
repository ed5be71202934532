//! HTML helpers shared by the login negotiator and the extraction strategies.

use scraper::{ElementRef, Html, Node, Selector};

use parcelpending_fetch::LabelMatcher;

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the whitespace-normalized text of an element.
///
/// Text from adjacent nodes is joined with a space so `<b>a</b><b>b</b>`
/// reads as `a b`.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<Vec<_>>().join(" "))
}

/// Selects matching elements from a document.
///
/// An unparseable selector selects nothing.
pub fn select_document<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Selects matching descendants of an element.
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Returns the lowercased `class` attribute, or an empty string.
pub fn class_of(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .to_lowercase()
}

/// Returns true if the element's class attribute contains any keyword.
///
/// Keywords are matched as lowercase substrings of the whole attribute.
pub fn class_has_any(element: ElementRef<'_>, keywords: &[&str]) -> bool {
    let class = class_of(element);
    !class.is_empty() && keywords.iter().any(|k| class.contains(k))
}

/// Returns true if `inner` sits somewhere below `outer`.
fn encloses(outer: ElementRef<'_>, inner: ElementRef<'_>) -> bool {
    inner.ancestors().any(|a| a.id() == outer.id())
}

/// Counts the text nodes of `element` carrying `anchor`.
fn anchor_count(element: ElementRef<'_>, anchor: &str, matcher: &dyn LabelMatcher) -> usize {
    element
        .descendants()
        .filter_map(|n| n.value().as_text().map(|t| matcher.matches(t, anchor)))
        .filter(|found| *found)
        .count()
}

/// Returns the elements whose class carries one of `keywords` and that each
/// hold a single record.
///
/// A container with exactly one `anchor` fragment is a record; the outermost
/// such container is kept so fields in classed children stay together.
/// Containers with several anchors are lists and are skipped in favour of
/// their children. Containers without any anchor are kept only when they are
/// innermost and not part of an anchored record.
pub fn record_containers<'a>(
    document: &'a Html,
    keywords: &[&str],
    anchor: &str,
    matcher: &dyn LabelMatcher,
) -> Vec<ElementRef<'a>> {
    let candidates: Vec<_> = select_document(document, "[class]")
        .into_iter()
        .filter(|e| class_has_any(*e, keywords))
        .map(|e| (e, anchor_count(e, anchor, matcher)))
        .collect();

    let anchored: Vec<_> = candidates
        .iter()
        .filter(|(_, count)| *count == 1)
        .map(|(e, _)| *e)
        .collect();

    candidates
        .iter()
        .filter(|(element, count)| match *count {
            1 => !anchored.iter().any(|outer| encloses(*outer, *element)),
            0 => {
                !anchored.iter().any(|outer| encloses(*outer, *element))
                    && !candidates
                        .iter()
                        .any(|(inner, c)| *c == 0 && encloses(*element, *inner))
            }
            _ => false,
        })
        .map(|(element, _)| *element)
        .collect()
}

/// Returns the normalized text of a sibling node, if it has any.
fn node_text(node: &Node, element: Option<ElementRef<'_>>) -> Option<String> {
    let text = if let Some(text) = node.as_text() {
        normalize_ws(text)
    } else if let Some(element) = element {
        element_text(element)
    } else {
        String::new()
    };
    (!text.is_empty()).then_some(text)
}

/// Finds the value of the first `label` fragment inside `container`.
///
/// Text nodes are tested in document order with `matcher`. When the label
/// stands alone in its node, the value is taken from the next non-empty
/// sibling of the node, then from the next sibling of its parent element
/// (unless that parent is the container itself).
pub fn labelled_value(
    container: ElementRef<'_>,
    label: &str,
    matcher: &dyn LabelMatcher,
) -> Option<String> {
    for node in container.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let Some(value) = matcher.value(text, label) else {
            continue;
        };

        let value = normalize_ws(&value);
        if !value.is_empty() {
            return Some(value);
        }

        if let Some(value) = node
            .next_siblings()
            .find_map(|n| node_text(n.value(), ElementRef::wrap(n)))
        {
            return Some(value);
        }

        let parent = node.parent().and_then(ElementRef::wrap);
        if let Some(parent) = parent.filter(|p| p.id() != container.id()) {
            if let Some(value) = parent
                .next_siblings()
                .find_map(|n| node_text(n.value(), ElementRef::wrap(n)))
            {
                return Some(value);
            }
        }
    }
    None
}
