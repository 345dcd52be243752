//! Pre-order traversal over a parsed HTML element tree.

use scraper::ElementRef;

/// Visits `root` and every element below it, depth-first in document order.
pub(crate) fn walk<'a, F>(root: ElementRef<'a>, mut visit: F)
where
    F: FnMut(ElementRef<'a>),
{
    for node in root.descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            visit(element);
        }
    }
}

/// Returns the first element, in pre-order, that satisfies `matches`.
pub(crate) fn find_first<'a, P>(root: ElementRef<'a>, mut matches: P) -> Option<ElementRef<'a>>
where
    P: FnMut(&ElementRef<'a>) -> bool,
{
    let mut found = None;
    walk(root, |element| {
        if found.is_none() && matches(&element) {
            found = Some(element);
        }
    });
    found
}

/// Immediate element children of `parent`.
pub(crate) fn child_elements<'a>(parent: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    parent.children().filter_map(ElementRef::wrap)
}

/// Returns true if `element` has the given tag name.
pub(crate) fn is_tag(element: &ElementRef<'_>, tag: &str) -> bool {
    element.value().name() == tag
}
