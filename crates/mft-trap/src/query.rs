//! Element Query Adapter
//!
//! Resolves caller-supplied references (selector string, element handle,
//! element list) against a host document, and classifies which descendants
//! of a container can take keyboard focus.

use mft_dom::{Document, NodeId};

/// A caller-supplied element reference, resolved once at the API boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    /// CSS selector, resolved with a single document-wide query
    Selector(String),
    /// A concrete element handle
    Element(NodeId),
    /// A collection of element handles
    Elements(Vec<NodeId>),
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Selector(s) => write!(f, "selector {s:?}"),
            Self::Element(id) => write!(f, "element {id:?}"),
            Self::Elements(ids) => write!(f, "{} elements", ids.len()),
        }
    }
}

impl From<&str> for ElementRef {
    fn from(s: &str) -> Self {
        Self::Selector(s.to_string())
    }
}

impl From<String> for ElementRef {
    fn from(s: String) -> Self {
        Self::Selector(s)
    }
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        Self::Element(id)
    }
}

impl From<Vec<NodeId>> for ElementRef {
    fn from(ids: Vec<NodeId>) -> Self {
        Self::Elements(ids)
    }
}

impl From<&[NodeId]> for ElementRef {
    fn from(ids: &[NodeId]) -> Self {
        Self::Elements(ids.to_vec())
    }
}

/// Resolve a reference to a single element.
///
/// A collection is accepted only when it holds exactly one live element.
/// Returns `None` for anything unresolvable; never panics.
pub fn resolve_one(doc: &Document, reference: &ElementRef) -> Option<NodeId> {
    match reference {
        ElementRef::Selector(s) => doc.query_selector(s),
        ElementRef::Element(id) => doc.tree().is_element(*id).then_some(*id),
        ElementRef::Elements(ids) => match ids.as_slice() {
            [only] if doc.tree().is_element(*only) => Some(*only),
            _ => None,
        },
    }
}

/// Resolve a reference to an ordered list of elements.
///
/// A selector yields its matches in document order (possibly empty); a
/// collection is filtered to its live elements. A single dead element
/// handle is unresolvable (`None`).
pub fn resolve_many(doc: &Document, reference: &ElementRef) -> Option<Vec<NodeId>> {
    match reference {
        ElementRef::Selector(s) => Some(doc.query_selector_all(s)),
        ElementRef::Element(id) => doc.tree().is_element(*id).then(|| vec![*id]),
        ElementRef::Elements(ids) => Some(
            ids.iter()
                .copied()
                .filter(|&id| doc.tree().is_element(id))
                .collect(),
        ),
    }
}

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// tabindex="-1" (or unparseable)
    NotFocusable,
    /// tabindex="0" or positive
    Sequential(i32),
}

impl TabIndex {
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Self::NotFocusable,
            Ok(n) => Self::Sequential(n),
            Err(_) => Self::NotFocusable,
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

/// Check an element counts as disabled: the `disabled` class, or a
/// `disabled` attribute whose value is not the literal string "false".
/// Non-elements are treated as disabled.
pub fn is_disabled(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.tree().get(id).and_then(|n| n.as_element()) else {
        return true;
    };
    if el.has_class("disabled") {
        return true;
    }
    match el.get_attr("disabled") {
        Some(value) => value != "false",
        None => false,
    }
}

/// Check an element is visible for focus purposes: it generates layout
/// boxes, computes to `visibility: visible`, and is not buried inside a
/// closed `<details>`.
///
/// Content of a closed `<details>` may still report layout boxes, so the
/// disclosure state is checked explicitly: the closed `<details>` element
/// itself and its own `<summary>` (with descendants) stay visible,
/// everything else inside is not.
pub fn is_visible(doc: &Document, id: NodeId) -> bool {
    let tree = doc.tree();
    let Some(el) = tree.get(id).and_then(|n| n.as_element()) else {
        return false;
    };
    if el.rects.is_empty() {
        return false;
    }

    let element_is_visible = tree.computed_visibility(id) == mft_dom::Visibility::Visible;

    let closed_details = closest(doc, id, |tag, el| {
        tag == "details" && !el.has_attr("open")
    });

    let Some(closed_details) = closed_details else {
        return element_is_visible;
    };

    if closed_details != id {
        let summary = closest(doc, id, |tag, _| tag == "summary");
        match summary {
            Some(summary) if tree.parent(summary) == Some(closed_details) => {}
            _ => return false,
        }
    }
    element_is_visible
}

/// Nearest ancestor-or-self element satisfying the predicate
fn closest(
    doc: &Document,
    id: NodeId,
    pred: impl Fn(&str, &mft_dom::ElementData) -> bool,
) -> Option<NodeId> {
    let tree = doc.tree();
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .find(|&candidate| {
            tree.get(candidate)
                .and_then(|n| n.as_element())
                .is_some_and(|el| pred(&el.tag, el))
        })
}

/// Check an element's tag/attributes put it on the focusable allow-list:
/// links with an href, form controls, `<details>`, media with controls,
/// a non-negative tabindex, or an editable region. A negative tabindex
/// opts any element out.
fn is_focus_candidate(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.tree().get(id).and_then(|n| n.as_element()) else {
        return false;
    };

    if let Some(value) = el.get_attr("tabindex") {
        return TabIndex::parse(value).is_focusable();
    }

    match el.tag.as_str() {
        "a" => el.has_attr("href"),
        "button" | "input" | "select" | "textarea" | "details" => true,
        "audio" | "video" => el.has_attr("controls"),
        _ => el.get_attr("contenteditable") == Some("true"),
    }
}

/// The focusable descendants of `container`, in document order, filtered
/// for disabled and invisible elements.
///
/// The order approximates but does not equal true tab order when positive
/// tabindex values are present.
pub fn focusable_children(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.tree()
        .descendants(container)
        .into_iter()
        .filter(|&id| {
            is_focus_candidate(doc, id) && !is_disabled(doc, id) && is_visible(doc, id)
        })
        .collect()
}
