//! Reduces a parsed fragment to exactly one root element.

use crate::markup::{Document, Element, MarkupMode, Node, serialize_element};

/// Tag name of the container synthesized around multi-node or empty fragments.
pub const CONTAINER_TAG: &str = "div";

/// The single element that becomes the component template's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    /// Mode the source document was parsed with.
    pub mode: MarkupMode,
    /// The root element.
    pub element: Element,
    /// Whether `element` is a synthesized container rather than source markup.
    pub synthesized: bool,
}

impl ResolvedRoot {
    /// Serialize the root element with the document's mode.
    pub fn serialize(&self) -> String {
        serialize_element(&self.element, self.mode)
    }
}

/// Consolidate the document's top-level nodes into a single root element.
///
/// Whitespace-only text and comments at the top level are discarded. A lone
/// remaining element becomes the root as is; anything else (nothing, several
/// elements, or stray text) is moved, in order, into a fresh container.
pub fn consolidate(document: Document) -> ResolvedRoot {
    let Document { mode, nodes } = document;

    let mut kept: Vec<Node> = nodes
        .into_iter()
        .filter(|node| !node.is_blank_text() && !matches!(node, Node::Comment(_)))
        .collect();

    let single_element = kept.len() == 1 && matches!(kept.first(), Some(Node::Element(_)));
    if single_element && let Some(Node::Element(element)) = kept.pop() {
        return ResolvedRoot {
            mode,
            element,
            synthesized: false,
        };
    }

    log::debug!(
        "wrapping {} top-level node(s) in a <{}> container",
        kept.len(),
        CONTAINER_TAG
    );

    let mut container = Element::new(CONTAINER_TAG);
    container.children = kept;

    ResolvedRoot {
        mode,
        element: container,
        synthesized: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    fn resolve(source: &str, mode: MarkupMode) -> ResolvedRoot {
        consolidate(parse(source, mode).unwrap())
    }

    #[test]
    fn single_element_is_kept_in_place() {
        let root = resolve("\n  <div>Hello world</div>\n", MarkupMode::Permissive);
        assert!(!root.synthesized);
        assert_eq!(root.serialize(), "<div>Hello world</div>");
    }

    #[test]
    fn sibling_elements_are_wrapped_in_order() {
        let root = resolve("<div>Hello</div><div>World</div>", MarkupMode::Permissive);
        assert!(root.synthesized);
        assert_eq!(root.element.name, CONTAINER_TAG);
        assert_eq!(root.serialize(), "<div><div>Hello</div><div>World</div></div>");
    }

    #[test]
    fn whitespace_between_siblings_is_dropped() {
        let root = resolve("<p a=\"1\">A</p>\n<p b=\"2\">B</p>\n", MarkupMode::Faithful);
        assert_eq!(
            root.serialize(),
            "<div><p a=\"1\">A</p><p b=\"2\">B</p></div>"
        );
    }

    #[test]
    fn whitespace_only_input_yields_empty_container() {
        for mode in [MarkupMode::Permissive, MarkupMode::Faithful] {
            let root = resolve(" \n ", mode);
            assert!(root.synthesized);
            assert!(root.element.children.is_empty());
            assert_eq!(root.serialize(), "<div></div>");
        }
    }

    #[test]
    fn empty_input_yields_empty_container() {
        assert_eq!(resolve("", MarkupMode::Faithful).serialize(), "<div></div>");
    }

    #[test]
    fn bare_text_is_wrapped() {
        let root = resolve("just text", MarkupMode::Permissive);
        assert!(root.synthesized);
        assert_eq!(root.serialize(), "<div>just text</div>");
    }

    #[test]
    fn element_with_text_sibling_is_wrapped() {
        let root = resolve("<b>bold</b> tail", MarkupMode::Faithful);
        assert_eq!(root.serialize(), "<div><b>bold</b> tail</div>");
    }

    #[test]
    fn comments_do_not_count_as_roots() {
        let root = resolve("<!-- generated --><svg/>", MarkupMode::Faithful);
        assert!(!root.synthesized);
        assert_eq!(root.serialize(), "<svg/>");
    }

    #[test]
    fn xml_prolog_is_stripped() {
        let root = resolve(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
            MarkupMode::Faithful,
        );
        assert!(!root.synthesized);
        assert_eq!(root.serialize(), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
    }

    #[test]
    fn faithful_single_root_round_trips() {
        let source = "<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\"><use xlink:href=\"#x\"/></svg>";
        assert_eq!(resolve(source, MarkupMode::Faithful).serialize(), source);
    }
}
