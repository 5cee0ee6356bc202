//! Root-level template directives (`v-pre`, `v-once`).

use crate::markup::{Attribute, Element};
use serde::{Deserialize, Serialize};

/// Attribute that makes the template compiler skip compilation of the subtree.
pub const PRE_ATTRIBUTE: &str = "v-pre";
/// Attribute that renders the subtree once and treats it as static afterwards.
pub const ONCE_ATTRIBUTE: &str = "v-once";
/// Value written for injected directive attributes.
pub const DIRECTIVE_VALUE: &str = "true";

/// Two independent directive flags applied to the resolved root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveSet {
    /// Render once, then treat the subtree as static.
    #[serde(default)]
    pub once: bool,
    /// Parse literally, skipping directive and interpolation processing.
    #[serde(default)]
    pub pre: bool,
}

impl DirectiveSet {
    /// Whether neither flag is set.
    pub fn is_empty(&self) -> bool {
        !self.once && !self.pre
    }

    /// Attribute names to inject, `v-pre` first.
    pub fn attribute_names(&self) -> impl Iterator<Item = &'static str> {
        [(self.pre, PRE_ATTRIBUTE), (self.once, ONCE_ATTRIBUTE)]
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then_some(name))
    }
}

/// Append the enabled directive attributes to `root`.
///
/// Only appends; existing attributes and descendants are never touched. A
/// directive the root already declares is left as written.
pub fn inject_directives(root: &mut Element, directives: DirectiveSet) {
    for name in directives.attribute_names() {
        if root.has_attribute(name) {
            log::debug!("<{}> already declares {name}; leaving it as is", root.name);
            continue;
        }
        log::debug!("adding {name} to <{}>", root.name);
        root.attributes.push(Attribute::new(name, DIRECTIVE_VALUE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{MarkupMode, Node, parse, serialize_element};

    fn root(source: &str) -> Element {
        let mut doc = parse(source, MarkupMode::Faithful).unwrap();
        match doc.nodes.remove(0) {
            Node::Element(element) => element,
            other => panic!("expected element, got {other:?}"),
        }
    }

    fn injected(source: &str, directives: DirectiveSet) -> String {
        let mut element = root(source);
        inject_directives(&mut element, directives);
        serialize_element(&element, MarkupMode::Faithful)
    }

    #[test]
    fn no_flags_is_a_no_op() {
        let source = "<div class=\"a\"><span>x</span></div>";
        assert!(DirectiveSet::default().is_empty());
        assert_eq!(injected(source, DirectiveSet::default()), source);
    }

    #[test]
    fn pre_adds_v_pre() {
        let directives = DirectiveSet {
            pre: true,
            ..Default::default()
        };
        assert_eq!(
            injected("<svg xmlns=\"http://www.w3.org/2000/svg\"/>", directives),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" v-pre=\"true\"/>"
        );
    }

    #[test]
    fn once_adds_v_once() {
        let directives = DirectiveSet {
            once: true,
            ..Default::default()
        };
        assert_eq!(
            injected("<div>Hello world</div>", directives),
            "<div v-once=\"true\">Hello world</div>"
        );
    }

    #[test]
    fn both_flags_add_both_attributes() {
        let directives = DirectiveSet {
            once: true,
            pre: true,
        };
        assert_eq!(
            injected("<p id=\"x\"><b>y</b></p>", directives),
            "<p id=\"x\" v-pre=\"true\" v-once=\"true\"><b>y</b></p>"
        );
    }

    #[test]
    fn descendants_are_untouched() {
        let mut element = root("<ul><li>a</li></ul>");
        let before = element.children.clone();
        inject_directives(
            &mut element,
            DirectiveSet {
                once: true,
                pre: true,
            },
        );
        assert_eq!(element.children, before);
    }

    #[test]
    fn existing_directive_is_not_duplicated() {
        let directives = DirectiveSet {
            pre: true,
            ..Default::default()
        };
        assert_eq!(
            injected("<div v-pre=\"\"></div>", directives),
            "<div v-pre=\"\"></div>"
        );
    }

    #[test]
    fn applies_to_empty_containers() {
        let mut element = Element::new("div");
        inject_directives(
            &mut element,
            DirectiveSet {
                once: true,
                pre: false,
            },
        );
        assert_eq!(
            serialize_element(&element, MarkupMode::Permissive),
            "<div v-once=\"true\"></div>"
        );
    }
}
