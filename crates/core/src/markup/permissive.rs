//! Tolerant HTML fragment parsing through scraper's html5ever tree builder.

use super::{Attribute, Element, Node};
use scraper::{ElementRef, Html, Node as HtmlNode};

pub(super) fn parse_fragment(source: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(source);
    // html5ever hangs fragment content off a synthetic <html> element.
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            HtmlNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    nodes.push(Node::Element(convert_element(element)));
                }
            }
            HtmlNode::Text(text) => nodes.push(Node::Text(String::from(&**text))),
            HtmlNode::Comment(comment) => nodes.push(Node::Comment(String::from(&**comment))),
            _ => {}
        }
    }
    nodes
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element {
        name: value.name().to_string(),
        attributes: value
            .attrs()
            .map(|(name, value)| Attribute::new(name, value))
            .collect(),
        children: convert_children(element),
        self_closing: false,
        trailing: None,
        end_trailing: None,
    }
}
