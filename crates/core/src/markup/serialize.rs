//! Serializers matching each parse mode.

use super::{Element, MarkupMode, Node};

/// HTML elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// HTML elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
    // scraper parses with scripting enabled, so <noscript> content arrives as text
    "noscript",
];

/// Serialize a node (and its subtree) with the serializer matching `mode`.
pub fn serialize_node(node: &Node, mode: MarkupMode) -> String {
    let mut out = String::new();
    match mode {
        MarkupMode::Faithful => write_faithful(node, &mut out),
        MarkupMode::Permissive => write_permissive(node, false, &mut out),
    }
    out
}

/// Serialize a single element (and its subtree) with the serializer matching `mode`.
pub fn serialize_element(element: &Element, mode: MarkupMode) -> String {
    let mut out = String::new();
    match mode {
        MarkupMode::Faithful => write_faithful_element(element, &mut out),
        MarkupMode::Permissive => write_permissive_element(element, &mut out),
    }
    out
}

fn write_faithful(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_faithful_element(element, out),
        Node::Text(text) => out.push_str(text),
        Node::Comment(comment) => write_comment(comment, out),
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
    }
}

fn write_faithful_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push_str(attr.leading.as_deref().unwrap_or(" "));
        out.push_str(&attr.name);
        out.push_str(attr.separator.as_deref().unwrap_or("="));
        out.push(attr.quote.as_char());
        out.push_str(&attr.value);
        out.push(attr.quote.as_char());
    }
    if let Some(trailing) = &element.trailing {
        out.push_str(trailing);
    }
    if element.self_closing && element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &element.children {
        write_faithful(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    if let Some(end_trailing) = &element.end_trailing {
        out.push_str(end_trailing);
    }
    out.push('>');
}

fn write_permissive(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Element(element) => write_permissive_element(element, out),
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) | Node::CData(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Comment(comment) => write_comment(comment, out),
    }
}

fn write_permissive_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&element.name.as_str()) {
        return;
    }
    let raw_text = RAW_TEXT_ELEMENTS.contains(&element.name.as_str());
    for child in &element.children {
        write_permissive(child, raw_text, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn write_comment(comment: &str, out: &mut String) {
    out.push_str("<!--");
    out.push_str(comment);
    out.push_str("-->");
}
