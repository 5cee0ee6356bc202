//! Well-formed markup parser built on quick-xml that keeps the raw source text.

use super::{Attribute, Element, Node, Quote};
use crate::MalformedMarkupError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

pub(super) fn parse_fragment(source: &str) -> Result<Vec<Node>, MalformedMarkupError> {
    FragmentParser::new(source).parse()
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    element: Element,
    /// Byte offset of the `<` that opened this element.
    start_offset: usize,
}

struct FragmentParser<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    stack: Vec<OpenElement>,
    nodes: Vec<Node>,
}

impl<'a> FragmentParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        config.check_end_names = true;
        config.expand_empty_elements = false;

        Self {
            source,
            reader,
            stack: Vec::new(),
            nodes: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<Node>, MalformedMarkupError> {
        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = self.element_from_tag(&e, event_start)?;
                    self.stack.push(OpenElement {
                        element,
                        start_offset: event_start,
                    });
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let open = self.stack.pop().ok_or_else(|| {
                        self.error(format!("unexpected closing tag </{name}>"), event_start)
                    })?;
                    if open.element.name != name {
                        return Err(self.error(
                            format!(
                                "mismatched closing tag: expected </{}>, found </{name}>",
                                open.element.name
                            ),
                            event_start,
                        ));
                    }
                    let mut element = open.element;
                    element.end_trailing = self.end_tag_whitespace(event_start);
                    self.push_node(Node::Element(element));
                }
                Ok(Event::Empty(e)) => {
                    let mut element = self.element_from_tag(&e, event_start)?;
                    element.self_closing = true;
                    self.push_node(Node::Element(element));
                }
                Ok(Event::Text(e)) => {
                    if e.is_empty() {
                        continue;
                    }
                    e.unescape().map_err(|err| {
                        self.error(format!("invalid text content: {err}"), event_start)
                    })?;
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    self.push_node(Node::Text(raw));
                }
                Ok(Event::CData(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    self.push_node(Node::CData(raw));
                }
                Ok(Event::Comment(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    self.push_node(Node::Comment(raw));
                }
                Ok(Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {
                    log::trace!("dropping prolog construct at byte {event_start}");
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    let position = self.reader.error_position() as usize;
                    return Err(self.error(err.to_string(), position));
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(self.error(
                format!("unclosed tag <{}>", open.element.name),
                open.start_offset,
            ));
        }

        Ok(self.nodes)
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.element.children.push(node),
            None => self.nodes.push(node),
        }
    }

    /// Validate the start tag's attributes, then rebuild them from the raw tag
    /// text so quoting and spacing survive serialization.
    fn element_from_tag(
        &self,
        tag: &BytesStart<'_>,
        event_start: usize,
    ) -> Result<Element, MalformedMarkupError> {
        for attr in tag.attributes() {
            let attr = attr.map_err(|err| {
                self.error(format!("invalid attribute: {err}"), event_start)
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if attr.value.contains(&b'<') {
                return Err(self.error(
                    format!("unescaped '<' in value of attribute '{key}'"),
                    event_start,
                ));
            }
            attr.unescape_value().map_err(|err| {
                self.error(
                    format!("invalid value of attribute '{key}': {err}"),
                    event_start,
                )
            })?;
        }

        let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(tag);
        let rest = raw.get(name.len()..).unwrap_or_default();
        let (attributes, trailing) = scan_attributes(rest);

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
            self_closing: false,
            trailing,
            end_trailing: None,
        })
    }

    /// Whitespace between the name and `>` of the end tag just read.
    fn end_tag_whitespace(&self, event_start: usize) -> Option<String> {
        let event_end = self.reader.buffer_position() as usize;
        let raw = self.source.get(event_start..event_end)?;
        let inner = raw.strip_prefix("</")?.strip_suffix('>')?;
        let name = inner.trim_end();
        (name.len() < inner.len()).then(|| inner[name.len()..].to_string())
    }

    fn error(&self, message: impl Into<String>, offset: usize) -> MalformedMarkupError {
        MalformedMarkupError::at_offset(message, self.source, offset)
    }
}

/// Split the attribute section of an already validated start tag into
/// attributes, keeping each value's raw text, quote, leading whitespace and
/// the exact `=` separator.
fn scan_attributes(mut rest: &str) -> (Vec<Attribute>, Option<String>) {
    let mut attributes = Vec::new();

    loop {
        let trimmed = rest.trim_start();
        let whitespace = &rest[..rest.len() - trimmed.len()];
        if trimmed.is_empty() {
            let trailing = (!whitespace.is_empty()).then(|| whitespace.to_string());
            return (attributes, trailing);
        }

        let name_end = trimmed
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(trimmed.len());
        let name = &trimmed[..name_end];
        let after_name = &trimmed[name_end..];
        let before_eq = after_name.trim_start();
        let after_eq = before_eq.strip_prefix('=').unwrap_or(before_eq).trim_start();
        let separator = &after_name[..after_name.len() - after_eq.len()];

        let (quote, value, remainder) = match after_eq.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &after_eq[1..];
                let end = body.find(q).unwrap_or(body.len());
                let quote = if q == '"' { Quote::Double } else { Quote::Single };
                (quote, &body[..end], body.get(end + 1..).unwrap_or_default())
            }
            _ => {
                let end = after_eq
                    .find(char::is_whitespace)
                    .unwrap_or(after_eq.len());
                (Quote::Double, &after_eq[..end], &after_eq[end..])
            }
        };

        attributes.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
            quote,
            leading: (whitespace != " ").then(|| whitespace.to_string()),
            separator: (separator != "=").then(|| separator.to_string()),
        });
        rest = remainder;
    }
}
