//! Minimal XML document tree.
//!
//! Keeps attributes, comments, CDATA, processing instructions and nested
//! elements so that a document read and written back only differs in the
//! parts that were edited. Whitespace-only text between elements is not
//! kept; output is re-indented.

use std::borrow::Cow;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    /// Unescaped text
    Text(String),
    CData(String),
    /// Raw comment body
    Comment(String),
    Instruction(String),
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    /// Unescaped attribute values, in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element called `name`
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Direct text and CDATA content, concatenated
    pub fn text(&self) -> Cow<'_, str> {
        let mut parts = self.children.iter().filter_map(|node| match node {
            Node::Text(t) | Node::CData(t) => Some(t.as_str()),
            _ => None,
        });
        match (parts.next(), parts.next()) {
            (None, _) => Cow::Borrowed(""),
            (Some(only), None) => Cow::Borrowed(only),
            (Some(first), Some(second)) => {
                let mut joined = format!("{first}{second}");
                parts.for_each(|p| joined.push_str(p));
                Cow::Owned(joined)
            }
        }
    }

    /// Replace the direct text content, keeping child elements and comments
    pub fn set_text(&mut self, value: &str) {
        self.children
            .retain(|node| !matches!(node, Node::Text(_) | Node::CData(_)));
        if !value.is_empty() {
            self.children.insert(0, Node::Text(value.to_string()));
        }
    }

    fn from_start(start: &BytesStart) -> Result<Self> {
        let mut element = Self::new(lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(parse_error)?;
            let value = attr.unescape_value().map_err(parse_error)?;
            element
                .attributes
                .push((lossy(attr.key.as_ref()), value.into_owned()));
        }
        Ok(element)
    }
}

/// A whole document: the root element plus whatever surrounds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        let mut open: Vec<Element> = Vec::new();

        loop {
            let node = match reader.read_event().map_err(parse_error)? {
                Event::Start(e) => {
                    open.push(Element::from_start(&e)?);
                    continue;
                }
                Event::End(_) => match open.pop() {
                    Some(done) => Node::Element(done),
                    None => return Err(Error::LibraryParse("unbalanced end tag".to_string())),
                },
                Event::Empty(e) => Node::Element(Element::from_start(&e)?),
                Event::Text(t) => {
                    let text = t.unescape().map_err(parse_error)?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    Node::Text(text.into_owned())
                }
                Event::CData(c) => Node::CData(lossy(&c)),
                Event::Comment(c) => Node::Comment(lossy(&c)),
                Event::PI(p) => Node::Instruction(lossy(&p)),
                Event::DocType(d) => Node::DocType(lossy(&d)),
                Event::Decl(_) => continue,
                Event::Eof => break,
            };

            if let Some(parent) = open.last_mut() {
                parent.children.push(node);
                continue;
            }
            match node {
                Node::Element(element) if root.is_none() => root = Some(element),
                Node::Element(_) => {
                    return Err(Error::LibraryParse("multiple root elements".to_string()));
                }
                Node::Text(_) | Node::CData(_) => {
                    return Err(Error::LibraryParse("text outside the root element".to_string()));
                }
                other if root.is_none() => prolog.push(other),
                other => epilog.push(other),
            }
        }

        if !open.is_empty() {
            return Err(Error::LibraryParse("unexpected end of document".to_string()));
        }
        let root = root.ok_or_else(|| Error::LibraryParse("missing root element".to_string()))?;
        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;
        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| Error::LibraryParse(e.to_string()))
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    let event = match node {
        Node::Element(element) => return write_element(writer, element),
        Node::Text(text) => Event::Text(BytesText::new(text)),
        Node::CData(text) => Event::CData(BytesCData::new(text.as_str())),
        Node::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        Node::Instruction(text) => Event::PI(BytesPI::new(text.as_str())),
        Node::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
    };
    writer.write_event(event).map_err(write_error)?;
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)?;
    Ok(())
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_error<E: std::fmt::Display>(e: E) -> Error {
    Error::LibraryParse(e.to_string())
}

fn write_error<E: std::fmt::Display>(e: E) -> Error {
    Error::LibraryParse(format!("write failed: {e}"))
}
