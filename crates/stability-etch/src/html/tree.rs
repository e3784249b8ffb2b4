//! Owned markup tree
//!
//! A small element/text tree that the Markdown AST is lowered into before
//! post-processing. Raw HTML from the source is carried through untouched.

use std::fmt::Write;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// A node of the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// An element with attributes and children
    Element(Element),
    /// Text, escaped on output
    Text(String),
    /// Raw HTML, emitted verbatim
    Raw(String),
}

impl MarkupNode {
    /// Create a text node
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Text(value.into())
    }

    /// Get the element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the element mutably, if this node is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Element(element) => element.write_html(out),
            MarkupNode::Text(text) => out.push_str(&html_escape::encode_text(text)),
            MarkupNode::Raw(html) => out.push_str(html),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Raw(_) => {}
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name, lowercase
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<MarkupNode>,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: vec![],
            children: vec![],
        }
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        self.children = children;
        self
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(attr) => attr.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether this element has the given tag
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Concatenated text of all descendants (raw HTML excluded)
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Child elements, skipping text between them
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(MarkupNode::as_element)
    }

    /// Child elements, mutably
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(MarkupNode::as_element_mut)
    }

    /// Serialize this element
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(
                out,
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// A document: the top-level node list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupTree {
    /// Top-level nodes
    pub nodes: Vec<MarkupNode>,
}

impl MarkupTree {
    /// Create a tree from top-level nodes
    pub fn new(nodes: Vec<MarkupNode>) -> Self {
        Self { nodes }
    }

    /// Serialize the whole tree
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }

    /// Visit every element depth-first, parents before children.
    ///
    /// The visitor's error aborts the walk.
    pub fn try_visit_elements_mut<E>(
        &mut self,
        visitor: &mut impl FnMut(&mut Element) -> Result<(), E>,
    ) -> Result<(), E> {
        visit_nodes_mut(&mut self.nodes, visitor)
    }
}

fn visit_nodes_mut<E>(
    nodes: &mut [MarkupNode],
    visitor: &mut impl FnMut(&mut Element) -> Result<(), E>,
) -> Result<(), E> {
    for node in nodes {
        if let MarkupNode::Element(element) = node {
            visitor(element)?;
            visit_nodes_mut(&mut element.children, visitor)?;
        }
    }
    Ok(())
}
