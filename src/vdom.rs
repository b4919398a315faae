//! Minimal virtual node description produced by the widgets. Mounting and
//! diffing belong to the host renderer.

use indexmap::IndexMap;

use crate::compose::ClassList;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub class: ClassList,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: ClassList) -> Self {
        self.class = class;
        self
    }

    pub fn class(mut self, token: impl Into<String>) -> Self {
        self.class.push(token);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Depth-first search, self included.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if predicate(element) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find(predicate))
    }

    pub fn find_by_class(&self, token: &str) -> Option<&Element> {
        self.find(&|element| element.class.contains(token))
    }

    pub fn collect_by_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element.tag == tag {
                out.push(element);
            }
            for child in &element.children {
                child.collect_by_tag(tag, out);
            }
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }
}
