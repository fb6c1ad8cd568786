//! A small element tree standing in for the markup a slider is attached to.
//!
//! The slider only needs tags, an optional `id` key, marker classes, a few
//! attributes, inline positioning and the grid stamp of each slide, so that
//! is all a [`Node`] carries.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical { Axis::Vertical } else { Axis::Horizontal }
    }

    /// Name of the inline style property moved on this axis.
    pub fn property(self) -> &'static str {
        match self {
            Axis::Horizontal => "left",
            Axis::Vertical => "top",
        }
    }
}

/// Inline positioning of a node, `None` meaning "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub left: Option<f32>,
    pub top: Option<f32>,
}

impl InlineStyle {
    pub fn get(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.left = Some(value),
            Axis::Vertical => self.top = Some(value),
        }
    }

    pub fn clear(&mut self) {
        *self = InlineStyle::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
}

impl GridCell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    tag: String,
    key: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    pub style: InlineStyle,
    pub cell: Option<GridCell>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, tag: &str) -> Self {
        Self {
            id,
            tag: tag.to_ascii_lowercase(),
            key: None,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            style: InlineStyle::default(),
            cell: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on { self.add_class(class) } else { self.remove_class(class) }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Owns every node of the tree, keyed by id. Nodes link to their parent and
/// children by id, so lookups never walk the tree.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    next_id: u64,
    nodes: BTreeMap<NodeId, Node>,
}

impl Document {
    pub fn new(root_tag: &str) -> Self {
        Self {
            root: Node::new(NodeId(0), root_tag),
            next_id: 1,
            nodes: BTreeMap::new(),
        }
    }

    /// Creates a detached element; attach it with [`Document::append`] or
    /// [`Document::insert_before`].
    pub fn create_element(&mut self, tag: &str) -> &mut Node {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.entry(id).or_insert_with(|| Node::new(id, tag))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id == self.root.id { Some(&self.root) } else { self.nodes.get(&id) }
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id == self.root.id { Some(&mut self.root) } else { self.nodes.get_mut(&id) }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(move |child| self.node(*child))
    }

    /// Direct children of `id` matching `selector`, in document order.
    pub fn children_matching<'a>(&'a self, id: NodeId, selector: &'a Selector) -> impl Iterator<Item = &'a Node> + 'a {
        self.children(id).filter(move |c| selector.matches(c))
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Attaches the detached node `child` under `parent`, before the child
    /// `anchor`, or last when there is no such anchor. Returns false when
    /// either node is missing or `child` already has a parent.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, anchor: Option<NodeId>) -> bool {
        if child == self.root.id || parent == child || self.node(parent).is_none() {
            return false;
        }
        match self.nodes.get_mut(&child) {
            Some(node) if node.parent.is_none() => node.parent = Some(parent),
            _ => return false,
        }

        let Some(parent) = self.node_mut(parent) else {
            return false;
        };
        let at = anchor
            .and_then(|a| parent.children.iter().position(|c| *c == a))
            .unwrap_or(parent.children.len());
        parent.children.insert(at, child);
        true
    }

    /// Detaches `id` and drops it with its whole subtree. The root stays.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&id).map(Node::parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
        true
    }
}

/// Simple selector: optional tag, optional `#id`, any number of `.class`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parses `tag`, `.class`, `#id` and compounds such as `li.intro#first`.
    /// `*` or an empty string match everything.
    pub fn parse(raw: &str) -> Self {
        let mut selector = Selector::default();
        let raw = raw.trim();

        let end = raw.find(['.', '#']).unwrap_or(raw.len());
        let tag = &raw[..end];
        if !tag.is_empty() && tag != "*" {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        let mut rest = &raw[end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if !name.is_empty() {
                if marker == '.' {
                    selector.classes.push(name.to_string());
                } else {
                    selector.id = Some(name.to_string());
                }
            }
            rest = &body[end..];
        }

        selector
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.tag.as_deref().is_none_or(|tag| tag == node.tag())
            && self.id.as_deref().is_none_or(|id| Some(id) == node.key())
            && self.classes.iter().all(|c| node.has_class(c))
    }
}

/// Builds the standard slider markup:
/// `div > div.jqs-container > ul > li*`, plus optional prev/next handlers.
#[derive(Debug, Clone, Default)]
pub struct Markup {
    slides: Vec<Option<String>>,
    handlers: bool,
    root_classes: Vec<String>,
    options: Option<String>,
    current: Option<usize>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one slide per key, each carrying the key as its `id`.
    pub fn slides<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slides.extend(keys.into_iter().map(|k| Some(k.into())));
        self
    }

    pub fn anonymous_slides(mut self, count: usize) -> Self {
        self.slides.extend(std::iter::repeat_n(None, count));
        self
    }

    pub fn handlers(mut self) -> Self {
        self.handlers = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.root_classes.push(CLASS_VERTICAL.to_string());
        self
    }

    pub fn options(mut self, raw: impl Into<String>) -> Self {
        self.options = Some(raw.into());
        self
    }

    /// Marks the slide at `index` as current in the markup itself.
    pub fn current(mut self, index: usize) -> Self {
        self.current = Some(index);
        self
    }

    pub fn build(self) -> Document {
        let mut doc = Document::new("div");
        let root = doc.root().id();

        let container = element(&mut doc, root, "div", &[CLASS_CONTAINER]);
        let list = element(&mut doc, container, DEFAULT_LIST_SELECTOR, &[]);
        for (index, key) in self.slides.into_iter().enumerate() {
            let slide = doc.create_element(DEFAULT_SLIDE_TAG);
            if let Some(key) = key {
                slide.set_key(key);
            }
            if self.current == Some(index) {
                slide.add_class(CLASS_CURRENT);
            }
            let id = slide.id();
            doc.append(list, id);
        }
        if self.handlers {
            element(&mut doc, root, "a", &[CLASS_HANDLER, CLASS_HANDLER_NEXT]);
            element(&mut doc, root, "a", &[CLASS_HANDLER, CLASS_HANDLER_PREV]);
        }

        let root = doc.root_mut();
        root.add_class("jqslider");
        for class in &self.root_classes {
            root.add_class(class);
        }
        if let Some(options) = self.options {
            root.set_attribute(OPTIONS_ATTRIBUTE, options);
        }

        doc
    }
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
    let node = doc.create_element(tag);
    for class in classes {
        node.add_class(class);
    }
    let id = node.id();
    doc.append(parent, id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth_child(doc: &Document, id: NodeId, index: usize) -> &Node {
        doc.children(id).nth(index).unwrap()
    }

    #[test]
    fn test_selector_parsing() {
        let doc = Markup::new().slides(["intro"]).build();
        let container = nth_child(&doc, doc.root().id(), 0);
        let list = nth_child(&doc, container.id(), 0);
        let slide = nth_child(&doc, list.id(), 0);

        assert!(Selector::parse(".jqs-container").matches(container));
        assert!(Selector::parse("ul").matches(list));
        assert!(Selector::parse("LI").matches(slide));
        assert!(Selector::parse("#intro").matches(slide));
        assert!(Selector::parse("li#intro").matches(slide));
        assert!(!Selector::parse("li#other").matches(slide));
        assert!(!Selector::parse("li.jqs-slide").matches(slide));
        assert!(Selector::parse("*").matches(list));
        assert!(Selector::parse("").matches(slide));
    }

    #[test]
    fn test_markup_structure() {
        let doc = Markup::new().anonymous_slides(3).handlers().vertical().build();
        let root = doc.root();

        assert!(root.has_class(CLASS_VERTICAL));
        assert_eq!(root.children().len(), 3);
        let container = nth_child(&doc, root.id(), 0);
        assert_eq!(nth_child(&doc, container.id(), 0).children().len(), 3);
        assert!(nth_child(&doc, root.id(), 1).has_class(CLASS_HANDLER_NEXT));
        assert!(nth_child(&doc, root.id(), 2).has_class(CLASS_HANDLER_PREV));
        assert_eq!(container.parent(), Some(root.id()));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut doc = Document::new("div");
        let root = doc.root().id();
        let list = doc.create_element("ul").id();
        assert!(doc.append(root, list));
        let first = doc.create_element("li").id();
        let second = doc.create_element("li").id();
        assert!(doc.append(list, second));
        assert!(doc.insert_before(list, first, Some(second)));
        assert_eq!(doc.node(list).unwrap().children(), &[first, second]);

        // Attached nodes cannot be attached twice.
        assert!(!doc.append(root, first));

        doc.node_mut(first).unwrap().add_class("x");
        assert!(doc.node(first).unwrap().has_class("x"));

        assert!(doc.remove(list));
        assert!(doc.node(list).is_none());
        assert!(doc.node(first).is_none());
        assert!(doc.node(second).is_none());
        assert!(doc.root().children().is_empty());
        assert!(!doc.remove(list));
        assert!(!doc.remove(root));
    }

    #[test]
    fn test_inline_style_axis() {
        let mut style = InlineStyle::default();
        style.set(Axis::Vertical, -1.0);
        assert_eq!(style.get(Axis::Vertical), Some(-1.0));
        assert_eq!(style.get(Axis::Horizontal), None);
        style.clear();
        assert_eq!(style, InlineStyle::default());
    }
}
