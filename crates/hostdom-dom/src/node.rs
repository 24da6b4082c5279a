//! DOM Node
//!
//! Arena-stored node: tree links, the open style/attribute bags and the
//! element-specific data. Tree links are private; mutate them through
//! [`DomTree`](crate::DomTree).

use std::collections::HashMap;

use crate::events::{EventListener, SubscriptionRegistry};
use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Tag identity (upper case), `#DOCUMENT` for the root
    name: String,
    /// Parent node (NONE when detached or root). Never implies ownership.
    pub(crate) parent: NodeId,
    /// Owned children in insertion order
    pub(crate) children: Vec<NodeId>,
    /// Open key-value style bag
    pub style: HashMap<String, String>,
    /// SVG-style `className.baseVal`
    pub class_name: ClassName,
    /// Flat attribute namespace
    pub attributes: HashMap<String, String>,
    /// Element-specific data
    pub element: ElementData,
    pub(crate) events: SubscriptionRegistry,
}

impl Node {
    pub(crate) fn new(tag_name: &str, kind: ElementKind) -> Self {
        Self {
            name: tag_name.to_uppercase(),
            parent: NodeId::NONE,
            children: Vec::new(),
            style: HashMap::new(),
            class_name: ClassName::default(),
            attributes: HashMap::new(),
            element: ElementData::new(kind),
            events: SubscriptionRegistry::new(),
        }
    }

    /// Node name (same as the tag name)
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.is_valid().then_some(self.parent)
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    pub fn events(&self) -> &SubscriptionRegistry {
        &self.events
    }

    pub fn kind(&self) -> &ElementKind {
        &self.element.kind
    }

    pub fn as_image(&self) -> Option<&ImageState> {
        match &self.element.kind {
            ElementKind::Image(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageState> {
        match &mut self.element.kind {
            ElementKind::Image(state) => Some(state),
            _ => None,
        }
    }
}

/// `className` object mimicking `SVGAnimatedString`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassName {
    pub base_val: String,
}

/// Element variants produced by the element factory
#[derive(Debug)]
pub enum ElementKind {
    /// The document root
    Document,
    Generic,
    Canvas,
    Image(ImageState),
    Video,
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    pub kind: ElementKind,
    /// Mutable `doc` stub object
    pub doc: ElementDoc,
    /// Set by `createElementNS`: the element answers `toDataURL`
    pub to_data_url: bool,
}

impl ElementData {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            doc: ElementDoc::default(),
            to_data_url: false,
        }
    }
}

/// Minimal `doc` stub carried by every element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDoc {
    pub body: ElementDocBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDocBody {
    pub inner_html: String,
}

/// Image element state around the asynchronous source resolver
#[derive(Debug, Default)]
pub struct ImageState {
    pub src: Option<String>,
    /// Local file the source resolved to (data URIs are written out)
    pub local_uri: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub complete: bool,
    /// Current load attempt; completions for older attempts are dropped
    pub(crate) attempt: u64,
    /// Whether the current attempt already fired its terminal event
    pub(crate) settled: bool,
    pub(crate) onload: Option<EventListener>,
}

impl ImageState {
    pub fn with_size(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Both dimensions known and non-zero
    pub fn has_size(&self) -> bool {
        matches!((self.width, self.height), (Some(w), Some(h)) if w > 0 && h > 0)
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn onload(&self) -> Option<&EventListener> {
        self.onload.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_uppercases_name() {
        let node = Node::new("canvas", ElementKind::Canvas);
        assert_eq!(node.name(), "CANVAS");
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
        assert_eq!(node.class_name.base_val, "");
    }

    #[test]
    fn test_image_size_requires_both_dimensions() {
        assert!(!ImageState::default().has_size());
        assert!(!ImageState::with_size(Some(10), None).has_size());
        assert!(!ImageState::with_size(Some(0), Some(10)).has_size());
        assert!(ImageState::with_size(Some(10), Some(20)).has_size());
    }

    #[test]
    fn test_as_image() {
        let mut img = Node::new("img", ElementKind::Image(ImageState::default()));
        assert!(img.as_image().is_some());
        if let Some(state) = img.as_image_mut() {
            state.width = Some(3);
        }
        assert_eq!(img.as_image().and_then(|s| s.width), Some(3));

        let div = Node::new("div", ElementKind::Generic);
        assert!(div.as_image().is_none());
    }
}
