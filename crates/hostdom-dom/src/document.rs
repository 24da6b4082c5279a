//! Document - tree root, id cache, element factory and selectors

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::context::ContextHost;
use crate::events::{DomEvent, EventListener};
use crate::node::{ElementKind, ImageState, Node};
use crate::selector::Selector;
use crate::tree::DomTree;
use crate::viewport::{FixedViewport, Viewport, ViewportProvider};
use crate::{DomError, NodeId, Result};

/// `document.readyState`; a Document is complete once constructed
pub const READY_STATE: &str = "complete";

/// Host capabilities injected at construction
#[derive(Clone)]
pub struct DocumentConfig {
    pub viewport: Rc<dyn ViewportProvider>,
    pub context: ContextHost,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            viewport: Rc::new(FixedViewport::new(Viewport::default())),
            context: ContextHost::default(),
        }
    }
}

impl fmt::Debug for DocumentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentConfig")
            .field("viewport", &self.viewport.viewport())
            .field("context", &self.context)
            .finish()
    }
}

/// Document
pub struct Document {
    tree: DomTree,
    /// `<html>`
    document_element: NodeId,
    /// `<body>`, under `document_element`
    body: NodeId,
    /// Non-owning id index. Not invalidated by `remove_child`.
    id_cache: HashMap<String, NodeId>,
    pub(crate) viewport: Rc<dyn ViewportProvider>,
    pub(crate) context: ContextHost,
    /// Number of full-tree id searches performed
    id_searches: usize,
}

impl Document {
    /// Create a document with an `html > body` skeleton and default host
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();
        let document_element = tree.create_node("html", ElementKind::Generic);
        let body = tree.create_node("body", ElementKind::Generic);

        tree.link(root, document_element);
        tree.link(document_element, body);

        Self {
            tree,
            document_element,
            body,
            id_cache: HashMap::new(),
            viewport: config.viewport,
            context: config.context,
            id_searches: 0,
        }
    }

    /// The root node (the document itself)
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn ready_state(&self) -> &'static str {
        READY_STATE
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.tree.get_mut(id)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&Node> {
        self.tree.get(id).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_ref_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.tree.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Replace the ambient drawing context used by `get_context`
    pub fn set_context_host(&mut self, context: ContextHost) {
        self.context = context;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.tree.append_child(parent, child)
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        self.tree.insert_before(parent, new_node, reference)
    }

    /// Detach `child` from `parent`. Cached ids keep pointing at it.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        self.tree.remove_child(parent, child)
    }

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn child_nodes(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: EventListener,
    ) -> Result<()> {
        self.tree.add_event_listener(id, event_type, listener)
    }

    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: &EventListener,
    ) -> Result<bool> {
        self.tree.remove_event_listener(id, event_type, listener)
    }

    pub fn dispatch_event(&self, id: NodeId, event: &DomEvent) -> Result<usize> {
        self.tree.dispatch_event(id, event)
    }

    // ------------------------------------------------------------------
    // Element factory
    // ------------------------------------------------------------------

    /// Create a detached element.
    ///
    /// Media tags get their specialized kind, unsupported tags (`iframe`)
    /// yield `None`, anything else is a generic element.
    pub fn create_element(&mut self, tag_name: &str) -> Option<NodeId> {
        let tag = tag_name.to_lowercase();
        let kind = match tag.as_str() {
            "video" => ElementKind::Video,
            "img" => ElementKind::Image(ImageState::default()),
            "canvas" => ElementKind::Canvas,
            "iframe" => {
                tracing::debug!("createElement: iframe is not supported");
                return None;
            }
            _ => ElementKind::Generic,
        };
        Some(self.tree.create_node(&tag, kind))
    }

    /// Namespaced creation. The namespace is ignored; created elements
    /// answer `toDataURL` with an empty result.
    pub fn create_element_ns(
        &mut self,
        _namespace: Option<&str>,
        tag_name: &str,
    ) -> Option<NodeId> {
        let id = self.create_element(tag_name)?;
        if let Some(node) = self.tree.get_mut(id) {
            node.element.to_data_url = true;
        }
        Some(id)
    }

    /// Stub `toDataURL`: `Some("")` when the capability was attached
    pub fn to_data_url(&self, id: NodeId) -> Result<Option<String>> {
        let node = self.node_ref(id)?;
        Ok(node.element.to_data_url.then(String::new))
    }

    // ------------------------------------------------------------------
    // Id cache
    // ------------------------------------------------------------------

    /// Look up an element by its `id` attribute.
    ///
    /// Cache hits return immediately. Misses search the tree in pre-order
    /// from the document and memoize the first match.
    pub fn get_element_by_id(&mut self, id: &str) -> Option<NodeId> {
        if let Some(&cached) = self.id_cache.get(id) {
            return Some(cached);
        }

        self.id_searches += 1;
        let tree = &self.tree;
        let found = tree
            .descendants(tree.root())
            .find(|&n| tree.get(n).and_then(Node::id) == Some(id))?;

        tracing::debug!("Cached element {} for id {:?}", found, id);
        self.id_cache.insert(id.to_string(), found);
        Some(found)
    }

    /// Put an element in the id cache without searching
    pub fn register_element_by_id(&mut self, id: impl Into<String>, element: NodeId) {
        self.id_cache.insert(id.into(), element);
    }

    /// Drop an id from the cache
    pub fn unregister_element_by_id(&mut self, id: &str) -> Option<NodeId> {
        self.id_cache.remove(id)
    }

    /// Full-tree id searches performed so far (cache misses)
    pub fn id_search_count(&self) -> usize {
        self.id_searches
    }

    // ------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------

    /// First element matching `#id` or a tag name, in document order
    pub fn query_selector(&mut self, selector: &str) -> Option<NodeId> {
        match Selector::parse(selector)? {
            Selector::Id(id) => self.get_element_by_id(&id),
            tag @ Selector::Tag(_) => {
                let tree = &self.tree;
                tree.descendants(tree.root())
                    .find(|&n| tree.get(n).is_some_and(|node| tag.matches_tag(node.name())))
            }
        }
    }

    /// Every element matching `#id` (0 or 1 results) or a tag name
    pub fn query_selector_all(&mut self, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Some(Selector::Id(id)) => self.get_element_by_id(&id).into_iter().collect(),
            Some(tag @ Selector::Tag(_)) => {
                let tree = &self.tree;
                tree.descendants(tree.root())
                    .filter(|&n| tree.get(n).is_some_and(|node| tag.matches_tag(node.name())))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("document_element", &self.document_element)
            .field("body", &self.body)
            .field("cached_ids", &self.id_cache.len())
            .finish()
    }
}
