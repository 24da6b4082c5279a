//! DOM Tree (arena-based allocation)
//!
//! Nodes are owned by the arena; `children` lists express tree ownership and
//! `parent` is a plain back-reference used for detachment. Detached nodes
//! stay in the arena.

use crate::events::{DomEvent, EventListener};
use crate::node::{ElementKind, Node};
use crate::{DomError, NodeId, Result};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("#document", ElementKind::Document)],
        }
    }

    /// Root node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Allocate a detached node
    pub fn create_node(&mut self, tag_name: &str, kind: ElementKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(tag_name, kind));
        id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], Node::children)
    }

    /// Pre-order traversal starting at (and including) `start`
    pub fn descendants(&self, start: NodeId) -> Preorder<'_> {
        let stack = if self.contains(start) { vec![start] } else { Vec::new() };
        Preorder { tree: self, stack }
    }

    /// True if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append `child` to `parent`, detaching it from any previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_insertion(parent, child)?;
        self.detach(child);

        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = parent;
        tracing::debug!("Appended {} to {}", child, parent);
        Ok(child)
    }

    /// Insert `new_node` before `reference` in `parent`.
    ///
    /// `None` inserts at the front; a reference that is not a child of
    /// `parent` falls back to appending.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        self.check_insertion(parent, new_node)?;
        if reference == Some(new_node) {
            // Inserting a node before itself keeps it in place
            if self.nodes[new_node.index()].parent == parent {
                return Ok(new_node);
            }
        }
        self.detach(new_node);

        let children = &mut self.nodes[parent.index()].children;
        match reference {
            None => children.insert(0, new_node),
            Some(reference) => match children.iter().position(|&c| c == reference) {
                Some(index) => children.insert(index, new_node),
                None => children.push(new_node),
            },
        }
        self.nodes[new_node.index()].parent = parent;
        tracing::debug!("Inserted {} into {} before {:?}", new_node, parent, reference);
        Ok(new_node)
    }

    /// Remove `child` from `parent`.
    ///
    /// Returns `child` whether or not it was found. Descendants are left
    /// untouched and no cache is purged.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        let Some(node) = self.nodes.get_mut(parent.index()) else {
            return child;
        };
        if let Some(index) = node.children.iter().position(|&c| c == child) {
            node.children.remove(index);
            self.nodes[child.index()].parent = NodeId::NONE;
            tracing::debug!("Removed {} from {}", child, parent);
        }
        child
    }

    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: EventListener,
    ) -> Result<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        node.events.add_event_listener(event_type, listener);
        Ok(())
    }

    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: &EventListener,
    ) -> Result<bool> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        Ok(node.events.remove_event_listener(event_type, listener))
    }

    /// Deliver `event` to the listeners registered on `id` only
    pub fn dispatch_event(&self, id: NodeId, event: &DomEvent) -> Result<usize> {
        let node = self.get(id).ok_or(DomError::NotFound(id))?;
        Ok(node.events.emit(event))
    }

    /// Link two freshly created nodes without validation
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = parent;
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) {
            return Err(DomError::NotFound(parent));
        }
        if !self.contains(child) {
            return Err(DomError::InvalidArgument("node to insert is absent"));
        }
        if child == self.root() {
            return Err(DomError::HierarchyRequest("the document cannot be inserted"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest("node is an ancestor of the new parent"));
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let old_parent = self.nodes[child.index()].parent;
        if old_parent.is_valid() {
            self.remove_child(old_parent, child);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first pre-order iterator; children in insertion order
pub struct Preorder<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
