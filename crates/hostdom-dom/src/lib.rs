//! hostdom DOM - Document Object Model
//!
//! A minimal browser DOM for non-browser hosts: an arena-backed node tree
//! with per-node event subscriptions, an id lookup cache, element factory
//! and a two-form selector engine.

mod context;
mod document;
mod element;
mod events;
mod image;
mod node;
mod selector;
mod tree;
mod viewport;

pub use context::ContextHost;
pub use document::{Document, DocumentConfig, READY_STATE};
pub use events::{
    DomEvent, EventEmitter, EventListener, ListenerKey, SubscriptionId, SubscriptionRegistry,
};
pub use image::{ImageEvents, LoadOutcome, LoadRequest, ResolvedImage};
pub use node::{ClassName, ElementData, ElementDoc, ElementDocBody, ElementKind, ImageState, Node};
pub use selector::Selector;
pub use tree::{DomTree, Preorder};
pub use viewport::{DomRect, FixedViewport, Orientation, Viewport, ViewportProvider};

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the Document itself)
    pub const ROOT: NodeId = NodeId(0);
    /// Null handle
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID can refer to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Node {0} is not an image element")]
    NotAnImage(NodeId),
}

pub type Result<T> = std::result::Result<T, DomError>;
