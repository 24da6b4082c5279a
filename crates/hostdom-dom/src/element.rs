//! Element Methods
//!
//! Attribute, style, geometry and drawing-context accessors. Elements live in
//! the document arena so these are addressed by `NodeId`.

use hostdom_canvas::{Context2dOverrides, DrawingContext, RawContext};

use crate::document::Document;
use crate::node::ElementDoc;
use crate::viewport::DomRect;
use crate::{NodeId, Result};

impl Document {
    /// Upper-cased tag name
    pub fn tag_name(&self, id: NodeId) -> Result<&str> {
        Ok(self.node_ref(id)?.name())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>> {
        Ok(self.node_ref(id)?.attributes.get(name).map(String::as_str))
    }

    /// Set an attribute. Setting `id` does not touch the id cache.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.node_ref_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Namespaced variant; there is a single flat attribute namespace
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        _namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        self.set_attribute(id, name, value)
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.node_ref_mut(id)?.attributes.remove(name))
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        self.node_ref_mut(id)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    /// `getComputedStyle(el).getPropertyValue(prop)`: the style bag entry or ""
    pub fn computed_style_value(&self, id: NodeId, property: &str) -> Result<String> {
        Ok(self
            .node_ref(id)?
            .style
            .get(property)
            .cloned()
            .unwrap_or_default())
    }

    pub fn element_doc(&self, id: NodeId) -> Result<&ElementDoc> {
        Ok(&self.node_ref(id)?.element.doc)
    }

    pub fn element_doc_mut(&mut self, id: NodeId) -> Result<&mut ElementDoc> {
        Ok(&mut self.node_ref_mut(id)?.element.doc)
    }

    pub fn client_width(&self, id: NodeId) -> Result<f64> {
        self.node_ref(id)?;
        Ok(self.viewport().width)
    }

    pub fn client_height(&self, id: NodeId) -> Result<f64> {
        self.node_ref(id)?;
        Ok(self.viewport().height)
    }

    pub fn offset_width(&self, id: NodeId) -> Result<f64> {
        self.client_width(id)
    }

    pub fn offset_height(&self, id: NodeId) -> Result<f64> {
        self.client_height(id)
    }

    /// Viewport-sized rectangle; carries no real layout
    pub fn bounding_client_rect(&self, id: NodeId) -> Result<DomRect> {
        self.node_ref(id)?;
        Ok(DomRect::from_viewport(&self.viewport()))
    }

    /// Resolve a drawing context for an element.
    ///
    /// Precedence: `explicit`, then the document's ambient context, then the
    /// stub context.
    pub fn get_context(
        &self,
        id: NodeId,
        context_type: &str,
        overrides: Option<&Context2dOverrides>,
        explicit: Option<RawContext>,
    ) -> Result<DrawingContext> {
        self.node_ref(id)?;
        tracing::debug!(
            "getContext({:?}) on {}: explicit={}, ambient={}",
            context_type,
            id,
            explicit.is_some(),
            self.context.ambient.is_some()
        );
        Ok(self.context.resolve(context_type, overrides, explicit))
    }
}
