//! Recording canvas kept entirely in memory.

use super::{
    Canvas, CanvasError, EllipseProps, FontName, FrameProps, NodeId, Paint, TextProps, Viewport,
};
use crate::model::{Rgba, VariableRef};
use crate::table::CornerRadii;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Frame,
    Text,
    Ellipse,
}

/// A node as recorded by [`MemoryCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radii: Option<CornerRadii>,
    pub position: (f64, f64),
}

impl MemoryNode {
    fn new(id: NodeId, kind: NodeKind, name: &str) -> Self {
        Self {
            id,
            kind,
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            text: None,
            font: None,
            fill: None,
            radii: None,
            position: (0.0, 0.0),
        }
    }
}

/// Canvas that records every node in an arena.
///
/// Fonts can be marked unavailable, bindings and attachments can be made to
/// fail, and node creation can be capped to simulate a host error part-way
/// through.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryCanvas {
    nodes: IndexMap<NodeId, MemoryNode>,
    next_id: u64,
    #[serde(skip)]
    unavailable_fonts: HashSet<String>,
    #[serde(skip)]
    failing_bindings: bool,
    #[serde(skip)]
    failing_appends: bool,
    #[serde(skip)]
    node_limit: Option<usize>,
    #[serde(skip)]
    created: usize,
    loaded_fonts: Vec<FontName>,
    paints_created: usize,
    selection: Vec<NodeId>,
    viewport: Viewport,
}

impl MemoryCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport {
                x: 0.0,
                y: 0.0,
                width: 1440.0,
                height: 900.0,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_unavailable_font(mut self, family: impl Into<String>) -> Self {
        self.unavailable_fonts.insert(family.into());
        self
    }

    #[must_use]
    pub fn with_failing_bindings(mut self) -> Self {
        self.failing_bindings = true;
        self
    }

    /// Reject every `append_child` call.
    #[must_use]
    pub fn with_failing_appends(mut self) -> Self {
        self.failing_appends = true;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Fail node creation once `limit` nodes have been created.
    #[must_use]
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MemoryNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes sitting directly on the page.
    #[must_use]
    pub fn roots(&self) -> Vec<&MemoryNode> {
        self.nodes.values().filter(|n| n.parent.is_none()).collect()
    }

    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    #[must_use]
    pub fn loaded_fonts(&self) -> &[FontName] {
        &self.loaded_fonts
    }

    #[must_use]
    pub const fn paints_created(&self) -> usize {
        self.paints_created
    }

    /// Text content of every text node under `root`, depth-first.
    #[must_use]
    pub fn texts_under(&self, root: NodeId) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if let Some(text) = &node.text {
                out.push(text.as_str());
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn insert(&mut self, kind: NodeKind, name: &str) -> Result<&mut MemoryNode, CanvasError> {
        if self.node_limit.is_some_and(|limit| self.created >= limit) {
            return Err(CanvasError::Operation(format!(
                "node limit reached while creating '{name}'"
            )));
        }
        self.next_id += 1;
        self.created += 1;
        let id = NodeId(self.next_id);
        Ok(self
            .nodes
            .entry(id)
            .or_insert_with(|| MemoryNode::new(id, kind, name)))
    }

    fn exists(&self, id: NodeId) -> Result<(), CanvasError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(CanvasError::NodeNotFound(id))
        }
    }
}

impl Canvas for MemoryCanvas {
    fn load_font(&mut self, font: &FontName) -> Result<(), CanvasError> {
        if self.unavailable_fonts.contains(&font.family) {
            return Err(CanvasError::FontUnavailable(font.to_string()));
        }
        if !self.loaded_fonts.contains(font) {
            self.loaded_fonts.push(font.clone());
        }
        Ok(())
    }

    fn create_frame(&mut self, props: &FrameProps<'_>) -> Result<NodeId, CanvasError> {
        let node = self.insert(NodeKind::Frame, props.name)?;
        node.fill = props.fill.clone();
        node.radii = Some(props.radii);
        Ok(node.id)
    }

    fn create_text(&mut self, props: &TextProps<'_>) -> Result<NodeId, CanvasError> {
        let node = self.insert(NodeKind::Text, props.name)?;
        node.text = Some(props.content.to_string());
        node.font = Some(props.font.clone());
        node.fill = Some(props.fill.clone());
        Ok(node.id)
    }

    fn create_ellipse(&mut self, props: &EllipseProps<'_>) -> Result<NodeId, CanvasError> {
        let node = self.insert(NodeKind::Ellipse, props.name)?;
        node.fill = Some(props.fill.clone());
        Ok(node.id)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), CanvasError> {
        if self.failing_appends {
            return Err(CanvasError::Operation(format!(
                "cannot attach {child:?} to {parent:?}"
            )));
        }
        self.exists(parent)?;
        self.exists(child)?;
        let previous = self.nodes.get(&child).and_then(|n| n.parent);
        if let Some(old) = previous.and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<(), CanvasError> {
        let removed = self
            .nodes
            .shift_remove(&node)
            .ok_or(CanvasError::NodeNotFound(node))?;
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        let mut stack = removed.children;
        while let Some(id) = stack.pop() {
            if let Some(child) = self.nodes.shift_remove(&id) {
                stack.extend(child.children);
            }
        }
        self.selection.retain(|id| self.nodes.contains_key(id));
        Ok(())
    }

    fn solid_paint(&mut self, color: Rgba) -> Paint {
        self.paints_created += 1;
        Paint::solid(color)
    }

    fn bind_paint_to_variable(
        &mut self,
        paint: &Paint,
        variable: &VariableRef,
    ) -> Result<Paint, CanvasError> {
        if self.failing_bindings {
            return Err(CanvasError::BindingFailed {
                variable: variable.name.clone(),
                reason: "binding rejected by host".into(),
            });
        }
        Ok(Paint {
            color: paint.color,
            bound_variable: Some(variable.id.clone()),
        })
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .get_mut(&node)
            .ok_or(CanvasError::NodeNotFound(node))?;
        node.position = (x, y);
        Ok(())
    }

    fn select(&mut self, nodes: &[NodeId]) -> Result<(), CanvasError> {
        for id in nodes {
            self.exists(*id)?;
        }
        self.selection = nodes.to_vec();
        Ok(())
    }
}
