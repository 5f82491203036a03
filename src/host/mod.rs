//! Host canvas boundary.
//!
//! The [`Canvas`] trait is the narrow surface the pipeline needs from the
//! design tool: node creation, fonts, paints, viewport and selection.
//! [`materialize`] walks a [`TableTree`](crate::table::TableTree) and
//! creates it on a canvas using a per-run [`CompositionSession`].

mod cache;
mod fonts;
mod materialize;
mod memory;
mod session;

pub use cache::FillCache;
pub use fonts::{FontCache, FontName};
pub use materialize::{materialize, Materialized};
pub use memory::{MemoryCanvas, MemoryNode, NodeKind};
pub use session::{CompositionSession, DEFAULT_OFFSET};

use crate::model::{Rgba, VariableRef};
use crate::table::{Axis, CornerRadii, Padding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a canvas implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("cannot bind paint to variable '{variable}': {reason}")]
    BindingFailed { variable: String, reason: String },

    #[error("canvas operation failed: {0}")]
    Operation(String),
}

/// Handle to a node created on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Solid paint, optionally bound to a variable so it follows later edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub color: Rgba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_variable: Option<String>,
}

impl Paint {
    #[must_use]
    pub const fn solid(color: Rgba) -> Self {
        Self {
            color,
            bound_variable: None,
        }
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound_variable.is_some()
    }
}

/// Visible area of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokePaint {
    pub paint: Paint,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameProps<'a> {
    pub name: &'a str,
    pub axis: Axis,
    pub width: Option<f64>,
    pub padding: Padding,
    pub gap: f64,
    pub fill: Option<Paint>,
    pub stroke: Option<StrokePaint>,
    pub radii: CornerRadii,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextProps<'a> {
    pub name: &'a str,
    pub content: &'a str,
    pub font: &'a FontName,
    pub size: f64,
    pub fill: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EllipseProps<'a> {
    pub name: &'a str,
    pub size: f64,
    pub fill: Paint,
    pub stroke: Option<Paint>,
}

/// Operations the pipeline needs from the host document.
///
/// New nodes are created on the current page; [`Canvas::append_child`]
/// moves them under a parent.
pub trait Canvas {
    fn load_font(&mut self, font: &FontName) -> Result<(), CanvasError>;

    fn create_frame(&mut self, props: &FrameProps<'_>) -> Result<NodeId, CanvasError>;

    fn create_text(&mut self, props: &TextProps<'_>) -> Result<NodeId, CanvasError>;

    fn create_ellipse(&mut self, props: &EllipseProps<'_>) -> Result<NodeId, CanvasError>;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), CanvasError>;

    /// Remove a node together with its descendants.
    fn remove(&mut self, node: NodeId) -> Result<(), CanvasError>;

    fn solid_paint(&mut self, color: Rgba) -> Paint;

    /// Bind `paint` to `variable`. May fail, in which case callers keep the
    /// unbound paint.
    fn bind_paint_to_variable(
        &mut self,
        paint: &Paint,
        variable: &VariableRef,
    ) -> Result<Paint, CanvasError>;

    fn viewport(&self) -> Viewport;

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> Result<(), CanvasError>;

    fn select(&mut self, nodes: &[NodeId]) -> Result<(), CanvasError>;
}
