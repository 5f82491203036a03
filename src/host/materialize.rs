//! Creation of a composed table on a canvas.

use super::{
    Canvas, CanvasError, CompositionSession, EllipseProps, FrameProps, NodeId, StrokePaint,
    TextProps,
};
use crate::table::{Element, Frame, SwatchNode, TableTree, TextNode};
use serde::Serialize;

/// Result of placing a table on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Materialized {
    pub root: NodeId,
    pub nodes_created: usize,
    pub position: (f64, f64),
}

/// Create `tree` on `canvas`, then position and select its root.
///
/// Nodes are created depth-first. If the canvas fails after the root has
/// been created, the root (and everything under it) is removed before the
/// error is returned.
pub fn materialize<C: Canvas + ?Sized>(
    tree: &TableTree,
    canvas: &mut C,
    session: &mut CompositionSession,
) -> Result<Materialized, CanvasError> {
    let mut builder = Builder {
        canvas,
        session,
        created: 0,
    };

    let root = builder.create(&tree.root)?;
    if let Err(err) = builder.finish(&tree.root, root) {
        tracing::warn!(error = %err, "table creation failed, removing partial table");
        if let Err(cleanup) = builder.canvas.remove(root) {
            tracing::warn!(error = %cleanup, "could not remove partial table");
        }
        return Err(err);
    }

    let viewport = builder.canvas.viewport();
    let position = (
        viewport.x + builder.session.offset.0,
        viewport.y + builder.session.offset.1,
    );
    let placed = builder
        .canvas
        .set_position(root, position.0, position.1)
        .and_then(|()| builder.canvas.select(&[root]));
    if let Err(err) = placed {
        if let Err(cleanup) = builder.canvas.remove(root) {
            tracing::warn!(error = %cleanup, "could not remove partial table");
        }
        return Err(err);
    }

    tracing::info!(nodes = builder.created, "table placed on canvas");
    Ok(Materialized {
        root,
        nodes_created: builder.created,
        position,
    })
}

struct Builder<'a, C: ?Sized> {
    canvas: &'a mut C,
    session: &'a mut CompositionSession,
    created: usize,
}

impl<C: Canvas + ?Sized> Builder<'_, C> {
    /// Create `element` itself, without children.
    fn create(&mut self, element: &Element) -> Result<NodeId, CanvasError> {
        let id = match element {
            Element::Frame(frame) => self.frame(frame)?,
            Element::Text(text) => self.text(text)?,
            Element::Swatch(swatch) => self.swatch(swatch)?,
        };
        self.created += 1;
        Ok(id)
    }

    /// Create and attach the children of `element` under `node`.
    fn finish(&mut self, element: &Element, node: NodeId) -> Result<(), CanvasError> {
        for child in element.children() {
            let id = self.create(child)?;
            if let Err(err) = self.canvas.append_child(node, id) {
                // not yet under the root, so root cleanup would miss it
                if let Err(cleanup) = self.canvas.remove(id) {
                    tracing::warn!(error = %cleanup, "could not remove detached node");
                }
                return Err(err);
            }
            self.finish(child, id)?;
        }
        Ok(())
    }

    fn frame(&mut self, frame: &Frame) -> Result<NodeId, CanvasError> {
        let fill = frame
            .fill
            .map(|color| self.session.fills.solid(color, &mut *self.canvas));
        let stroke = frame.stroke.map(|stroke| StrokePaint {
            paint: self.session.fills.solid(stroke.color, &mut *self.canvas),
            top: stroke.top,
            right: stroke.right,
            bottom: stroke.bottom,
            left: stroke.left,
        });
        self.canvas.create_frame(&FrameProps {
            name: &frame.name,
            axis: frame.axis,
            width: frame.width,
            padding: frame.padding,
            gap: frame.gap,
            fill,
            stroke,
            radii: frame.radii,
        })
    }

    fn text(&mut self, text: &TextNode) -> Result<NodeId, CanvasError> {
        let font = self.session.fonts.resolve(text.role, &mut *self.canvas);
        let fill = self.session.fills.solid(text.color, &mut *self.canvas);
        self.canvas.create_text(&TextProps {
            name: &text.name,
            content: &text.content,
            font: &font,
            size: text.size,
            fill,
        })
    }

    fn swatch(&mut self, swatch: &SwatchNode) -> Result<NodeId, CanvasError> {
        let fill = self
            .session
            .fills
            .swatch(swatch.color, swatch.binding.as_ref(), &mut *self.canvas);
        let stroke = self.session.fills.solid(swatch.border, &mut *self.canvas);
        self.canvas.create_ellipse(&EllipseProps {
            name: &swatch.name,
            size: swatch.size,
            fill,
            stroke: Some(stroke),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryCanvas, Viewport};
    use crate::model::{Mode, Rgba, VariableRef, VariableType};
    use crate::table::{
        build_tree, Cell, LayoutGroup, LayoutRow, Rounding, Swatch, TableLayout, TableOptions,
    };

    fn tree() -> TableTree {
        let layout = TableLayout {
            title: "Core".into(),
            modes: vec![Mode::new("m1", "Light")],
            groups: vec![LayoutGroup {
                id: "color".into(),
                label: "color".into(),
                individual: false,
                rows: vec![LayoutRow {
                    variable_id: "v1".into(),
                    name: "color/red".into(),
                    dev_token: "var(--color-red)".into(),
                    var_type: VariableType::Color,
                    cells: vec![Cell {
                        text: "#FF0000".into(),
                        swatch: Some(Swatch {
                            color: Rgba::rgb(1.0, 0.0, 0.0),
                            binding: Some(VariableRef {
                                id: "v0".into(),
                                name: "base/red".into(),
                            }),
                        }),
                    }],
                    rounding: Rounding::ALL,
                }],
            }],
            options: TableOptions::default(),
            skipped_rows: 0,
        };
        build_tree(&layout)
    }

    #[test]
    fn test_materialize_places_and_selects_root() {
        let tree = tree();
        let mut canvas = MemoryCanvas::new().with_viewport(Viewport {
            x: 50.0,
            y: -20.0,
            width: 800.0,
            height: 600.0,
        });
        let mut session = CompositionSession::new();

        let placed = materialize(&tree, &mut canvas, &mut session).unwrap();

        assert_eq!(placed.nodes_created, tree.node_count());
        assert_eq!(canvas.node_count(), tree.node_count());
        assert_eq!(placed.position, (150.0, 80.0));
        assert_eq!(canvas.selection(), &[placed.root]);
        assert_eq!(canvas.roots().len(), 1);
        assert!(canvas.texts_under(placed.root).contains(&"var(--color-red)"));
    }

    #[test]
    fn test_swatch_is_bound_to_alias_target() {
        let mut canvas = MemoryCanvas::new();
        materialize(&tree(), &mut canvas, &mut CompositionSession::new()).unwrap();
        let bound = canvas
            .nodes()
            .filter_map(|n| n.fill.as_ref())
            .any(|p| p.bound_variable.as_deref() == Some("v0"));
        assert!(bound);
    }

    #[test]
    fn test_failure_removes_partial_table() {
        let mut canvas = MemoryCanvas::new().with_node_limit(5);
        let err = materialize(&tree(), &mut canvas, &mut CompositionSession::new());
        assert!(err.is_err());
        assert_eq!(canvas.node_count(), 0);
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_failed_attach_removes_detached_node() {
        let mut canvas = MemoryCanvas::new().with_failing_appends();
        let err = materialize(&tree(), &mut canvas, &mut CompositionSession::new());
        assert!(matches!(err, Err(CanvasError::Operation(_))));
        assert_eq!(canvas.node_count(), 0);
    }

    #[test]
    fn test_unavailable_fonts_do_not_fail() {
        let mut canvas = MemoryCanvas::new().with_unavailable_font("Inter");
        let placed = materialize(&tree(), &mut canvas, &mut CompositionSession::new());
        assert!(placed.is_ok());
    }
}
