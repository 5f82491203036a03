//! Table composition.
//!
//! Composition runs in two stages. [`TableComposer`] turns sorted records
//! into a logical [`TableLayout`] (groups, rows, formatted cells and
//! rounding flags), then [`build_tree`] turns the layout into a styled
//! [`TableTree`] ready to be materialized on a canvas.

mod layout;
mod theme;
mod tree;

pub use layout::{
    row_rounding, Cell, LayoutGroup, LayoutRow, Rounding, RowError, Swatch, TableComposer,
    TableLayout,
};
pub use theme::{Palette, TableOptions, TableTheme};
pub use tree::{
    build_tree, Axis, CornerRadii, Element, FontRole, Frame, Padding, Stroke, SwatchNode,
    TableTree, TextNode, CORNER_RADIUS,
};
