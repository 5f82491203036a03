//! Visual node tree built from a [`TableLayout`].
//!
//! The tree is a plain in-memory description of frames, text and swatches.
//! Nothing touches a canvas until [`crate::host::materialize`] walks it, so
//! a failure while composing never leaves half a table behind.

use super::layout::{Cell, LayoutGroup, Rounding, TableLayout};
use super::theme::Palette;
use crate::model::{Rgba, VariableRef};
use serde::{Deserialize, Serialize};

pub const CORNER_RADIUS: f64 = 8.0;
pub const GROUP_GAP: f64 = 24.0;
pub const BLOCK_GAP: f64 = 16.0;
pub const CELL_PADDING_X: f64 = 16.0;
pub const CELL_PADDING_Y: f64 = 12.0;
pub const SWATCH_SIZE: f64 = 16.0;
pub const SWATCH_GAP: f64 = 8.0;
pub const NAME_COLUMN_WIDTH: f64 = 280.0;
pub const TOKEN_COLUMN_WIDTH: f64 = 260.0;
pub const MODE_COLUMN_WIDTH: f64 = 220.0;
pub const HEADER_FONT_SIZE: f64 = 14.0;
pub const BODY_FONT_SIZE: f64 = 13.0;

/// Semantic text role, mapped to concrete fonts by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Primary,
    Secondary,
    Header,
    Fallback,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    #[must_use]
    pub fn from_rounding(rounding: Rounding, radius: f64) -> Self {
        let top = if rounding.top { radius } else { 0.0 };
        let bottom = if rounding.bottom { radius } else { 0.0 };
        Self {
            top_left: top,
            top_right: top,
            bottom_right: bottom,
            bottom_left: bottom,
        }
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

/// Per-side stroke. Rows below a header omit the top side so borders join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Stroke {
    #[must_use]
    pub const fn all(color: Rgba) -> Self {
        Self {
            color,
            top: 1.0,
            right: 1.0,
            bottom: 1.0,
            left: 1.0,
        }
    }

    #[must_use]
    pub const fn without_top(color: Rgba) -> Self {
        Self {
            color,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
            left: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub axis: Axis,
    /// Fixed width; `None` hugs the content
    pub width: Option<f64>,
    pub padding: Padding,
    pub gap: f64,
    pub fill: Option<Rgba>,
    pub stroke: Option<Stroke>,
    pub radii: CornerRadii,
    pub children: Vec<Element>,
}

impl Frame {
    fn new(name: impl Into<String>, axis: Axis) -> Self {
        Self {
            name: name.into(),
            axis,
            width: None,
            padding: Padding::default(),
            gap: 0.0,
            fill: None,
            stroke: None,
            radii: CornerRadii::default(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub name: String,
    pub content: String,
    pub role: FontRole,
    pub size: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwatchNode {
    pub name: String,
    pub color: Rgba,
    pub size: f64,
    pub border: Rgba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<VariableRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Frame(Frame),
    Text(TextNode),
    Swatch(SwatchNode),
}

impl Element {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Frame(f) => &f.name,
            Self::Text(t) => &t.name,
            Self::Swatch(s) => &s.name,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        match self {
            Self::Frame(f) => &f.children,
            _ => &[],
        }
    }

    #[must_use]
    pub const fn as_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(f) => Some(f),
            _ => None,
        }
    }

    /// Depth-first pre-order traversal, including `self`.
    pub fn walk(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children().iter().rev());
        }
        out
    }
}

/// The visual tree for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableTree {
    pub root: Element,
}

impl TableTree {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.walk().len()
    }

    pub fn swatches(&self) -> impl Iterator<Item = &SwatchNode> {
        self.root.walk().into_iter().filter_map(|el| match el {
            Element::Swatch(s) => Some(s),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.root.walk().into_iter().filter_map(|el| match el {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }
}

/// Build the visual tree: the main block followed by one block per mode,
/// side by side.
#[must_use]
pub fn build_tree(layout: &TableLayout) -> TableTree {
    let palette = layout.options.theme.palette();
    let mut root = Frame::new(format!("Variables: {}", layout.title), Axis::Horizontal);
    root.gap = BLOCK_GAP;
    root.padding = Padding {
        x: GROUP_GAP,
        y: GROUP_GAP,
    };
    root.fill = Some(palette.background);

    let show_dev_token = layout.options.show_dev_token;
    let token_block = |group: &LayoutGroup| {
        let mut header = vec![header_cell(group.label.clone(), NAME_COLUMN_WIDTH, &palette)];
        if show_dev_token {
            header.push(header_cell("Dev token".into(), TOKEN_COLUMN_WIDTH, &palette));
        }
        let rows: Vec<RowSpec> = group
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![text_cell(
                    row.name.clone(),
                    FontRole::Primary,
                    NAME_COLUMN_WIDTH,
                    palette.text_primary,
                )];
                if show_dev_token {
                    cells.push(text_cell(
                        row.dev_token.clone(),
                        FontRole::Secondary,
                        TOKEN_COLUMN_WIDTH,
                        palette.text_secondary,
                    ));
                }
                (format!("Row: {}", row.name), row.rounding, cells)
            })
            .collect();
        (header, rows)
    };
    root.children.push(block("Design tokens", &layout.groups, token_block, &palette));

    for (column, mode) in layout.modes.iter().enumerate() {
        root.children.push(block(
            &format!("Mode: {}", mode.name),
            &layout.groups,
            |group| {
                let header = vec![header_cell(mode.name.clone(), MODE_COLUMN_WIDTH, &palette)];
                let rows: Vec<RowSpec> = group
                    .rows
                    .iter()
                    .map(|row| {
                        let cell = row
                            .cells
                            .get(column)
                            .map(|cell| value_cell(cell, &palette))
                            .unwrap_or_else(|| {
                                text_cell(
                                    String::new(),
                                    FontRole::Primary,
                                    MODE_COLUMN_WIDTH,
                                    palette.text_primary,
                                )
                            });
                        (format!("Row: {}", row.name), row.rounding, vec![cell])
                    })
                    .collect();
                (header, rows)
            },
            &palette,
        ));
    }

    TableTree {
        root: Element::Frame(root),
    }
}

type RowSpec = (String, Rounding, Vec<Element>);

fn block<F>(name: &str, groups: &[LayoutGroup], columns: F, palette: &Palette) -> Element
where
    F: Fn(&LayoutGroup) -> (Vec<Element>, Vec<RowSpec>),
{
    let mut frame = Frame::new(name, Axis::Vertical);
    frame.gap = GROUP_GAP;

    for group in groups {
        let (header_cells, rows) = columns(group);
        let mut group_frame = Frame::new(format!("Group: {}", group.label), Axis::Vertical);

        let mut header = Frame::new("Header", Axis::Horizontal);
        header.fill = Some(palette.header_fill);
        header.stroke = Some(Stroke::all(palette.border));
        header.radii = CornerRadii::from_rounding(group.header_rounding(), CORNER_RADIUS);
        header.children = header_cells;
        group_frame.children.push(Element::Frame(header));

        for (row_name, rounding, cells) in rows {
            let mut row = Frame::new(row_name, Axis::Horizontal);
            row.fill = Some(palette.row_fill);
            row.stroke = Some(Stroke::without_top(palette.border));
            // top corners belong to the header above
            row.radii = CornerRadii::from_rounding(
                Rounding {
                    top: false,
                    bottom: rounding.bottom,
                },
                CORNER_RADIUS,
            );
            row.children = cells;
            group_frame.children.push(Element::Frame(row));
        }

        frame.children.push(Element::Frame(group_frame));
    }

    Element::Frame(frame)
}

fn cell_frame(width: f64) -> Frame {
    let mut frame = Frame::new("Cell", Axis::Horizontal);
    frame.width = Some(width);
    frame.padding = Padding {
        x: CELL_PADDING_X,
        y: CELL_PADDING_Y,
    };
    frame.gap = SWATCH_GAP;
    frame
}

fn header_cell(content: String, width: f64, palette: &Palette) -> Element {
    let mut frame = cell_frame(width);
    frame.children.push(Element::Text(TextNode {
        name: content.clone(),
        content,
        role: FontRole::Header,
        size: HEADER_FONT_SIZE,
        color: palette.header_text,
    }));
    Element::Frame(frame)
}

fn text_cell(content: String, role: FontRole, width: f64, color: Rgba) -> Element {
    let mut frame = cell_frame(width);
    frame.children.push(Element::Text(TextNode {
        name: content.clone(),
        content,
        role,
        size: BODY_FONT_SIZE,
        color,
    }));
    Element::Frame(frame)
}

fn value_cell(cell: &Cell, palette: &Palette) -> Element {
    let mut frame = cell_frame(MODE_COLUMN_WIDTH);
    if let Some(swatch) = &cell.swatch {
        frame.children.push(Element::Swatch(SwatchNode {
            name: "Swatch".into(),
            color: swatch.color,
            size: SWATCH_SIZE,
            border: palette.swatch_border,
            binding: swatch.binding.clone(),
        }));
    }
    frame.children.push(Element::Text(TextNode {
        name: cell.text.clone(),
        content: cell.text.clone(),
        role: FontRole::Primary,
        size: BODY_FONT_SIZE,
        color: palette.text_primary,
    }));
    Element::Frame(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mode, VariableType};
    use crate::table::{LayoutRow, Swatch, TableOptions, TableTheme};

    fn row(name: &str, rounding: Rounding, cells: Vec<Cell>) -> LayoutRow {
        LayoutRow {
            variable_id: name.into(),
            name: name.into(),
            dev_token: crate::records::dev_token(name),
            var_type: VariableType::Color,
            cells,
            rounding,
        }
    }

    fn cell(text: &str, swatch: bool) -> Cell {
        Cell {
            text: text.into(),
            swatch: swatch.then(|| Swatch {
                color: Rgba::rgb(1.0, 0.0, 0.0),
                binding: Some(VariableRef {
                    id: "v9".into(),
                    name: "base/red".into(),
                }),
            }),
        }
    }

    fn layout(options: TableOptions) -> TableLayout {
        TableLayout {
            title: "Core".into(),
            modes: vec![Mode::new("m1", "Light"), Mode::new("m2", "Dark")],
            groups: vec![LayoutGroup {
                id: "color".into(),
                label: "color".into(),
                individual: false,
                rows: vec![
                    row(
                        "color/a",
                        Rounding {
                            top: true,
                            bottom: false,
                        },
                        vec![cell("#FF0000", true), cell("#FF0000", true)],
                    ),
                    row(
                        "color/b",
                        Rounding {
                            top: false,
                            bottom: true,
                        },
                        vec![cell("x", false), cell("y", false)],
                    ),
                ],
            }],
            options,
            skipped_rows: 0,
        }
    }

    fn group_frame(tree: &TableTree, block: usize) -> &Frame {
        tree.root.children()[block].children()[0]
            .as_frame()
            .expect("group frame")
    }

    #[test]
    fn test_root_holds_main_and_mode_blocks() {
        let tree = build_tree(&layout(TableOptions::default()));
        let names: Vec<&str> = tree.root.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["Design tokens", "Mode: Light", "Mode: Dark"]);
    }

    #[test]
    fn test_header_and_row_radii() {
        let tree = build_tree(&layout(TableOptions::default()));
        let group = group_frame(&tree, 1);
        let header = group.children[0].as_frame().expect("header");
        let first = group.children[1].as_frame().expect("first row");
        let last = group.children[2].as_frame().expect("last row");

        assert_eq!(header.radii.top_left, CORNER_RADIUS);
        assert_eq!(header.radii.bottom_left, 0.0);
        assert!(first.radii.is_square());
        assert_eq!(last.radii.bottom_right, CORNER_RADIUS);
        assert_eq!(last.stroke.map(|s| s.top), Some(0.0));
    }

    #[test]
    fn test_dev_token_column_toggle() {
        let with = build_tree(&layout(TableOptions::default()));
        let header = group_frame(&with, 0).children[0].children().len();
        assert_eq!(header, 2);

        let options = TableOptions {
            show_dev_token: false,
            ..TableOptions::default()
        };
        let without = build_tree(&layout(options));
        assert_eq!(group_frame(&without, 0).children[0].children().len(), 1);
        assert!(!without.texts().any(|t| t.content.starts_with("var(--")));
    }

    #[test]
    fn test_swatches_carry_binding() {
        let tree = build_tree(&layout(TableOptions::default()));
        let swatches: Vec<&SwatchNode> = tree.swatches().collect();
        assert_eq!(swatches.len(), 2);
        assert_eq!(swatches[0].binding.as_ref().map(|b| b.id.as_str()), Some("v9"));
    }

    #[test]
    fn test_theme_changes_fills() {
        let light = build_tree(&layout(TableOptions {
            theme: TableTheme::Light,
            ..TableOptions::default()
        }));
        let dark = build_tree(&layout(TableOptions::default()));
        assert_ne!(light, dark);
    }
}
