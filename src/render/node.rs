/// Declarative layout tree handed to the display host.
///
/// The host owns text shaping, alignment and animation timing; this tree only
/// names the primitives and their arrangement. It serializes to JSON with a
/// `type` tag per node.

use serde::Serialize;

use crate::colors::Color;

/// Bitmap fonts available on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    /// 4×6, the workhorse for labels.
    #[serde(rename = "tom-thumb")]
    TomThumb,
    /// 5×8, used for values on the narrow canvas.
    #[serde(rename = "tb-8")]
    Tb8,
    /// 6×13, used for values on the wide canvas.
    #[serde(rename = "6x13")]
    Font6x13,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text {
        content: String,
        font: Font,
        color: Color,
    },
    Row {
        children: Vec<Node>,
        main_align: Align,
        cross_align: Align,
        expanded: bool,
    },
    Column {
        children: Vec<Node>,
        main_align: Align,
        cross_align: Align,
        expanded: bool,
    },
    Padding {
        pad: Insets,
        child: Box<Node>,
    },
    Marquee {
        width: u32,
        child: Box<Node>,
    },
    Box {
        width: Option<u32>,
        height: Option<u32>,
        color: Option<Color>,
        child: Option<Box<Node>>,
    },
    /// Children shown one after another, each for one root delay.
    Animation { frames: Vec<Node> },
}

impl Node {
    pub fn text(content: impl Into<String>, font: Font, color: Color) -> Node {
        Node::Text {
            content: content.into(),
            font,
            color,
        }
    }

    /// Row spread across the full width, children vertically centered.
    pub fn spread_row(children: Vec<Node>) -> Node {
        Node::Row {
            children,
            main_align: Align::SpaceBetween,
            cross_align: Align::Center,
            expanded: true,
        }
    }

    /// Row packed at the start, children bottom-aligned so a small unit
    /// label sits on the baseline of a larger value.
    pub fn packed_row(children: Vec<Node>) -> Node {
        Node::Row {
            children,
            main_align: Align::Start,
            cross_align: Align::End,
            expanded: false,
        }
    }

    pub fn column(children: Vec<Node>, main_align: Align) -> Node {
        Node::Column {
            children,
            main_align,
            cross_align: Align::Start,
            expanded: true,
        }
    }

    pub fn centered_column(children: Vec<Node>) -> Node {
        Node::Column {
            children,
            main_align: Align::Center,
            cross_align: Align::Center,
            expanded: true,
        }
    }

    pub fn marquee(width: u32, child: Node) -> Node {
        Node::Marquee {
            width,
            child: Box::new(child),
        }
    }

    /// Horizontal divider line, one pixel tall.
    pub fn rule(width: u32, color: Color) -> Node {
        Node::Box {
            width: Some(width),
            height: Some(1),
            color: Some(color),
            child: None,
        }
    }

    pub fn padded(pad: Insets, child: Node) -> Node {
        Node::Padding {
            pad,
            child: Box::new(child),
        }
    }

    /// All text content in the subtree, depth first. Used by tests and the
    /// verification summary.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text { content, .. } => out.push(content),
            Node::Row { children, .. } | Node::Column { children, .. } => {
                children.iter().for_each(|c| c.collect_texts(out))
            }
            Node::Padding { child, .. } | Node::Marquee { child, .. } => child.collect_texts(out),
            Node::Box { child, .. } => {
                if let Some(child) = child {
                    child.collect_texts(out)
                }
            }
            Node::Animation { frames } => frames.iter().for_each(|f| f.collect_texts(out)),
        }
    }
}

/// Top of the tree: the host advances animations every `delay_ms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root {
    pub delay_ms: u32,
    pub child: Node,
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Narrow canvases are the standard 64-pixel display.
pub const WIDE_CANVAS_MIN_WIDTH: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Narrow,
    Wide,
}

/// What the host reports about the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    /// Double-density ("2x") rendering.
    pub is_2x: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 64,
            is_2x: false,
        }
    }
}

impl Canvas {
    pub fn layout(&self) -> Layout {
        if self.is_2x || self.width >= WIDE_CANVAS_MIN_WIDTH {
            Layout::Wide
        } else {
            Layout::Narrow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    #[test]
    fn test_layout_mode_from_canvas() {
        assert_eq!(Canvas::default().layout(), Layout::Narrow);
        assert_eq!(Canvas { width: 128, is_2x: false }.layout(), Layout::Wide);
        assert_eq!(Canvas { width: 64, is_2x: true }.layout(), Layout::Wide);
    }

    #[test]
    fn test_tree_serializes_with_type_tags() {
        let root = Root {
            delay_ms: 100,
            child: Node::marquee(64, Node::text("Cheesman", Font::TomThumb, colors::CYAN)),
        };
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["child"]["type"], "marquee");
        assert_eq!(json["child"]["child"]["type"], "text");
        assert_eq!(json["child"]["child"]["font"], "tom-thumb");
        assert_eq!(json["child"]["child"]["color"], colors::CYAN);
    }

    #[test]
    fn test_rule_is_a_childless_box() {
        let json = serde_json::to_value(Node::rule(128, colors::DARK_GRAY)).unwrap();
        assert_eq!(json["type"], "box");
        assert_eq!(json["width"], 128);
        assert_eq!(json["height"], 1);
        assert_eq!(json["color"], colors::DARK_GRAY);
        assert!(json["child"].is_null());
        assert!(Node::rule(64, colors::DARK_GRAY).texts().is_empty());
    }

    #[test]
    fn test_texts_walks_every_container() {
        let tree = Node::Animation {
            frames: vec![
                Node::spread_row(vec![
                    Node::text("a", Font::Tb8, colors::WHITE),
                    Node::padded(Insets { left: 1, ..Insets::default() }, Node::text("b", Font::Tb8, colors::WHITE)),
                ]),
                Node::Box {
                    width: None,
                    height: None,
                    color: None,
                    child: Some(Box::new(Node::text("c", Font::TomThumb, colors::GRAY))),
                },
            ],
        };
        assert_eq!(tree.texts(), vec!["a", "b", "c"]);
    }
}
