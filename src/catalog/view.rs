//! Toolkit-independent view description
//!
//! Pages never draw anything themselves. `render()` returns a [`View`] tree
//! that the presentation layer maps onto its own widgets. Hosted content
//! (whatever a preview factory produces) is carried through untouched.

use std::fmt;

/// Typographic role of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Body,
    /// 17pt semibold, used for preview titles
    Headline,
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Primary,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub monospaced_digits: bool,
    pub tint: Tint,
    pub opacity: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Font::Body,
            monospaced_digits: false,
            tint: Tint::Primary,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarPlacement {
    TopTrailing,
}

/// Small affordances attached next to a preview.
#[derive(Debug, Clone, PartialEq)]
pub enum Affordance {
    /// Menu entry that copies `payload` to the system clipboard
    CopyToClipboard { label: String, payload: String },
}

/// Which kind of host content a factory produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedKind {
    Declarative,
    Widget,
    Controller,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Empty,
    Text {
        content: String,
        style: TextStyle,
    },
    /// Vertical stack
    Stack(Vec<View>),
    Scroll(Box<View>),
    Spacer {
        height: f32,
    },
    Toolbar {
        content: Box<View>,
        placement: ToolbarPlacement,
        affordance: Affordance,
    },
    /// Content presented modally instead of being embedded in the page
    Present {
        title: String,
        content: Box<View>,
    },
    /// Opaque content owned by the host toolkit
    Hosted {
        kind: HostedKind,
        name: String,
    },
}

impl View {
    pub fn text(content: impl Into<String>) -> Self {
        View::Text {
            content: content.into(),
            style: TextStyle::default(),
        }
    }

    pub fn styled(content: impl Into<String>, style: TextStyle) -> Self {
        View::Text {
            content: content.into(),
            style,
        }
    }

    pub fn hosted(kind: HostedKind, name: impl Into<String>) -> Self {
        View::Hosted {
            kind,
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, View::Empty)
    }

    /// All text reachable from this view, depth first.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            View::Empty | View::Spacer { .. } | View::Hosted { .. } => {}
            View::Text { content, .. } => out.push(content),
            View::Stack(children) => {
                for child in children {
                    child.collect_texts(out);
                }
            }
            View::Scroll(content) => content.collect_texts(out),
            View::Toolbar {
                content,
                affordance: Affordance::CopyToClipboard { label, .. },
                ..
            } => {
                content.collect_texts(out);
                out.push(label);
            }
            View::Present { title, content } => {
                out.push(title);
                content.collect_texts(out);
            }
        }
    }

    /// True if any text element contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            View::Empty => writeln!(f, "{indent}(empty)"),
            View::Text { content, style } => match style.tint {
                Tint::Error => writeln!(f, "{indent}! {content}"),
                Tint::Primary => writeln!(f, "{indent}{content}"),
            },
            View::Stack(children) => {
                for child in children {
                    child.write_outline(f, depth)?;
                }
                Ok(())
            }
            View::Scroll(content) => content.write_outline(f, depth),
            View::Spacer { .. } => writeln!(f),
            View::Toolbar {
                content,
                affordance: Affordance::CopyToClipboard { label, .. },
                ..
            } => {
                writeln!(f, "{indent}[copy: {label}]")?;
                content.write_outline(f, depth)
            }
            View::Present { title, content } => {
                writeln!(f, "{indent}present \"{title}\"")?;
                content.write_outline(f, depth + 1)
            }
            View::Hosted { kind, name } => writeln!(f, "{indent}<{kind:?} {name}>"),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}
