//! Registry adapter: preview descriptor -> (title, renderer)
//!
//! Adaptation never fails. A payload that cannot be instantiated becomes an
//! empty renderer, and one that cannot be matched to a known shape becomes a
//! diagnostic renderer that names the offending tag and the source location.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{
    Affordance, Font, Renderer, TextStyle, Tint, ToolbarPlacement, View,
};

use super::descriptor::{PreviewDescriptor, ViewFactory};
use super::schema::{parse_payload, ParsedPayload, PreviewShape};

const TRAILING_SPACER: f32 = 16.0;
const FOOTER_OPACITY: f32 = 0.6;

/// Adapter output for one descriptor.
///
/// Ordered by module, then line. Equality uses the same key, so two previews
/// declared on the same line of the same module compare equal.
#[derive(Clone)]
pub struct AdaptedPreview {
    pub module: String,
    pub file_id: String,
    pub line: u32,
    pub column: u32,
    pub title: Option<String>,
    pub renderer: Renderer,
}

impl AdaptedPreview {
    /// Title to show in the catalog: the preview's own title when non-empty,
    /// otherwise its line.
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("line: {}", self.line),
        }
    }

    pub fn source_location(&self) -> String {
        format!("{}:{}", self.file_id, self.line)
    }
}

impl std::fmt::Debug for AdaptedPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptedPreview")
            .field("module", &self.module)
            .field("file_id", &self.file_id)
            .field("line", &self.line)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl PartialEq for AdaptedPreview {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.module == other.module
    }
}

impl Eq for AdaptedPreview {}

impl PartialOrd for AdaptedPreview {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AdaptedPreview {
    fn cmp(&self, other: &Self) -> Ordering {
        self.module
            .cmp(&other.module)
            .then_with(|| self.line.cmp(&other.line))
    }
}

/// Adapt one descriptor.
pub fn adapt(descriptor: &PreviewDescriptor) -> AdaptedPreview {
    let file_id = descriptor.file_id().to_string();
    let line = descriptor.line();
    let location = format!("{file_id}:{line}");

    let (title, renderer) = match descriptor.instantiate() {
        Err(err) => {
            warn!(
                event_type = "preview_adapt",
                file_id = %file_id,
                line,
                error = %err,
                "Preview payload could not be instantiated, using empty renderer"
            );
            let renderer: Renderer = Arc::new(|| View::Empty);
            (None, renderer)
        }
        Ok(payload) => match parse_payload(&payload) {
            Ok(parsed) => {
                let title = parsed.title.clone();
                (title, renderer_for(parsed, location))
            }
            Err(err) => {
                warn!(
                    event_type = "preview_adapt",
                    file_id = %file_id,
                    line,
                    source_type = payload.type_name(),
                    error = %err,
                    "Preview payload has an unexpected layout"
                );
                let title = super::schema::read_title(&payload);
                let reason = format!("Failed to load preview ({err})");
                (title.clone(), diagnostic_renderer(title, reason, location))
            }
        },
    };

    AdaptedPreview {
        module: descriptor.module().to_string(),
        file_id,
        line,
        column: descriptor.column(),
        title,
        renderer,
    }
}

/// Adapt every descriptor and order the result for the tree builder.
pub fn adapt_all(descriptors: &[PreviewDescriptor]) -> Vec<AdaptedPreview> {
    let mut adapted: Vec<_> = descriptors.iter().map(adapt).collect();
    adapted.sort();
    debug!(count = adapted.len(), "Adapted previews");
    adapted
}

fn renderer_for(parsed: ParsedPayload, location: String) -> Renderer {
    let ParsedPayload {
        title,
        source_type,
        shape,
    } = parsed;
    let title = title.filter(|title| !title.is_empty());

    match shape {
        PreviewShape::Declarative(make_body) => declarative_renderer(make_body, location),
        PreviewShape::Widget(make_body) => widget_renderer(title, make_body, location),
        PreviewShape::Controller(make_body) => {
            let title = title.unwrap_or(source_type);
            controller_renderer(title, make_body, location)
        }
        PreviewShape::LegacyDeclarative(make_view) => widget_renderer(title, make_view, location),
        PreviewShape::Unsupported(kind) => {
            diagnostic_renderer(title, kind.message().to_string(), location)
        }
        PreviewShape::Unrecognized(why) => {
            warn!(
                event_type = "preview_adapt",
                location = %location,
                reason = %why.reason(),
                "Unrecognized preview shape"
            );
            diagnostic_renderer(title, why.reason(), location)
        }
    }
}

/// Body with a toolbar item that copies the source location, then the footer.
fn declarative_renderer(make_body: ViewFactory, location: String) -> Renderer {
    Arc::new(move || {
        View::Stack(vec![
            View::Toolbar {
                content: Box::new(make_body()),
                placement: ToolbarPlacement::TopTrailing,
                affordance: Affordance::CopyToClipboard {
                    label: location.clone(),
                    payload: location.clone(),
                },
            },
            source_footer(&location),
        ])
    })
}

fn widget_renderer(title: Option<String>, make_body: ViewFactory, location: String) -> Renderer {
    Arc::new(move || {
        let mut children = Vec::with_capacity(4);
        if let Some(title) = &title {
            children.push(headline(title));
        }
        children.push(make_body());
        children.push(source_footer(&location));
        children.push(View::Spacer {
            height: TRAILING_SPACER,
        });
        View::Stack(children)
    })
}

fn controller_renderer(title: String, make_body: ViewFactory, location: String) -> Renderer {
    Arc::new(move || {
        View::Stack(vec![
            View::Present {
                title: title.clone(),
                content: Box::new(make_body()),
            },
            source_footer(&location),
        ])
    })
}

fn diagnostic_renderer(title: Option<String>, message: String, location: String) -> Renderer {
    let title = title.filter(|title| !title.is_empty());
    Arc::new(move || {
        let mut children = Vec::with_capacity(4);
        if let Some(title) = &title {
            children.push(headline(title));
        }
        children.push(View::styled(
            message.clone(),
            TextStyle {
                font: Font::Caption,
                monospaced_digits: true,
                tint: Tint::Error,
                opacity: 1.0,
            },
        ));
        children.push(source_footer(&location));
        children.push(View::Spacer {
            height: TRAILING_SPACER,
        });
        View::Stack(children)
    })
}

fn headline(title: &str) -> View {
    View::styled(
        title,
        TextStyle {
            font: Font::Headline,
            ..TextStyle::default()
        },
    )
}

/// `file:line` in small monospaced digits, dimmed.
pub fn source_footer(location: &str) -> View {
    View::styled(
        location,
        TextStyle {
            font: Font::Caption,
            monospaced_digits: true,
            tint: Tint::Primary,
            opacity: FOOTER_OPACITY,
        },
    )
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
