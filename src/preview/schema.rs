//! Known preview payload shapes
//!
//! The host's preview format has changed across platform versions. Each known
//! layout is listed here with the tag that identifies it; [`parse_payload`]
//! maps an instantiated payload onto exactly one [`PreviewShape`].

use crate::error::AdaptError;

use super::descriptor::{Record, ViewFactory};

pub const DISPLAY_NAME_FIELD: &str = "displayName";
pub const SOURCE_FIELD: &str = "source";
pub const SOURCE_FIELD_FALLBACK: &str = "dataSource";

// v3: content-source union with an explicit content category
pub const DATA_SOURCE_V3: &str = "preview.v3.DataSource";
pub const WIDGET_PREVIEW_V3: &str = "preview.v3.DefaultSource<Widget>";
pub const CONTROLLER_PREVIEW_V3: &str = "preview.v3.DefaultSource<Controller>";
pub const CATEGORY_DECLARATIVE: &str = "declarative";
/// Covers both embeddable widgets and presented controllers
pub const CATEGORY_WIDGET: &str = "widget";

// v2: one tag per content kind
pub const DECLARATIVE_SOURCE_V2: &str = "preview.v2.DefaultSource<DeclarativeBody>";
pub const WIDGET_SOURCE_V2: &str = "preview.v2.DefaultSource<Widget>";
pub const CONTROLLER_SOURCE_V2: &str = "preview.v2.DefaultSource<Controller>";

// v1: legacy direct sources
pub const DECLARATIVE_SOURCE_V1: &str = "preview.v1.DeclarativeSource";
pub const WIDGET_SOURCE_V1: &str = "preview.v1.WidgetSource";
pub const CONTROLLER_SOURCE_V1: &str = "preview.v1.ControllerSource";

const SINGLE_PREVIEW_BODY: [&str; 3] = ["structure", "singlePreview", "makeBody"];
const V3_BODY: [&str; 4] = ["preview", "structure", "singlePreview", "makeBody"];
const V3_CATEGORY: [&str; 3] = ["preview", "contentCategory", "rawValue"];
const V1_MAKE_VIEW: [&str; 1] = ["makeView"];

/// v1 sources that can never be adapted on the platform versions that emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    Widget,
    Controller,
}

impl UnsupportedKind {
    pub fn message(self) -> &'static str {
        match self {
            UnsupportedKind::Widget => "Widget preview not supported on this platform version",
            UnsupportedKind::Controller => {
                "Controller preview not supported on this platform version"
            }
        }
    }
}

/// Why a payload could not be matched to a renderable shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrecognized {
    /// v3 payload with a content category we do not know
    ContentCategory(String),
    /// v3 widget payload whose inner preview tag we do not know
    PreviewSource(String),
    /// Content source tag matches no known version
    Source(String),
}

impl Unrecognized {
    pub fn reason(&self) -> String {
        match self {
            Unrecognized::ContentCategory(category) => {
                format!("Failed to load preview (content category = {category})")
            }
            Unrecognized::PreviewSource(type_name) => {
                format!("Failed to load preview (preview.typeName = {type_name})")
            }
            Unrecognized::Source(type_name) => format!("Failed to load preview ({type_name})"),
        }
    }
}

pub enum PreviewShape {
    /// Declarative body, rendered inline with a copy-location toolbar item
    Declarative(ViewFactory),
    /// Imperative widget embedded in the page
    Widget(ViewFactory),
    /// Controller presented over the page
    Controller(ViewFactory),
    /// v1 direct declarative source
    LegacyDeclarative(ViewFactory),
    Unsupported(UnsupportedKind),
    Unrecognized(Unrecognized),
}

impl std::fmt::Debug for PreviewShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewShape::Declarative(_) => f.write_str("Declarative"),
            PreviewShape::Widget(_) => f.write_str("Widget"),
            PreviewShape::Controller(_) => f.write_str("Controller"),
            PreviewShape::LegacyDeclarative(_) => f.write_str("LegacyDeclarative"),
            PreviewShape::Unsupported(kind) => write!(f, "Unsupported({kind:?})"),
            PreviewShape::Unrecognized(why) => write!(f, "Unrecognized({why:?})"),
        }
    }
}

/// A payload split into the parts the adapter needs.
#[derive(Debug)]
pub struct ParsedPayload {
    pub title: Option<String>,
    /// Tag of the content source record
    pub source_type: String,
    pub shape: PreviewShape,
}

/// Optional title: absent or non-string display names read as `None`.
pub fn read_title(payload: &Record) -> Option<String> {
    payload
        .str_at(&[DISPLAY_NAME_FIELD])
        .ok()
        .map(str::to_string)
}

/// Content source under its current name, or the older one.
pub fn content_source(payload: &Record) -> Result<&Record, AdaptError> {
    payload
        .record_at(&[SOURCE_FIELD])
        .or_else(|_| payload.record_at(&[SOURCE_FIELD_FALLBACK]))
}

pub fn parse_payload(payload: &Record) -> Result<ParsedPayload, AdaptError> {
    let title = read_title(payload);
    let source = content_source(payload)?;
    let shape = parse_source(source)?;
    Ok(ParsedPayload {
        title,
        source_type: source.type_name().to_string(),
        shape,
    })
}

fn parse_source(source: &Record) -> Result<PreviewShape, AdaptError> {
    let shape = match source.type_name() {
        DATA_SOURCE_V3 => parse_data_source(source)?,
        DECLARATIVE_SOURCE_V2 => {
            PreviewShape::Declarative(source.factory_at(&SINGLE_PREVIEW_BODY)?)
        }
        WIDGET_SOURCE_V2 => PreviewShape::Widget(source.factory_at(&SINGLE_PREVIEW_BODY)?),
        CONTROLLER_SOURCE_V2 => {
            PreviewShape::Controller(source.factory_at(&SINGLE_PREVIEW_BODY)?)
        }
        DECLARATIVE_SOURCE_V1 => {
            PreviewShape::LegacyDeclarative(source.factory_at(&V1_MAKE_VIEW)?)
        }
        WIDGET_SOURCE_V1 => PreviewShape::Unsupported(UnsupportedKind::Widget),
        CONTROLLER_SOURCE_V1 => PreviewShape::Unsupported(UnsupportedKind::Controller),
        other => PreviewShape::Unrecognized(Unrecognized::Source(other.to_string())),
    };
    Ok(shape)
}

fn parse_data_source(source: &Record) -> Result<PreviewShape, AdaptError> {
    let shape = match source.str_at(&V3_CATEGORY)? {
        CATEGORY_DECLARATIVE => PreviewShape::Declarative(source.factory_at(&V3_BODY)?),
        CATEGORY_WIDGET => match source.record_at(&["preview"])?.type_name() {
            WIDGET_PREVIEW_V3 => PreviewShape::Widget(source.factory_at(&V3_BODY)?),
            CONTROLLER_PREVIEW_V3 => PreviewShape::Controller(source.factory_at(&V3_BODY)?),
            other => PreviewShape::Unrecognized(Unrecognized::PreviewSource(other.to_string())),
        },
        other => PreviewShape::Unrecognized(Unrecognized::ContentCategory(other.to_string())),
    };
    Ok(shape)
}
