//! JSON preview manifest
//!
//! Lets a host describe previews and hand-written pages without compiling
//! them in. Layout:
//!
//! ```json
//! {
//!   "previews": [
//!     { "fileId": "App/Button.rs", "line": 12, "column": 1,
//!       "payload": { "$type": "payload", "displayName": "Primary",
//!                    "source": { "$type": "preview.v1.DeclarativeSource",
//!                                "makeView": { "$factory": "PrimaryButton" } } } }
//!   ],
//!   "pages": [
//!     { "title": "Palette", "folder": "Design", "body": "Brand colors" }
//!   ]
//! }
//! ```
//!
//! Payload objects become [`Record`]s tagged by `$type`. `{"$factory": name}`
//! is a view factory producing a hosted view named `name` (optional
//! `"$kind"`: `declarative`, `widget` or `controller`). A payload of
//! `{"$fail": reason}` fails instantiation with `reason`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::{CatalogFolder, CatalogPage, HostedKind, IdAllocator, Node, View};
use crate::error::{AdaptError, Result, StorybookError};
use crate::preview::{Field, PreviewDescriptor, Record};

const TYPE_KEY: &str = "$type";
const FACTORY_KEY: &str = "$factory";
const KIND_KEY: &str = "$kind";
const FAIL_KEY: &str = "$fail";
const UNTAGGED_RECORD: &str = "record";
const DEFAULT_PAGE_FILE_ID: &str = "manifest";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestFile {
    #[serde(default)]
    previews: Vec<PreviewEntry>,
    #[serde(default)]
    pages: Vec<ManualPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewEntry {
    file_id: String,
    line: u32,
    #[serde(default)]
    column: u32,
    payload: Value,
}

/// A hand-written page declared in the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPage {
    pub title: String,
    /// Folder under the catalog root; `None` places the page at the root
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_scroll")]
    pub scroll: bool,
}

fn default_scroll() -> bool {
    true
}

/// Previews and manual pages loaded from a manifest file.
#[derive(Debug, Default)]
pub struct Manifest {
    pub previews: Vec<PreviewDescriptor>,
    pub pages: Vec<ManualPage>,
}

impl Manifest {
    /// Build catalog nodes for the manual pages, grouped into folders.
    pub fn manual_nodes(&self, allocator: &IdAllocator) -> Vec<Node> {
        let mut root_pages: Vec<Node> = Vec::new();
        let mut folders: BTreeMap<&str, Vec<Node>> = BTreeMap::new();

        for entry in &self.pages {
            let body = entry.body.clone();
            let file_id = entry.file_id.as_deref().unwrap_or(DEFAULT_PAGE_FILE_ID);
            let mut page = CatalogPage::with_destination(
                allocator,
                file_id,
                entry.line,
                entry.title.as_str(),
                move || View::text(body.clone()),
            );
            if !entry.scroll {
                page = page.without_scroll_view();
            }
            match entry.folder.as_deref() {
                Some(folder) => folders.entry(folder).or_default().push(page.into()),
                None => root_pages.push(page.into()),
            }
        }

        folders
            .into_iter()
            .map(|(title, pages)| CatalogFolder::new(title, pages).into())
            .chain(root_pages)
            .collect()
    }
}

/// Load a manifest from disk.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| StorybookError::storage(path, e))?;
    let manifest = parse_manifest(&content, path)?;
    info!(
        path = %path.display(),
        preview_count = manifest.previews.len(),
        page_count = manifest.pages.len(),
        "Loaded preview manifest"
    );
    Ok(manifest)
}

/// Parse manifest JSON. `path` is only used in error messages.
pub fn parse_manifest(json: &str, path: &Path) -> Result<Manifest> {
    let invalid = |message: String| StorybookError::Manifest {
        path: PathBuf::from(path),
        message,
    };

    let file: ManifestFile = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;

    let previews = file
        .previews
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            preview_descriptor(entry).map_err(|message| invalid(format!("previews[{i}]: {message}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Manifest {
        previews,
        pages: file.pages,
    })
}

fn preview_descriptor(entry: PreviewEntry) -> std::result::Result<PreviewDescriptor, String> {
    let PreviewEntry {
        file_id,
        line,
        column,
        payload,
    } = entry;

    let Value::Object(object) = payload else {
        return Err("payload must be an object".to_string());
    };

    if let Some(reason) = object.get(FAIL_KEY) {
        let reason = reason
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| reason.to_string());
        return Ok(PreviewDescriptor::new(file_id, line, column, move || {
            Err(AdaptError::Instantiation(reason.clone()))
        }));
    }

    let record = record_from_object(&object, "payload")?;
    Ok(PreviewDescriptor::from_record(file_id, line, column, record))
}

fn record_from_object(object: &Map<String, Value>, at: &str) -> std::result::Result<Record, String> {
    let type_name = match object.get(TYPE_KEY) {
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => return Err(format!("{at}.{TYPE_KEY} must be a string")),
        None => UNTAGGED_RECORD,
    };

    let mut record = Record::new(type_name);
    for (name, value) in object {
        if name == TYPE_KEY {
            continue;
        }
        let path = format!("{at}.{name}");
        record = record.with(name.as_str(), field_from_value(value, &path)?);
    }
    Ok(record)
}

fn field_from_value(value: &Value, at: &str) -> std::result::Result<Field, String> {
    match value {
        Value::String(s) => Ok(Field::Str(s.clone())),
        Value::Bool(b) => Ok(Field::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(Field::Int)
            .ok_or_else(|| format!("{at} must be an integer")),
        Value::Object(object) => match object.get(FACTORY_KEY) {
            Some(Value::String(name)) => {
                let kind = hosted_kind(object.get(KIND_KEY), at)?;
                let name = name.clone();
                Ok(Field::Factory(std::sync::Arc::new(move || {
                    View::hosted(kind, name.clone())
                })))
            }
            Some(_) => Err(format!("{at}.{FACTORY_KEY} must be a string")),
            None => record_from_object(object, at).map(Field::Record),
        },
        Value::Null | Value::Array(_) => Err(format!("{at} has an unsupported value")),
    }
}

fn hosted_kind(value: Option<&Value>, at: &str) -> std::result::Result<HostedKind, String> {
    match value.and_then(Value::as_str) {
        None if value.is_none() => Ok(HostedKind::Declarative),
        Some("declarative") => Ok(HostedKind::Declarative),
        Some("widget") => Ok(HostedKind::Widget),
        Some("controller") => Ok(HostedKind::Controller),
        _ => Err(format!("{at}.{KIND_KEY} must be declarative, widget or controller")),
    }
}
