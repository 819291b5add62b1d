use super::*;
use crate::catalog::HostedKind;
use crate::error::AdaptError;
use crate::preview::descriptor::Record;
use crate::preview::schema::*;

fn single_preview(kind: HostedKind, name: &'static str) -> Record {
    Record::new("structure").with_record(
        "singlePreview",
        Record::new("single").with_factory("makeBody", move || View::hosted(kind, name)),
    )
}

fn payload(title: Option<&str>, source: Record) -> Record {
    let record = Record::new("preview.Payload");
    let record = match title {
        Some(title) => record.with_str(DISPLAY_NAME_FIELD, title),
        None => record,
    };
    record.with_record(SOURCE_FIELD, source)
}

fn descriptor(file_id: &str, line: u32, record: Record) -> PreviewDescriptor {
    PreviewDescriptor::from_record(file_id, line, 5, record)
}

#[test]
fn test_declarative_v2_has_copy_affordance_and_footer() {
    let source = Record::new(DECLARATIVE_SOURCE_V2)
        .with_record("structure", single_preview(HostedKind::Declarative, "Card"));
    let adapted = adapt(&descriptor("Kit/Card.rs", 12, payload(Some("Card"), source)));

    assert_eq!(adapted.module, "Kit");
    assert_eq!(adapted.title.as_deref(), Some("Card"));

    let view = (adapted.renderer)();
    let View::Stack(children) = &view else {
        panic!("expected stack, got {view:?}");
    };
    match &children[0] {
        View::Toolbar {
            content,
            placement,
            affordance: Affordance::CopyToClipboard { label, payload },
        } => {
            assert_eq!(**content, View::hosted(HostedKind::Declarative, "Card"));
            assert_eq!(*placement, ToolbarPlacement::TopTrailing);
            assert_eq!(label, "Kit/Card.rs:12");
            assert_eq!(payload, "Kit/Card.rs:12");
        }
        other => panic!("expected toolbar, got {other:?}"),
    }
    assert_eq!(children[1], source_footer("Kit/Card.rs:12"));
}

#[test]
fn test_v3_widget_embeds_with_title_and_footer() {
    let source = Record::new(DATA_SOURCE_V3).with_record(
        "preview",
        Record::new(WIDGET_PREVIEW_V3)
            .with_record(
                "contentCategory",
                Record::new("category").with_str("rawValue", CATEGORY_WIDGET),
            )
            .with_record("structure", single_preview(HostedKind::Widget, "Slider")),
    );
    let adapted = adapt(&descriptor("Kit/Slider.rs", 30, payload(Some("Slider"), source)));
    let view = (adapted.renderer)();

    let View::Stack(children) = view else {
        panic!("expected stack");
    };
    assert_eq!(children[0], headline("Slider"));
    assert_eq!(children[1], View::hosted(HostedKind::Widget, "Slider"));
    assert_eq!(children[2], source_footer("Kit/Slider.rs:30"));
    assert_eq!(children[3], View::Spacer { height: 16.0 });
}

#[test]
fn test_controller_is_presented_with_fallback_title() {
    let source = Record::new(CONTROLLER_SOURCE_V2)
        .with_record("structure", single_preview(HostedKind::Controller, "Settings"));
    let adapted = adapt(&descriptor("Kit/Settings.rs", 8, payload(Some(""), source)));
    let view = (adapted.renderer)();

    let View::Stack(children) = view else {
        panic!("expected stack");
    };
    match &children[0] {
        View::Present { title, content } => {
            assert_eq!(title, CONTROLLER_SOURCE_V2);
            assert_eq!(**content, View::hosted(HostedKind::Controller, "Settings"));
        }
        other => panic!("expected present, got {other:?}"),
    }
    assert!(children.contains(&source_footer("Kit/Settings.rs:8")));
}

#[test]
fn test_legacy_declarative_renders_title_body_footer() {
    let source = Record::new(DECLARATIVE_SOURCE_V1)
        .with_factory("makeView", || View::hosted(HostedKind::Declarative, "Old"));
    let adapted = adapt(&descriptor("Kit/Old.rs", 2, payload(Some("Old"), source)));
    let view = (adapted.renderer)();

    assert!(view.contains_text("Old"));
    assert!(view.contains_text("Kit/Old.rs:2"));
    let View::Stack(children) = view else {
        panic!("expected stack");
    };
    assert_eq!(children[1], View::hosted(HostedKind::Declarative, "Old"));
}

#[test]
fn test_unsupported_legacy_widget_shows_static_message() {
    let adapted = adapt(&descriptor(
        "Kit/Legacy.rs",
        40,
        payload(Some("Legacy"), Record::new(WIDGET_SOURCE_V1)),
    ));
    let view = (adapted.renderer)();

    assert!(view.contains_text("not supported on this platform version"));
    assert!(view.contains_text("Legacy"));
    assert!(view.contains_text("Kit/Legacy.rs:40"));
}

#[test]
fn test_unknown_source_tag_renders_diagnostic() {
    let tag = "preview.v9.HolographicSource";
    let adapted = adapt(&descriptor(
        "Kit/Future.rs",
        77,
        payload(Some("Future"), Record::new(tag)),
    ));
    let view = (adapted.renderer)();

    assert!(view.contains_text(tag));
    assert!(view.contains_text("Kit/Future.rs:77"));
    assert!(view.contains_text("Future"));
}

#[test]
fn test_unknown_content_category_renders_diagnostic() {
    let source = Record::new(DATA_SOURCE_V3).with_record(
        "preview",
        Record::new("whatever").with_record(
            "contentCategory",
            Record::new("category").with_str("rawValue", "spatial"),
        ),
    );
    let adapted = adapt(&descriptor("Kit/Space.rs", 3, payload(None, source)));
    let view = (adapted.renderer)();

    assert!(view.contains_text("spatial"));
    assert!(view.contains_text("Kit/Space.rs:3"));
}

#[test]
fn test_malformed_known_shape_degrades_to_diagnostic() {
    let source = Record::new(WIDGET_SOURCE_V2);
    let adapted = adapt(&descriptor("Kit/Broken.rs", 9, payload(Some("Broken"), source)));
    let view = (adapted.renderer)();

    assert!(view.contains_text("structure"));
    assert!(view.contains_text("Kit/Broken.rs:9"));
}

#[test]
fn test_instantiation_failure_yields_empty_renderer() {
    let descriptor = PreviewDescriptor::new("Kit/Fails.rs", 1, 1, || {
        Err(AdaptError::Instantiation("host refused".into()))
    });
    let adapted = adapt(&descriptor);

    assert_eq!(adapted.title, None);
    assert!((adapted.renderer)().is_empty());
    assert_eq!(adapted.display_title(), "line: 1");
}

#[test]
fn test_ordering_by_module_then_line() {
    let record = || payload(None, Record::new(WIDGET_SOURCE_V1));
    let descriptors = vec![
        descriptor("Zed/A.rs", 1, record()),
        descriptor("Alpha/B.rs", 20, record()),
        descriptor("Alpha/A.rs", 10, record()),
    ];
    let adapted = adapt_all(&descriptors);
    let keys: Vec<_> = adapted.iter().map(|a| (a.module.as_str(), a.line)).collect();
    assert_eq!(keys, vec![("Alpha", 10), ("Alpha", 20), ("Zed", 1)]);
}

#[test]
fn test_equality_is_module_and_line_only() {
    let record = || payload(None, Record::new(WIDGET_SOURCE_V1));
    let a = adapt(&descriptor("Kit/One.rs", 5, record()));
    let b = adapt(&descriptor("Kit/Two.rs", 5, record()));
    assert_eq!(a, b);
}
