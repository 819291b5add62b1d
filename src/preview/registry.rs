//! Compile-time preview registration
//!
//! Previews declared with [`register_preview!`](crate::register_preview) are
//! collected by `inventory` at link time. [`registered_previews`] is the one
//! place that reads that global set; everything downstream takes the returned
//! descriptors as a plain sequence.

use crate::error::AdaptError;

use super::descriptor::{PreviewDescriptor, Record};

/// One statically registered preview.
pub struct PreviewRegistration {
    pub file_id: &'static str,
    pub line: u32,
    pub column: u32,
    pub make_preview: fn() -> Result<Record, AdaptError>,
}

inventory::collect!(PreviewRegistration);

impl PreviewRegistration {
    pub fn descriptor(&self) -> PreviewDescriptor {
        PreviewDescriptor::new(self.file_id, self.line, self.column, self.make_preview)
    }
}

/// Descriptors for every registered preview, in no particular order.
pub fn registered_previews() -> Vec<PreviewDescriptor> {
    inventory::iter::<PreviewRegistration>
        .into_iter()
        .map(PreviewRegistration::descriptor)
        .collect()
}

/// Register a preview payload factory.
///
/// The file id is `"{crate}/{file}"`, so the crate name becomes the module
/// folder in the catalog.
///
/// ```ignore
/// fn button_preview() -> Result<Record, AdaptError> { ... }
/// storybook_catalog::register_preview!(button_preview);
/// ```
#[macro_export]
macro_rules! register_preview {
    ($make:expr) => {
        $crate::inventory::submit! {
            $crate::preview::PreviewRegistration {
                file_id: concat!(env!("CARGO_CRATE_NAME"), "/", file!()),
                line: line!(),
                column: column!(),
                make_preview: $make,
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::View;
    use crate::preview::schema::{DECLARATIVE_SOURCE_V1, DISPLAY_NAME_FIELD, SOURCE_FIELD};

    fn registered_fixture() -> Result<Record, AdaptError> {
        Ok(Record::new("payload")
            .with_str(DISPLAY_NAME_FIELD, "Registered fixture")
            .with_record(
                SOURCE_FIELD,
                Record::new(DECLARATIVE_SOURCE_V1).with_factory("makeView", || View::text("hi")),
            ))
    }

    crate::register_preview!(registered_fixture);

    #[test]
    fn test_registered_preview_is_collected() {
        let previews = registered_previews();
        let found = previews
            .iter()
            .find(|d| d.file_id().ends_with("registry.rs"))
            .expect("fixture registration should be collected");

        assert_eq!(found.module(), "storybook_catalog");
        assert!(found.line() > 0);
        let record = found.instantiate().unwrap();
        assert_eq!(record.str_at(&[DISPLAY_NAME_FIELD]).unwrap(), "Registered fixture");
    }
}
