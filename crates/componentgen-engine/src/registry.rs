//! Widget and in-place editor registries.
//!
//! Registries resolve a declared widget kind to the dialog entry emitted
//! for it. The default implementations carry a fixed builtin table; host
//! projects with custom widget libraries plug in their own registry
//! implementations. An unknown kind fails the run on first use.

use crate::descriptor::WidgetDecl;
use componentgen_core::error::{GenerateError, Result};
use serde::Serialize;

/// Resolved dialog entry for one declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetConfig {
    pub field: String,
    pub label: String,
    /// UI-specific widget type token (classic xtype or touch resource
    /// type).
    pub widget_type: String,
    pub required: bool,
}

/// Classic UI widget resolution.
pub trait WidgetRegistry: Send + Sync {
    fn resolve(&self, decl: &WidgetDecl) -> Result<WidgetConfig>;
}

/// Touch UI widget resolution.
pub trait TouchWidgetRegistry: Send + Sync {
    fn resolve(&self, decl: &WidgetDecl) -> Result<WidgetConfig>;
}

/// Touch UI in-place editor resolution.
pub trait InPlaceEditorRegistry: Send + Sync {
    fn resolve(&self, kind: &str) -> Result<String>;
}

const CLASSIC_WIDGETS: &[(&str, &str)] = &[
    ("textfield", "textfield"),
    ("textarea", "textarea"),
    ("pathfield", "pathfield"),
    ("checkbox", "selection/checkbox"),
    ("numberfield", "numberfield"),
    ("datefield", "datefield"),
    ("select", "selection/select"),
];

const TOUCH_WIDGETS: &[(&str, &str)] = &[
    ("textfield", "granite/ui/components/foundation/form/textfield"),
    ("textarea", "granite/ui/components/foundation/form/textarea"),
    ("pathfield", "granite/ui/components/foundation/form/pathbrowser"),
    ("checkbox", "granite/ui/components/foundation/form/checkbox"),
    ("numberfield", "granite/ui/components/foundation/form/numberfield"),
    ("datefield", "granite/ui/components/foundation/form/datepicker"),
    ("select", "granite/ui/components/foundation/form/select"),
];

const INPLACE_EDITORS: &[(&str, &str)] = &[
    ("text", "text"),
    ("textarea", "plaintext"),
    ("image", "image"),
];

fn resolve_from(table: &[(&str, &str)], decl: &WidgetDecl) -> Result<WidgetConfig> {
    let widget_type = table
        .iter()
        .find(|(kind, _)| *kind == decl.kind)
        .map(|(_, t)| t.to_string())
        .ok_or_else(|| {
            GenerateError::Generation(format!(
                "unknown widget kind '{}' for field '{}'",
                decl.kind, decl.field
            ))
        })?;
    Ok(WidgetConfig {
        field: decl.field.clone(),
        label: decl.label.clone().unwrap_or_else(|| decl.field.clone()),
        widget_type,
        required: decl.required,
    })
}

pub struct DefaultWidgetRegistry;

impl WidgetRegistry for DefaultWidgetRegistry {
    fn resolve(&self, decl: &WidgetDecl) -> Result<WidgetConfig> {
        resolve_from(CLASSIC_WIDGETS, decl)
    }
}

pub struct DefaultTouchWidgetRegistry;

impl TouchWidgetRegistry for DefaultTouchWidgetRegistry {
    fn resolve(&self, decl: &WidgetDecl) -> Result<WidgetConfig> {
        resolve_from(TOUCH_WIDGETS, decl)
    }
}

pub struct DefaultInPlaceEditorRegistry;

impl InPlaceEditorRegistry for DefaultInPlaceEditorRegistry {
    fn resolve(&self, kind: &str) -> Result<String> {
        INPLACE_EDITORS
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, editor)| editor.to_string())
            .ok_or_else(|| {
                GenerateError::Generation(format!("unknown in-place editor kind '{}'", kind))
            })
    }
}
