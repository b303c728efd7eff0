//! Default generation engine.
//!
//! Runs entirely inside the isolated scope: scans the scope's code
//! sources, resolves each component's dialog configuration through the
//! registries, and writes every generated artifact into the staging
//! archive. The final archive is never touched from here; promotion is
//! the host-side publisher's job.

use crate::registry::{
    DefaultInPlaceEditorRegistry, DefaultTouchWidgetRegistry, DefaultWidgetRegistry,
    InPlaceEditorRegistry, TouchWidgetRegistry, WidgetConfig, WidgetRegistry,
};
use crate::scanner::{self, DiscoveredComponent};
use crate::transformer::{ComponentNameTransformer, TransformerRegistry};
use componentgen_archive::ArchiveWriter;
use componentgen_bridge::entry::GenerationEngine;
use componentgen_core::error::{GenerateError, Result};
use componentgen_core::protocol::GenerationRequest;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

pub struct DefaultGenerationEngine {
    transformers: TransformerRegistry,
    widgets: Box<dyn WidgetRegistry>,
    touch_widgets: Box<dyn TouchWidgetRegistry>,
    inplace_editors: Box<dyn InPlaceEditorRegistry>,
}

impl DefaultGenerationEngine {
    pub fn with_defaults() -> Self {
        Self {
            transformers: TransformerRegistry::builtin(),
            widgets: Box::new(DefaultWidgetRegistry),
            touch_widgets: Box::new(DefaultTouchWidgetRegistry),
            inplace_editors: Box::new(DefaultInPlaceEditorRegistry),
        }
    }

    pub fn with_registries(
        transformers: TransformerRegistry,
        widgets: Box<dyn WidgetRegistry>,
        touch_widgets: Box<dyn TouchWidgetRegistry>,
        inplace_editors: Box<dyn InPlaceEditorRegistry>,
    ) -> Self {
        Self {
            transformers,
            widgets,
            touch_widgets,
            inplace_editors,
        }
    }
}

/// Component metadata entry.
#[derive(Debug, Serialize)]
struct ComponentInfo<'a> {
    name: &'a str,
    group: &'a str,
}

/// Classic or touch dialog entry.
#[derive(Debug, Serialize)]
struct Dialog<'a> {
    title: &'a str,
    widgets: Vec<WidgetConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inplace_editor: Option<String>,
}

impl GenerationEngine for DefaultGenerationEngine {
    fn generate(&self, request: &GenerationRequest, code_sources: &[PathBuf]) -> Result<()> {
        // Transformer lookup comes first: a misconfigured identifier must
        // fail the run before the staging archive is created.
        let transformer = self.transformers.require(&request.transformer)?;

        let components = scanner::scan_code_sources(code_sources)?;
        tracing::info!(components = components.len(), "generating component configuration");

        let mut writer = ArchiveWriter::create(&request.staging_archive)?;
        let mut seen_paths = HashSet::new();
        for component in &components {
            let component_path = self.component_path(request, transformer, component);
            if !seen_paths.insert(component_path.clone()) {
                return Err(GenerateError::Generation(format!(
                    "component path '{}' produced by more than one descriptor",
                    component_path
                )));
            }
            self.write_component(request, &mut writer, &component_path, component)?;
        }
        writer.finish()
    }
}

impl DefaultGenerationEngine {
    fn component_path(
        &self,
        request: &GenerationRequest,
        transformer: &dyn ComponentNameTransformer,
        component: &DiscoveredComponent,
    ) -> String {
        let segment = component
            .descriptor
            .path
            .clone()
            .unwrap_or_else(|| transformer.transform(&component.descriptor.name));
        format!(
            "{}/{}/{}",
            request.component_path_base, request.component_path_suffix, segment
        )
    }

    fn write_component(
        &self,
        request: &GenerationRequest,
        writer: &mut ArchiveWriter,
        component_path: &str,
        component: &DiscoveredComponent,
    ) -> Result<()> {
        let descriptor = &component.descriptor;
        let group = descriptor
            .group
            .as_deref()
            .unwrap_or(&request.default_component_group);

        let info = ComponentInfo {
            name: &descriptor.name,
            group,
        };
        writer.add_entry(
            &format!("{}/component.yaml", component_path),
            to_yaml(&info)?.as_bytes(),
        )?;

        if request.generate_classic_ui {
            let widgets = descriptor
                .widgets
                .iter()
                .map(|decl| self.widgets.resolve(decl))
                .collect::<Result<Vec<_>>>()?;
            let dialog = Dialog {
                title: &descriptor.name,
                widgets,
                inplace_editor: None,
            };
            writer.add_entry(
                &format!("{}/dialog/classic.yaml", component_path),
                to_yaml(&dialog)?.as_bytes(),
            )?;
        }

        if request.generate_touch_ui {
            let widgets = descriptor
                .widgets
                .iter()
                .map(|decl| self.touch_widgets.resolve(decl))
                .collect::<Result<Vec<_>>>()?;
            let inplace_editor = descriptor
                .inplace_editor
                .as_deref()
                .map(|kind| self.inplace_editors.resolve(kind))
                .transpose()?;
            let dialog = Dialog {
                title: &descriptor.name,
                widgets,
                inplace_editor,
            };
            writer.add_entry(
                &format!("{}/dialog/touch.yaml", component_path),
                to_yaml(&dialog)?.as_bytes(),
            )?;
        }

        tracing::debug!(component = %descriptor.name, path = component_path, "component generated");
        Ok(())
    }
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| GenerateError::Generation(format!("cannot serialize dialog entry: {}", e)))
}
