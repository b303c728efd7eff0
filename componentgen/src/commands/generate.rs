//! The generate-components task.
//!
//! Strictly sequential: configuration → dependency resolution → archive
//! path planning → scope construction → one boundary invocation → archive
//! publication. Each step's output is a hard precondition for the next,
//! and a failure at any step leaves the final archive exactly as it was.

use anyhow::{Context, Result};
use componentgen_archive::publish::{publish, retain_staging_for_diagnosis};
use componentgen_archive::ArchivePlan;
use componentgen_bridge::invoker;
use componentgen_bridge::scope::ScopeBuilder;
use componentgen_core::config::{loader, BuildConfig};
use componentgen_core::protocol::GenerationRequest;
use componentgen_core::resolver::{ConfigArtifactResolver, DependencyResolver};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Default)]
pub struct Overrides {
    pub transformer: Option<String>,
    pub build_dir: Option<String>,
}

pub fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let started = Instant::now();

    let mut config = loader::load(config_path).context("Failed to load build configuration")?;
    if let Some(transformer) = overrides.transformer {
        config.generation.transformer = transformer;
    }
    if let Some(build_dir) = overrides.build_dir {
        config.project.build_dir = PathBuf::from(build_dir);
    }
    if !config.project.build_dir.is_absolute() {
        config.project.build_dir = std::env::current_dir()
            .context("Failed to determine working directory")?
            .join(&config.project.build_dir);
    }

    let plan = ArchivePlan::for_project(
        &config.project.build_dir,
        &config.project.name,
        &config.project.version,
    )?;

    match generate(&config, &plan) {
        Ok(()) => {
            publish(&plan)?;
            tracing::info!(
                project = %config.project.name,
                archive = %plan.final_archive.display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "component generation finished"
            );
            Ok(())
        }
        Err(e) => {
            retain_staging_for_diagnosis(&plan);
            Err(e).context("Component generation failed")
        }
    }
}

fn generate(
    config: &BuildConfig,
    plan: &ArchivePlan,
) -> componentgen_core::error::Result<()> {
    let artifacts = ConfigArtifactResolver::new(&config.dependencies).resolve()?;
    tracing::info!(artifacts = artifacts.len(), "dependency artifacts resolved");

    let request = GenerationRequest {
        transformer: config.generation.transformer.clone(),
        build_dir: config.project.build_dir.clone(),
        component_path_base: config.generation.component_path_base.clone(),
        component_path_suffix: config.generation.component_path_suffix.clone(),
        default_component_group: config.generation.default_component_group.clone(),
        final_archive: plan.final_archive.clone(),
        staging_archive: plan.staging_archive.clone(),
        generate_classic_ui: config.generation.generate_classic_ui,
        generate_touch_ui: config.generation.generate_touch_ui,
    };

    let scope = ScopeBuilder::new()
        .with_artifacts(artifacts)
        .with_excluded(config.dependencies.excluded.clone())
        .build()?;

    invoker::invoke(scope, &request)
}
