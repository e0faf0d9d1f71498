use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use crate::backend;
use crate::classpath;
use crate::config::Settings;
use crate::engine::{AnalysisEngine, AnalysisRequest, AnalyzedProject};
use crate::error::Result;
use crate::logger::Logger;
use crate::models::MavenProject;
use crate::output;
use crate::resolver::ArtifactResolver;

/// How a run ended when it did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report written to `output`.
    Completed { output: PathBuf },
    /// Nothing to analyze: the compiled-classes directory does not exist
    /// yet. Not an error.
    Skipped,
}

/// Drives one analysis invocation: validate, assemble the classpath,
/// configure the backend, prepare the output location, run the engine,
/// write the report. Strictly sequential, run exactly once.
pub struct Orchestrator<'a> {
    settings: &'a Settings,
    project: &'a MavenProject,
    resolver: &'a dyn ArtifactResolver,
    engine: &'a dyn AnalysisEngine,
    logger: &'a dyn Logger,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        settings: &'a Settings,
        project: &'a MavenProject,
        resolver: &'a dyn ArtifactResolver,
        engine: &'a dyn AnalysisEngine,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            settings,
            project,
            resolver,
            engine,
            logger,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        // Nothing has been compiled yet: a normal no-op, not a failure.
        if !self.settings.output_directory.is_dir() {
            self.logger.info(&format!(
                "skipping non existing directory {}",
                self.settings.output_directory.display()
            ));
            return Ok(RunOutcome::Skipped);
        }

        // Validate the whole configuration up front so a bad backend name,
        // scheme or offset costs no resolver or engine work.
        let validated = self.settings.validate()?;

        let dependency_paths = classpath::dependency_paths(
            self.project,
            &self.settings.analyzer_coordinate(),
            validated.platform_api.as_ref(),
            self.resolver,
            &self.settings.repositories,
            self.logger,
        )
        .await?;
        self.logger
            .debug(&format!("dependency class paths are: {:?}", dependency_paths));

        let project_paths = classpath::project_paths(&self.settings.output_directory);
        self.logger
            .debug(&format!("project paths are: {:?}", project_paths));

        let backend = backend::configure_backend(validated.backend, self.settings)?;
        self.logger.info(&format!(
            "analyzing JAX-RS resources, using {} backend",
            backend.name()
        ));

        for ignored in &self.settings.ignored_root_resources {
            self.logger.info(&format!(
                "class {} will be ignored as root resource",
                ignored
            ));
        }

        let directory = output::ensure_output_directory(
            &self.settings.build_directory,
            &self.settings.resources_dir,
        )?;
        let file_location = output::output_file_path(&directory, validated.backend);
        self.logger.info(&format!(
            "generating resources at {}",
            file_location.display()
        ));

        let mut source_paths = BTreeSet::new();
        if self.settings.source_directory.is_dir() {
            source_paths.insert(self.settings.source_directory.clone());
        }

        let request = AnalysisRequest {
            project_paths,
            dependency_paths,
            source_paths,
            ignored_resources: self.settings.ignored_root_resources.clone(),
            project_name: self.project.name.clone(),
            project_version: self.project.version.clone(),
        };

        let start = Instant::now();
        let analyzed = self.engine.analyze(&request);
        self.logger.debug(&format!(
            "analysis took {} ms",
            start.elapsed().as_millis()
        ));
        let resources = analyzed?;

        let rendered = backend.render(&AnalyzedProject {
            name: self.project.name.clone(),
            version: self.project.version.clone(),
            resources,
        });
        output::write_report(&file_location, &rendered)?;

        Ok(RunOutcome::Completed {
            output: file_location,
        })
    }
}
