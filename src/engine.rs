use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// REST resource model produced by the analysis engine.
///
/// Request/response bodies are kept as raw JSON strings; backends decide
/// whether to prettify them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Application base path, e.g. `rest`.
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub path: String,
    #[serde(default)]
    pub methods: Vec<ResourceMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMethod {
    /// HTTP verb, upper case.
    pub method: String,
    #[serde(default)]
    pub request_media_types: Vec<String>,
    #[serde(default)]
    pub response_media_types: Vec<String>,
    #[serde(default)]
    pub request_body: Option<String>,
    #[serde(default)]
    pub responses: Vec<MethodResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodResponse {
    pub status: u16,
    #[serde(default)]
    pub body: Option<String>,
}

/// Everything a backend needs to render a report.
#[derive(Debug, Clone)]
pub struct AnalyzedProject {
    pub name: String,
    pub version: String,
    pub resources: Resources,
}

/// One analysis invocation, fully assembled by the orchestrator.
///
/// Paths are `BTreeSet`s: duplicates collapse and iteration order is
/// stable, so repeated runs over identical inputs behave identically.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub project_paths: BTreeSet<PathBuf>,
    pub dependency_paths: BTreeSet<PathBuf>,
    pub source_paths: BTreeSet<PathBuf>,
    pub ignored_resources: Vec<String>,
    pub project_name: String,
    pub project_version: String,
}

/// The bytecode analysis engine, consumed as an opaque capability.
///
/// Any conforming implementation may be substituted; tests use fakes.
pub trait AnalysisEngine: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Resources>;
}

/// Runs the analyzer runtime on a JVM subprocess.
///
/// The assembled dependency classpath (which contains the resolved analyzer
/// jar) goes on `-cp`; the analyzer prints its resource model as JSON on
/// stdout.
pub struct JvmEngine {
    java: PathBuf,
}

const ANALYZER_MAIN_CLASS: &str = "com.sebastian_daschner.jaxrs_analyzer.Main";

impl JvmEngine {
    pub fn locate() -> Result<Self> {
        let java = which::which("java").map_err(|e| {
            AnalyzerError::AnalysisFailure(anyhow!("could not locate a java executable: {}", e))
        })?;
        Ok(Self { java })
    }

    fn classpath(paths: &BTreeSet<PathBuf>) -> std::ffi::OsString {
        let separator = if cfg!(windows) { ";" } else { ":" };
        let mut joined = std::ffi::OsString::new();
        for (i, path) in paths.iter().enumerate() {
            if i > 0 {
                joined.push(separator);
            }
            joined.push(path);
        }
        joined
    }
}

impl AnalysisEngine for JvmEngine {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Resources> {
        let mut command = Command::new(&self.java);
        command
            .arg("-cp")
            .arg(Self::classpath(&request.dependency_paths))
            .arg(ANALYZER_MAIN_CLASS)
            .arg("--model")
            .arg("json")
            .arg("--name")
            .arg(&request.project_name)
            .arg("--project-version")
            .arg(&request.project_version);

        for source in &request.source_paths {
            command.arg("--source").arg(source);
        }
        for ignored in &request.ignored_resources {
            command.arg("--ignore").arg(ignored);
        }
        for project_path in &request.project_paths {
            command.arg(project_path);
        }

        let output = command
            .output()
            .map_err(|e| AnalyzerError::AnalysisFailure(anyhow!("failed to run java: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalyzerError::AnalysisFailure(anyhow!(
                "analyzer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            AnalyzerError::AnalysisFailure(anyhow!("could not decode analyzer output: {}", e))
        })
    }
}
