use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::{BackendKind, Scheme};
use crate::cli::Cli;
use crate::error::{AnalyzerError, Result};
use crate::models::{ArtifactCoordinate, Repository};

/// Effective settings for one analysis run.
///
/// Built once by [`resolve_settings`], immutable afterwards. Precedence:
/// CLI flag > settings file > built-in default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: String,
    pub deployed_domain: String,
    pub swagger_schemes: Vec<String>,
    pub render_swagger_tags: bool,
    pub swagger_tags_path_offset: i64,
    pub inline_prettify: bool,
    pub ignored_root_resources: Vec<String>,
    /// Compiled classes root. Absent or not a directory means "nothing to
    /// analyze yet" and the run is skipped.
    pub output_directory: PathBuf,
    /// Parent of the generated report subdirectory.
    pub build_directory: PathBuf,
    /// Project sources, handed to the engine when present.
    pub source_directory: PathBuf,
    pub resources_dir: String,
    pub analyzer_version: String,
    /// Optional platform API coordinate injected next to the analyzer
    /// runtime (`group:artifact:version`).
    pub platform_api: Option<String>,
    pub repositories: Vec<Repository>,
}

/// Settings that survived the validation phase: backend resolved, scheme
/// and coordinate strings parsed.
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    pub backend: BackendKind,
    pub schemes: Vec<Scheme>,
    pub platform_api: Option<ArtifactCoordinate>,
}

impl Settings {
    /// Coordinate of the analyzer runtime required on the analysis
    /// classpath. The version tracks this tool's own release unless
    /// overridden.
    pub fn analyzer_coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::new(
            "com.sebastian-daschner",
            "jaxrs-analyzer",
            self.analyzer_version.clone(),
        )
    }

    /// Validate everything user-supplied that has a closed value domain.
    ///
    /// Runs before classpath assembly so a bad scheme or offset never costs
    /// resolver or engine work.
    pub fn validate(&self) -> Result<ValidatedSettings> {
        let backend = BackendKind::from_name(&self.backend)?;

        let schemes = if backend == BackendKind::Swagger {
            if self.swagger_schemes.is_empty() {
                return Err(AnalyzerError::invalid_configuration(
                    "swagger-schemes",
                    format!("at least one scheme is required, valid values are: {}", Scheme::valid_names()),
                ));
            }
            self.swagger_schemes
                .iter()
                .map(|s| Scheme::from_name(s))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        if self.swagger_tags_path_offset < 0 {
            return Err(AnalyzerError::invalid_configuration(
                "swagger-tags-path-offset",
                format!(
                    "must be zero or positive, got {}",
                    self.swagger_tags_path_offset
                ),
            ));
        }

        let platform_api = match &self.platform_api {
            Some(raw) => Some(
                raw.parse::<ArtifactCoordinate>()
                    .map_err(|e| AnalyzerError::invalid_configuration("platform-api", e))?,
            ),
            None => None,
        };

        Ok(ValidatedSettings {
            backend,
            schemes,
            platform_api,
        })
    }
}

/// Optional settings file, `jaxrs-analyzr.toml`. Every field defaults to
/// the built-in value when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FileSettings {
    backend: Option<String>,
    deployed_domain: Option<String>,
    swagger_schemes: Option<Vec<String>>,
    render_swagger_tags: Option<bool>,
    swagger_tags_path_offset: Option<i64>,
    inline_prettify: Option<bool>,
    ignored_root_resources: Option<Vec<String>>,
    output_directory: Option<PathBuf>,
    build_directory: Option<PathBuf>,
    source_directory: Option<PathBuf>,
    resources_dir: Option<String>,
    analyzer_version: Option<String>,
    platform_api: Option<String>,
    #[serde(default)]
    repositories: Vec<Repository>,
}

/// Load the settings file, searching in order:
///
/// 1. `<project_path>/jaxrs-analyzr.toml`
/// 2. `~/.config/jaxrs-analyzr/config.toml`
/// 3. None (built-in defaults only)
fn load_file_settings(project_path: &Path) -> anyhow::Result<FileSettings> {
    let project_config = project_path.join("jaxrs-analyzr.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("jaxrs-analyzr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(FileSettings::default())
}

/// Merge CLI arguments over the settings file over built-in defaults.
pub fn resolve_settings(project_path: &Path, cli: &Cli) -> anyhow::Result<Settings> {
    let file = load_file_settings(project_path)?;

    let output_directory = cli
        .output_directory
        .clone()
        .or(file.output_directory)
        .map(|p| anchor(project_path, p))
        .unwrap_or_else(|| project_path.join("target").join("classes"));

    let build_directory = cli
        .build_directory
        .clone()
        .or(file.build_directory)
        .map(|p| anchor(project_path, p))
        .unwrap_or_else(|| project_path.join("target"));

    let source_directory = cli
        .source_directory
        .clone()
        .or(file.source_directory)
        .map(|p| anchor(project_path, p))
        .unwrap_or_else(|| project_path.join("src").join("main").join("java"));

    let mut repositories: Vec<Repository> = cli
        .repository
        .iter()
        .enumerate()
        .map(|(i, url)| Repository {
            id: format!("cli-{}", i),
            url: url.clone(),
        })
        .collect();
    repositories.extend(file.repositories);
    if repositories.is_empty() {
        repositories.push(Repository::central());
    }

    Ok(Settings {
        backend: cli
            .backend
            .clone()
            .or(file.backend)
            .unwrap_or_else(|| "plaintext".to_string()),
        deployed_domain: cli
            .deployed_domain
            .clone()
            .or(file.deployed_domain)
            .unwrap_or_default(),
        swagger_schemes: cli
            .swagger_schemes
            .clone()
            .or(file.swagger_schemes)
            .unwrap_or_else(|| vec!["http".to_string()]),
        render_swagger_tags: cli
            .render_swagger_tags
            .or(file.render_swagger_tags)
            .unwrap_or(false),
        swagger_tags_path_offset: cli
            .swagger_tags_path_offset
            .or(file.swagger_tags_path_offset)
            .unwrap_or(0),
        inline_prettify: cli.inline_prettify.or(file.inline_prettify).unwrap_or(true),
        ignored_root_resources: if cli.ignored_root_resources.is_empty() {
            file.ignored_root_resources.unwrap_or_default()
        } else {
            cli.ignored_root_resources.clone()
        },
        output_directory,
        build_directory,
        source_directory,
        resources_dir: cli
            .resources_dir
            .clone()
            .or(file.resources_dir)
            .unwrap_or_else(|| "jaxrs-analyzer".to_string()),
        analyzer_version: cli
            .analyzer_version
            .clone()
            .or(file.analyzer_version)
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        platform_api: cli.platform_api.clone().or(file.platform_api),
        repositories,
    })
}

/// Relative paths from CLI or file are anchored at the project path.
fn anchor(project_path: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        project_path.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["jaxrs-analyzr"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    fn settings(args: &[&str]) -> Settings {
        let dir = tempfile::tempdir().unwrap();
        resolve_settings(dir.path(), &cli(args)).unwrap()
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let s = settings(&[]);
        assert_eq!(s.backend, "plaintext");
        assert_eq!(s.deployed_domain, "");
        assert_eq!(s.swagger_schemes, vec!["http"]);
        assert!(!s.render_swagger_tags);
        assert_eq!(s.swagger_tags_path_offset, 0);
        assert!(s.inline_prettify);
        assert!(s.ignored_root_resources.is_empty());
        assert_eq!(s.resources_dir, "jaxrs-analyzer");
        assert_eq!(s.repositories, vec![Repository::central()]);
        assert!(s.platform_api.is_none());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let s = settings(&[
            "--backend",
            "swagger",
            "--deployed-domain",
            "api.example.com",
            "--swagger-schemes",
            "https,wss",
            "--render-swagger-tags",
            "--swagger-tags-path-offset",
            "2",
            "--inline-prettify",
            "false",
        ]);
        assert_eq!(s.backend, "swagger");
        assert_eq!(s.deployed_domain, "api.example.com");
        assert_eq!(s.swagger_schemes, vec!["https", "wss"]);
        assert!(s.render_swagger_tags);
        assert_eq!(s.swagger_tags_path_offset, 2);
        assert!(!s.inline_prettify);
    }

    #[test]
    fn test_file_settings_apply_when_cli_silent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("jaxrs-analyzr.toml"),
            r#"
backend = "markdown"
resources-dir = "rest-docs"
ignored-root-resources = ["com.example.HealthResource"]
"#,
        )
        .unwrap();

        let s = resolve_settings(dir.path(), &cli(&[])).unwrap();
        assert_eq!(s.backend, "markdown");
        assert_eq!(s.resources_dir, "rest-docs");
        assert_eq!(
            s.ignored_root_resources,
            vec!["com.example.HealthResource"]
        );

        // CLI still wins over the file
        let s = resolve_settings(dir.path(), &cli(&["--backend", "swagger"])).unwrap();
        assert_eq!(s.backend, "swagger");
    }

    #[test]
    fn test_directory_defaults_follow_maven_layout() {
        let dir = tempfile::tempdir().unwrap();
        let s = resolve_settings(dir.path(), &cli(&[])).unwrap();
        assert_eq!(s.output_directory, dir.path().join("target").join("classes"));
        assert_eq!(s.build_directory, dir.path().join("target"));
        assert_eq!(
            s.source_directory,
            dir.path().join("src").join("main").join("java")
        );
    }

    #[test]
    fn test_relative_directories_anchor_at_project() {
        let dir = tempfile::tempdir().unwrap();
        let s = resolve_settings(
            dir.path(),
            &cli(&["--output-directory", "build/classes"]),
        )
        .unwrap();
        assert_eq!(s.output_directory, dir.path().join("build").join("classes"));
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let mut s = settings(&[]);
        s.swagger_tags_path_offset = -1;
        let err = s.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::InvalidConfiguration { option: "swagger-tags-path-offset", .. }
        ));

        s.swagger_tags_path_offset = 0;
        assert!(s.validate().is_ok());
        s.swagger_tags_path_offset = 3;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_scheme() {
        let mut s = settings(&["--backend", "swagger"]);
        s.swagger_schemes = vec!["http".into(), "ftp".into()];
        let err = s.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("http, https, ws, wss"), "message was: {}", msg);
    }

    #[test]
    fn test_validate_ignores_schemes_for_text_backends() {
        let mut s = settings(&["--backend", "plaintext"]);
        s.swagger_schemes = vec!["ftp".into()];
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_parses_mixed_case_schemes() {
        let mut s = settings(&["--backend", "swagger"]);
        s.swagger_schemes = vec!["HTTP".into(), "https".into()];
        let v = s.validate().unwrap();
        assert_eq!(v.schemes, vec![Scheme::Http, Scheme::Https]);
    }

    #[test]
    fn test_validate_rejects_malformed_platform_api() {
        let mut s = settings(&[]);
        s.platform_api = Some("javaee-api".into());
        assert!(s.validate().is_err());

        s.platform_api = Some("javax:javaee-api:7.0".into());
        let v = s.validate().unwrap();
        assert_eq!(
            v.platform_api,
            Some(ArtifactCoordinate::new("javax", "javaee-api", "7.0"))
        );
    }
}
