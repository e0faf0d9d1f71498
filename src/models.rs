use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies an artifact to resolve remotely, `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactCoordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Repository-relative path of the jar in Maven repository layout.
    pub fn jar_path(&self) -> String {
        format!(
            "{}/{}/{}/{}-{}.jar",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        )
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(format!(
                "'{}' is not a valid coordinate, expected group:artifact:version",
                s
            )),
        }
    }
}

impl std::fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Maven dependency scope. Test-scoped artifacts never reach the analysis
/// classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Compile,
    Provided,
    Runtime,
    System,
    Test,
}

impl Scope {
    /// Unknown scope strings fall back to compile, like Maven does.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "provided" => Scope::Provided,
            "runtime" => Scope::Runtime,
            "system" => Scope::System,
            "test" => Scope::Test,
            _ => Scope::Compile,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Compile => write!(f, "compile"),
            Scope::Provided => write!(f, "provided"),
            Scope::Runtime => write!(f, "runtime"),
            Scope::System => write!(f, "system"),
            Scope::Test => write!(f, "test"),
        }
    }
}

/// A dependency the analyzed project declares.
///
/// `file` is the jar materialized in the local repository, when present.
/// Entries without a file are skipped during classpath assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectArtifact {
    pub coordinate: ArtifactCoordinate,
    pub scope: Scope,
    pub file: Option<PathBuf>,
}

/// A remote repository artifacts can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub url: String,
}

impl Repository {
    pub fn central() -> Self {
        Self {
            id: "central".to_string(),
            url: "https://repo1.maven.org/maven2".to_string(),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// Created only on successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub coordinate: ArtifactCoordinate,
    pub file: PathBuf,
    pub repository: String,
}

/// The analyzed project, as read from its build descriptor.
#[derive(Debug, Clone)]
pub struct MavenProject {
    pub name: String,
    pub version: String,
    /// Artifacts with resolution state (files populated where the jar
    /// exists locally).
    pub artifacts: Vec<ProjectArtifact>,
    /// Raw declared dependency list, pre-resolution. Used as fallback when
    /// `artifacts` is empty.
    pub dependency_artifacts: Vec<ProjectArtifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_roundtrip() {
        let c: ArtifactCoordinate = "com.sebastian-daschner:jaxrs-analyzer:0.9".parse().unwrap();
        assert_eq!(c.group_id, "com.sebastian-daschner");
        assert_eq!(c.artifact_id, "jaxrs-analyzer");
        assert_eq!(c.version, "0.9");
        assert_eq!(c.to_string(), "com.sebastian-daschner:jaxrs-analyzer:0.9");
    }

    #[test]
    fn test_coordinate_rejects_malformed() {
        assert!("jaxrs-analyzer".parse::<ArtifactCoordinate>().is_err());
        assert!("a:b".parse::<ArtifactCoordinate>().is_err());
        assert!("a:b:".parse::<ArtifactCoordinate>().is_err());
        assert!("a:b:c:d".parse::<ArtifactCoordinate>().is_err());
    }

    #[test]
    fn test_jar_path_uses_repository_layout() {
        let c = ArtifactCoordinate::new("javax", "javaee-api", "7.0");
        assert_eq!(c.jar_path(), "javax/javaee-api/7.0/javaee-api-7.0.jar");

        let c = ArtifactCoordinate::new("com.sebastian-daschner", "jaxrs-analyzer", "0.9");
        assert_eq!(
            c.jar_path(),
            "com/sebastian-daschner/jaxrs-analyzer/0.9/jaxrs-analyzer-0.9.jar"
        );
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!(Scope::parse("test"), Scope::Test);
        assert_eq!(Scope::parse("TEST"), Scope::Test);
        assert_eq!(Scope::parse("compile"), Scope::Compile);
        assert_eq!(Scope::parse(""), Scope::Compile);
        assert_eq!(Scope::parse("whatever"), Scope::Compile);
    }
}
