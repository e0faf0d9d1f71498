use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::logger::Logger;
use crate::models::{ArtifactCoordinate, MavenProject, Repository, Scope};
use crate::resolver::ArtifactResolver;

/// Assemble the dependency class paths for one analysis run.
///
/// Test-scoped artifacts are excluded, artifacts without a materialized
/// file are silently dropped, and the analyzer runtime (plus the platform
/// API, when configured) is resolved and injected unconditionally. The
/// result is a set: identical paths collapse.
pub async fn dependency_paths(
    project: &MavenProject,
    analyzer: &ArtifactCoordinate,
    platform_api: Option<&ArtifactCoordinate>,
    resolver: &dyn ArtifactResolver,
    repositories: &[Repository],
    logger: &dyn Logger,
) -> Result<BTreeSet<PathBuf>> {
    // A project that never went through full resolution has no resolved
    // artifacts yet; fall back to the raw declared list.
    let artifacts = if project.artifacts.is_empty() {
        &project.dependency_artifacts
    } else {
        &project.artifacts
    };

    let mut paths: BTreeSet<PathBuf> = artifacts
        .iter()
        .filter(|a| a.scope != Scope::Test)
        .filter_map(|a| a.file.clone())
        .collect();

    for coordinate in std::iter::once(analyzer).chain(platform_api) {
        logger.debug(&format!("resolving artifact {}", coordinate));
        let resolved = resolver.resolve(coordinate, repositories).await?;
        logger.debug(&format!(
            "resolved {} to {} from {}",
            resolved.coordinate,
            resolved.file.display(),
            resolved.repository
        ));
        paths.insert(resolved.file);
    }

    Ok(paths)
}

/// The project's own compiled output, as a singleton set.
pub fn project_paths(output_directory: &Path) -> BTreeSet<PathBuf> {
    BTreeSet::from([output_directory.to_path_buf()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use crate::logger::SilentLogger;
    use crate::models::{ProjectArtifact, ResolvedArtifact};
    use anyhow::anyhow;
    use async_trait::async_trait;

    /// Resolves every coordinate to `/repo/<artifact>.jar`, or fails when
    /// constructed with `failing`.
    struct FakeResolver {
        failing: bool,
    }

    #[async_trait]
    impl ArtifactResolver for FakeResolver {
        async fn resolve(
            &self,
            coordinate: &ArtifactCoordinate,
            _repositories: &[Repository],
        ) -> Result<ResolvedArtifact> {
            if self.failing {
                return Err(AnalyzerError::ResolutionFailure {
                    coordinate: coordinate.clone(),
                    cause: anyhow!("unreachable repository"),
                });
            }
            Ok(ResolvedArtifact {
                coordinate: coordinate.clone(),
                file: PathBuf::from(format!("/repo/{}.jar", coordinate.artifact_id)),
                repository: "fake".to_string(),
            })
        }
    }

    fn artifact(id: &str, scope: Scope, file: Option<&str>) -> ProjectArtifact {
        ProjectArtifact {
            coordinate: ArtifactCoordinate::new("com.example", id, "1.0"),
            scope,
            file: file.map(PathBuf::from),
        }
    }

    fn project(artifacts: Vec<ProjectArtifact>, declared: Vec<ProjectArtifact>) -> MavenProject {
        MavenProject {
            name: "shop".to_string(),
            version: "1.0".to_string(),
            artifacts,
            dependency_artifacts: declared,
        }
    }

    fn analyzer() -> ArtifactCoordinate {
        ArtifactCoordinate::new("com.sebastian-daschner", "jaxrs-analyzer", "0.9")
    }

    #[tokio::test]
    async fn test_paths_deduplicate_and_exclude_test_scope() {
        let project = project(
            vec![
                artifact("a", Scope::Compile, Some("/repo/a.jar")),
                // different artifact, same resolved file
                artifact("a-relocated", Scope::Runtime, Some("/repo/a.jar")),
                artifact("b", Scope::Test, Some("/repo/b.jar")),
                artifact("c", Scope::Compile, None),
            ],
            vec![],
        );

        let paths = dependency_paths(
            &project,
            &analyzer(),
            None,
            &FakeResolver { failing: false },
            &[],
            &SilentLogger,
        )
        .await
        .unwrap();

        assert!(paths.contains(&PathBuf::from("/repo/a.jar")));
        assert!(!paths.contains(&PathBuf::from("/repo/b.jar")));
        assert!(paths.contains(&PathBuf::from("/repo/jaxrs-analyzer.jar")));
        // a.jar once, analyzer jar once
        assert_eq!(paths.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_artifacts_fall_back_to_declared_list() {
        let project = project(
            vec![],
            vec![
                artifact("a", Scope::Compile, Some("/repo/a.jar")),
                artifact("b", Scope::Compile, None),
            ],
        );

        let paths = dependency_paths(
            &project,
            &analyzer(),
            None,
            &FakeResolver { failing: false },
            &[],
            &SilentLogger,
        )
        .await
        .unwrap();

        assert!(paths.contains(&PathBuf::from("/repo/a.jar")));
        assert_eq!(paths.len(), 2);
    }

    #[tokio::test]
    async fn test_platform_api_injected_when_configured() {
        let platform = ArtifactCoordinate::new("javax", "javaee-api", "7.0");
        let paths = dependency_paths(
            &project(vec![], vec![]),
            &analyzer(),
            Some(&platform),
            &FakeResolver { failing: false },
            &[],
            &SilentLogger,
        )
        .await
        .unwrap();

        assert!(paths.contains(&PathBuf::from("/repo/jaxrs-analyzer.jar")));
        assert!(paths.contains(&PathBuf::from("/repo/javaee-api.jar")));
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let err = dependency_paths(
            &project(vec![], vec![]),
            &analyzer(),
            None,
            &FakeResolver { failing: true },
            &[],
            &SilentLogger,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AnalyzerError::ResolutionFailure { .. }));
    }

    #[test]
    fn test_project_paths_is_singleton() {
        let paths = project_paths(Path::new("/build/classes"));
        assert_eq!(paths.len(), 1);
        assert!(paths.contains(&PathBuf::from("/build/classes")));
    }
}
