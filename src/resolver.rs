//! Artifact resolution against remote Maven repositories.
//!
//! Resolution checks the local repository first and falls back to the
//! configured remotes in order; fetched jars are persisted into the local
//! repository layout so repeat runs stay offline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AnalyzerError, Result};
use crate::models::{ArtifactCoordinate, Repository, ResolvedArtifact};

/// Resolves an artifact coordinate to a local file.
///
/// Failures are never retried here; the caller decides whether to abort.
#[async_trait]
pub trait ArtifactResolver: Send + Sync {
    async fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        repositories: &[Repository],
    ) -> Result<ResolvedArtifact>;
}

/// The local repository root, `~/.m2/repository`.
pub fn default_local_repository() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".m2").join("repository"))
        .unwrap_or_else(|| PathBuf::from(".m2").join("repository"))
}

fn jar_url(repository: &Repository, coordinate: &ArtifactCoordinate) -> String {
    format!(
        "{}/{}",
        repository.url.trim_end_matches('/'),
        coordinate.jar_path()
    )
}

/// HTTP resolver over the Maven repository layout.
pub struct HttpResolver {
    client: Client,
    local_repository: PathBuf,
}

impl HttpResolver {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_local_repository(default_local_repository())
    }

    pub fn with_local_repository(local_repository: PathBuf) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            local_repository,
        })
    }

    async fn fetch(
        &self,
        coordinate: &ArtifactCoordinate,
        repository: &Repository,
        target: &std::path::Path,
    ) -> anyhow::Result<()> {
        let url = jar_url(repository, coordinate);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "jaxrs-analyzr/0.1.0")
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("{} returned {}", url, response.status()));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("reading body from {} failed", url))?;

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        std::fs::write(target, &bytes)
            .with_context(|| format!("could not write {}", target.display()))?;

        Ok(())
    }
}

#[async_trait]
impl ArtifactResolver for HttpResolver {
    async fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        repositories: &[Repository],
    ) -> Result<ResolvedArtifact> {
        let cached = self.local_repository.join(coordinate.jar_path());
        if cached.is_file() {
            return Ok(ResolvedArtifact {
                coordinate: coordinate.clone(),
                file: cached,
                repository: "local".to_string(),
            });
        }

        let mut attempts: Vec<String> = Vec::new();
        for repository in repositories {
            match self.fetch(coordinate, repository, &cached).await {
                Ok(()) => {
                    return Ok(ResolvedArtifact {
                        coordinate: coordinate.clone(),
                        file: cached,
                        repository: repository.id.clone(),
                    })
                }
                Err(e) => attempts.push(format!("{}: {:#}", repository, e)),
            }
        }

        let cause = if attempts.is_empty() {
            anyhow!("no repositories configured")
        } else {
            anyhow!(
                "tried {} repositories: {}",
                attempts.len(),
                attempts.join("; ")
            )
        };
        Err(AnalyzerError::ResolutionFailure {
            coordinate: coordinate.clone(),
            cause,
        })
    }
}
