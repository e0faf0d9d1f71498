use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use crate::models::{ArtifactCoordinate, MavenProject, ProjectArtifact, Scope};

/// Load the project model from `<project_path>/pom.xml`.
///
/// Declared dependencies are mapped to their expected jar under
/// `local_repository`; entries whose jar is present become resolved
/// artifacts, the rest stay declared-only (no file).
pub fn load_project(project_path: &Path, local_repository: &Path) -> Result<MavenProject> {
    let pom = project_path.join("pom.xml");
    if !pom.exists() {
        bail!("no pom.xml found in {}", project_path.display());
    }
    let content = std::fs::read_to_string(&pom)
        .with_context(|| format!("could not read {}", pom.display()))?;

    let parsed = parse_pom(&content)?;
    Ok(materialize(parsed, local_repository))
}

#[derive(Debug, Default)]
struct ParsedPom {
    group_id: String,
    artifact_id: String,
    name: String,
    version: String,
    parent_version: String,
    properties: HashMap<String, String>,
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Default)]
struct RawDependency {
    group_id: String,
    artifact_id: String,
    version: String,
    scope: String,
}

/// Parse the pom with the quick-xml event API, tracking the open-tag stack.
///
/// Only `project > dependencies` entries count; `dependencyManagement`,
/// `build` and `profiles` sections are skipped.
fn parse_pom(content: &str) -> Result<ParsedPom> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut pom = ParsedPom::default();
    let mut stack: Vec<String> = Vec::new();
    let mut current: RawDependency = RawDependency::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if tag == "dependency" && stack_is(&stack, &["project", "dependencies"]) {
                    current = RawDependency::default();
                }
                stack.push(tag);
            }
            Ok(Event::End(_)) => {
                if stack_is(&stack, &["project", "dependencies", "dependency"]) {
                    if !current.artifact_id.is_empty() {
                        pom.dependencies.push(std::mem::take(&mut current));
                    }
                }
                stack.pop();
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                if stack_is(&stack, &["project", "groupId"]) {
                    pom.group_id = text;
                } else if stack_is(&stack, &["project", "artifactId"]) {
                    pom.artifact_id = text;
                } else if stack_is(&stack, &["project", "name"]) {
                    pom.name = text;
                } else if stack_is(&stack, &["project", "version"]) {
                    pom.version = text;
                } else if stack_is(&stack, &["project", "parent", "version"]) {
                    pom.parent_version = text;
                } else if stack.len() == 3 && stack_is(&stack[..2], &["project", "properties"]) {
                    pom.properties.insert(stack[2].clone(), text);
                } else if stack.len() == 4
                    && stack_is(&stack[..3], &["project", "dependencies", "dependency"])
                {
                    match stack[3].as_str() {
                        "groupId" => current.group_id = text,
                        "artifactId" => current.artifact_id = text,
                        "version" => current.version = text,
                        "scope" => current.scope = text,
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("malformed pom.xml: {}", e),
            _ => {}
        }
        buf.clear();
    }

    if pom.artifact_id.is_empty() {
        bail!("pom.xml declares no artifactId");
    }
    Ok(pom)
}

fn stack_is(stack: &[String], expected: &[&str]) -> bool {
    stack.len() == expected.len() && stack.iter().zip(expected).all(|(a, b)| a == b)
}

/// Resolve `${...}` placeholders from `<properties>` and the `project.*`
/// builtins. Returns `None` when any placeholder stays unresolved.
fn interpolate(raw: &str, pom: &ParsedPom, effective_version: &str) -> Option<String> {
    if !raw.contains("${") {
        return Some(raw.to_string());
    }

    let placeholder = Regex::new(r"\$\{([^}]+)\}").expect("valid regex");
    let mut unresolved = false;
    let result = placeholder.replace_all(raw, |caps: &regex::Captures| {
        let key = &caps[1];
        let value = match key {
            "project.version" | "version" => Some(effective_version),
            "project.groupId" => Some(pom.group_id.as_str()),
            _ => pom.properties.get(key).map(String::as_str),
        };
        match value {
            Some(v) => v.to_string(),
            None => {
                unresolved = true;
                String::new()
            }
        }
    });

    if unresolved {
        None
    } else {
        Some(result.into_owned())
    }
}

fn materialize(pom: ParsedPom, local_repository: &Path) -> MavenProject {
    let version = if pom.version.is_empty() {
        pom.parent_version.clone()
    } else {
        pom.version.clone()
    };
    let name = if pom.name.is_empty() {
        pom.artifact_id.clone()
    } else {
        pom.name.clone()
    };

    let mut declared: Vec<ProjectArtifact> = Vec::new();
    for dep in &pom.dependencies {
        let dep_version = interpolate(&dep.version, &pom, &version).unwrap_or_default();
        let coordinate =
            ArtifactCoordinate::new(dep.group_id.clone(), dep.artifact_id.clone(), dep_version);

        // Managed versions (empty or unresolvable) cannot be mapped to a jar.
        let file = if coordinate.version.is_empty() {
            None
        } else {
            let candidate = local_repository.join(coordinate.jar_path());
            candidate.is_file().then_some(candidate)
        };

        declared.push(ProjectArtifact {
            coordinate,
            scope: Scope::parse(&dep.scope),
            file,
        });
    }

    let artifacts: Vec<ProjectArtifact> = declared
        .iter()
        .filter(|a| a.file.is_some())
        .cloned()
        .collect();

    MavenProject {
        name,
        version,
        artifacts,
        dependency_artifacts: declared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>shop</artifactId>
  <version>1.2.0</version>
  <name>Shop Service</name>
  <properties>
    <jackson.version>2.9.8</jackson.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>managed-only</artifactId>
        <version>9.9</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>javax</groupId>
      <artifactId>javaee-api</artifactId>
      <version>7.0</version>
      <scope>provided</scope>
    </dependency>
    <dependency>
      <groupId>com.fasterxml.jackson.core</groupId>
      <artifactId>jackson-databind</artifactId>
      <version>${jackson.version}</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>shop-model</artifactId>
      <version>${project.version}</version>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>bom-managed</artifactId>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_parse_identity_and_dependencies() {
        let pom = parse_pom(POM).unwrap();
        assert_eq!(pom.artifact_id, "shop");
        assert_eq!(pom.name, "Shop Service");
        assert_eq!(pom.version, "1.2.0");
        // dependencyManagement entries are not project dependencies
        assert_eq!(pom.dependencies.len(), 5);
        assert_eq!(pom.dependencies[0].scope, "provided");
        assert_eq!(pom.dependencies[2].scope, "test");
    }

    #[test]
    fn test_property_and_builtin_interpolation() {
        let dir = tempfile::tempdir().unwrap();
        let project = materialize(parse_pom(POM).unwrap(), dir.path());

        let jackson = &project.dependency_artifacts[1];
        assert_eq!(jackson.coordinate.version, "2.9.8");

        let model = &project.dependency_artifacts[3];
        assert_eq!(model.coordinate.version, "1.2.0");
    }

    #[test]
    fn test_managed_version_stays_declared_only() {
        let dir = tempfile::tempdir().unwrap();
        let project = materialize(parse_pom(POM).unwrap(), dir.path());

        let managed = &project.dependency_artifacts[4];
        assert_eq!(managed.coordinate.version, "");
        assert!(managed.file.is_none());
    }

    #[test]
    fn test_materialization_picks_up_local_jars() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir
            .path()
            .join("javax/javaee-api/7.0/javaee-api-7.0.jar");
        std::fs::create_dir_all(jar.parent().unwrap()).unwrap();
        std::fs::write(&jar, b"jar").unwrap();

        let project = materialize(parse_pom(POM).unwrap(), dir.path());
        assert_eq!(project.artifacts.len(), 1);
        assert_eq!(project.artifacts[0].coordinate.artifact_id, "javaee-api");
        assert_eq!(project.artifacts[0].file.as_deref(), Some(jar.as_path()));
        // declared list still carries everything
        assert_eq!(project.dependency_artifacts.len(), 5);
    }

    #[test]
    fn test_name_falls_back_to_artifact_id() {
        let pom = parse_pom(
            r#"<project><artifactId>bare</artifactId><version>0.1</version></project>"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let project = materialize(pom, dir.path());
        assert_eq!(project.name, "bare");
    }

    #[test]
    fn test_version_falls_back_to_parent() {
        let pom = parse_pom(
            r#"<project>
  <parent>
    <groupId>com.example</groupId>
    <artifactId>parent</artifactId>
    <version>3.0.0</version>
  </parent>
  <artifactId>child</artifactId>
</project>"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let project = materialize(pom, dir.path());
        assert_eq!(project.version, "3.0.0");
    }

    #[test]
    fn test_load_project_requires_pom() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project(dir.path(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("pom.xml"));
    }

    #[test]
    fn test_load_project_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), POM).unwrap();
        let project = load_project(dir.path(), dir.path()).unwrap();
        assert_eq!(project.name, "Shop Service");
        assert_eq!(project.version, "1.2.0");
        assert_eq!(project.dependency_artifacts.len(), 5);
    }
}
