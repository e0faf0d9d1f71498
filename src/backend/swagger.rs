use std::collections::{BTreeSet, HashMap};

use serde_json::{json, Map, Value};

use crate::engine::AnalyzedProject;
use crate::error::{AnalyzerError, Result};

use super::{bool_option, options, Backend, Scheme};

/// Host used when no deployment domain is configured.
const DEFAULT_DOMAIN: &str = "example.com";

/// Renders the resource model as a Swagger 2.0 document.
pub struct SwaggerBackend {
    schemes: BTreeSet<Scheme>,
    domain: String,
    render_tags: bool,
    tags_path_offset: usize,
}

impl Default for SwaggerBackend {
    fn default() -> Self {
        Self {
            schemes: BTreeSet::from([Scheme::Http]),
            domain: String::new(),
            render_tags: false,
            tags_path_offset: 0,
        }
    }
}

impl SwaggerBackend {
    /// Tag for a resource path: the first segment after skipping
    /// `tags_path_offset` leading segments. Template segments (`{id}`)
    /// never become tags.
    fn derive_tag(&self, resource_path: &str) -> Option<String> {
        resource_path
            .split('/')
            .filter(|s| !s.is_empty())
            .nth(self.tags_path_offset)
            .filter(|s| !s.starts_with('{'))
            .map(str::to_string)
    }
}

impl Backend for SwaggerBackend {
    fn name(&self) -> &'static str {
        "swagger"
    }

    fn configure(&mut self, options_map: &HashMap<String, String>) -> Result<()> {
        if let Some(raw) = options_map.get(options::SWAGGER_SCHEMES) {
            let mut schemes = BTreeSet::new();
            for token in raw.split(',').filter(|t| !t.trim().is_empty()) {
                schemes.insert(Scheme::from_name(token)?);
            }
            if schemes.is_empty() {
                return Err(AnalyzerError::invalid_configuration(
                    options::SWAGGER_SCHEMES,
                    format!(
                        "at least one scheme is required, valid values are: {}",
                        Scheme::valid_names()
                    ),
                ));
            }
            self.schemes = schemes;
        }

        if let Some(domain) = options_map.get(options::DOMAIN) {
            self.domain = domain.clone();
        }

        self.render_tags = bool_option(options_map, options::RENDER_SWAGGER_TAGS, false)?;

        if let Some(raw) = options_map.get(options::SWAGGER_TAGS_PATH_OFFSET) {
            let offset = raw.parse::<i64>().map_err(|_| {
                AnalyzerError::invalid_configuration(
                    options::SWAGGER_TAGS_PATH_OFFSET,
                    format!("'{}' is not an integer", raw),
                )
            })?;
            if offset < 0 {
                return Err(AnalyzerError::invalid_configuration(
                    options::SWAGGER_TAGS_PATH_OFFSET,
                    format!("must be zero or positive, got {}", offset),
                ));
            }
            self.tags_path_offset = offset as usize;
        }

        Ok(())
    }

    fn render(&self, project: &AnalyzedProject) -> String {
        let mut paths = Map::new();
        let mut tags = BTreeSet::new();

        for resource in &project.resources.resources {
            let tag = if self.render_tags {
                self.derive_tag(&resource.path)
            } else {
                None
            };
            if let Some(tag) = &tag {
                tags.insert(tag.clone());
            }

            let mut operations = Map::new();
            for method in &resource.methods {
                let mut operation = Map::new();
                if !method.request_media_types.is_empty() {
                    operation.insert("consumes".to_string(), json!(method.request_media_types));
                }
                if !method.response_media_types.is_empty() {
                    operation.insert("produces".to_string(), json!(method.response_media_types));
                }
                if let Some(tag) = &tag {
                    operation.insert("tags".to_string(), json!([tag]));
                }

                let mut responses = Map::new();
                for response in &method.responses {
                    responses.insert(response.status.to_string(), json!({ "description": "" }));
                }
                operation.insert("responses".to_string(), Value::Object(responses));

                operations.insert(method.method.to_lowercase(), Value::Object(operation));
            }

            let key = format!("/{}", resource.path.trim_start_matches('/'));
            paths.insert(key, Value::Object(operations));
        }

        let host = if self.domain.is_empty() {
            DEFAULT_DOMAIN
        } else {
            &self.domain
        };
        let base_path = format!("/{}", project.resources.base_path.trim_start_matches('/'));
        let schemes: Vec<&str> = self.schemes.iter().map(Scheme::as_str).collect();

        let mut document = Map::new();
        document.insert("swagger".to_string(), json!("2.0"));
        document.insert(
            "info".to_string(),
            json!({ "title": project.name, "version": project.version }),
        );
        document.insert("host".to_string(), json!(host));
        document.insert("basePath".to_string(), json!(base_path));
        document.insert("schemes".to_string(), json!(schemes));
        if self.render_tags {
            let tag_objects: Vec<Value> = tags.iter().map(|t| json!({ "name": t })).collect();
            document.insert("tags".to_string(), Value::Array(tag_objects));
        }
        document.insert("paths".to_string(), Value::Object(paths));

        // Object keys serialize in sorted order, so output is stable.
        serde_json::to_string_pretty(&Value::Object(document))
            .expect("swagger document serializes")
    }
}
