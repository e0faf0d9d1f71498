use std::collections::HashMap;

use crate::engine::{AnalyzedProject, ResourceMethod};
use crate::error::Result;

use super::{bool_option, options, Backend};

/// Render an embedded JSON body, pretty-printed when requested.
///
/// Bodies that are not valid JSON pass through untouched either way.
fn format_body(raw: &str, prettify: bool) -> String {
    if !prettify {
        return raw.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// `GET rest/items` style signature: verb plus base path joined with the
/// resource path.
fn method_signature(base_path: &str, resource_path: &str, method: &ResourceMethod) -> String {
    let path = if base_path.is_empty() {
        resource_path.to_string()
    } else {
        format!(
            "{}/{}",
            base_path.trim_end_matches('/'),
            resource_path.trim_start_matches('/')
        )
    };
    format!("{} {}", method.method, path)
}

fn status_codes(method: &ResourceMethod) -> String {
    method
        .responses
        .iter()
        .map(|r| r.status.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct PlaintextBackend {
    prettify: bool,
}

impl Default for PlaintextBackend {
    fn default() -> Self {
        Self { prettify: true }
    }
}

impl Backend for PlaintextBackend {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn configure(&mut self, options_map: &HashMap<String, String>) -> Result<()> {
        self.prettify = bool_option(options_map, options::INLINE_PRETTIFY, true)?;
        Ok(())
    }

    fn render(&self, project: &AnalyzedProject) -> String {
        let mut out = String::new();
        out.push_str(&format!("REST resources of {}:\n", project.name));
        out.push_str(&format!("{}\n", project.version));

        for resource in &project.resources.resources {
            for method in &resource.methods {
                out.push('\n');
                out.push_str(&format!(
                    "{}:\n",
                    method_signature(&project.resources.base_path, &resource.path, method)
                ));

                out.push_str(" Request:\n");
                match &method.request_body {
                    Some(body) => {
                        if !method.request_media_types.is_empty() {
                            out.push_str(&format!(
                                "  Content-Type: {}\n",
                                method.request_media_types.join(", ")
                            ));
                        }
                        out.push_str(&format!("  {}\n", format_body(body, self.prettify)));
                    }
                    None => out.push_str("  No body\n"),
                }

                out.push_str(" Response:\n");
                if !method.response_media_types.is_empty() {
                    out.push_str(&format!(
                        "  Content-Type: {}\n",
                        method.response_media_types.join(", ")
                    ));
                }
                out.push_str(&format!("  Status Codes: {}\n", status_codes(method)));
                for response in &method.responses {
                    if let Some(body) = &response.body {
                        out.push_str(&format!(
                            "   Response Body: {}\n",
                            format_body(body, self.prettify)
                        ));
                    }
                }
            }
        }

        out
    }
}

pub struct AsciidocBackend {
    prettify: bool,
}

impl Default for AsciidocBackend {
    fn default() -> Self {
        Self { prettify: true }
    }
}

impl Backend for AsciidocBackend {
    fn name(&self) -> &'static str {
        "asciidoc"
    }

    fn configure(&mut self, options_map: &HashMap<String, String>) -> Result<()> {
        self.prettify = bool_option(options_map, options::INLINE_PRETTIFY, true)?;
        Ok(())
    }

    fn render(&self, project: &AnalyzedProject) -> String {
        let mut out = String::new();
        out.push_str(&format!("= REST resources of {}\n", project.name));
        out.push_str(&format!("{}\n", project.version));

        for resource in &project.resources.resources {
            for method in &resource.methods {
                out.push('\n');
                out.push_str(&format!(
                    "== `{}`\n\n",
                    method_signature(&project.resources.base_path, &resource.path, method)
                ));

                out.push_str("=== Request\n");
                match &method.request_body {
                    Some(body) => {
                        if !method.request_media_types.is_empty() {
                            out.push_str(&format!(
                                "_Content-Type_: `{}`\n\n",
                                method.request_media_types.join(", ")
                            ));
                        }
                        out.push_str(&format!(
                            "[source,json]\n----\n{}\n----\n",
                            format_body(body, self.prettify)
                        ));
                    }
                    None => out.push_str("_No body_\n"),
                }

                out.push_str("\n=== Response\n");
                if !method.response_media_types.is_empty() {
                    out.push_str(&format!(
                        "_Content-Type_: `{}`\n\n",
                        method.response_media_types.join(", ")
                    ));
                }
                out.push_str(&format!("Status codes: {}\n", status_codes(method)));
                for response in &method.responses {
                    if let Some(body) = &response.body {
                        out.push_str(&format!(
                            "\n[source,json]\n----\n{}\n----\n",
                            format_body(body, self.prettify)
                        ));
                    }
                }
            }
        }

        out
    }
}

pub struct MarkdownBackend {
    prettify: bool,
}

impl Default for MarkdownBackend {
    fn default() -> Self {
        Self { prettify: true }
    }
}

impl Backend for MarkdownBackend {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn configure(&mut self, options_map: &HashMap<String, String>) -> Result<()> {
        self.prettify = bool_option(options_map, options::INLINE_PRETTIFY, true)?;
        Ok(())
    }

    fn render(&self, project: &AnalyzedProject) -> String {
        let mut out = String::new();
        out.push_str(&format!("# REST resources of {}\n", project.name));
        out.push_str(&format!("{}\n", project.version));

        for resource in &project.resources.resources {
            for method in &resource.methods {
                out.push('\n');
                out.push_str(&format!(
                    "## `{}`\n\n",
                    method_signature(&project.resources.base_path, &resource.path, method)
                ));

                out.push_str("**Request**\n\n");
                match &method.request_body {
                    Some(body) => {
                        if !method.request_media_types.is_empty() {
                            out.push_str(&format!(
                                "Content-Type: `{}`\n\n",
                                method.request_media_types.join(", ")
                            ));
                        }
                        out.push_str(&format!(
                            "```json\n{}\n```\n",
                            format_body(body, self.prettify)
                        ));
                    }
                    None => out.push_str("_No body_\n"),
                }

                out.push_str("\n**Response**\n\n");
                if !method.response_media_types.is_empty() {
                    out.push_str(&format!(
                        "Content-Type: `{}`\n\n",
                        method.response_media_types.join(", ")
                    ));
                }
                out.push_str(&format!("Status codes: {}\n", status_codes(method)));
                for response in &method.responses {
                    if let Some(body) = &response.body {
                        out.push_str(&format!(
                            "\n```json\n{}\n```\n",
                            format_body(body, self.prettify)
                        ));
                    }
                }
            }
        }

        out
    }
}
