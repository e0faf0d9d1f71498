//! Output backends for the analyzed resource model.
//!
//! - [`text`] — plaintext, AsciiDoc and Markdown renderers; respect
//!   `inline-prettify` for embedded JSON bodies.
//! - [`swagger`] — Swagger 2.0 JSON with host, scheme set and optional tags.

pub mod swagger;
pub mod text;

use std::collections::HashMap;

use crate::config::Settings;
use crate::engine::AnalyzedProject;
use crate::error::{AnalyzerError, Result};

/// The closed set of supported output formats, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Plaintext,
    Asciidoc,
    Markdown,
    Swagger,
}

impl BackendKind {
    const ALL: [BackendKind; 4] = [
        BackendKind::Plaintext,
        BackendKind::Asciidoc,
        BackendKind::Markdown,
        BackendKind::Swagger,
    ];

    /// Case-insensitive lookup. Unknown names fail listing all valid ones.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "plaintext" => Ok(BackendKind::Plaintext),
            "asciidoc" => Ok(BackendKind::Asciidoc),
            "markdown" => Ok(BackendKind::Markdown),
            "swagger" => Ok(BackendKind::Swagger),
            _ => Err(AnalyzerError::invalid_configuration(
                "backend",
                format!(
                    "backend '{}' not valid, valid values are: {}",
                    name,
                    Self::valid_names()
                ),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Plaintext => "plaintext",
            BackendKind::Asciidoc => "asciidoc",
            BackendKind::Markdown => "markdown",
            BackendKind::Swagger => "swagger",
        }
    }

    /// Canonical output file name, unique per format.
    pub fn file_name(&self) -> &'static str {
        match self {
            BackendKind::Plaintext => "rest-resources.txt",
            BackendKind::Asciidoc => "rest-resources.adoc",
            BackendKind::Markdown => "rest-resources.md",
            BackendKind::Swagger => "swagger.json",
        }
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn construct(&self) -> Box<dyn Backend> {
        match self {
            BackendKind::Plaintext => Box::new(text::PlaintextBackend::default()),
            BackendKind::Asciidoc => Box::new(text::AsciidocBackend::default()),
            BackendKind::Markdown => Box::new(text::MarkdownBackend::default()),
            BackendKind::Swagger => Box::new(swagger::SwaggerBackend::default()),
        }
    }
}

/// Swagger scheme enumeration, the only values the swagger backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

impl Scheme {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "ws" => Ok(Scheme::Ws),
            "wss" => Ok(Scheme::Wss),
            _ => Err(AnalyzerError::invalid_configuration(
                "swagger-schemes",
                format!(
                    "scheme '{}' not valid, valid values are: {}",
                    name,
                    Self::valid_names()
                ),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }

    pub fn valid_names() -> &'static str {
        "http, https, ws, wss"
    }
}

/// Option map keys understood by the shipped backends.
pub mod options {
    pub const SWAGGER_SCHEMES: &str = "swagger.schemes";
    pub const DOMAIN: &str = "swagger.domain";
    pub const RENDER_SWAGGER_TAGS: &str = "swagger.tags";
    pub const SWAGGER_TAGS_PATH_OFFSET: &str = "swagger.tags.path.offset";
    pub const INLINE_PRETTIFY: &str = "inline.prettify";
}

/// A configured output backend. Implementations render the full report as a
/// single string; nothing is written until the text is complete.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Apply the option map. Backends validate the options they consume and
    /// ignore the rest; configuring twice with the same map is equivalent.
    fn configure(&mut self, options: &HashMap<String, String>) -> Result<()>;

    fn render(&self, project: &AnalyzedProject) -> String;
}

/// Translate user settings into the option map every backend receives.
///
/// All keys are always present; each backend picks what it understands.
pub fn option_map(settings: &Settings) -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert(
        options::SWAGGER_SCHEMES.to_string(),
        settings.swagger_schemes.join(","),
    );
    map.insert(options::DOMAIN.to_string(), settings.deployed_domain.clone());
    map.insert(
        options::RENDER_SWAGGER_TAGS.to_string(),
        settings.render_swagger_tags.to_string(),
    );
    map.insert(
        options::SWAGGER_TAGS_PATH_OFFSET.to_string(),
        settings.swagger_tags_path_offset.to_string(),
    );
    map.insert(
        options::INLINE_PRETTIFY.to_string(),
        settings.inline_prettify.to_string(),
    );
    map
}

/// Construct and configure the backend for `kind`.
///
/// Stateless per call: the same settings yield a functionally equivalent
/// backend every time.
pub fn configure_backend(kind: BackendKind, settings: &Settings) -> Result<Box<dyn Backend>> {
    let mut backend = kind.construct();
    backend.configure(&option_map(settings))?;
    Ok(backend)
}

/// Shared by the configure impls: parse a boolean option, defaulting when
/// the key is absent.
fn bool_option(options: &HashMap<String, String>, key: &'static str, default: bool) -> Result<bool> {
    match options.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<bool>().map_err(|_| {
            AnalyzerError::invalid_configuration(
                key,
                format!("'{}' is not a boolean, valid values are: true, false", raw),
            )
        }),
    }
}
