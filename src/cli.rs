use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "jaxrs-analyzr",
    about = "Analyze compiled JAX-RS projects and generate REST resource documentation",
    version
)]
pub struct Cli {
    /// Maven project path to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output backend: plaintext, asciidoc, markdown or swagger [default: plaintext]
    #[arg(long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// The domain where the project will be deployed (swagger host field)
    #[arg(long, value_name = "DOMAIN")]
    pub deployed_domain: Option<String>,

    /// Swagger schemes, comma-separated [default: http]
    #[arg(long, value_name = "SCHEMES", value_delimiter = ',')]
    pub swagger_schemes: Option<Vec<String>>,

    /// Generate Swagger tags from resource paths
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub render_swagger_tags: Option<bool>,

    /// Number of leading path segments skipped when deriving a tag [default: 0]
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub swagger_tags_path_offset: Option<i64>,

    /// Prettify inline JSON request/response bodies in text backends [default: true]
    #[arg(long, value_name = "BOOL")]
    pub inline_prettify: Option<bool>,

    /// Fully-qualified class names ignored as root resources, comma-separated
    #[arg(long, value_name = "CLASSES", value_delimiter = ',')]
    pub ignored_root_resources: Vec<String>,

    /// Compiled classes root [default: <path>/target/classes]
    #[arg(long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Build directory the report subdirectory is created under [default: <path>/target]
    #[arg(long, value_name = "DIR")]
    pub build_directory: Option<PathBuf>,

    /// Project source root passed to the engine [default: <path>/src/main/java]
    #[arg(long, value_name = "DIR")]
    pub source_directory: Option<PathBuf>,

    /// Subdirectory under the build directory the report is written to [default: jaxrs-analyzer]
    #[arg(long, value_name = "NAME")]
    pub resources_dir: Option<String>,

    /// Version of the analyzer runtime to resolve [default: this tool's version]
    #[arg(long, value_name = "VERSION")]
    pub analyzer_version: Option<String>,

    /// Platform API coordinate to inject next to the analyzer runtime (group:artifact:version)
    #[arg(long, value_name = "COORDINATE")]
    pub platform_api: Option<String>,

    /// Remote repository URL to resolve artifacts from (repeatable) [default: Maven Central]
    #[arg(long, value_name = "URL")]
    pub repository: Vec<String>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}
