//! tldoc CLI - generate the HTML reference for a TL schema

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tldoc_core::{DocsConfig, DocsGenerator, SchemaParser};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tldoc")]
#[command(version = tldoc_core::VERSION)]
#[command(about = "Generate a cross-linked HTML reference from a TL schema", long_about = None)]
struct Cli {
    /// Schema file to document
    #[arg(default_value = "scheme.tl")]
    schema: PathBuf,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (tldoc.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn default_filter(&self) -> EnvFilter {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(format!("warn,tldoc={level},tldoc_core={level}"))
    }

    /// Config file (or defaults) with command-line overrides applied
    fn resolve_config(&self) -> Result<DocsConfig> {
        let config = match &self.config {
            Some(path) => DocsConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => DocsConfig::default(),
        };
        Ok(match &self.output {
            Some(output) => config.with_output_dir(output),
            None => config,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; RUST_LOG takes precedence over -v/-q
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.default_filter());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve_config()?;
    run(&cli.schema, config)
}

fn run(schema_path: &Path, config: DocsConfig) -> Result<()> {
    if !schema_path.is_file() {
        bail!("schema file not found: {}", schema_path.display());
    }

    info!(schema = %schema_path.display(), "reading schema");
    let schema = SchemaParser::parse_file(schema_path)
        .with_context(|| format!("failed to parse {}", schema_path.display()))?;

    let output = config.output_dir.clone();
    let report = DocsGenerator::new(config)
        .generate(&schema)
        .with_context(|| format!("failed to generate documentation into {}", output.display()))?;

    match report.layer {
        Some(layer) => println!(
            "Generated {} pages for layer {} in {}",
            report.total_pages(),
            layer,
            output.display()
        ),
        None => println!(
            "Generated {} pages in {}",
            report.total_pages(),
            output.display()
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tldoc"]).unwrap();
        assert_eq!(cli.schema, PathBuf::from("scheme.tl"));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.resolve_config().unwrap().output_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_output_overrides_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("tldoc.toml");
        std::fs::write(&config_path, "output-dir = \"from-config\"\nwrite-default-assets = false\n")
            .unwrap();

        let config_arg = config_path.to_str().unwrap();
        let cli = Cli::try_parse_from(["tldoc", "api.tl", "-c", config_arg]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from-config"));
        assert!(!config.write_default_assets);

        let cli = Cli::try_parse_from(["tldoc", "api.tl", "-c", config_arg, "-o", "site"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap().output_dir, PathBuf::from("site"));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert_eq!(Cli::try_parse_from(["tldoc", "-vv"]).unwrap().verbose, 2);
        assert!(Cli::try_parse_from(["tldoc", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_run_writes_pages() {
        let tmp = TempDir::new().unwrap();
        let schema = tmp.path().join("scheme.tl");
        std::fs::write(&schema, "// LAYER 1\npong#347773c5 ping_id:long = Pong;\n---functions---\nping#7abe77ec ping_id:long = Pong;\n")
            .unwrap();
        let output = tmp.path().join("docs");

        run(&schema, DocsConfig::default().with_output_dir(&output)).unwrap();
        assert!(output.join("methods/ping.html").is_file());
        assert!(output.join("constructors/pong.html").is_file());
        assert!(output.join("types/pong.html").is_file());
    }

    #[test]
    fn test_run_missing_schema() {
        let tmp = TempDir::new().unwrap();
        let err = run(&tmp.path().join("missing.tl"), DocsConfig::default()).unwrap_err();
        assert!(err.to_string().contains("schema file not found"));
    }
}
