//! `stability` - injects the API stability overview into generated docs
//!
//! Run after the API docs have been generated. With no arguments it reads
//! `out/doc/api/all.json` and updates `documentation.{md,html,json}` in the
//! same directory.

use anyhow::{Context, Result};
use clap::Parser;
use stability_etch::{BuildPrinter, StabilityBuilder, StabilityConfig};
use std::path::PathBuf;

/// Inject the API stability overview into generated documentation
#[derive(Debug, Parser)]
#[command(name = "stability", version, about)]
struct Cli {
    /// Directory holding all.json and the generated documentation pages
    #[arg(value_name = "DIR")]
    source_dir: Option<PathBuf>,

    /// Same as the positional DIR
    #[arg(long = "source-dir", value_name = "DIR", conflicts_with = "source_dir")]
    source_dir_flag: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "STABILITY_CONFIG")]
    config: Option<PathBuf>,

    /// Fail when a page has no stability markers
    #[arg(long)]
    strict: bool,

    /// Also write the rows to stability.json
    #[arg(long)]
    stability_json: bool,

    /// Compute the overview without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Merge the command line over the configuration file (or defaults)
    fn into_config(self) -> Result<StabilityConfig> {
        let mut config = match &self.config {
            Some(path) => StabilityConfig::from_toml_file(path)
                .with_context(|| format!("loading config at {}", path.display()))?,
            None => StabilityConfig::default(),
        };

        if let Some(dir) = self.source_dir_flag.or(self.source_dir) {
            config.source_dir = dir;
        }
        config.strict |= self.strict;
        config.emit_stability_json |= self.stability_json;
        config.dry_run |= self.dry_run;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Use STABILITY_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("STABILITY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let use_color = !cli.no_color;
    let config = cli.into_config()?;
    let source_dir = config.source_dir.clone();

    let output = StabilityBuilder::from_config(config)
        .build()
        .with_context(|| format!("updating stability overview in {}", source_dir.display()))?;

    BuildPrinter::new(&output, use_color).print_to_stdout();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Parse without picking up a config path from the developer's shell
    fn parse(args: &[&str]) -> Cli {
        std::env::remove_var("STABILITY_CONFIG");
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["stability"]);
        let config = cli.into_config().unwrap();
        assert_eq!(config, StabilityConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = parse(&[
            "stability",
            "build/api",
            "--strict",
            "--stability-json",
            "--dry-run",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("build/api"));
        assert!(config.strict);
        assert!(config.emit_stability_json);
        assert!(config.dry_run);
    }

    #[test]
    fn test_source_dir_flag() {
        let config = parse(&["stability", "--source-dir", "build/api"])
            .into_config()
            .unwrap();
        assert_eq!(config.source_dir, PathBuf::from("build/api"));
    }

    #[test]
    fn test_source_dir_flag_conflicts_with_positional() {
        std::env::remove_var("STABILITY_CONFIG");
        let err = Cli::try_parse_from(["stability", "a", "--source-dir", "b"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stability.toml");
        fs::write(&path, "source_dir = \"from/config\"\nstrict = true\n").unwrap();

        let cli = parse(&["stability", "--config", path.to_str().unwrap()]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("from/config"));
        assert!(config.strict);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = parse(&["stability", "--config", "/nonexistent/stability.toml"]);
        assert!(cli.into_config().is_err());
    }
}
