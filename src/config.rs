use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::data::loader::DEFAULT_ROW_LIMIT;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "ev-dashboard.json";

pub const ENV_DATA_PATH: &str = "EV_DASHBOARD_DATA";
pub const ENV_ROW_LIMIT: &str = "EV_DASHBOARD_ROW_LIMIT";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(author, version, about = "Electric vehicle population dashboard")]
pub struct Args {
    /// CSV file to load at startup.
    #[arg(env = ENV_DATA_PATH)]
    pub data_path: Option<PathBuf>,
    /// Settings file; `ev-dashboard.json` is used when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Rows kept after dropping those without a location.
    #[arg(long, env = ENV_ROW_LIMIT)]
    pub row_limit: Option<usize>,
    /// Initial value of the "desired electric range" input.
    #[arg(long)]
    pub min_range: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default so a partial JSON file works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    /// Rows kept after dropping those without a location.
    pub row_limit: usize,
    /// Initial map centre as `[lat, lon]`.
    pub map_center: [f64; 2],
    /// Half-width of the initial map view, in degrees.
    pub map_span_degrees: f64,
    /// Initial value of the "desired electric range" input.
    pub default_min_range: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Electric_Vehicle_Population_Data.csv"),
            row_limit: DEFAULT_ROW_LIMIT,
            map_center: [47.6097, -122.3331],
            map_span_degrees: 0.6,
            default_min_range: 100.0,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the settings file, then command line and environment.
    ///
    /// An explicit `--config` must exist; otherwise `fallback_file` is read
    /// only if present.
    pub fn resolve(args: &Args, fallback_file: &Path) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_json_file(path)?,
            None if fallback_file.exists() => Self::from_json_file(fallback_file)?,
            None => Self::default(),
        };
        if let Some(path) = &args.data_path {
            config.data_path = path.clone();
        }
        if let Some(limit) = args.row_limit {
            config.row_limit = limit;
        }
        if let Some(min_range) = args.min_range {
            config.default_min_range = min_range;
        }
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use tempfile::tempdir;

    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ev-dashboard").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_file_or_args() {
        let dir = tempdir().unwrap();
        let cfg = DashboardConfig::resolve(&args(&[]), &dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.row_limit, 2500);
    }

    #[test]
    fn parses_flags_and_positional_path() {
        let a = args(&["--row-limit", "10", "--config", "settings.json", "data.csv"]);
        assert_eq!(a.data_path, Some(PathBuf::from("data.csv")));
        assert_eq!(a.config, Some(PathBuf::from("settings.json")));
        assert_eq!(a.row_limit, Some(10));
        assert_eq!(a.min_range, None);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Args::try_parse_from(["ev-dashboard", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["ev-dashboard", "--row-limit", "lots"]).is_err());
        assert!(Args::try_parse_from(["ev-dashboard", "a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn environment_feeds_path_and_row_limit() {
        let cmd = Args::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|name| name.to_str())
                .map(str::to_owned)
        };
        assert_eq!(env_of("data_path").as_deref(), Some(ENV_DATA_PATH));
        assert_eq!(env_of("row_limit").as_deref(), Some(ENV_ROW_LIMIT));
        assert_eq!(env_of("config"), None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, r#"{ "row_limit": 10, "map_center": [46.6, -120.5] }"#).unwrap();

        let cfg = DashboardConfig::resolve(&args(&[]), &file).unwrap();
        assert_eq!(cfg.row_limit, 10);
        assert_eq!(cfg.map_center, [46.6, -120.5]);
        assert_eq!(cfg.default_min_range, 100.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, r#"{ "row_limt": 10 }"#).unwrap();
        assert!(DashboardConfig::resolve(&args(&[]), &file).is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, r#"{ "data_path": "from_file.csv", "row_limit": 10 }"#).unwrap();

        let cfg = DashboardConfig::resolve(&args(&[]), &file).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("from_file.csv"));

        let a = args(&["--row-limit", "500", "--min-range", "42.5", "from_args.csv"]);
        let cfg = DashboardConfig::resolve(&a, &file).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("from_args.csv"));
        assert_eq!(cfg.row_limit, 500);
        assert_eq!(cfg.default_min_range, 42.5);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let a = args(&["--config", missing.to_str().unwrap()]);
        let err = DashboardConfig::resolve(&a, &dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("missing.json"), "{err:#}");
    }

    #[test]
    fn explicit_config_replaces_fallback() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(CONFIG_FILE);
        let chosen = dir.path().join("chosen.json");
        std::fs::write(&fallback, r#"{ "row_limit": 10 }"#).unwrap();
        std::fs::write(&chosen, r#"{ "map_span_degrees": 1.5 }"#).unwrap();

        let a = args(&["--config", chosen.to_str().unwrap()]);
        let cfg = DashboardConfig::resolve(&a, &fallback).unwrap();
        assert_eq!(cfg.map_span_degrees, 1.5);
        assert_eq!(cfg.row_limit, 2500);
    }
}
