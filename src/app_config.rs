//! Application configuration loading for CLI defaults.
//!
//! The config file is a flat `key = value` list (a TOML subset):
//!
//! ```text
//! catalog = "/srv/storefront/catalog.json"
//! tick_interval_ms = 150   # progress cadence
//! settle_delay_ms = 500
//! open_externally = true
//! verbosity = "verbose"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use storefront_core::SessionTiming;

use crate::cli::{Cli, DownloadArgs};

/// File-backed defaults; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Catalog JSON path used when `--catalog` is absent.
    pub catalog: Option<PathBuf>,
    /// Progress tick interval in milliseconds.
    pub tick_interval_ms: Option<u64>,
    /// Delay at 100% before hand-off, in milliseconds.
    pub settle_delay_ms: Option<u64>,
    /// Whether hand-off may try the system opener before redirecting.
    pub open_externally: Option<bool>,
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against the CLI ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(tick) = self.tick_interval_ms
            && !(1..=10_000).contains(&tick)
        {
            bail!("Invalid config value for `tick_interval_ms`: {tick}. Expected range: 1..=10000");
        }
        if let Some(settle) = self.settle_delay_ms
            && settle > 60_000
        {
            bail!("Invalid config value for `settle_delay_ms`: {settle}. Expected range: 0..=60000");
        }
        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Default tracing filter for this setting.
    #[must_use]
    pub fn level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose | Self::Debug => "debug",
            Self::Quiet => "error",
        }
    }
}

/// Settings after merging CLI flags over the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub catalog: Option<PathBuf>,
    pub timing: SessionTiming,
    pub open_externally: bool,
    pub log_level: &'static str,
}

/// Merges CLI flags over `file`; CLI values win.
#[must_use]
pub fn resolve_settings(cli: &Cli, download: Option<&DownloadArgs>, file: Option<&FileConfig>) -> ResolvedSettings {
    let file = file.cloned().unwrap_or_default();
    let defaults = SessionTiming::default();

    let tick_ms = download
        .and_then(|args| args.tick_ms)
        .or(file.tick_interval_ms);
    let settle_ms = download
        .and_then(|args| args.settle_ms)
        .or(file.settle_delay_ms);
    let timing = SessionTiming {
        tick_interval: tick_ms.map_or(defaults.tick_interval, |ms| {
            SessionTiming::from_millis(ms, 0).tick_interval
        }),
        settle_delay: settle_ms.map_or(defaults.settle_delay, std::time::Duration::from_millis),
    };

    let open_externally = !download.is_some_and(|args| args.no_open)
        && file.open_externally.unwrap_or(true);

    // Priority: quiet flag > verbose flag > config verbosity > info
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => file.verbosity.map_or("info", VerbositySetting::level),
            1 => "debug",
            _ => "trace",
        }
    };

    ResolvedSettings {
        catalog: cli.catalog.clone().or(file.catalog),
        timing,
        open_externally,
        log_level,
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/storefront/config.toml`
/// 2. `$HOME/.config/storefront/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("storefront")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("storefront")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Default config path and the config loaded from it, if the file exists.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub path: Option<PathBuf>,
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    #[must_use]
    pub fn loaded_from_file(&self) -> bool {
        self.config.is_some()
    }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(LoadedConfig::default());
    };
    if !path.exists() {
        return Ok(LoadedConfig {
            path: Some(path),
            config: None,
        });
    }
    let config = load_file_config(&path)?;
    Ok(LoadedConfig {
        path: Some(path),
        config: Some(config),
    })
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let line_no = line_index + 1;

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "catalog" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `catalog` value on line {line_no}"))?;
                cfg.catalog = Some(PathBuf::from(parsed));
            }
            "tick_interval_ms" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `tick_interval_ms` value on line {line_no}"))?;
                cfg.tick_interval_ms = Some(parsed);
            }
            "settle_delay_ms" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `settle_delay_ms` value on line {line_no}"))?;
                cfg.settle_delay_ms = Some(parsed);
            }
            "open_externally" => {
                let parsed = parse_boolean(value)
                    .with_context(|| format!("Invalid `open_externally` value on line {line_no}"))?;
                cfg.open_externally = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}
