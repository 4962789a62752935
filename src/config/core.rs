use crate::audit::Analyzer;
use crate::parallel::optimal_workers;
use crate::report::OutputFormat;
use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub scan: ScanSettings,
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    pub default_threshold_bytes: u64,
    /// 0 = derive from CPU count
    pub workers: usize,
    pub workers_per_cpu: usize,
    pub queue_per_worker: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub sort: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
}

impl AuditConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Load configuration. A custom file replaces the user and repository
    /// layers; defaults and environment still apply.
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.exists() {
                bail!("Config file not found: {}", custom_path.display());
            }
            figment = merge_file(figment, custom_path);
        } else {
            if let Some(user_dir) = Self::user_config_dir() {
                figment = figment
                    .merge(Toml::file(user_dir.join("config.toml")))
                    .merge(Json::file(user_dir.join("config.json")));
            }
            figment = figment
                .merge(Toml::file("fsaudit.toml"))
                .merge(Json::file("fsaudit.json"));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("FSAUDIT_").split("__"));

        let config: AuditConfig = figment
            .extract()
            .context("Failed to load fsaudit configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.default_threshold_bytes == 0 {
            bail!("scan.default_threshold_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Worker count after resolving `workers = 0`
    pub fn effective_workers(&self) -> usize {
        optimal_workers(self.scan.workers, self.scan.workers_per_cpu)
    }

    /// Traversal engine configured from the `[scan]` section
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.effective_workers())
            .with_queue_per_worker(self.scan.queue_per_worker)
            .with_default_threshold(self.scan.default_threshold_bytes)
    }

    fn user_config_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("fsaudit"))
    }
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AuditConfig = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .unwrap();

        assert_eq!(config.scan.default_threshold_bytes, 104_857_600);
        assert_eq!(config.scan.workers, 0);
        assert_eq!(config.scan.workers_per_cpu, 2);
        assert_eq!(config.scan.queue_per_worker, 4);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.sort);
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_toml_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            "[scan]\nworkers = 3\ndefault_threshold_bytes = 2048\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AuditConfig::load_with_custom_config(Some(&path)).unwrap();

        assert_eq!(config.scan.workers, 3);
        assert_eq!(config.effective_workers(), 3);
        assert_eq!(config.scan.default_threshold_bytes, 2048);
        assert_eq!(config.output.format, OutputFormat::Json);
        // untouched keys keep their defaults
        assert_eq!(config.scan.queue_per_worker, 4);

        let analyzer = config.analyzer();
        assert_eq!(analyzer.workers(), 3);
        assert_eq!(analyzer.default_threshold_bytes(), 2048);
    }

    #[test]
    fn test_custom_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{"output": {"sort": false}}"#).unwrap();

        let config = AuditConfig::load_with_custom_config(Some(&path)).unwrap();

        assert!(!config.output.sort);
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        let result = AuditConfig::load_with_custom_config(Some(Path::new("non_existent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_default_threshold_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zero.toml");
        fs::write(&path, "[scan]\ndefault_threshold_bytes = 0\n").unwrap();

        let err = AuditConfig::load_with_custom_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("default_threshold_bytes"));
    }
}
