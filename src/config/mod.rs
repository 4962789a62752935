//! Configuration management for fsaudit
//!
//! Layered with figment, lowest priority first:
//! embedded defaults, user config, repository config (or `--config`), `FSAUDIT_*` env.

mod core;

pub use self::core::{AuditConfig, LoggingSettings, OutputSettings, ScanSettings};
