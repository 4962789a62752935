//! Command implementations for the fsaudit CLI

pub mod config;
pub mod interactive;
pub mod scan;
