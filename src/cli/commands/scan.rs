use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::AuditConfig;
use crate::report::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to analyze
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Size in bytes at or above which a file is reported as large
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Number of worker threads (0 = auto)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep lists in completion order instead of sorting them
    #[arg(long)]
    pub no_sort: bool,
}

pub fn execute(args: ScanArgs, config: &AuditConfig, output: &Output) -> Result<()> {
    // Apply CLI overrides
    let mut config = config.clone();
    if let Some(workers) = args.workers {
        config.scan.workers = workers;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.no_sort {
        config.output.sort = false;
    }

    let analyzer = config.analyzer();
    let chatty = config.output.format == OutputFormat::Text;
    if chatty {
        output.verbose(&format!(
            "Analyzing {} with {} workers",
            args.directory.display(),
            analyzer.workers()
        ));
    }

    let mut run_report = analyzer
        .analyze(&args.directory, args.threshold)
        .with_context(|| format!("Failed to analyze {}", args.directory.display()))?;

    if config.output.sort {
        run_report.sort();
    }

    print!("{}", report::render(&run_report, config.output.format)?);

    if chatty {
        output.success(&report::summary_line(&run_report));
        let skipped = run_report.stats.files_skipped();
        if skipped > 0 {
            output.warning(&format!("{skipped} files could not be read and were skipped"));
        }
    }

    Ok(())
}
