use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::audit::{Analyzer, resolve_threshold};
use crate::config::AuditConfig;
use crate::report::{render_text, summary_line};

/// Typing this at the directory prompt ends the session
pub const EXIT_COMMAND: &str = "1";

/// Run the prompt loop on stdin/stdout until the user exits
pub fn execute(config: &AuditConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), config.analyzer(), config.output.sort).run()
}

struct Request {
    directory: PathBuf,
    threshold: Option<i64>,
}

/// Request/response loop: each iteration is a fresh, independent `analyze` call
pub struct Session<R, W> {
    input: R,
    out: W,
    analyzer: Analyzer,
    sort: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, analyzer: Analyzer, sort: bool) -> Self {
        Self {
            input,
            out,
            analyzer,
            sort,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "If you want to exit press '{EXIT_COMMAND}'")?;
            let Some(request) = self.read_request()? else {
                return Ok(());
            };

            writeln!(self.out, "Analyzing directory...")?;
            match self.analyzer.analyze(&request.directory, request.threshold) {
                Ok(mut report) => {
                    if self.sort {
                        report.sort();
                    }
                    write!(self.out, "{}", render_text(&report))?;
                    writeln!(self.out, "\n{}", summary_line(&report))?;
                }
                Err(err) => writeln!(self.out, "Error: {err}")?,
            }
        }
    }

    /// `None` when the user exits or input ends
    fn read_request(&mut self) -> Result<Option<Request>> {
        loop {
            let Some(directory) = self.prompt("Enter the directory to analyze: ")? else {
                return Ok(None);
            };
            if directory == EXIT_COMMAND {
                return Ok(None);
            }

            let directory = PathBuf::from(directory);
            if !directory.is_dir() {
                writeln!(self.out, "Error: Directory does not exist. Please try again.")?;
                continue;
            }

            let message = format!(
                "Enter size threshold for large files (in bytes, default {}): ",
                self.analyzer.default_threshold_bytes()
            );
            let Some(raw) = self.prompt(&message)? else {
                return Ok(None);
            };

            match parse_threshold(&raw) {
                Ok(threshold) => return Ok(Some(Request { directory, threshold })),
                Err(reason) => writeln!(self.out, "Error: {reason}. Please try again.")?,
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Blank input means "use the default"
fn parse_threshold(raw: &str) -> Result<Option<i64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("invalid threshold '{raw}'"))?;
    resolve_threshold(Some(value), 1).map_err(|err| err.to_string())?;
    Ok(Some(value))
}
