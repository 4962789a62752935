use anyhow::Result;
use clap::Parser;
use fsaudit::cli::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
